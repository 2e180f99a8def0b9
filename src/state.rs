//! Shared application state for all routes.

use sqlx::MySqlPool;

/// Built once at process start and cloned into every router. The pool is
/// opened by `store::connect` and closed by the caller on shutdown.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
}

impl AppState {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}
