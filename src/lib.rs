//! Bank API: REST backend for customers, employees, accounts, loans,
//! payments and fund transfers over MySQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, migrate, reset_database, MigrationOutcome};
pub use response::{created, error_body, message};
pub use routes::{api_routes, app};
pub use service::{CrudService, TransferService};
pub use state::AppState;
pub use store::{connect, drop_database, ensure_database_exists};
