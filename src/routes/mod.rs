//! Router assembly: resource routers, JSON fallback and tower layers.

mod common;
mod resources;

pub use common::{common_routes, fallback};
pub use resources::*;

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use crate::response::error_body;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// All API routes with state applied, without middleware.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .nest("/customers", customer_routes())
        .nest("/employees", employee_routes())
        .nest("/accounts", account_routes())
        .nest("/loans", loan_routes())
        .nest("/loanAccounts", loan_account_routes())
        .nest("/transactions", transaction_routes())
        .nest("/payments", payment_routes())
        .nest("/banks", bank_routes())
        .nest("/branches", branch_routes())
        .nest("/manages", manages_routes())
        .nest("/avail", avail_routes())
        .nest("/auth", auth_routes())
        .fallback(fallback)
        .with_state(state)
}

/// The full application: routes plus body limit, CORS, tracing and panic
/// recovery.
pub fn app(state: AppState, config: &AppConfig) -> Result<Router, AppError> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidValue {
            key: "CORS_ORIGIN",
            reason: e.to_string(),
        })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(api_routes(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response)))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(panic = %details, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_body("Internal Server Error", details)),
    )
        .into_response()
}
