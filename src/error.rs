//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("validation: {0}")]
    Validation(String),
}

/// Which side of a transfer an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountRole {
    Sender,
    Receiver,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Sender => f.write_str("Sender"),
            AccountRole::Receiver => f.write_str("Receiver"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Insufficient balance in sender account {account}. Available: {available}, Required: {required}")]
    InsufficientBalance {
        account: i32,
        available: Decimal,
        required: Decimal,
    },
    #[error("{role} account {account} is not active")]
    InactiveAccount { role: AccountRole, account: i32 },
    #[error("{role} account {account} not found")]
    UnknownAccount { role: AccountRole, account: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::Conflict(format!("duplicate entry: {}", db.message()));
            }
            if db.is_foreign_key_violation() {
                return AppError::Conflict(format!("referenced row constraint: {}", db.message()));
            }
        }
        AppError::Db(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("serialize response: {}", e))
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Validation(_)
            | AppError::InsufficientBalance { .. }
            | AppError::InactiveAccount { .. }
            | AppError::UnknownAccount { .. }
            | AppError::Conflict(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Short label placed in the `error` field of the response body.
    pub fn label(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Configuration Error",
            AppError::NotFound(_) => "Not Found",
            AppError::Validation(_) => "Validation Failed",
            AppError::InsufficientBalance { .. }
            | AppError::InactiveAccount { .. }
            | AppError::UnknownAccount { .. } => "Transaction failed",
            AppError::Conflict(_) => "Conflict",
            AppError::BadRequest(_) => "Bad Request",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::PayloadTooLarge(_) => "Payload Too Large",
            AppError::Db(_) | AppError::Internal(_) => "Internal Server Error",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.label().to_string(),
            details: self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_failures_map_to_bad_request() {
        let insufficient = AppError::InsufficientBalance {
            account: 101,
            available: Decimal::new(10000, 2),
            required: Decimal::new(50000, 2),
        };
        assert_eq!(insufficient.status(), StatusCode::BAD_REQUEST);
        assert!(insufficient.to_string().starts_with("Insufficient balance"));
        assert!(insufficient.to_string().contains("Available: 100.00"));

        let inactive = AppError::InactiveAccount {
            role: AccountRole::Receiver,
            account: 202,
        };
        assert_eq!(inactive.status(), StatusCode::BAD_REQUEST);
        assert_eq!(inactive.to_string(), "Receiver account 202 is not active");

        let unknown = AppError::UnknownAccount {
            role: AccountRole::Sender,
            account: 7,
        };
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown.body().error, "Transaction failed");
    }

    #[test]
    fn lookup_and_server_failures() {
        assert_eq!(AppError::NotFound("Account 5".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound("Account 5".into()).to_string(), "Account 5 not found");
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Unauthorized("bad credentials".into()).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn non_database_sqlx_errors_stay_db() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Db(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn body_carries_label_and_details() {
        let body = AppError::Validation("Amount must be a number greater than 0".into()).body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Validation Failed");
        assert_eq!(json["details"], "Amount must be a number greater than 0");
    }
}
