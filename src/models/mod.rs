//! Row types, request DTOs and typed partial updates for every table.
//!
//! JSON field names match the MySQL column names (`Acc_Number`, `F_Name`, ...).

pub mod account;
pub mod assignment;
pub mod customer;
pub mod employee;
pub mod loan;
pub mod payment;
pub mod reference;
pub mod transaction;

pub use account::*;
pub use assignment::*;
pub use customer::*;
pub use employee::*;
pub use loan::*;
pub use payment::*;
pub use reference::*;
pub use transaction::*;

use crate::error::AppError;
use crate::sql::UpdateBuilder;
use serde::Serialize;
use sqlx::mysql::MySqlRow;
use sqlx::FromRow;

/// A table addressed by a single integer primary key.
pub trait Entity: for<'r> FromRow<'r, MySqlRow> + Serialize + Send + Unpin + 'static {
    const TABLE: &'static str;
    const KEY: &'static str;
    /// Human name used in messages ("Account not found").
    const NAME: &'static str;
}

/// A partial update: only supplied fields become assignments.
pub trait Patch {
    type Target: Entity;

    /// Validate the supplied fields and map them to columns.
    fn into_update(self) -> Result<UpdateBuilder, AppError>;

    fn builder() -> UpdateBuilder {
        UpdateBuilder::new(Self::Target::TABLE, Self::Target::KEY)
    }
}
