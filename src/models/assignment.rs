//! Join tables: employees managing accounts and customers availing loans.

use crate::error::AppError;
use crate::service::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Manages {
    #[serde(rename = "Emp_ID")]
    #[sqlx(rename = "Emp_ID")]
    pub emp_id: i32,
    #[serde(rename = "Acc_Number")]
    #[sqlx(rename = "Acc_Number")]
    pub acc_number: i32,
}

impl Manages {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::positive_int("Emp_ID", self.emp_id)?;
        validation::positive_int("Acc_Number", self.acc_number)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Avail {
    #[serde(rename = "Customer_ID")]
    #[sqlx(rename = "Customer_ID")]
    pub customer_id: i32,
    #[serde(rename = "Loan_ID")]
    #[sqlx(rename = "Loan_ID")]
    pub loan_id: i32,
}

impl Avail {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::positive_int("Customer_ID", self.customer_id)?;
        validation::positive_int("Loan_ID", self.loan_id)
    }
}
