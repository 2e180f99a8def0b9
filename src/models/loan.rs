use crate::error::AppError;
use crate::models::{Entity, Patch};
use crate::service::validation;
use crate::sql::UpdateBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Closed,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Closed => "Closed",
        }
    }
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Loan {
    #[serde(rename = "Loan_ID")]
    #[sqlx(rename = "Loan_ID")]
    pub loan_id: i32,
    #[serde(rename = "Customer_ID")]
    #[sqlx(rename = "Customer_ID")]
    pub customer_id: i32,
    #[serde(rename = "Amount")]
    #[sqlx(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Interest_Rate")]
    #[sqlx(rename = "Interest_Rate")]
    pub interest_rate: Decimal,
    #[serde(rename = "Term")]
    #[sqlx(rename = "Term")]
    pub term: i32,
    #[serde(rename = "Type")]
    #[sqlx(rename = "Type")]
    pub loan_type: String,
    #[serde(rename = "Purpose")]
    #[sqlx(rename = "Purpose")]
    pub purpose: String,
    #[serde(rename = "Status")]
    #[sqlx(rename = "Status")]
    pub status: String,
}

impl Entity for Loan {
    const TABLE: &'static str = "LOAN";
    const KEY: &'static str = "Loan_ID";
    const NAME: &'static str = "Loan";
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLoan {
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Customer_ID")]
    pub customer_id: i32,
    #[serde(rename = "Interest_Rate")]
    pub interest_rate: Decimal,
    #[serde(rename = "Term")]
    pub term: i32,
    #[serde(rename = "Type")]
    pub loan_type: String,
    #[serde(rename = "Purpose")]
    pub purpose: String,
    #[serde(rename = "Status", default)]
    pub status: LoanStatus,
}

impl NewLoan {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::positive("Amount", self.amount)?;
        validation::positive_int("Customer_ID", self.customer_id)?;
        validation::positive("Interest_Rate", self.interest_rate)?;
        validation::positive_int("Term", self.term)?;
        validation::required_text("Type", &self.loan_type)?;
        validation::required_text("Purpose", &self.purpose)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateLoan {
    #[serde(rename = "Status", default)]
    pub status: Option<LoanStatus>,
    #[serde(rename = "Amount", default)]
    pub amount: Option<Decimal>,
    #[serde(rename = "Interest_Rate", default)]
    pub interest_rate: Option<Decimal>,
    #[serde(rename = "Term", default)]
    pub term: Option<i32>,
    #[serde(rename = "Type", default)]
    pub loan_type: Option<String>,
    #[serde(rename = "Purpose", default)]
    pub purpose: Option<String>,
}

impl Patch for UpdateLoan {
    type Target = Loan;

    fn into_update(self) -> Result<UpdateBuilder, AppError> {
        if let Some(amount) = self.amount {
            validation::positive("Amount", amount)?;
        }
        if let Some(rate) = self.interest_rate {
            validation::positive("Interest_Rate", rate)?;
        }
        if let Some(term) = self.term {
            validation::positive_int("Term", term)?;
        }
        validation::optional_text("Type", self.loan_type.as_deref())?;
        validation::optional_text("Purpose", self.purpose.as_deref())?;
        Ok(Self::builder()
            .set_opt("Status", self.status.map(|s| s.as_str()))
            .set_opt("Amount", self.amount)
            .set_opt("Interest_Rate", self.interest_rate)
            .set_opt("Term", self.term)
            .set_opt("Type", self.loan_type)
            .set_opt("Purpose", self.purpose))
    }
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct LoanAccount {
    #[serde(rename = "Loan_Acc_Number")]
    #[sqlx(rename = "Loan_Acc_Number")]
    pub loan_acc_number: i32,
    #[serde(rename = "Loan_ID")]
    #[sqlx(rename = "Loan_ID")]
    pub loan_id: i32,
    #[serde(rename = "Type")]
    #[sqlx(rename = "Type")]
    pub loan_type: String,
    #[serde(rename = "Balance")]
    #[sqlx(rename = "Balance")]
    pub balance: Decimal,
    #[serde(rename = "Status")]
    #[sqlx(rename = "Status")]
    pub status: String,
}

impl Entity for LoanAccount {
    const TABLE: &'static str = "LOAN_ACCOUNT";
    const KEY: &'static str = "Loan_Acc_Number";
    const NAME: &'static str = "Loan account";
}

/// Body of `POST /loanAccounts`. Without a balance the loan's amount is used.
#[derive(Clone, Debug, Deserialize)]
pub struct NewLoanAccount {
    #[serde(rename = "Loan_ID")]
    pub loan_id: i32,
    #[serde(rename = "Type")]
    pub loan_type: String,
    #[serde(rename = "Balance", default)]
    pub balance: Option<Decimal>,
}

impl NewLoanAccount {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::positive_int("Loan_ID", self.loan_id)?;
        validation::required_text("Type", &self.loan_type)?;
        if let Some(balance) = self.balance {
            validation::non_negative("Balance", balance)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanFilter {
    pub customer_id: Option<i32>,
}
