//! Loans and their paired loan accounts. A loan and its LOAN_ACCOUNT row are
//! always created, resized and deleted in the same database transaction.

use crate::error::AppError;
use crate::models::{
    AccountStatus, Customer, Entity, Loan, LoanAccount, LoanFilter, NewLoan, NewLoanAccount,
    Patch, UpdateLoan,
};
use crate::service::CrudService;
use crate::sql::{InsertBuilder, QueryBuf, SelectBuilder};
use sqlx::mysql::MySqlPool;

pub struct LoanService;

impl LoanService {
    pub async fn list(pool: &MySqlPool, filter: &LoanFilter) -> Result<Vec<Loan>, AppError> {
        let q = SelectBuilder::new("SELECT * FROM `LOAN`")
            .filter_eq("Customer_ID", filter.customer_id)
            .order_by("`Loan_ID`")
            .build();
        CrudService::fetch_all(pool, q).await
    }

    /// Insert the loan and its loan account (balance = amount, Active).
    pub async fn create(pool: &MySqlPool, loan: NewLoan) -> Result<Loan, AppError> {
        loan.validate()?;
        let mut tx = pool.begin().await?;
        if !CrudService::exists::<Customer, _>(&mut *tx, loan.customer_id).await? {
            return Err(AppError::NotFound(Customer::NAME.to_string()));
        }
        let insert = InsertBuilder::new(Loan::TABLE)
            .value("Amount", loan.amount)
            .value("Customer_ID", loan.customer_id)
            .value("Interest_Rate", loan.interest_rate)
            .value("Term", loan.term)
            .value("Type", loan.loan_type.as_str())
            .value("Purpose", loan.purpose.as_str())
            .value("Status", loan.status.as_str())
            .build();
        let loan_id = CrudService::insert(&mut *tx, insert).await?;

        let account = InsertBuilder::new(LoanAccount::TABLE)
            .value("Loan_ID", loan_id)
            .value("Type", loan.loan_type.as_str())
            .value("Balance", loan.amount)
            .value("Status", AccountStatus::Active.as_str())
            .build();
        let loan_acc_number = CrudService::insert(&mut *tx, account).await?;

        let created = CrudService::find::<Loan, _>(&mut *tx, loan_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("loan {} missing after insert", loan_id)))?;
        tx.commit().await?;
        tracing::info!(loan_id, loan_acc_number, customer_id = loan.customer_id, "loan created");
        Ok(created)
    }

    /// Partial update. A new amount is copied to the loan account balance.
    pub async fn update(pool: &MySqlPool, id: i32, patch: UpdateLoan) -> Result<(), AppError> {
        let amount = patch.amount;
        let q = patch
            .into_update()?
            .build(id)
            .ok_or_else(|| AppError::BadRequest("No fields to update".into()))?;
        let mut tx = pool.begin().await?;
        if !CrudService::exists::<Loan, _>(&mut *tx, id).await? {
            return Err(AppError::NotFound(Loan::NAME.to_string()));
        }
        CrudService::execute(&mut *tx, q).await?;
        if let Some(amount) = amount {
            let sync = QueryBuf {
                sql: "UPDATE `LOAN_ACCOUNT` SET `Balance` = ? WHERE `Loan_ID` = ?".into(),
                params: vec![amount.into(), id.into()],
            };
            CrudService::execute(&mut *tx, sync).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Remove the loan account first, then the loan.
    pub async fn delete(pool: &MySqlPool, id: i32) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;
        if !CrudService::exists::<Loan, _>(&mut *tx, id).await? {
            return Err(AppError::NotFound(Loan::NAME.to_string()));
        }
        for sql in [
            "DELETE FROM `LOAN_ACCOUNT` WHERE `Loan_ID` = ?",
            "DELETE FROM `AVAIL` WHERE `Loan_ID` = ?",
            "DELETE FROM `LOAN` WHERE `Loan_ID` = ?",
        ] {
            let q = QueryBuf {
                sql: sql.to_string(),
                params: vec![id.into()],
            };
            CrudService::execute(&mut *tx, q).await?;
        }
        tx.commit().await?;
        tracing::info!(loan_id = id, "loan deleted");
        Ok(())
    }

    pub async fn create_account(
        pool: &MySqlPool,
        body: NewLoanAccount,
    ) -> Result<LoanAccount, AppError> {
        body.validate()?;
        let mut tx = pool.begin().await?;
        let loan = CrudService::find::<Loan, _>(&mut *tx, body.loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(Loan::NAME.to_string()))?;
        let insert = InsertBuilder::new(LoanAccount::TABLE)
            .value("Loan_ID", loan.loan_id)
            .value("Type", body.loan_type.as_str())
            .value("Balance", body.balance.unwrap_or(loan.amount))
            .value("Status", AccountStatus::Active.as_str())
            .build();
        let id = CrudService::insert(&mut *tx, insert).await?;
        let created = CrudService::find::<LoanAccount, _>(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("loan account {} missing after insert", id)))?;
        tx.commit().await?;
        Ok(created)
    }

    pub async fn account_for_loan(pool: &MySqlPool, loan_id: i32) -> Result<LoanAccount, AppError> {
        let q = QueryBuf {
            sql: "SELECT * FROM `LOAN_ACCOUNT` WHERE `Loan_ID` = ?".into(),
            params: vec![loan_id.into()],
        };
        CrudService::fetch_optional(pool, q)
            .await?
            .ok_or_else(|| AppError::NotFound(LoanAccount::NAME.to_string()))
    }
}
