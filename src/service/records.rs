//! Reference data, loan repayments and the two join tables.

use crate::error::AppError;
use crate::models::{
    Account, Avail, Bank, Branch, Customer, Employee, Entity, Loan, Manages, NewBank, NewBranch,
    NewPayment, Payment, PaymentFilter,
};
use crate::service::CrudService;
use crate::sql::{InsertBuilder, QueryBuf, SelectBuilder};
use sqlx::mysql::MySqlPool;

pub struct RecordService;

impl RecordService {
    pub async fn create_bank(pool: &MySqlPool, body: NewBank) -> Result<Bank, AppError> {
        body.validate()?;
        let insert = InsertBuilder::new(Bank::TABLE)
            .value("B_Name", body.name.trim())
            .value_opt("Address", body.address)
            .build();
        let id = CrudService::insert(pool, insert).await?;
        CrudService::get::<Bank>(pool, id).await
    }

    pub async fn create_branch(pool: &MySqlPool, body: NewBranch) -> Result<Branch, AppError> {
        body.validate()?;
        if let Some(code) = body.bank_code {
            if !CrudService::exists::<Bank, _>(pool, code).await? {
                return Err(AppError::NotFound(Bank::NAME.to_string()));
            }
        }
        let insert = InsertBuilder::new(Branch::TABLE)
            .value("Branch_Name", body.name.trim())
            .value_opt("Address", body.address)
            .value_opt("IFSC_Code", body.ifsc_code)
            .value_opt("B_Code", body.bank_code)
            .build();
        let id = CrudService::insert(pool, insert).await?;
        CrudService::get::<Branch>(pool, id).await
    }

    pub async fn list_payments(
        pool: &MySqlPool,
        filter: &PaymentFilter,
    ) -> Result<Vec<Payment>, AppError> {
        let q = SelectBuilder::new("SELECT * FROM `PAYMENT`")
            .filter_eq("Loan_ID", filter.loan_id)
            .order_by("`Pay_Date` DESC, `Pay_ID` DESC")
            .build();
        CrudService::fetch_all(pool, q).await
    }

    /// Record a repayment against an existing loan; the date defaults to today.
    pub async fn create_payment(pool: &MySqlPool, body: NewPayment) -> Result<Payment, AppError> {
        body.validate()?;
        if !CrudService::exists::<Loan, _>(pool, body.loan_id).await? {
            return Err(AppError::NotFound(Loan::NAME.to_string()));
        }
        let date = body
            .pay_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let insert = InsertBuilder::new(Payment::TABLE)
            .value("Pay_Amount", body.pay_amount)
            .value("Pay_Date", date)
            .value("Loan_ID", body.loan_id)
            .build();
        let id = CrudService::insert(pool, insert).await?;
        tracing::info!(pay_id = id, loan_id = body.loan_id, "payment recorded");
        CrudService::get::<Payment>(pool, id).await
    }

    pub async fn list_manages(pool: &MySqlPool) -> Result<Vec<Manages>, AppError> {
        let q = QueryBuf {
            sql: "SELECT * FROM `MANAGES` ORDER BY `Emp_ID`, `Acc_Number`".into(),
            params: Vec::new(),
        };
        CrudService::fetch_all(pool, q).await
    }

    pub async fn assign_manager(pool: &MySqlPool, link: &Manages) -> Result<(), AppError> {
        link.validate()?;
        if !CrudService::exists::<Employee, _>(pool, link.emp_id).await? {
            return Err(AppError::NotFound(Employee::NAME.to_string()));
        }
        if !CrudService::exists::<Account, _>(pool, link.acc_number).await? {
            return Err(AppError::NotFound(Account::NAME.to_string()));
        }
        let insert = InsertBuilder::new("MANAGES")
            .value("Emp_ID", link.emp_id)
            .value("Acc_Number", link.acc_number)
            .build();
        CrudService::execute(pool, insert).await?;
        Ok(())
    }

    pub async fn unassign_manager(pool: &MySqlPool, link: &Manages) -> Result<(), AppError> {
        let q = QueryBuf {
            sql: "DELETE FROM `MANAGES` WHERE `Emp_ID` = ? AND `Acc_Number` = ?".into(),
            params: vec![link.emp_id.into(), link.acc_number.into()],
        };
        let res = CrudService::execute(pool, q).await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Assignment".into()));
        }
        Ok(())
    }

    pub async fn list_avail(pool: &MySqlPool) -> Result<Vec<Avail>, AppError> {
        let q = QueryBuf {
            sql: "SELECT * FROM `AVAIL` ORDER BY `Customer_ID`, `Loan_ID`".into(),
            params: Vec::new(),
        };
        CrudService::fetch_all(pool, q).await
    }

    pub async fn link_loan(pool: &MySqlPool, link: &Avail) -> Result<(), AppError> {
        link.validate()?;
        if !CrudService::exists::<Customer, _>(pool, link.customer_id).await? {
            return Err(AppError::NotFound(Customer::NAME.to_string()));
        }
        if !CrudService::exists::<Loan, _>(pool, link.loan_id).await? {
            return Err(AppError::NotFound(Loan::NAME.to_string()));
        }
        let insert = InsertBuilder::new("AVAIL")
            .value("Customer_ID", link.customer_id)
            .value("Loan_ID", link.loan_id)
            .build();
        CrudService::execute(pool, insert).await?;
        Ok(())
    }
}
