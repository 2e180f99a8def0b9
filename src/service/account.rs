use crate::error::AppError;
use crate::models::{
    Account, AccountDetail, AccountFilter, AccountStatus, Branch, Customer, Entity, NewAccount,
    Transaction, ACCOUNT_DETAIL_SELECT,
};
use crate::service::CrudService;
use crate::sql::{InsertBuilder, QueryBuf, SelectBuilder};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlPool;

pub struct AccountService;

impl AccountService {
    pub async fn list(pool: &MySqlPool, filter: &AccountFilter) -> Result<Vec<Account>, AppError> {
        let q = SelectBuilder::new("SELECT * FROM `ACCOUNT`")
            .filter_eq("Customer_ID", filter.customer_id)
            .order_by("`Acc_Number`")
            .build();
        CrudService::fetch_all(pool, q).await
    }

    /// Open an account for an existing customer at an existing branch.
    pub async fn create(pool: &MySqlPool, body: NewAccount) -> Result<AccountDetail, AppError> {
        body.validate()?;
        let branch_id = body.branch();
        let mut tx = pool.begin().await?;
        if !CrudService::exists::<Customer, _>(&mut *tx, body.customer_id).await? {
            return Err(AppError::NotFound(Customer::NAME.to_string()));
        }
        if !CrudService::exists::<Branch, _>(&mut *tx, branch_id).await? {
            return Err(AppError::NotFound(Branch::NAME.to_string()));
        }
        let insert = InsertBuilder::new(Account::TABLE)
            .value("Customer_ID", body.customer_id)
            .value("Branch_ID", branch_id)
            .value("Balance", body.balance)
            .value("Type", body.account_type.as_str())
            .value("Status", AccountStatus::Active.as_str())
            .value("Opening_Date", chrono::Local::now().naive_local())
            .value_opt("Nominee_Name", body.nominee_name)
            .value_opt("Nominee_Relation", body.nominee_relation)
            .value_opt("Nominee_DOB", body.nominee_dob)
            .build();
        let acc_number = CrudService::insert(&mut *tx, insert).await?;
        let detail = Self::detail_where(&mut *tx, "a.`Acc_Number` = ?", acc_number)
            .await?
            .ok_or_else(|| AppError::Internal(format!("account {} missing after insert", acc_number)))?;
        tx.commit().await?;
        tracing::info!(acc_number, customer_id = body.customer_id, branch_id, "account opened");
        Ok(detail)
    }

    /// Look an account up by branch IFSC code and number.
    pub async fn verify(
        pool: &MySqlPool,
        ifsc: &str,
        acc_number: i32,
    ) -> Result<AccountDetail, AppError> {
        let q = QueryBuf {
            sql: format!(
                "{} WHERE b.`IFSC_Code` = ? AND a.`Acc_Number` = ?",
                ACCOUNT_DETAIL_SELECT
            ),
            params: vec![ifsc.trim().into(), acc_number.into()],
        };
        CrudService::fetch_optional(pool, q)
            .await?
            .ok_or_else(|| AppError::NotFound(Account::NAME.to_string()))
    }

    pub async fn detail(pool: &MySqlPool, acc_number: i32) -> Result<AccountDetail, AppError> {
        Self::detail_where(pool, "a.`Acc_Number` = ?", acc_number)
            .await?
            .ok_or_else(|| AppError::NotFound(Account::NAME.to_string()))
    }

    async fn detail_where<'e, E>(
        exec: E,
        condition: &str,
        value: i32,
    ) -> Result<Option<AccountDetail>, AppError>
    where
        E: sqlx::Executor<'e, Database = sqlx::MySql>,
    {
        let q = QueryBuf {
            sql: format!("{} WHERE {}", ACCOUNT_DETAIL_SELECT, condition),
            params: vec![value.into()],
        };
        CrudService::fetch_optional(exec, q).await
    }

    pub async fn balance(pool: &MySqlPool, acc_number: i32) -> Result<Decimal, AppError> {
        sqlx::query_scalar::<_, Decimal>("SELECT `Balance` FROM `ACCOUNT` WHERE `Acc_Number` = ?")
            .bind(acc_number)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(Account::NAME.to_string()))
    }

    /// Transactions on either side of the account, newest first.
    pub async fn transactions(
        pool: &MySqlPool,
        acc_number: i32,
    ) -> Result<Vec<Transaction>, AppError> {
        if !CrudService::exists::<Account, _>(pool, acc_number).await? {
            return Err(AppError::NotFound(Account::NAME.to_string()));
        }
        let q = SelectBuilder::new("SELECT * FROM `TRANSACTIONS`")
            .and_where(
                "`Sender_Acc_Number` = ? OR `Receiver_Acc_Number` = ?",
                vec![acc_number.into(), acc_number.into()],
            )
            .order_by("`Transaction_Date` DESC, `Transaction_ID` DESC")
            .build();
        CrudService::fetch_all(pool, q).await
    }

    pub async fn numbers_for_customer(
        pool: &MySqlPool,
        customer_id: i32,
    ) -> Result<Vec<i32>, AppError> {
        let numbers = sqlx::query_scalar::<_, i32>(
            "SELECT `Acc_Number` FROM `ACCOUNT` WHERE `Customer_ID` = ? ORDER BY `Acc_Number`",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
        Ok(numbers)
    }
}
