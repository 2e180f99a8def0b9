use crate::error::AppError;
use crate::models::{Transaction, TransactionFilter};
use crate::service::{AccountService, CrudService};
use sqlx::mysql::MySqlPool;

pub struct TransactionService;

impl TransactionService {
    pub async fn list(
        pool: &MySqlPool,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError> {
        if let (Some(min), Some(max)) = (filter.min_amount, filter.max_amount) {
            if min > max {
                return Err(AppError::Validation(
                    "minAmount must not be greater than maxAmount".into(),
                ));
            }
        }
        let mut accounts = Vec::new();
        if filter.account_id.is_none() {
            if let Some(customer_id) = filter.customer_id {
                accounts = AccountService::numbers_for_customer(pool, customer_id).await?;
                if accounts.is_empty() {
                    return Ok(Vec::new());
                }
            }
        }
        let q = filter.to_query(&accounts)?;
        CrudService::fetch_all(pool, q).await
    }

    /// Distinct `Transaction_Type` values seen so far.
    pub async fn types(pool: &MySqlPool) -> Result<Vec<String>, AppError> {
        Self::distinct(pool, "SELECT DISTINCT `Transaction_Type` FROM `TRANSACTIONS` ORDER BY 1").await
    }

    /// Distinct `Status` values seen so far.
    pub async fn statuses(pool: &MySqlPool) -> Result<Vec<String>, AppError> {
        Self::distinct(pool, "SELECT DISTINCT `Status` FROM `TRANSACTIONS` ORDER BY 1").await
    }

    async fn distinct(pool: &MySqlPool, sql: &'static str) -> Result<Vec<String>, AppError> {
        tracing::debug!(sql, "query");
        let values = sqlx::query_scalar::<_, String>(sql).fetch_all(pool).await?;
        Ok(values)
    }
}
