//! Moves money between two accounts and records the transaction.
//!
//! Both account rows are locked (`FOR UPDATE`, lower account number first)
//! for the life of the database transaction, and the debit is guarded by
//! `Balance >= amount`, so two transfers draining the same account cannot
//! both pass the balance check.

use crate::error::{AccountRole, AppError};
use crate::models::{AccountStatus, TransferCommand, STATUS_COMPLETED};
use crate::service::CrudService;
use crate::sql::InsertBuilder;
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlConnection, MySqlPool};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
struct AccountState {
    #[sqlx(rename = "Acc_Number")]
    acc_number: i32,
    #[sqlx(rename = "Balance")]
    balance: Decimal,
    #[sqlx(rename = "Status")]
    status: String,
}

pub struct TransferService;

impl TransferService {
    /// Run a validated transfer. Returns the new `Transaction_ID`.
    pub async fn execute(pool: &MySqlPool, cmd: &TransferCommand) -> Result<i32, AppError> {
        let mut tx = pool.begin().await?;
        let outcome = Self::apply(&mut *tx, cmd).await;
        match outcome {
            Ok(id) => {
                tx.commit().await?;
                tracing::info!(
                    transaction_id = id,
                    sender = cmd.sender,
                    receiver = cmd.receiver,
                    amount = %cmd.amount,
                    "transfer committed"
                );
                Ok(id)
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    tracing::error!(error = %rb, "transfer rollback failed");
                }
                tracing::warn!(
                    sender = cmd.sender,
                    receiver = cmd.receiver,
                    amount = %cmd.amount,
                    error = %e,
                    "transfer rolled back"
                );
                Err(e)
            }
        }
    }

    async fn apply(conn: &mut MySqlConnection, cmd: &TransferCommand) -> Result<i32, AppError> {
        let locked = Self::lock_accounts(conn, cmd.sender, cmd.receiver).await?;
        let sender = locked
            .iter()
            .find(|a| a.acc_number == cmd.sender)
            .ok_or(AppError::UnknownAccount {
                role: AccountRole::Sender,
                account: cmd.sender,
            })?;
        if sender.status != AccountStatus::Active.as_str() {
            return Err(AppError::InactiveAccount {
                role: AccountRole::Sender,
                account: cmd.sender,
            });
        }
        if sender.balance < cmd.amount {
            return Err(AppError::InsufficientBalance {
                account: cmd.sender,
                available: sender.balance,
                required: cmd.amount,
            });
        }
        let receiver = locked
            .iter()
            .find(|a| a.acc_number == cmd.receiver)
            .ok_or(AppError::UnknownAccount {
                role: AccountRole::Receiver,
                account: cmd.receiver,
            })?;
        if receiver.status != AccountStatus::Active.as_str() {
            return Err(AppError::InactiveAccount {
                role: AccountRole::Receiver,
                account: cmd.receiver,
            });
        }

        let insert = InsertBuilder::new("TRANSACTIONS")
            .value("Sender_Acc_Number", cmd.sender)
            .value("Receiver_Acc_Number", cmd.receiver)
            .value("Amount", cmd.amount)
            .value("Transaction_Type", cmd.transaction_type.as_str())
            .value("Description", cmd.description.clone())
            .value("Status", STATUS_COMPLETED)
            .value("Transaction_Date", chrono::Local::now().naive_local())
            .build();
        let transaction_id = CrudService::insert(&mut *conn, insert).await?;

        let debited = sqlx::query(
            "UPDATE `ACCOUNT` SET `Balance` = `Balance` - ? WHERE `Acc_Number` = ? AND `Balance` >= ?",
        )
        .bind(cmd.amount)
        .bind(cmd.sender)
        .bind(cmd.amount)
        .execute(&mut *conn)
        .await?;
        if debited.rows_affected() != 1 {
            return Err(AppError::InsufficientBalance {
                account: cmd.sender,
                available: sender.balance,
                required: cmd.amount,
            });
        }
        tracing::debug!(account = cmd.sender, amount = %cmd.amount, "debited");

        let credited =
            sqlx::query("UPDATE `ACCOUNT` SET `Balance` = `Balance` + ? WHERE `Acc_Number` = ?")
                .bind(cmd.amount)
                .bind(cmd.receiver)
                .execute(&mut *conn)
                .await?;
        if credited.rows_affected() != 1 {
            return Err(AppError::UnknownAccount {
                role: AccountRole::Receiver,
                account: cmd.receiver,
            });
        }
        tracing::debug!(account = cmd.receiver, amount = %cmd.amount, "credited");

        Ok(transaction_id)
    }

    /// Lock both rows in ascending account order.
    async fn lock_accounts(
        conn: &mut MySqlConnection,
        a: i32,
        b: i32,
    ) -> Result<Vec<AccountState>, AppError> {
        let rows = sqlx::query_as::<_, AccountState>(
            "SELECT `Acc_Number`, `Balance`, `Status` FROM `ACCOUNT` \
             WHERE `Acc_Number` IN (?, ?) ORDER BY `Acc_Number` FOR UPDATE",
        )
        .bind(a.min(b))
        .bind(a.max(b))
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }
}
