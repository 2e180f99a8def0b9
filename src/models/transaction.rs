//! Transaction rows, list filters and the two transfer request shapes.
//!
//! Both `POST /transactions` and `POST /transactions/transfer` are parsed
//! into a [`TransferCommand`] before any database work starts.

use crate::error::AppError;
use crate::models::Entity;
use crate::service::validation;
use crate::sql::{BindValue, QueryBuf, SelectBuilder};
use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

pub const STATUS_COMPLETED: &str = "Completed";
pub const TYPE_TRANSFER: &str = "Transfer";

/// Money columns are DECIMAL(15,2).
const AMOUNT_SCALE: u32 = 2;

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Transaction {
    #[serde(rename = "Transaction_ID")]
    #[sqlx(rename = "Transaction_ID")]
    pub transaction_id: i32,
    #[serde(rename = "Sender_Acc_Number")]
    #[sqlx(rename = "Sender_Acc_Number")]
    pub sender_acc_number: i32,
    #[serde(rename = "Receiver_Acc_Number")]
    #[sqlx(rename = "Receiver_Acc_Number")]
    pub receiver_acc_number: i32,
    #[serde(rename = "Amount")]
    #[sqlx(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Transaction_Type")]
    #[sqlx(rename = "Transaction_Type")]
    pub transaction_type: String,
    #[serde(rename = "Description")]
    #[sqlx(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Status")]
    #[sqlx(rename = "Status")]
    pub status: String,
    #[serde(rename = "Transaction_Date")]
    #[sqlx(rename = "Transaction_Date")]
    pub transaction_date: NaiveDateTime,
}

impl Entity for Transaction {
    const TABLE: &'static str = "TRANSACTIONS";
    const KEY: &'static str = "Transaction_ID";
    const NAME: &'static str = "Transaction";
}

/// Query of `GET /transactions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub account_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl TransactionFilter {
    /// Build the list query. `customer_accounts` holds the account numbers of
    /// `customer_id` and is only consulted when no `account_id` is given.
    pub fn to_query(&self, customer_accounts: &[i32]) -> Result<QueryBuf, AppError> {
        let mut select = SelectBuilder::new("SELECT * FROM `TRANSACTIONS`");
        if let Some(acc) = self.account_id {
            select = select.and_where(
                "`Sender_Acc_Number` = ? OR `Receiver_Acc_Number` = ?",
                vec![acc.into(), acc.into()],
            );
        } else if !customer_accounts.is_empty() {
            let placeholders = vec!["?"; customer_accounts.len()].join(", ");
            let condition = format!(
                "`Sender_Acc_Number` IN ({p}) OR `Receiver_Acc_Number` IN ({p})",
                p = placeholders
            );
            let values: Vec<BindValue> = customer_accounts
                .iter()
                .chain(customer_accounts.iter())
                .map(|a| BindValue::from(*a))
                .collect();
            select = select.and_where(&condition, values);
        }
        if let Some(start) = self.start_date {
            select = select.and_where("`Transaction_Date` >= ?", vec![start.into()]);
        }
        if let Some(end) = self.end_date {
            let next = end.checked_add_days(Days::new(1)).ok_or_else(|| {
                AppError::Validation(format!("endDate {} is out of range", end))
            })?;
            select = select.and_where("`Transaction_Date` < ?", vec![next.into()]);
        }
        Ok(select
            .filter_eq("Transaction_Type", self.transaction_type.clone())
            .and_where_opt("`Amount` >= ?", self.min_amount)
            .and_where_opt("`Amount` <= ?", self.max_amount)
            .order_by("`Transaction_Date` DESC, `Transaction_ID` DESC")
            .build())
    }
}

/// Body of `POST /transactions`. Fields stay loose JSON so that numbers sent
/// as strings are accepted and type errors become 400s with a clear message.
#[derive(Debug, Default, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "Sender_Acc_Number", default)]
    pub sender: Option<Value>,
    #[serde(rename = "Receiver_Acc_Number", default)]
    pub receiver: Option<Value>,
    #[serde(rename = "Amount", default)]
    pub amount: Option<Value>,
    #[serde(rename = "Transaction_Type", default)]
    pub transaction_type: Option<Value>,
    #[serde(rename = "Description", default)]
    pub description: Option<Value>,
}

/// Body of `POST /transactions/transfer`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferRequest {
    #[serde(default)]
    pub from_account: Option<Value>,
    #[serde(default)]
    pub to_account: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

/// A validated transfer, ready to run.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferCommand {
    pub sender: i32,
    pub receiver: i32,
    pub amount: Decimal,
    pub transaction_type: String,
    pub description: Option<String>,
}

impl TryFrom<TransferRequest> for TransferCommand {
    type Error = AppError;

    fn try_from(req: TransferRequest) -> Result<Self, AppError> {
        let missing = [
            ("Sender_Acc_Number", &req.sender),
            ("Receiver_Acc_Number", &req.receiver),
            ("Amount", &req.amount),
            ("Transaction_Type", &req.transaction_type),
        ];
        require_present(&missing)?;
        let transaction_type = text(req.transaction_type.as_ref())
            .ok_or_else(|| AppError::Validation("Transaction_Type must be a string".into()))?;
        TransferCommand::parse(
            req.sender.as_ref(),
            req.receiver.as_ref(),
            req.amount.as_ref(),
            transaction_type,
            req.description.as_ref(),
        )
    }
}

impl TryFrom<FundTransferRequest> for TransferCommand {
    type Error = AppError;

    fn try_from(req: FundTransferRequest) -> Result<Self, AppError> {
        let missing = [
            ("fromAccount", &req.from_account),
            ("toAccount", &req.to_account),
            ("amount", &req.amount),
        ];
        require_present(&missing)?;
        TransferCommand::parse(
            req.from_account.as_ref(),
            req.to_account.as_ref(),
            req.amount.as_ref(),
            TYPE_TRANSFER.to_string(),
            req.description.as_ref(),
        )
    }
}

impl TransferCommand {
    fn parse(
        sender: Option<&Value>,
        receiver: Option<&Value>,
        amount: Option<&Value>,
        transaction_type: String,
        description: Option<&Value>,
    ) -> Result<Self, AppError> {
        let (sender, receiver) = match (account_number(sender), account_number(receiver)) {
            (Some(s), Some(r)) => (s, r),
            _ => {
                return Err(AppError::Validation(
                    "Account numbers must be valid numbers".into(),
                ))
            }
        };
        if sender == receiver {
            return Err(AppError::Validation(
                "Sender and receiver accounts must be different".into(),
            ));
        }
        let amount = money(amount)
            .ok_or_else(|| AppError::Validation("Amount must be a number greater than 0".into()))?;
        validation::positive("Amount", amount)?;
        if amount.scale() > AMOUNT_SCALE && amount.normalize().scale() > AMOUNT_SCALE {
            return Err(AppError::Validation(
                "Amount must have at most 2 decimal places".into(),
            ));
        }
        validation::max_length("Transaction_Type", &transaction_type, 50)?;
        Ok(TransferCommand {
            sender,
            receiver,
            amount: amount.normalize(),
            transaction_type,
            description: text(description),
        })
    }
}

fn require_present(fields: &[(&str, &Option<Value>)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, v)| is_blank(v.as_ref()))
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::Validation(format!(
        "Missing required fields: {}",
        missing.join(", ")
    )))
}

fn is_blank(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn account_number(v: Option<&Value>) -> Option<i32> {
    let n = match v? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(n).ok().filter(|n| *n > 0)
}

fn money(v: Option<&Value>) -> Option<Decimal> {
    match v? {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

fn text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Response of both transfer endpoints.
#[derive(Debug, Serialize)]
pub struct TransferReceipt {
    pub message: &'static str,
    #[serde(rename = "Transaction_ID")]
    pub transaction_id: i32,
}
