use crate::error::AppError;
use crate::models::{Entity, Patch};
use crate::service::validation;
use crate::sql::UpdateBuilder;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Branch assigned when account opening does not name one.
pub const DEFAULT_BRANCH_ID: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Savings,
    Current,
    #[serde(rename = "Fixed Deposit")]
    FixedDeposit,
    #[serde(rename = "Recurring Deposit")]
    RecurringDeposit,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::Savings,
        AccountType::Current,
        AccountType::FixedDeposit,
        AccountType::RecurringDeposit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
            AccountType::FixedDeposit => "Fixed Deposit",
            AccountType::RecurringDeposit => "Recurring Deposit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings Account",
            AccountType::Current => "Current Account",
            AccountType::FixedDeposit => "Fixed Deposit Account",
            AccountType::RecurringDeposit => "Recurring Deposit Account",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
    Frozen,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
            AccountStatus::Frozen => "Frozen",
            AccountStatus::Closed => "Closed",
        }
    }
}

/// `{ value, label }` entry of `GET /accounts/types`.
#[derive(Debug, Serialize)]
pub struct AccountTypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Account {
    #[serde(rename = "Acc_Number")]
    #[sqlx(rename = "Acc_Number")]
    pub acc_number: i32,
    #[serde(rename = "Customer_ID")]
    #[sqlx(rename = "Customer_ID")]
    pub customer_id: i32,
    #[serde(rename = "Branch_ID")]
    #[sqlx(rename = "Branch_ID")]
    pub branch_id: i32,
    #[serde(rename = "Balance")]
    #[sqlx(rename = "Balance")]
    pub balance: Decimal,
    #[serde(rename = "Type")]
    #[sqlx(rename = "Type")]
    pub account_type: String,
    #[serde(rename = "Status")]
    #[sqlx(rename = "Status")]
    pub status: String,
    #[serde(rename = "Opening_Date")]
    #[sqlx(rename = "Opening_Date")]
    pub opening_date: NaiveDateTime,
    #[serde(rename = "Nominee_Name")]
    #[sqlx(rename = "Nominee_Name")]
    pub nominee_name: Option<String>,
    #[serde(rename = "Nominee_Relation")]
    #[sqlx(rename = "Nominee_Relation")]
    pub nominee_relation: Option<String>,
    #[serde(rename = "Nominee_DOB")]
    #[sqlx(rename = "Nominee_DOB")]
    pub nominee_dob: Option<NaiveDate>,
}

impl Entity for Account {
    const TABLE: &'static str = "ACCOUNT";
    const KEY: &'static str = "Acc_Number";
    const NAME: &'static str = "Account";
}

/// Account joined with its branch and owner, as echoed after creation and
/// returned by IFSC verification.
#[derive(Clone, Debug, Serialize, FromRow)]
pub struct AccountDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub account: Account,
    #[serde(rename = "Branch_Name")]
    #[sqlx(rename = "Branch_Name")]
    pub branch_name: Option<String>,
    #[serde(rename = "IFSC_Code")]
    #[sqlx(rename = "IFSC_Code")]
    pub ifsc_code: Option<String>,
    #[serde(rename = "F_Name")]
    #[sqlx(rename = "F_Name")]
    pub first_name: Option<String>,
    #[serde(rename = "L_Name")]
    #[sqlx(rename = "L_Name")]
    pub last_name: Option<String>,
}

pub const ACCOUNT_DETAIL_SELECT: &str = "SELECT a.*, b.`Branch_Name`, b.`IFSC_Code`, c.`F_Name`, c.`L_Name` \
     FROM `ACCOUNT` a \
     LEFT JOIN `BRANCH` b ON a.`Branch_ID` = b.`Branch_ID` \
     LEFT JOIN `CUSTOMER` c ON a.`Customer_ID` = c.`Customer_ID`";

#[derive(Clone, Debug, Deserialize)]
pub struct NewAccount {
    #[serde(rename = "Balance")]
    pub balance: Decimal,
    #[serde(rename = "Type")]
    pub account_type: AccountType,
    #[serde(rename = "Customer_ID")]
    pub customer_id: i32,
    #[serde(rename = "Branch_ID", default)]
    pub branch_id: Option<i32>,
    #[serde(rename = "Nominee_Name", default)]
    pub nominee_name: Option<String>,
    #[serde(rename = "Nominee_Relation", default)]
    pub nominee_relation: Option<String>,
    #[serde(rename = "Nominee_DOB", default)]
    pub nominee_dob: Option<NaiveDate>,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::non_negative("Balance", self.balance)?;
        validation::positive_int("Customer_ID", self.customer_id)?;
        if let Some(branch) = self.branch_id {
            validation::positive_int("Branch_ID", branch)?;
        }
        validation::optional_text("Nominee_Name", self.nominee_name.as_deref())?;
        Ok(())
    }

    pub fn branch(&self) -> i32 {
        self.branch_id.unwrap_or(DEFAULT_BRANCH_ID)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateAccount {
    #[serde(rename = "Balance", default)]
    pub balance: Option<Decimal>,
    #[serde(rename = "Type", default)]
    pub account_type: Option<AccountType>,
    #[serde(rename = "Status", default)]
    pub status: Option<AccountStatus>,
    #[serde(rename = "Nominee_Name", default)]
    pub nominee_name: Option<String>,
    #[serde(rename = "Nominee_Relation", default)]
    pub nominee_relation: Option<String>,
    #[serde(rename = "Nominee_DOB", default)]
    pub nominee_dob: Option<NaiveDate>,
}

impl Patch for UpdateAccount {
    type Target = Account;

    fn into_update(self) -> Result<UpdateBuilder, AppError> {
        if let Some(balance) = self.balance {
            validation::non_negative("Balance", balance)?;
        }
        Ok(Self::builder()
            .set_opt("Balance", self.balance)
            .set_opt("Type", self.account_type.map(|t| t.as_str()))
            .set_opt("Status", self.status.map(|s| s.as_str()))
            .set_opt("Nominee_Name", self.nominee_name)
            .set_opt("Nominee_Relation", self.nominee_relation)
            .set_opt("Nominee_DOB", self.nominee_dob))
    }
}

#[derive(Debug, Serialize)]
pub struct BalanceBody {
    pub balance: Decimal,
}

/// Query of `GET /accounts/verify`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAccountQuery {
    pub ifsc: String,
    pub account_number: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountFilter {
    pub customer_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn types_parse_with_spaces() {
        let t: AccountType = serde_json::from_value(json!("Fixed Deposit")).unwrap();
        assert_eq!(t, AccountType::FixedDeposit);
        assert!(serde_json::from_value::<AccountType>(json!("Crypto")).is_err());
        assert_eq!(AccountType::RecurringDeposit.label(), "Recurring Deposit Account");
    }

    #[test]
    fn new_account_accepts_string_balance_and_defaults_branch() {
        let a: NewAccount = serde_json::from_value(json!({
            "Balance": "2500.50",
            "Type": "Savings",
            "Customer_ID": 7
        }))
        .unwrap();
        assert_eq!(a.balance, Decimal::new(250050, 2));
        assert_eq!(a.branch(), DEFAULT_BRANCH_ID);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn negative_opening_balance_rejected() {
        let a: NewAccount = serde_json::from_value(json!({
            "Balance": -1,
            "Type": "Current",
            "Customer_ID": 7
        }))
        .unwrap();
        assert!(matches!(a.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn update_negative_balance_rejected() {
        let patch = UpdateAccount {
            balance: Some(Decimal::new(-100, 0)),
            ..Default::default()
        };
        assert!(patch.into_update().is_err());
    }

    #[test]
    fn update_status_and_type() {
        let patch: UpdateAccount =
            serde_json::from_value(json!({"Status": "Frozen", "Type": "Current"})).unwrap();
        let q = patch.into_update().unwrap().build(101i32).unwrap();
        assert_eq!(
            q.sql,
            "UPDATE `ACCOUNT` SET `Type` = ?, `Status` = ? WHERE `Acc_Number` = ?"
        );
    }
}
