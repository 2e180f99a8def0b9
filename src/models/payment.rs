use crate::error::AppError;
use crate::models::{Entity, Patch};
use crate::service::validation;
use crate::sql::UpdateBuilder;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A loan repayment. Not reconciled against the loan account balance.
#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Payment {
    #[serde(rename = "Pay_ID")]
    #[sqlx(rename = "Pay_ID")]
    pub pay_id: i32,
    #[serde(rename = "Pay_Amount")]
    #[sqlx(rename = "Pay_Amount")]
    pub pay_amount: Decimal,
    #[serde(rename = "Pay_Date")]
    #[sqlx(rename = "Pay_Date")]
    pub pay_date: NaiveDate,
    #[serde(rename = "Loan_ID")]
    #[sqlx(rename = "Loan_ID")]
    pub loan_id: i32,
}

impl Entity for Payment {
    const TABLE: &'static str = "PAYMENT";
    const KEY: &'static str = "Pay_ID";
    const NAME: &'static str = "Payment";
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPayment {
    #[serde(rename = "Pay_Amount")]
    pub pay_amount: Decimal,
    #[serde(rename = "Pay_Date", default)]
    pub pay_date: Option<NaiveDate>,
    #[serde(rename = "Loan_ID")]
    pub loan_id: i32,
}

impl NewPayment {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::positive("Pay_Amount", self.pay_amount)?;
        validation::positive_int("Loan_ID", self.loan_id)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdatePayment {
    #[serde(rename = "Pay_Amount", default)]
    pub pay_amount: Option<Decimal>,
    #[serde(rename = "Pay_Date", default)]
    pub pay_date: Option<NaiveDate>,
}

impl Patch for UpdatePayment {
    type Target = Payment;

    fn into_update(self) -> Result<UpdateBuilder, AppError> {
        if let Some(amount) = self.pay_amount {
            validation::positive("Pay_Amount", amount)?;
        }
        Ok(Self::builder()
            .set_opt("Pay_Amount", self.pay_amount)
            .set_opt("Pay_Date", self.pay_date))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilter {
    pub loan_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_is_optional() {
        let p: NewPayment =
            serde_json::from_value(json!({"Pay_Amount": 4500, "Loan_ID": 2})).unwrap();
        assert!(p.pay_date.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn update_date_only() {
        let patch: UpdatePayment =
            serde_json::from_value(json!({"Pay_Date": "2024-03-01"})).unwrap();
        let q = patch.into_update().unwrap().build(5i32).unwrap();
        assert_eq!(q.sql, "UPDATE `PAYMENT` SET `Pay_Date` = ? WHERE `Pay_ID` = ?");
        assert_eq!(
            q.params[0],
            crate::sql::BindValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn negative_amount_rejected() {
        let patch = UpdatePayment {
            pay_amount: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(patch.into_update().is_err());
    }
}
