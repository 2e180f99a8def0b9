//! Bank and branch reference data used when opening accounts.

use crate::error::AppError;
use crate::models::{Entity, Patch};
use crate::service::validation;
use crate::sql::UpdateBuilder;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Bank {
    #[serde(rename = "B_Code")]
    #[sqlx(rename = "B_Code")]
    pub code: i32,
    #[serde(rename = "B_Name")]
    #[sqlx(rename = "B_Name")]
    pub name: String,
    #[serde(rename = "Address")]
    #[sqlx(rename = "Address")]
    pub address: Option<String>,
}

impl Entity for Bank {
    const TABLE: &'static str = "BANK";
    const KEY: &'static str = "B_Code";
    const NAME: &'static str = "Bank";
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewBank {
    #[serde(rename = "B_Name")]
    pub name: String,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

impl NewBank {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::required_text("B_Name", &self.name)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateBank {
    #[serde(rename = "B_Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

impl Patch for UpdateBank {
    type Target = Bank;

    fn into_update(self) -> Result<UpdateBuilder, AppError> {
        validation::optional_text("B_Name", self.name.as_deref())?;
        Ok(Self::builder()
            .set_opt("B_Name", self.name)
            .set_opt("Address", self.address))
    }
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Branch {
    #[serde(rename = "Branch_ID")]
    #[sqlx(rename = "Branch_ID")]
    pub branch_id: i32,
    #[serde(rename = "Branch_Name")]
    #[sqlx(rename = "Branch_Name")]
    pub name: String,
    #[serde(rename = "Address")]
    #[sqlx(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "IFSC_Code")]
    #[sqlx(rename = "IFSC_Code")]
    pub ifsc_code: Option<String>,
    #[serde(rename = "B_Code")]
    #[sqlx(rename = "B_Code")]
    pub bank_code: Option<i32>,
}

impl Entity for Branch {
    const TABLE: &'static str = "BRANCH";
    const KEY: &'static str = "Branch_ID";
    const NAME: &'static str = "Branch";
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewBranch {
    #[serde(rename = "Branch_Name")]
    pub name: String,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "IFSC_Code", default)]
    pub ifsc_code: Option<String>,
    #[serde(rename = "B_Code", default)]
    pub bank_code: Option<i32>,
}

impl NewBranch {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::required_text("Branch_Name", &self.name)?;
        if let Some(ifsc) = &self.ifsc_code {
            validation::required_text("IFSC_Code", ifsc)?;
            validation::max_length("IFSC_Code", ifsc, 11)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateBranch {
    #[serde(rename = "Branch_Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "IFSC_Code", default)]
    pub ifsc_code: Option<String>,
    #[serde(rename = "B_Code", default)]
    pub bank_code: Option<i32>,
}

impl Patch for UpdateBranch {
    type Target = Branch;

    fn into_update(self) -> Result<UpdateBuilder, AppError> {
        validation::optional_text("Branch_Name", self.name.as_deref())?;
        if let Some(ifsc) = &self.ifsc_code {
            validation::max_length("IFSC_Code", ifsc, 11)?;
        }
        Ok(Self::builder()
            .set_opt("Branch_Name", self.name)
            .set_opt("Address", self.address)
            .set_opt("IFSC_Code", self.ifsc_code)
            .set_opt("B_Code", self.bank_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ifsc_length_checked() {
        let b: NewBranch = serde_json::from_value(json!({
            "Branch_Name": "Andheri",
            "IFSC_Code": "BHRT00000012"
        }))
        .unwrap();
        assert!(b.validate().is_err());
    }

    #[test]
    fn rename_bank() {
        let patch = UpdateBank {
            name: Some("Bharat Bank".into()),
            ..Default::default()
        };
        let q = patch.into_update().unwrap().build(1i32).unwrap();
        assert_eq!(q.sql, "UPDATE `BANK` SET `B_Name` = ? WHERE `B_Code` = ?");
    }
}
