use crate::error::AppError;
use crate::models::{Entity, Patch};
use crate::service::credentials::hash_password;
use crate::service::validation;
use crate::sql::UpdateBuilder;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Employee {
    #[serde(rename = "Emp_ID")]
    #[sqlx(rename = "Emp_ID")]
    pub emp_id: i32,
    #[serde(rename = "F_Name")]
    #[sqlx(rename = "F_Name")]
    pub first_name: String,
    #[serde(rename = "L_Name")]
    #[sqlx(rename = "L_Name")]
    pub last_name: String,
    #[serde(rename = "Phone_No")]
    #[sqlx(rename = "Phone_No")]
    pub phone: Option<String>,
    #[serde(rename = "Address")]
    #[sqlx(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Branch_ID")]
    #[sqlx(rename = "Branch_ID")]
    pub branch_id: Option<i32>,
    #[serde(rename = "Email")]
    #[sqlx(rename = "Email")]
    pub email: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "Password")]
    pub password_hash: String,
}

impl Entity for Employee {
    const TABLE: &'static str = "EMPLOYEE";
    const KEY: &'static str = "Emp_ID";
    const NAME: &'static str = "Employee";
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewEmployee {
    #[serde(rename = "F_Name")]
    pub first_name: String,
    #[serde(rename = "L_Name")]
    pub last_name: String,
    #[serde(rename = "Phone_No", default)]
    pub phone: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Branch_ID", default)]
    pub branch_id: Option<i32>,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::required_text("F_Name", &self.first_name)?;
        validation::required_text("L_Name", &self.last_name)?;
        validation::email("Email", &self.email)?;
        validation::password(&self.password)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateEmployee {
    #[serde(rename = "F_Name", default)]
    pub first_name: Option<String>,
    #[serde(rename = "L_Name", default)]
    pub last_name: Option<String>,
    #[serde(rename = "Phone_No", default)]
    pub phone: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Branch_ID", default)]
    pub branch_id: Option<i32>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Password", default)]
    pub password: Option<String>,
}

impl Patch for UpdateEmployee {
    type Target = Employee;

    fn into_update(self) -> Result<UpdateBuilder, AppError> {
        validation::optional_text("F_Name", self.first_name.as_deref())?;
        validation::optional_text("L_Name", self.last_name.as_deref())?;
        if let Some(email) = &self.email {
            validation::email("Email", email)?;
        }
        let password_hash = match &self.password {
            Some(p) => {
                validation::password(p)?;
                Some(hash_password(p)?)
            }
            None => None,
        };
        Ok(Self::builder()
            .set_opt("F_Name", self.first_name)
            .set_opt("L_Name", self.last_name)
            .set_opt("Phone_No", self.phone)
            .set_opt("Address", self.address)
            .set_opt("Branch_ID", self.branch_id)
            .set_opt("Email", self.email)
            .set_opt("Password", password_hash))
    }
}

/// Body of the login endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_reassignment_only() {
        let patch = UpdateEmployee {
            branch_id: Some(3),
            ..Default::default()
        };
        let q = patch.into_update().unwrap().build(9i32).unwrap();
        assert_eq!(q.sql, "UPDATE `EMPLOYEE` SET `Branch_ID` = ? WHERE `Emp_ID` = ?");
    }

    #[test]
    fn blank_name_rejected() {
        let patch = UpdateEmployee {
            last_name: Some(" ".into()),
            ..Default::default()
        };
        assert!(patch.into_update().is_err());
    }
}
