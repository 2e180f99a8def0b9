use crate::error::AppError;
use crate::models::{Entity, Patch};
use crate::service::credentials::hash_password;
use crate::service::validation;
use crate::sql::UpdateBuilder;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Customer {
    #[serde(rename = "Customer_ID")]
    #[sqlx(rename = "Customer_ID")]
    pub customer_id: i32,
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
    #[serde(rename = "Email")]
    #[sqlx(rename = "Email")]
    pub email: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "Password")]
    pub password_hash: String,
}

impl Entity for Customer {
    const TABLE: &'static str = "CUSTOMER";
    const KEY: &'static str = "Customer_ID";
    const NAME: &'static str = "Customer";
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomer {
    #[serde(rename = "F_Name")]
    pub first_name: String,
    #[serde(rename = "L_Name")]
    pub last_name: String,
    #[serde(rename = "Phone_No", default)]
    pub phone: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::required_text("L_Name", &self.last_name)?;
        self.check_common()
    }

    /// Signup form rules: phone and address are required, the last name
    /// may be empty.
    pub fn validate_signup(&self) -> Result<(), AppError> {
        validation::required_text("Phone_No", self.phone.as_deref().unwrap_or(""))?;
        validation::required_text("Address", self.address.as_deref().unwrap_or(""))?;
        self.check_common()
    }

    fn check_common(&self) -> Result<(), AppError> {
        validation::required_text("F_Name", &self.first_name)?;
        validation::email("Email", &self.email)?;
        validation::password(&self.password)?;
        if let Some(phone) = &self.phone {
            validation::max_length("Phone_No", phone, 15)?;
        }
        Ok(())
    }
}

/// Body of `POST /auth/customer/signup`: the signup form sends one
/// `name` field that is split into first and last name.
#[derive(Clone, Debug, Deserialize)]
pub struct CustomerSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
}

impl From<CustomerSignup> for NewCustomer {
    fn from(s: CustomerSignup) -> Self {
        let name = s.name.trim();
        let (first, last) = match name.split_once(char::is_whitespace) {
            Some((f, l)) => (f.to_string(), l.trim().to_string()),
            None => (name.to_string(), String::new()),
        };
        NewCustomer {
            first_name: first,
            last_name: last,
            phone: Some(s.phone),
            address: Some(s.address),
            email: s.email,
            password: s.password,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateCustomer {
    #[serde(rename = "F_Name", default)]
    pub first_name: Option<String>,
    #[serde(rename = "L_Name", default)]
    pub last_name: Option<String>,
    #[serde(rename = "Phone_No", default)]
    pub phone: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Password", default)]
    pub password: Option<String>,
}

impl Patch for UpdateCustomer {
    type Target = Customer;

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
            .set_opt("Email", self.email)
            .set_opt("Password", password_hash))
    }
}
