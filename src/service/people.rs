//! Customer and employee registration and password login.

use crate::error::AppError;
use crate::models::{Customer, Employee, Entity, NewCustomer, NewEmployee};
use crate::service::credentials::{hash_password, verify_password};
use crate::service::CrudService;
use crate::sql::InsertBuilder;
use sqlx::mysql::MySqlPool;

const BAD_LOGIN: &str = "Invalid email or password";

pub struct PeopleService;

impl PeopleService {
    pub async fn create_customer(pool: &MySqlPool, body: NewCustomer) -> Result<Customer, AppError> {
        body.validate()?;
        Self::insert_customer(pool, body).await
    }

    async fn insert_customer(pool: &MySqlPool, body: NewCustomer) -> Result<Customer, AppError> {
        let hash = hash_password(&body.password)?;
        let insert = InsertBuilder::new(Customer::TABLE)
            .value("F_Name", body.first_name.trim())
            .value("L_Name", body.last_name.trim())
            .value_opt("Phone_No", body.phone)
            .value_opt("Address", body.address)
            .value("Email", body.email.trim())
            .value("Password", hash)
            .build();
        let id = CrudService::insert(pool, insert).await?;
        tracing::info!(customer_id = id, "customer created");
        CrudService::get::<Customer>(pool, id).await
    }

    /// Self-service signup: like `create_customer` but a known e-mail is a
    /// business error rather than a constraint violation, and a one-word
    /// name leaves the last name empty.
    pub async fn signup(pool: &MySqlPool, body: NewCustomer) -> Result<Customer, AppError> {
        body.validate_signup()?;
        if CrudService::find_by::<Customer>(pool, "Email", body.email.trim())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Customer already exists".into()));
        }
        Self::insert_customer(pool, body).await
    }

    pub async fn create_employee(pool: &MySqlPool, body: NewEmployee) -> Result<Employee, AppError> {
        body.validate()?;
        let hash = hash_password(&body.password)?;
        let insert = InsertBuilder::new(Employee::TABLE)
            .value("F_Name", body.first_name.trim())
            .value("L_Name", body.last_name.trim())
            .value_opt("Phone_No", body.phone)
            .value_opt("Address", body.address)
            .value_opt("Branch_ID", body.branch_id)
            .value("Email", body.email.trim())
            .value("Password", hash)
            .build();
        let id = CrudService::insert(pool, insert).await?;
        tracing::info!(emp_id = id, "employee created");
        CrudService::get::<Employee>(pool, id).await
    }

    pub async fn customer_by_email(pool: &MySqlPool, email: &str) -> Result<Customer, AppError> {
        CrudService::find_by::<Customer>(pool, "Email", email.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(Customer::NAME.to_string()))
    }

    pub async fn employee_by_email(pool: &MySqlPool, email: &str) -> Result<Employee, AppError> {
        CrudService::find_by::<Employee>(pool, "Email", email.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(Employee::NAME.to_string()))
    }

    /// Unknown e-mail and wrong password get the same 401.
    pub async fn login_customer(
        pool: &MySqlPool,
        email: &str,
        password: &str,
    ) -> Result<Customer, AppError> {
        let customer = CrudService::find_by::<Customer>(pool, "Email", email.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized(BAD_LOGIN.into()))?;
        if !verify_password(password, &customer.password_hash) {
            tracing::debug!(customer_id = customer.customer_id, "customer login rejected");
            return Err(AppError::Unauthorized(BAD_LOGIN.into()));
        }
        Ok(customer)
    }

    pub async fn login_employee(
        pool: &MySqlPool,
        email: &str,
        password: &str,
    ) -> Result<Employee, AppError> {
        let employee = CrudService::find_by::<Employee>(pool, "Email", email.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized(BAD_LOGIN.into()))?;
        if !verify_password(password, &employee.password_hash) {
            tracing::debug!(emp_id = employee.emp_id, "employee login rejected");
            return Err(AppError::Unauthorized(BAD_LOGIN.into()));
        }
        Ok(employee)
    }
}
