use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::models::{Credentials, CustomerSignup};
use crate::response::created;
use crate::service::PeopleService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

pub async fn customer_signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CustomerSignup>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let customer = PeopleService::signup(&state.pool, body.into()).await?;
    created(
        "Customer registered successfully",
        "Customer_ID",
        customer.customer_id,
        &customer,
    )
}

pub async fn customer_login(
    State(state): State<AppState>,
    ApiJson(creds): ApiJson<Credentials>,
) -> Result<Json<Value>, AppError> {
    let customer = PeopleService::login_customer(&state.pool, &creds.email, &creds.password).await?;
    tracing::info!(customer_id = customer.customer_id, "customer logged in");
    Ok(Json(json!({ "message": "Login successful", "data": customer })))
}

pub async fn employee_login(
    State(state): State<AppState>,
    ApiJson(creds): ApiJson<Credentials>,
) -> Result<Json<Value>, AppError> {
    let employee = PeopleService::login_employee(&state.pool, &creds.email, &creds.password).await?;
    tracing::info!(emp_id = employee.emp_id, "employee logged in");
    Ok(Json(json!({ "message": "Login successful", "data": employee })))
}
