use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::models::{Customer, NewCustomer, UpdateCustomer};
use crate::response::{created, message, MessageBody};
use crate::service::{CrudService, PeopleService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(CrudService::list::<Customer>(&state.pool).await?))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(CrudService::get::<Customer>(&state.pool, id).await?))
}

pub async fn by_email(
    State(state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(PeopleService::customer_by_email(&state.pool, &email).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewCustomer>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let customer = PeopleService::create_customer(&state.pool, body).await?;
    created(
        "Customer added successfully",
        "Customer_ID",
        customer.customer_id,
        &customer,
    )
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UpdateCustomer>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::update(&state.pool, id, patch).await?;
    Ok(message("Customer updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::delete::<Customer>(&state.pool, id).await?;
    Ok(message("Customer deleted successfully"))
}
