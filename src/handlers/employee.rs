use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::models::{Employee, NewEmployee, UpdateEmployee};
use crate::response::{created, message, MessageBody};
use crate::service::{CrudService, PeopleService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(CrudService::list::<Employee>(&state.pool).await?))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(CrudService::get::<Employee>(&state.pool, id).await?))
}

pub async fn by_email(
    State(state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(PeopleService::employee_by_email(&state.pool, &email).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewEmployee>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let employee = PeopleService::create_employee(&state.pool, body).await?;
    created(
        "Employee added successfully",
        "Emp_ID",
        employee.emp_id,
        &employee,
    )
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UpdateEmployee>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::update(&state.pool, id, patch).await?;
    Ok(message("Employee updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::delete::<Employee>(&state.pool, id).await?;
    Ok(message("Employee deleted successfully"))
}
