//! Banks, branches, payments, manager assignments and loan links.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::models::{
    Avail, Bank, Branch, Manages, NewBank, NewBranch, NewPayment, Payment, PaymentFilter,
    UpdateBank, UpdateBranch, UpdatePayment,
};
use crate::response::{created, message, MessageBody};
use crate::service::{CrudService, RecordService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

pub async fn list_banks(State(state): State<AppState>) -> Result<Json<Vec<Bank>>, AppError> {
    Ok(Json(CrudService::list::<Bank>(&state.pool).await?))
}

pub async fn get_bank(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Bank>, AppError> {
    Ok(Json(CrudService::get::<Bank>(&state.pool, id).await?))
}

pub async fn create_bank(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewBank>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let bank = RecordService::create_bank(&state.pool, body).await?;
    created("Bank added successfully", "B_Code", bank.code, &bank)
}

pub async fn update_bank(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UpdateBank>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::update(&state.pool, id, patch).await?;
    Ok(message("Bank updated successfully"))
}

pub async fn delete_bank(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::delete::<Bank>(&state.pool, id).await?;
    Ok(message("Bank deleted successfully"))
}

pub async fn list_branches(State(state): State<AppState>) -> Result<Json<Vec<Branch>>, AppError> {
    Ok(Json(CrudService::list::<Branch>(&state.pool).await?))
}

pub async fn get_branch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Branch>, AppError> {
    Ok(Json(CrudService::get::<Branch>(&state.pool, id).await?))
}

pub async fn create_branch(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewBranch>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let branch = RecordService::create_branch(&state.pool, body).await?;
    created("Branch added successfully", "Branch_ID", branch.branch_id, &branch)
}

pub async fn update_branch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UpdateBranch>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::update(&state.pool, id, patch).await?;
    Ok(message("Branch updated successfully"))
}

pub async fn delete_branch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::delete::<Branch>(&state.pool, id).await?;
    Ok(message("Branch deleted successfully"))
}

pub async fn list_payments(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<PaymentFilter>,
) -> Result<Json<Vec<Payment>>, AppError> {
    Ok(Json(RecordService::list_payments(&state.pool, &filter).await?))
}

pub async fn get_payment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(CrudService::get::<Payment>(&state.pool, id).await?))
}

pub async fn create_payment(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewPayment>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payment = RecordService::create_payment(&state.pool, body).await?;
    created("Payment added successfully", "Pay_ID", payment.pay_id, &payment)
}

pub async fn update_payment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UpdatePayment>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::update(&state.pool, id, patch).await?;
    Ok(message("Payment updated successfully"))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::delete::<Payment>(&state.pool, id).await?;
    Ok(message("Payment deleted successfully"))
}

pub async fn list_manages(State(state): State<AppState>) -> Result<Json<Vec<Manages>>, AppError> {
    Ok(Json(RecordService::list_manages(&state.pool).await?))
}

pub async fn assign_manager(
    State(state): State<AppState>,
    ApiJson(link): ApiJson<Manages>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    RecordService::assign_manager(&state.pool, &link).await?;
    Ok((StatusCode::CREATED, message("Manager assigned successfully")))
}

pub async fn unassign_manager(
    State(state): State<AppState>,
    ApiPath((emp_id, acc_number)): ApiPath<(i32, i32)>,
) -> Result<Json<MessageBody>, AppError> {
    RecordService::unassign_manager(&state.pool, &Manages { emp_id, acc_number }).await?;
    Ok(message("Manager unassigned successfully"))
}

pub async fn list_avail(State(state): State<AppState>) -> Result<Json<Vec<Avail>>, AppError> {
    Ok(Json(RecordService::list_avail(&state.pool).await?))
}

pub async fn link_loan(
    State(state): State<AppState>,
    ApiJson(link): ApiJson<Avail>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    RecordService::link_loan(&state.pool, &link).await?;
    Ok((StatusCode::CREATED, message("Loan linked to customer successfully")))
}
