use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::models::{Loan, LoanAccount, LoanFilter, NewLoan, NewLoanAccount, UpdateLoan};
use crate::response::{created, message, MessageBody};
use crate::service::{CrudService, LoanService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<LoanFilter>,
) -> Result<Json<Vec<Loan>>, AppError> {
    Ok(Json(LoanService::list(&state.pool, &filter).await?))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Loan>, AppError> {
    Ok(Json(CrudService::get::<Loan>(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewLoan>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let loan = LoanService::create(&state.pool, body).await?;
    created("Loan created successfully", "Loan_ID", loan.loan_id, &loan)
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UpdateLoan>,
) -> Result<Json<MessageBody>, AppError> {
    LoanService::update(&state.pool, id, patch).await?;
    Ok(message("Loan updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    LoanService::delete(&state.pool, id).await?;
    Ok(message("Loan deleted successfully"))
}

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<LoanAccount>>, AppError> {
    Ok(Json(CrudService::list::<LoanAccount>(&state.pool).await?))
}

pub async fn create_account(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewLoanAccount>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let account = LoanService::create_account(&state.pool, body).await?;
    created(
        "Loan account added successfully",
        "Loan_Acc_Number",
        account.loan_acc_number,
        &account,
    )
}

pub async fn account_for_loan(
    State(state): State<AppState>,
    ApiPath(loan_id): ApiPath<i32>,
) -> Result<Json<LoanAccount>, AppError> {
    Ok(Json(LoanService::account_for_loan(&state.pool, loan_id).await?))
}
