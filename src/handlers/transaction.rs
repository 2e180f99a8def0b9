//! Transaction listing and the two transfer entry points. Both transfer
//! bodies become a `TransferCommand` and run through `TransferService`.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::models::{
    FundTransferRequest, Transaction, TransactionFilter, TransferCommand, TransferReceipt,
    TransferRequest,
};
use crate::service::{CrudService, TransactionService, TransferService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TransactionFilter>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    Ok(Json(TransactionService::list(&state.pool, &filter).await?))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Transaction>, AppError> {
    Ok(Json(CrudService::get::<Transaction>(&state.pool, id).await?))
}

pub async fn types(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(TransactionService::types(&state.pool).await?))
}

pub async fn status_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(TransactionService::statuses(&state.pool).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TransferRequest>,
) -> Result<(StatusCode, Json<TransferReceipt>), AppError> {
    let cmd = TransferCommand::try_from(body)?;
    let id = TransferService::execute(&state.pool, &cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransferReceipt {
            message: "Transaction created successfully",
            transaction_id: id,
        }),
    ))
}

pub async fn transfer(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<FundTransferRequest>,
) -> Result<(StatusCode, Json<TransferReceipt>), AppError> {
    let cmd = TransferCommand::try_from(body)?;
    let id = TransferService::execute(&state.pool, &cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransferReceipt {
            message: "Fund transfer successful",
            transaction_id: id,
        }),
    ))
}
