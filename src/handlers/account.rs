use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::models::{
    Account, AccountDetail, AccountFilter, AccountType, AccountTypeOption, BalanceBody,
    NewAccount, Transaction, UpdateAccount, VerifyAccountQuery,
};
use crate::response::{created, message, MessageBody};
use crate::service::{AccountService, CrudService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<AccountFilter>,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(AccountService::list(&state.pool, &filter).await?))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Account>, AppError> {
    Ok(Json(CrudService::get::<Account>(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewAccount>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let detail = AccountService::create(&state.pool, body).await?;
    created(
        "Account created successfully",
        "Acc_Number",
        detail.account.acc_number,
        &detail,
    )
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UpdateAccount>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::update(&state.pool, id, patch).await?;
    Ok(message("Account updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    CrudService::delete::<Account>(&state.pool, id).await?;
    Ok(message("Account deleted successfully"))
}

pub async fn types() -> Json<Vec<AccountTypeOption>> {
    Json(
        AccountType::ALL
            .iter()
            .map(|t| AccountTypeOption {
                value: t.as_str(),
                label: t.label(),
            })
            .collect(),
    )
}

pub async fn verify(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VerifyAccountQuery>,
) -> Result<Json<AccountDetail>, AppError> {
    if query.ifsc.trim().is_empty() {
        return Err(AppError::Validation("ifsc is required".into()));
    }
    Ok(Json(
        AccountService::verify(&state.pool, &query.ifsc, query.account_number).await?,
    ))
}

pub async fn verify_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AccountDetail>, AppError> {
    Ok(Json(AccountService::detail(&state.pool, id).await?))
}

pub async fn balance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<BalanceBody>, AppError> {
    let balance = AccountService::balance(&state.pool, id).await?;
    Ok(Json(BalanceBody { balance }))
}

pub async fn exists(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<bool>, AppError> {
    Ok(Json(CrudService::exists::<Account, _>(&state.pool, id).await?))
}

pub async fn transactions(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    Ok(Json(AccountService::transactions(&state.pool, id).await?))
}
