//! Standard response bodies for mutations.

use crate::error::AppError;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize, Debug)]
pub struct MessageBody {
    pub message: String,
}

/// `200 {"message": ...}` used by update and delete.
pub fn message(text: impl Into<String>) -> Json<MessageBody> {
    Json(MessageBody {
        message: text.into(),
    })
}

/// `201 {"message", "<id_field>": id, "data": row}` used by create.
pub fn created<T: Serialize>(
    text: &str,
    id_field: &str,
    id: i32,
    data: T,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mut body = Map::new();
    body.insert("message".into(), Value::String(text.to_string()));
    body.insert(id_field.to_string(), Value::from(id));
    body.insert("data".into(), serde_json::to_value(data)?);
    Ok((StatusCode::CREATED, Json(Value::Object(body))))
}

pub fn error_body(error: &str, details: impl Into<String>) -> Value {
    serde_json::json!({
        "error": error,
        "details": details.into(),
    })
}
