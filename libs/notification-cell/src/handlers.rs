use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::services::email::EmailNotifier;

/// Full delivery history, oldest attempt first.
#[axum::debug_handler]
pub async fn get_delivery_history(
    State(notifier): State<EmailNotifier>,
) -> Result<Json<Value>, AppError> {
    let history = notifier.history().await;
    let total = history.len();

    Ok(Json(json!({
        "history": history,
        "total": total
    })))
}
