use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;
use shared_models::PractitionerId;

use crate::models::{PractitionerError, RegisterPractitionerRequest, UpdatePractitionerRequest};
use crate::services::practitioner::PractitionerService;

fn map_practitioner_error(err: PractitionerError) -> AppError {
    match &err {
        PractitionerError::NotFound(_) => AppError::NotFound(err.to_string()),
        PractitionerError::DuplicateDocument | PractitionerError::DuplicateNameSpecialty => {
            AppError::Conflict(err.to_string())
        }
        PractitionerError::Validation(_) => AppError::ValidationError(err.to_string()),
        PractitionerError::CascadeFailed { .. } => AppError::Internal(err.to_string()),
    }
}

// ==============================================================================
// PRACTITIONER REGISTRY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn register_practitioner(
    State(service): State<PractitionerService>,
    Json(request): Json<RegisterPractitionerRequest>,
) -> Result<Json<Value>, AppError> {
    let practitioner = service
        .register_practitioner(request)
        .await
        .map_err(map_practitioner_error)?;

    Ok(Json(json!({
        "success": true,
        "practitioner": practitioner,
        "message": "Practitioner registered successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_practitioner(
    State(service): State<PractitionerService>,
    Path(practitioner_id): Path<PractitionerId>,
    Json(request): Json<UpdatePractitionerRequest>,
) -> Result<Json<Value>, AppError> {
    let practitioner = service
        .update_practitioner(practitioner_id, request)
        .await
        .map_err(map_practitioner_error)?;

    Ok(Json(json!({
        "success": true,
        "practitioner": practitioner,
        "message": "Practitioner updated successfully"
    })))
}

/// Deletes the practitioner together with their whole calendar.
#[axum::debug_handler]
pub async fn delete_practitioner(
    State(service): State<PractitionerService>,
    Path(practitioner_id): Path<PractitionerId>,
) -> Result<Json<Value>, AppError> {
    info!("Delete request for practitioner {}", practitioner_id);
    service
        .delete_practitioner(practitioner_id)
        .await
        .map_err(map_practitioner_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Practitioner deleted successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_practitioner(
    State(service): State<PractitionerService>,
    Path(practitioner_id): Path<PractitionerId>,
) -> Result<Json<Value>, AppError> {
    let practitioner = service
        .get_practitioner(practitioner_id)
        .await
        .map_err(map_practitioner_error)?;

    Ok(Json(json!({ "practitioner": practitioner })))
}

#[axum::debug_handler]
pub async fn get_practitioner_by_document(
    State(service): State<PractitionerService>,
    Path(document): Path<String>,
) -> Result<Json<Value>, AppError> {
    let practitioner = service
        .find_by_document(&document)
        .await
        .ok_or_else(|| AppError::NotFound("Practitioner not found".to_string()))?;

    Ok(Json(json!({ "practitioner": practitioner })))
}

#[axum::debug_handler]
pub async fn get_practitioners_by_specialty(
    State(service): State<PractitionerService>,
    Path(specialty): Path<String>,
) -> Result<Json<Value>, AppError> {
    let practitioners = service.find_by_specialty(&specialty).await;
    let total = practitioners.len();

    Ok(Json(json!({
        "practitioners": practitioners,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn get_all_practitioners(
    State(service): State<PractitionerService>,
) -> Result<Json<Value>, AppError> {
    let practitioners = service.list_practitioners().await;
    let total = practitioners.len();

    Ok(Json(json!({
        "practitioners": practitioners,
        "total": total
    })))
}
