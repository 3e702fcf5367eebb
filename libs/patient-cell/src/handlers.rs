use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;
use shared_models::PatientId;

use crate::models::{PatientError, RegisterPatientRequest, UpdatePatientRequest};
use crate::services::patient::PatientService;

fn map_patient_error(err: PatientError) -> AppError {
    match &err {
        PatientError::NotFound(_) => AppError::NotFound(err.to_string()),
        PatientError::DuplicateDocument => AppError::Conflict(err.to_string()),
        PatientError::Validation(_) => AppError::ValidationError(err.to_string()),
        PatientError::CascadeFailed { .. } => AppError::Internal(err.to_string()),
    }
}

// ==============================================================================
// PATIENT REGISTRY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn register_patient(
    State(service): State<PatientService>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = service
        .register_patient(request)
        .await
        .map_err(map_patient_error)?;

    Ok(Json(json!({
        "success": true,
        "patient": patient,
        "message": "Patient registered successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(service): State<PatientService>,
    Path(patient_id): Path<PatientId>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = service
        .update_patient(patient_id, request)
        .await
        .map_err(map_patient_error)?;

    Ok(Json(json!({
        "success": true,
        "patient": patient,
        "message": "Patient updated successfully"
    })))
}

/// Deletes the patient together with all of their appointments.
#[axum::debug_handler]
pub async fn delete_patient(
    State(service): State<PatientService>,
    Path(patient_id): Path<PatientId>,
) -> Result<Json<Value>, AppError> {
    info!("Delete request for patient {}", patient_id);
    service
        .delete_patient(patient_id)
        .await
        .map_err(map_patient_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Patient deleted successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(service): State<PatientService>,
    Path(patient_id): Path<PatientId>,
) -> Result<Json<Value>, AppError> {
    let patient = service
        .get_patient(patient_id)
        .await
        .map_err(map_patient_error)?;

    Ok(Json(json!({ "patient": patient })))
}

#[axum::debug_handler]
pub async fn get_patient_by_document(
    State(service): State<PatientService>,
    Path(document): Path<String>,
) -> Result<Json<Value>, AppError> {
    let patient = service
        .find_by_document(&document)
        .await
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    Ok(Json(json!({ "patient": patient })))
}

#[axum::debug_handler]
pub async fn get_all_patients(
    State(service): State<PatientService>,
) -> Result<Json<Value>, AppError> {
    let patients = service.list_patients().await;
    let total = patients.len();

    Ok(Json(json!({
        "patients": patients,
        "total": total
    })))
}
