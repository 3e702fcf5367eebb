// libs/scheduling-cell/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;
use shared_models::{AppointmentId, PatientId, PractitionerId};

use crate::models::{ConflictCheckQuery, ScheduleAppointmentRequest, SchedulingError};
use crate::services::scheduler::SchedulingService;

fn map_scheduling_error(err: SchedulingError) -> AppError {
    match &err {
        SchedulingError::PatientNotFound(_)
        | SchedulingError::PractitionerNotFound(_)
        | SchedulingError::AppointmentNotFound(_) => AppError::NotFound(err.to_string()),
        SchedulingError::InvalidTime(_) => AppError::BadRequest(err.to_string()),
        SchedulingError::Conflict { .. } => AppError::Conflict(err.to_string()),
    }
}

// ==============================================================================
// APPOINTMENT LIFECYCLE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn schedule_appointment(
    State(scheduler): State<SchedulingService>,
    Json(request): Json<ScheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    info!(
        "Schedule request: patient {} with practitioner {} at {}",
        request.patient_id, request.practitioner_id, request.start_time
    );

    let appointment = scheduler
        .schedule(
            request.patient_id,
            request.practitioner_id,
            request.start_time,
            request.duration_minutes,
        )
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment scheduled successfully"
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(scheduler): State<SchedulingService>,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Value>, AppError> {
    let appointment = scheduler
        .cancel(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment cancelled successfully"
    })))
}

#[axum::debug_handler]
pub async fn attend_appointment(
    State(scheduler): State<SchedulingService>,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Value>, AppError> {
    let appointment = scheduler
        .mark_attended(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment marked as attended"
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(scheduler): State<SchedulingService>,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Value>, AppError> {
    scheduler
        .delete(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment deleted successfully"
    })))
}

// ==============================================================================
// APPOINTMENT QUERY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_appointment(
    State(scheduler): State<SchedulingService>,
    Path(appointment_id): Path<AppointmentId>,
) -> Result<Json<Value>, AppError> {
    let appointment = scheduler
        .get_appointment(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn get_all_appointments(
    State(scheduler): State<SchedulingService>,
) -> Result<Json<Value>, AppError> {
    let appointments = scheduler.get_all().await;
    let total = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(scheduler): State<SchedulingService>,
    Path(patient_id): Path<PatientId>,
) -> Result<Json<Value>, AppError> {
    let appointments = scheduler.get_by_patient(patient_id).await;
    let total = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn get_practitioner_appointments(
    State(scheduler): State<SchedulingService>,
    Path(practitioner_id): Path<PractitionerId>,
) -> Result<Json<Value>, AppError> {
    let appointments = scheduler.get_by_practitioner(practitioner_id).await;
    let total = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn check_appointment_conflicts(
    State(scheduler): State<SchedulingService>,
    Query(params): Query<ConflictCheckQuery>,
) -> Result<Json<Value>, AppError> {
    if params.end_time <= params.start_time {
        return Err(AppError::BadRequest(
            "end_time must be after start_time".to_string(),
        ));
    }

    let conflict = scheduler
        .check_conflict(
            params.kind,
            params.resource_id,
            params.start_time,
            params.end_time,
        )
        .await;

    Ok(Json(json!({ "conflict": conflict })))
}
