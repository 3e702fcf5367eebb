// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use shared_models::{AppointmentId, PatientId, PractitionerId};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A single booking between one patient and one practitioner.
///
/// The store assigns `id` on insert. `end_time` is fixed at creation as
/// `start_time + duration`; after that only `status` and `notes` change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub practitioner_id: PractitionerId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Attended,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Attended => write!(f, "attended"),
        }
    }
}

/// The two calendar owners an appointment occupies a slot on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Patient,
    Practitioner,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Patient => write!(f, "patient"),
            ResourceKind::Practitioner => write!(f, "practitioner"),
        }
    }
}

// ==============================================================================
// DIRECTORY CONTACT VIEWS
// ==============================================================================

/// What the scheduler needs to know about a patient: enough to address and
/// word the confirmation email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientContact {
    pub id: PatientId,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PractitionerContact {
    pub id: PractitionerId,
    pub full_name: String,
    pub specialty: String,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub patient_id: PatientId,
    pub practitioner_id: PractitionerId,
    pub start_time: DateTime<Utc>,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,
}

fn default_duration_minutes() -> i64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConflictCheckQuery {
    pub kind: ResourceKind,
    pub resource_id: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("Practitioner not found: {0}")]
    PractitionerNotFound(PractitionerId),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(AppointmentId),

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("The {resource} has another appointment at that time")]
    Conflict { resource: ResourceKind },
}
