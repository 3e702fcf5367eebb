use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::{PatientId, PersonDetails};

// ==============================================================================
// PATIENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    #[serde(flatten)]
    pub details: PersonDetails,
    pub age: u8,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Registration payload. Email and phone number are normalized before the
/// record is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub surname: String,
    pub document: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
    pub age: u8,
}

/// Full-record update: every field is submitted again, nothing is patched
/// in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: String,
    pub surname: String,
    pub document: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
    pub age: u8,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatientError {
    #[error("Patient not found: {0}")]
    NotFound(PatientId),

    // No document in the message: raw documents must stay out of logs.
    #[error("A patient with that document already exists")]
    DuplicateDocument,

    #[error("{0}")]
    Validation(String),

    #[error("Could not remove appointments for patient {patient_id}: {reason}")]
    CascadeFailed { patient_id: PatientId, reason: String },
}
