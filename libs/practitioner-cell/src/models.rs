use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::{PersonDetails, PractitionerId};

// ==============================================================================
// PRACTITIONER MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practitioner {
    pub id: PractitionerId,
    #[serde(flatten)]
    pub details: PersonDetails,
    pub specialty: String,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPractitionerRequest {
    pub name: String,
    pub surname: String,
    pub document: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
    pub specialty: String,
}

/// Full-record update: every field is submitted again, nothing is patched
/// in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePractitionerRequest {
    pub name: String,
    pub surname: String,
    pub document: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
    pub specialty: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PractitionerError {
    #[error("Practitioner not found: {0}")]
    NotFound(PractitionerId),

    // No document in the message: raw documents must stay out of logs.
    #[error("A practitioner with that document already exists")]
    DuplicateDocument,

    #[error("A practitioner with the same name and specialty already exists")]
    DuplicateNameSpecialty,

    #[error("{0}")]
    Validation(String),

    #[error("Could not remove appointments for practitioner {practitioner_id}: {reason}")]
    CascadeFailed {
        practitioner_id: PractitionerId,
        reason: String,
    },
}
