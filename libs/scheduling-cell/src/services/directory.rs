use async_trait::async_trait;

use shared_models::{PatientId, PractitionerId};

use crate::models::{PatientContact, PractitionerContact};

/// Existence lookup into the patient registry. `None` means the id is
/// unknown; the scheduler turns that into its own not-found error before
/// touching any calendar.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn find_patient(&self, patient_id: PatientId) -> Option<PatientContact>;
}

#[async_trait]
pub trait PractitionerDirectory: Send + Sync {
    async fn find_practitioner(&self, practitioner_id: PractitionerId)
        -> Option<PractitionerContact>;
}
