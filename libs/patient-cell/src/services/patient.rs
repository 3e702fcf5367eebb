use std::sync::Arc;

use tracing::{info, warn};

use scheduling_cell::models::ResourceKind;
use scheduling_cell::AppointmentCascade;
use shared_models::validation::{is_valid_age, is_valid_phone, normalize_email, normalize_phone};
use shared_models::{PatientId, PersonDetails, PersonValidator};

use crate::models::{Patient, PatientError, RegisterPatientRequest, UpdatePatientRequest};
use crate::store::PatientStore;

/// Registration and upkeep of patient records. Personal fields are
/// validated and normalized here, before the store ever sees them.
#[derive(Clone)]
pub struct PatientService {
    store: PatientStore,
    scheduler: Arc<dyn AppointmentCascade>,
    validator: PersonValidator,
}

impl PatientService {
    pub fn new(store: PatientStore, scheduler: Arc<dyn AppointmentCascade>) -> Self {
        Self {
            store,
            scheduler,
            validator: PersonValidator::new(),
        }
    }

    pub async fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<Patient, PatientError> {
        let details = self.validated_details(
            &request.name,
            &request.surname,
            &request.document,
            request.age,
            &request.phone_number,
            &request.email,
            &request.address,
        )?;
        if self.store.document_taken(&details.document, None).await {
            return Err(PatientError::DuplicateDocument);
        }

        let patient = self
            .store
            .add(Patient {
                id: 0,
                details,
                age: request.age,
            })
            .await;
        info!(
            "Patient registered: {} (document {})",
            patient.id,
            patient.details.masked_document()
        );
        Ok(patient)
    }

    pub async fn update_patient(
        &self,
        patient_id: PatientId,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        if self.store.get_by_id(patient_id).await.is_none() {
            return Err(PatientError::NotFound(patient_id));
        }
        let details = self.validated_details(
            &request.name,
            &request.surname,
            &request.document,
            request.age,
            &request.phone_number,
            &request.email,
            &request.address,
        )?;
        if self
            .store
            .document_taken(&details.document, Some(patient_id))
            .await
        {
            return Err(PatientError::DuplicateDocument);
        }

        let updated = Patient {
            id: patient_id,
            details,
            age: request.age,
        };
        if !self.store.update(updated.clone()).await {
            // Deleted between the lookup and the write.
            return Err(PatientError::NotFound(patient_id));
        }
        info!("Patient updated: {}", patient_id);
        Ok(updated)
    }

    /// Removes the patient and every appointment they participate in. The
    /// appointments go first; if that sweep fails the patient record stays.
    pub async fn delete_patient(&self, patient_id: PatientId) -> Result<(), PatientError> {
        let Some(existing) = self.store.get_by_id(patient_id).await else {
            return Err(PatientError::NotFound(patient_id));
        };

        let removed = self
            .scheduler
            .cascade_delete_for_resource(patient_id, ResourceKind::Patient)
            .await
            .map_err(|e| PatientError::CascadeFailed {
                patient_id,
                reason: e.to_string(),
            })?;

        self.store.remove(patient_id).await;
        info!(
            "Patient deleted: {} (document {}), {} appointment(s) removed",
            patient_id,
            existing.details.masked_document(),
            removed
        );
        Ok(())
    }

    pub async fn get_patient(&self, patient_id: PatientId) -> Result<Patient, PatientError> {
        self.store
            .get_by_id(patient_id)
            .await
            .ok_or(PatientError::NotFound(patient_id))
    }

    pub async fn find_by_document(&self, document: &str) -> Option<Patient> {
        self.store.get_by_document(document).await
    }

    pub async fn list_patients(&self) -> Vec<Patient> {
        self.store.list_all().await
    }

    fn validated_details(
        &self,
        name: &str,
        surname: &str,
        document: &str,
        age: u8,
        phone_number: &str,
        email: &str,
        address: &str,
    ) -> Result<PersonDetails, PatientError> {
        if !self.validator.is_valid_name(name) {
            return Err(PatientError::Validation("Invalid name".to_string()));
        }
        if !self.validator.is_valid_name(surname) {
            return Err(PatientError::Validation("Invalid surname".to_string()));
        }
        if !self.validator.is_valid_document(document) {
            return Err(PatientError::Validation("Invalid document".to_string()));
        }
        if !is_valid_age(age) {
            return Err(PatientError::Validation("Invalid age".to_string()));
        }

        let (phone, truncated) = normalize_phone(phone_number);
        if truncated {
            warn!("Phone number longer than 10 digits was truncated to the trailing 10");
        }
        if !is_valid_phone(&phone) {
            return Err(PatientError::Validation(
                "Invalid phone number: must contain 7 to 10 digits".to_string(),
            ));
        }

        let email = normalize_email(email);
        if !self.validator.is_valid_email(&email) {
            return Err(PatientError::Validation("Invalid email format".to_string()));
        }

        Ok(PersonDetails {
            name: name.trim().to_string(),
            surname: surname.trim().to_string(),
            document: document.trim().to_string(),
            phone_number: phone,
            address: address.trim().to_string(),
            email,
        })
    }
}
