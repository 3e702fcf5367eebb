use std::sync::Arc;

use tracing::{info, warn};

use scheduling_cell::models::ResourceKind;
use scheduling_cell::AppointmentCascade;
use shared_models::validation::{is_valid_phone, normalize_email, normalize_phone};
use shared_models::{PersonDetails, PersonValidator, PractitionerId};

use crate::models::{
    Practitioner, PractitionerError, RegisterPractitionerRequest, UpdatePractitionerRequest,
};
use crate::store::PractitionerStore;

/// Registration and upkeep of practitioner records. A practitioner is
/// unique by document and by name plus specialty.
#[derive(Clone)]
pub struct PractitionerService {
    store: PractitionerStore,
    scheduler: Arc<dyn AppointmentCascade>,
    validator: PersonValidator,
}

impl PractitionerService {
    pub fn new(store: PractitionerStore, scheduler: Arc<dyn AppointmentCascade>) -> Self {
        Self {
            store,
            scheduler,
            validator: PersonValidator::new(),
        }
    }

    pub async fn register_practitioner(
        &self,
        request: RegisterPractitionerRequest,
    ) -> Result<Practitioner, PractitionerError> {
        let (details, specialty) = self.validated_details(
            &request.name,
            &request.surname,
            &request.document,
            &request.phone_number,
            &request.email,
            &request.address,
            &request.specialty,
        )?;
        if self.store.document_taken(&details.document, None).await {
            return Err(PractitionerError::DuplicateDocument);
        }
        if self
            .store
            .name_specialty_taken(&details.name, &specialty, None)
            .await
        {
            return Err(PractitionerError::DuplicateNameSpecialty);
        }

        let practitioner = self
            .store
            .add(Practitioner {
                id: 0,
                details,
                specialty,
            })
            .await;
        info!(
            "Practitioner registered: {} (document {}) - {}",
            practitioner.id,
            practitioner.details.masked_document(),
            practitioner.specialty
        );
        Ok(practitioner)
    }

    pub async fn update_practitioner(
        &self,
        practitioner_id: PractitionerId,
        request: UpdatePractitionerRequest,
    ) -> Result<Practitioner, PractitionerError> {
        if self.store.get_by_id(practitioner_id).await.is_none() {
            return Err(PractitionerError::NotFound(practitioner_id));
        }
        let (details, specialty) = self.validated_details(
            &request.name,
            &request.surname,
            &request.document,
            &request.phone_number,
            &request.email,
            &request.address,
            &request.specialty,
        )?;
        if self
            .store
            .document_taken(&details.document, Some(practitioner_id))
            .await
        {
            return Err(PractitionerError::DuplicateDocument);
        }
        if self
            .store
            .name_specialty_taken(&details.name, &specialty, Some(practitioner_id))
            .await
        {
            return Err(PractitionerError::DuplicateNameSpecialty);
        }

        let updated = Practitioner {
            id: practitioner_id,
            details,
            specialty,
        };
        if !self.store.update(updated.clone()).await {
            // Deleted between the lookup and the write.
            return Err(PractitionerError::NotFound(practitioner_id));
        }
        info!("Practitioner updated: {}", practitioner_id);
        Ok(updated)
    }

    /// Removes the practitioner and every appointment on their calendar. The
    /// appointments go first; if that sweep fails the record stays.
    pub async fn delete_practitioner(
        &self,
        practitioner_id: PractitionerId,
    ) -> Result<(), PractitionerError> {
        let Some(existing) = self.store.get_by_id(practitioner_id).await else {
            return Err(PractitionerError::NotFound(practitioner_id));
        };

        let removed = self
            .scheduler
            .cascade_delete_for_resource(practitioner_id, ResourceKind::Practitioner)
            .await
            .map_err(|e| PractitionerError::CascadeFailed {
                practitioner_id,
                reason: e.to_string(),
            })?;

        self.store.remove(practitioner_id).await;
        info!(
            "Practitioner deleted: {} (document {}), {} appointment(s) removed",
            practitioner_id,
            existing.details.masked_document(),
            removed
        );
        Ok(())
    }

    pub async fn get_practitioner(
        &self,
        practitioner_id: PractitionerId,
    ) -> Result<Practitioner, PractitionerError> {
        self.store
            .get_by_id(practitioner_id)
            .await
            .ok_or(PractitionerError::NotFound(practitioner_id))
    }

    pub async fn find_by_document(&self, document: &str) -> Option<Practitioner> {
        self.store.get_by_document(document).await
    }

    pub async fn find_by_specialty(&self, specialty: &str) -> Vec<Practitioner> {
        self.store.list_by_specialty(specialty).await
    }

    pub async fn list_practitioners(&self) -> Vec<Practitioner> {
        self.store.list_all().await
    }

    fn validated_details(
        &self,
        name: &str,
        surname: &str,
        document: &str,
        phone_number: &str,
        email: &str,
        address: &str,
        specialty: &str,
    ) -> Result<(PersonDetails, String), PractitionerError> {
        if !self.validator.is_valid_name(name) {
            return Err(PractitionerError::Validation("Invalid name".to_string()));
        }
        if !self.validator.is_valid_name(surname) {
            return Err(PractitionerError::Validation("Invalid surname".to_string()));
        }
        if !self.validator.is_valid_document(document) {
            return Err(PractitionerError::Validation("Invalid document".to_string()));
        }
        if specialty.trim().is_empty() {
            return Err(PractitionerError::Validation(
                "Specialty is required".to_string(),
            ));
        }

        let (phone, truncated) = normalize_phone(phone_number);
        if truncated {
            warn!("Phone number longer than 10 digits was truncated to the trailing 10");
        }
        if !is_valid_phone(&phone) {
            return Err(PractitionerError::Validation(
                "Invalid phone number: must contain 7 to 10 digits".to_string(),
            ));
        }

        let email = normalize_email(email);
        if !self.validator.is_valid_email(&email) {
            return Err(PractitionerError::Validation(
                "Invalid email format".to_string(),
            ));
        }

        Ok((
            PersonDetails {
                name: name.trim().to_string(),
                surname: surname.trim().to_string(),
                document: document.trim().to_string(),
                phone_number: phone,
                address: address.trim().to_string(),
                email,
            },
            specialty.trim().to_string(),
        ))
    }
}
