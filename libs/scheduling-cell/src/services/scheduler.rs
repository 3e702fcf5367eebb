// libs/scheduling-cell/src/services/scheduler.rs
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use notification_cell::Notifier;
use shared_models::{AppointmentId, PatientId, PractitionerId};

use crate::models::{Appointment, AppointmentStatus, ResourceKind, SchedulingError};
use crate::services::clock::Clock;
use crate::services::directory::{PatientDirectory, PractitionerDirectory};
use crate::store::AppointmentStore;

// ==============================================================================
// SCHEDULING SERVICE
// ==============================================================================

/// The scheduling authority. Every appointment mutation goes through here:
/// booking with conflict detection, the lifecycle transitions, hard
/// deletes, and the cascade that clears a resource's calendar before the
/// resource record itself may be removed.
#[derive(Clone)]
pub struct SchedulingService {
    store: AppointmentStore,
    patients: Arc<dyn PatientDirectory>,
    practitioners: Arc<dyn PractitionerDirectory>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl SchedulingService {
    pub fn new(
        store: AppointmentStore,
        patients: Arc<dyn PatientDirectory>,
        practitioners: Arc<dyn PractitionerDirectory>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            patients,
            practitioners,
            notifier,
            clock,
        }
    }

    /// Books an appointment starting at `start_time` for `duration_minutes`.
    ///
    /// The confirmation email is sent after the record is stored; a failed
    /// delivery is recorded in the appointment notes and never unwinds the
    /// booking.
    #[instrument(skip(self))]
    pub async fn schedule(
        &self,
        patient_id: PatientId,
        practitioner_id: PractitionerId,
        start_time: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Result<Appointment, SchedulingError> {
        // Step 1: Both parties must exist before anything else happens
        let patient = self
            .patients
            .find_patient(patient_id)
            .await
            .ok_or(SchedulingError::PatientNotFound(patient_id))?;
        let practitioner = self
            .practitioners
            .find_practitioner(practitioner_id)
            .await
            .ok_or(SchedulingError::PractitionerNotFound(practitioner_id))?;

        // Step 2: Validate the requested interval
        if start_time < self.clock.now() {
            return Err(SchedulingError::InvalidTime(
                "cannot schedule in the past".to_string(),
            ));
        }
        if duration_minutes <= 0 {
            return Err(SchedulingError::InvalidTime(
                "duration must be positive".to_string(),
            ));
        }
        let end_time = Duration::try_minutes(duration_minutes)
            .and_then(|duration| start_time.checked_add_signed(duration))
            .ok_or_else(|| SchedulingError::InvalidTime("duration out of range".to_string()))?;

        // Step 3: Conflict-checked insert, practitioner calendar first
        let mut appointment = self
            .store
            .book(Appointment {
                id: 0,
                patient_id,
                practitioner_id,
                start_time,
                end_time,
                status: AppointmentStatus::Scheduled,
                notes: None,
            })
            .await?;

        info!(
            "Appointment scheduled: {} patient:{} practitioner:{} start:{}",
            appointment.id, patient_id, practitioner_id, start_time
        );

        // Step 4: Confirmation email; the outcome lands in the notes
        let subject = format!("Appointment confirmation with Dr. {}", practitioner.full_name);
        let body = format!(
            "Patient: {}\nDate: {}\nPractitioner: {} ({})",
            patient.full_name,
            start_time.format("%Y-%m-%d %H:%M"),
            practitioner.full_name,
            practitioner.specialty
        );
        let outcome = self.notifier.send(&patient.email, &subject, &body).await;

        appointment.notes = Some(format!(
            "Email status: {}",
            if outcome.delivered { "Sent" } else { "Not sent" }
        ));
        self.store.update(appointment.clone()).await;
        info!(
            "Email sent: {} for appointment {}",
            outcome.delivered, appointment.id
        );

        Ok(appointment)
    }

    /// Marks the appointment cancelled, freeing its calendar slot.
    pub async fn cancel(&self, appointment_id: AppointmentId) -> Result<Appointment, SchedulingError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled)
            .await
    }

    /// Marks the appointment attended, freeing its calendar slot.
    pub async fn mark_attended(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Appointment, SchedulingError> {
        self.transition(appointment_id, AppointmentStatus::Attended)
            .await
    }

    // Transitions carry no terminal-state guard: re-cancelling, or
    // cancelling an attended appointment, re-asserts the requested status.
    async fn transition(
        &self,
        appointment_id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointment = self
            .store
            .get_by_id(appointment_id)
            .await
            .ok_or(SchedulingError::AppointmentNotFound(appointment_id))?;

        appointment.status = status;
        self.store.update(appointment.clone()).await;
        info!("Appointment {}: status set to {}", appointment_id, status);
        Ok(appointment)
    }

    /// Hard delete, whatever the status. Distinct from `cancel`: the record
    /// is gone afterwards, not marked.
    pub async fn delete(&self, appointment_id: AppointmentId) -> Result<(), SchedulingError> {
        if !self.store.delete(appointment_id).await {
            return Err(SchedulingError::AppointmentNotFound(appointment_id));
        }
        info!("Appointment deleted: {}", appointment_id);
        Ok(())
    }

    pub async fn get_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Appointment, SchedulingError> {
        self.store
            .get_by_id(appointment_id)
            .await
            .ok_or(SchedulingError::AppointmentNotFound(appointment_id))
    }

    pub async fn get_by_patient(&self, patient_id: PatientId) -> Vec<Appointment> {
        self.store.list_by_patient(patient_id).await
    }

    pub async fn get_by_practitioner(&self, practitioner_id: PractitionerId) -> Vec<Appointment> {
        self.store.list_by_practitioner(practitioner_id).await
    }

    pub async fn get_all(&self) -> Vec<Appointment> {
        self.store.list_all().await
    }

    /// Side-effect-free availability check used by the conflicts endpoint.
    pub async fn check_conflict(
        &self,
        kind: ResourceKind,
        resource_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        self.store.has_conflict(kind, resource_id, start, end).await
    }
}

/// Calendar teardown seam. The registry cells call this before removing a
/// patient or practitioner record; on Err the caller must keep the record.
#[async_trait]
pub trait AppointmentCascade: Send + Sync {
    async fn cascade_delete_for_resource(
        &self,
        resource_id: u64,
        kind: ResourceKind,
    ) -> Result<usize, SchedulingError>;
}

#[async_trait]
impl AppointmentCascade for SchedulingService {
    /// Removes every appointment the resource participates in, whatever the
    /// status, and closes the resource's calendar against bookings racing
    /// the teardown. The sweep and the closure happen in one store write
    /// guard.
    #[instrument(skip(self))]
    async fn cascade_delete_for_resource(
        &self,
        resource_id: u64,
        kind: ResourceKind,
    ) -> Result<usize, SchedulingError> {
        let removed = self.store.remove_all_for_resource(resource_id, kind).await;
        info!(
            "Cascade removed {} appointments for {} {}",
            removed, kind, resource_id
        );
        Ok(removed)
    }
}
