use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use shared_models::{AppointmentId, PatientId, PractitionerId};

use crate::calendar::CalendarIndex;
use crate::models::{Appointment, AppointmentStatus, ResourceKind, SchedulingError};

// ==============================================================================
// APPOINTMENT STORE
// ==============================================================================

#[derive(Debug)]
struct StoreInner {
    next_id: AppointmentId,
    records: HashMap<AppointmentId, Appointment>,
    patient_calendar: CalendarIndex,
    practitioner_calendar: CalendarIndex,
    swept_patients: HashSet<PatientId>,
    swept_practitioners: HashSet<PractitionerId>,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: HashMap::new(),
            patient_calendar: CalendarIndex::default(),
            practitioner_calendar: CalendarIndex::default(),
            swept_patients: HashSet::new(),
            swept_practitioners: HashSet::new(),
        }
    }
}

impl StoreInner {
    fn index_insert(&mut self, appointment: &Appointment) {
        if appointment.status == AppointmentStatus::Scheduled {
            self.patient_calendar
                .insert(appointment.patient_id, appointment);
            self.practitioner_calendar
                .insert(appointment.practitioner_id, appointment);
        }
    }

    fn index_remove(&mut self, appointment: &Appointment) {
        if appointment.status == AppointmentStatus::Scheduled {
            self.patient_calendar
                .remove(appointment.patient_id, appointment);
            self.practitioner_calendar
                .remove(appointment.practitioner_id, appointment);
        }
    }

    fn calendar(&self, kind: ResourceKind) -> &CalendarIndex {
        match kind {
            ResourceKind::Patient => &self.patient_calendar,
            ResourceKind::Practitioner => &self.practitioner_calendar,
        }
    }
}

/// Owner of all appointment records.
///
/// A single `RwLock` guards both the records and the calendar indexes, so
/// every mutation observes and leaves a consistent view. Ids are assigned
/// here, monotonically, and never reused. All listings return detached
/// copies sorted by start time with the id as tie-break.
#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next id and appends the record. Never fails.
    pub async fn add(&self, mut record: Appointment) -> AppointmentId {
        let mut inner = self.inner.write().await;
        record.id = inner.next_id;
        inner.next_id += 1;
        inner.index_insert(&record);
        let id = record.id;
        inner.records.insert(id, record);
        id
    }

    /// Conflict-checked insert. The practitioner calendar is consulted
    /// first, then the patient calendar, short-circuiting on the first hit.
    /// Check and insert happen under one write guard, so two racing
    /// bookings for the same slot cannot both pass the check.
    pub async fn book(&self, mut record: Appointment) -> Result<Appointment, SchedulingError> {
        let mut inner = self.inner.write().await;

        // A swept calendar never reopens: the registry record is on its way
        // out and ids are never reassigned.
        if inner.swept_patients.contains(&record.patient_id) {
            return Err(SchedulingError::PatientNotFound(record.patient_id));
        }
        if inner.swept_practitioners.contains(&record.practitioner_id) {
            return Err(SchedulingError::PractitionerNotFound(record.practitioner_id));
        }

        if inner.practitioner_calendar.has_conflict(
            record.practitioner_id,
            record.start_time,
            record.end_time,
        ) {
            debug!(
                "Practitioner {} calendar rejects [{} - {}]",
                record.practitioner_id, record.start_time, record.end_time
            );
            return Err(SchedulingError::Conflict {
                resource: ResourceKind::Practitioner,
            });
        }
        if inner
            .patient_calendar
            .has_conflict(record.patient_id, record.start_time, record.end_time)
        {
            debug!(
                "Patient {} calendar rejects [{} - {}]",
                record.patient_id, record.start_time, record.end_time
            );
            return Err(SchedulingError::Conflict {
                resource: ResourceKind::Patient,
            });
        }

        record.id = inner.next_id;
        inner.next_id += 1;
        inner.index_insert(&record);
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    /// Full replace by id. Returns false, changing nothing, when the id is
    /// unknown, so a deleted record can never be written back to life.
    pub async fn update(&self, record: Appointment) -> bool {
        let mut inner = self.inner.write().await;
        let Some(previous) = inner.records.get(&record.id).cloned() else {
            return false;
        };
        inner.index_remove(&previous);
        inner.index_insert(&record);
        inner.records.insert(record.id, record);
        true
    }

    /// Removes by id. Returns false if the id is unknown.
    pub async fn delete(&self, id: AppointmentId) -> bool {
        let mut inner = self.inner.write().await;
        let Some(removed) = inner.records.remove(&id) else {
            return false;
        };
        inner.index_remove(&removed);
        true
    }

    /// Drains every record referencing the resource, whatever the status,
    /// and closes that resource's calendar to future bookings. Sweep and
    /// closure happen under one write guard, so a booking racing the sweep
    /// either lands before it (and is swept) or is rejected after it.
    pub async fn remove_all_for_resource(&self, resource_id: u64, kind: ResourceKind) -> usize {
        let mut inner = self.inner.write().await;

        let doomed: Vec<Appointment> = inner
            .records
            .values()
            .filter(|a| match kind {
                ResourceKind::Patient => a.patient_id == resource_id,
                ResourceKind::Practitioner => a.practitioner_id == resource_id,
            })
            .cloned()
            .collect();
        for appointment in &doomed {
            inner.records.remove(&appointment.id);
            inner.index_remove(appointment);
        }

        match kind {
            ResourceKind::Patient => inner.swept_patients.insert(resource_id),
            ResourceKind::Practitioner => inner.swept_practitioners.insert(resource_id),
        };
        doomed.len()
    }

    pub async fn get_by_id(&self, id: AppointmentId) -> Option<Appointment> {
        self.inner.read().await.records.get(&id).cloned()
    }

    pub async fn list_by_patient(&self, patient_id: PatientId) -> Vec<Appointment> {
        let inner = self.inner.read().await;
        let mut matching: Vec<Appointment> = inner
            .records
            .values()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect();
        matching.sort_by_key(|a| (a.start_time, a.id));
        matching
    }

    pub async fn list_by_practitioner(&self, practitioner_id: PractitionerId) -> Vec<Appointment> {
        let inner = self.inner.read().await;
        let mut matching: Vec<Appointment> = inner
            .records
            .values()
            .filter(|a| a.practitioner_id == practitioner_id)
            .cloned()
            .collect();
        matching.sort_by_key(|a| (a.start_time, a.id));
        matching
    }

    pub async fn list_all(&self) -> Vec<Appointment> {
        let inner = self.inner.read().await;
        let mut all: Vec<Appointment> = inner.records.values().cloned().collect();
        all.sort_by_key(|a| a.id);
        all
    }

    /// Side-effect-free overlap check against one resource's calendar.
    pub async fn has_conflict(
        &self,
        kind: ResourceKind,
        resource_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        self.inner
            .read()
            .await
            .calendar(kind)
            .has_conflict(resource_id, start, end)
    }
}
