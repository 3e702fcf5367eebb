// libs/scheduling-cell/src/calendar.rs
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use shared_models::AppointmentId;

use crate::models::Appointment;

/// Per-resource ordered view of the appointments that currently occupy
/// calendar time. Only `Scheduled` rows belong here; the store removes an
/// entry the moment an appointment is cancelled, attended, or deleted.
///
/// Entries are keyed by `(start, appointment id)` and map to the interval
/// end, so an overlap scan walks a resource's calendar in start order and
/// stops at the first entry starting at or after the queried end.
#[derive(Debug, Default)]
pub struct CalendarIndex {
    entries: HashMap<u64, BTreeMap<(DateTime<Utc>, AppointmentId), DateTime<Utc>>>,
}

impl CalendarIndex {
    pub fn insert(&mut self, resource_id: u64, appointment: &Appointment) {
        self.entries
            .entry(resource_id)
            .or_default()
            .insert((appointment.start_time, appointment.id), appointment.end_time);
    }

    pub fn remove(&mut self, resource_id: u64, appointment: &Appointment) {
        if let Some(calendar) = self.entries.get_mut(&resource_id) {
            calendar.remove(&(appointment.start_time, appointment.id));
            if calendar.is_empty() {
                self.entries.remove(&resource_id);
            }
        }
    }

    /// Half-open interval overlap: `[s1,e1)` and `[s2,e2)` collide iff
    /// `s1 < e2 && s2 < e1`. Back-to-back intervals do not collide.
    pub fn has_conflict(
        &self,
        resource_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        let Some(calendar) = self.entries.get(&resource_id) else {
            return false;
        };
        calendar
            .range(..(end, AppointmentId::MIN))
            .any(|(_, entry_end)| *entry_end > start)
    }
}
