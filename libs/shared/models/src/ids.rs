//! Record identifiers shared across cells.
//!
//! Ids are assigned by the owning in-memory store: a monotonically
//! increasing counter, never reused, even after the record is deleted.

pub type PatientId = u64;
pub type PractitionerId = u64;
pub type AppointmentId = u64;
