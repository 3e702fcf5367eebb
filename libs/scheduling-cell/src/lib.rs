pub mod calendar;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use calendar::CalendarIndex;
pub use models::*;
pub use router::appointment_routes;
pub use services::clock::{Clock, FixedClock, SystemClock};
pub use services::directory::{PatientDirectory, PractitionerDirectory};
pub use services::scheduler::{AppointmentCascade, SchedulingService};
pub use store::AppointmentStore;
