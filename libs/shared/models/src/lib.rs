pub mod error;
pub mod ids;
pub mod person;
pub mod validation;

pub use error::AppError;
pub use ids::{AppointmentId, PatientId, PractitionerId};
pub use person::PersonDetails;
pub use validation::PersonValidator;
