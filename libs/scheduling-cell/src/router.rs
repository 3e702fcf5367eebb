// libs/scheduling-cell/src/router.rs
use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::services::scheduler::SchedulingService;

pub fn appointment_routes(state: SchedulingService) -> Router {
    Router::new()
        .route("/", post(handlers::schedule_appointment))
        .route("/", get(handlers::get_all_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/{appointment_id}/attend", post(handlers::attend_appointment))
        .route("/patients/{patient_id}", get(handlers::get_patient_appointments))
        .route(
            "/practitioners/{practitioner_id}",
            get(handlers::get_practitioner_appointments),
        )
        .route("/conflicts/check", get(handlers::check_appointment_conflicts))
        .with_state(state)
}
