use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::services::patient::PatientService;

pub fn patient_routes(state: PatientService) -> Router {
    Router::new()
        .route("/", post(handlers::register_patient))
        .route("/", get(handlers::get_all_patients))
        .route("/{patient_id}", get(handlers::get_patient))
        .route("/{patient_id}", put(handlers::update_patient))
        .route("/{patient_id}", delete(handlers::delete_patient))
        .route("/by-document/{document}", get(handlers::get_patient_by_document))
        .with_state(state)
}
