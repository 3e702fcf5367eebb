use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::services::practitioner::PractitionerService;

pub fn practitioner_routes(state: PractitionerService) -> Router {
    Router::new()
        .route("/", post(handlers::register_practitioner))
        .route("/", get(handlers::get_all_practitioners))
        .route("/{practitioner_id}", get(handlers::get_practitioner))
        .route("/{practitioner_id}", put(handlers::update_practitioner))
        .route("/{practitioner_id}", delete(handlers::delete_practitioner))
        .route(
            "/by-document/{document}",
            get(handlers::get_practitioner_by_document),
        )
        .route(
            "/specialty/{specialty}",
            get(handlers::get_practitioners_by_specialty),
        )
        .with_state(state)
}
