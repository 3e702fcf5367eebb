use axum::{routing::get, Router};

use notification_cell::{notification_routes, EmailNotifier};
use patient_cell::{patient_routes, PatientService};
use practitioner_cell::{practitioner_routes, PractitionerService};
use scheduling_cell::{appointment_routes, SchedulingService};

pub fn create_router(
    scheduler: SchedulingService,
    patients: PatientService,
    practitioners: PractitionerService,
    notifier: EmailNotifier,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Sanare Clinic API is running!" }))
        .nest("/appointments", appointment_routes(scheduler))
        .nest("/patients", patient_routes(patients))
        .nest("/practitioners", practitioner_routes(practitioners))
        .nest("/notifications", notification_routes(notifier))
}
