use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use notification_cell::EmailNotifier;
use patient_cell::{PatientService, PatientStore};
use practitioner_cell::{PractitionerService, PractitionerStore};
use scheduling_cell::{AppointmentStore, SchedulingService, SystemClock};
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sanare Clinic API server");

    // Load configuration
    let config = AppConfig::from_env();

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Wire the cells. The registry stores double as the scheduler's
    // directories, and the registry services call back into the scheduler
    // to sweep appointments when a record is deleted.
    let patients = PatientStore::new();
    let practitioners = PractitionerStore::new();
    let notifier = EmailNotifier::with_sender(config.notification_sender.clone());
    let scheduler = SchedulingService::new(
        AppointmentStore::new(),
        Arc::new(patients.clone()),
        Arc::new(practitioners.clone()),
        Arc::new(notifier.clone()),
        Arc::new(SystemClock),
    );
    let patient_service = PatientService::new(patients, Arc::new(scheduler.clone()));
    let practitioner_service = PractitionerService::new(practitioners, Arc::new(scheduler.clone()));

    // Build the application router
    let app = router::create_router(scheduler, patient_service, practitioner_service, notifier)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], config.server_port)));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
