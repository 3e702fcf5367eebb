use axum::{routing::get, Router};

use crate::handlers;
use crate::services::email::EmailNotifier;

pub fn notification_routes(state: EmailNotifier) -> Router {
    Router::new()
        .route("/history", get(handlers::get_delivery_history))
        .with_state(state)
}
