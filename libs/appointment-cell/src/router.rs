use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/booked-times", get(handlers::get_booked_times))
        .with_state(state)
}
