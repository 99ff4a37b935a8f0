use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use booking_flow_cell::handlers::FlowState;
use booking_flow_cell::router::booking_flow_routes;
use directory_cell::router::directory_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>, flow_state: Arc<FlowState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital booking API is running!" }))
        .nest("/directory", directory_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
        .nest("/booking", booking_flow_routes(flow_state))
}
