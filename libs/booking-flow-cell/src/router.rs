use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{self, FlowState};

pub fn booking_flow_routes(state: Arc<FlowState>) -> Router {
    Router::new()
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/{session_id}/events", post(handlers::apply_event))
        .with_state(state)
}
