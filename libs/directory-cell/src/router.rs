use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn directory_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/hospitals", get(handlers::list_hospitals))
        .route("/hospitals/{hospital_code}/doctors", get(handlers::list_doctors))
        .with_state(state)
}
