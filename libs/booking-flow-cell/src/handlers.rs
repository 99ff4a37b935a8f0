use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{DateOption, TimeSlot, WizardEvent};
use crate::services::flow::FlowService;
use crate::services::wizard::WizardState;

/// Shared state of the booking-flow cell: one wizard per session, each
/// behind its own mutex so inputs run to completion in arrival order.
pub struct FlowState {
    flow_service: FlowService,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<WizardState>>>>,
}

impl FlowState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_service(FlowService::new(config))
    }

    pub fn with_service(flow_service: FlowService) -> Self {
        Self {
            flow_service,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn session(&self, session_id: &Uuid) -> Option<Arc<Mutex<WizardState>>> {
        self.sessions.read().await.get(session_id).cloned()
    }
}

/// User inputs accepted over HTTP. Gateway outcomes are internal events
/// and deliberately not part of this surface.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRequest {
    SelectHospital { hospital_id: i64 },
    SelectDoctor { doctor_id: i64 },
    Search { query: String },
    SelectDate { date: DateOption },
    SelectTimeSlot { slot: TimeSlot },
    SelectTime { time: String },
    Confirm,
    Back,
    BackToHome,
    DismissNotice,
}

impl EventRequest {
    fn into_event(self) -> WizardEvent {
        match self {
            EventRequest::SelectHospital { hospital_id } => WizardEvent::SelectHospital(hospital_id),
            EventRequest::SelectDoctor { doctor_id } => WizardEvent::SelectDoctor(doctor_id),
            EventRequest::Search { query } => WizardEvent::Search(query),
            EventRequest::SelectDate { date } => WizardEvent::SelectDate(date),
            EventRequest::SelectTimeSlot { slot } => WizardEvent::SelectTimeSlot(slot),
            EventRequest::SelectTime { time } => WizardEvent::SelectTime(time),
            EventRequest::Confirm => WizardEvent::Confirm,
            EventRequest::Back => WizardEvent::Back,
            EventRequest::BackToHome => WizardEvent::BackToHome,
            EventRequest::DismissNotice => WizardEvent::DismissNotice,
        }
    }
}

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<Arc<FlowState>>,
) -> Result<Json<Value>, AppError> {
    // Start loads the hospital directory; a dead backend surfaces as a
    // blocking connection error inside the view, not as a failed session.
    let wizard = state.flow_service.start().await;

    let session_id = Uuid::new_v4();
    let view = wizard.view(Local::now().naive_local());
    state
        .sessions
        .write()
        .await
        .insert(session_id, Arc::new(Mutex::new(wizard)));

    Ok(Json(json!({
        "session_id": session_id,
        "wizard": view
    })))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<FlowState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.session(&session_id).await
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    let wizard = session.lock().await;

    Ok(Json(json!({
        "session_id": session_id,
        "wizard": wizard.view(Local::now().naive_local())
    })))
}

#[axum::debug_handler]
pub async fn apply_event(
    State(state): State<Arc<FlowState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EventRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state.session(&session_id).await
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    // The session lock is held across the gateway call: the next input
    // waits until this one has run to completion.
    let mut wizard = session.lock().await;
    state.flow_service.dispatch(&mut wizard, request.into_event()).await;

    Ok(Json(json!({
        "session_id": session_id,
        "wizard": wizard.view(Local::now().naive_local())
    })))
}

#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<Arc<FlowState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let removed = state.sessions.write().await.remove(&session_id);

    if removed.is_none() {
        return Err(AppError::NotFound("Session not found".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "session_id": session_id
    })))
}
