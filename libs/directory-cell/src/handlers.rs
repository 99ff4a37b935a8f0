use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::services::{doctor::DoctorService, hospital::HospitalService};

#[axum::debug_handler]
pub async fn list_hospitals(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let hospital_service = HospitalService::new(&state);

    let hospitals = hospital_service.list_hospitals().await
        .map_err(|e| AppError::Fetch(e.to_string()))?;

    Ok(Json(json!({
        "hospitals": hospitals,
        "total": hospitals.len()
    })))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    Path(hospital_code): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service.list_doctors(&hospital_code).await
        .map_err(|e| AppError::Fetch(e.to_string()))?;

    Ok(Json(json!({
        "doctors": doctors,
        "hospital_id": hospital_code,
        "total": doctors.len()
    })))
}
