use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AppointmentError, BookAppointmentRequest, NewAppointment};
use crate::services::booking::AppointmentBookingService;

#[derive(Debug, Deserialize)]
pub struct BookedTimesQuery {
    pub doctor_id: i64,
    pub date: NaiveDate,
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let patient_id = request.patient_id
        .unwrap_or_else(|| state.default_patient_id.clone());

    let new = NewAppointment {
        hospital_id: request.hospital_id,
        doctor_id: request.doctor_id,
        appointment_date: request.appointment_date,
        appointment_time: request.appointment_time,
        patient_id,
    };

    let appointment = booking_service.create_appointment(new).await
        .map_err(|e| match e {
            AppointmentError::InvalidDate(_) | AppointmentError::InvalidTime(_) => {
                AppError::BadRequest(e.to_string())
            }
            AppointmentError::Backend(_) => AppError::Booking(e.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment booked successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_booked_times(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<BookedTimesQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let times = booking_service.booked_times(query.doctor_id, query.date).await
        .map_err(|e| AppError::Fetch(e.to_string()))?;

    Ok(Json(json!({
        "doctor_id": query.doctor_id,
        "date": query.date,
        "booked_times": times,
        "total": times.len()
    })))
}
