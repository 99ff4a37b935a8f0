// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A booked appointment row. Created exactly once per successful booking;
/// never mutated or deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub hospital_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    /// Time-of-day display string, e.g. "01:00 PM".
    pub appointment_time: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The insert payload; the row id and creation timestamp are assigned by
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub hospital_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub patient_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub hospital_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    /// Defaults to the configured patient when omitted.
    pub patient_id: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Invalid appointment date: {0}")]
    InvalidDate(String),

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("Appointment could not be created: {0}")]
    Backend(String),
}
