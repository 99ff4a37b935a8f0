// libs/appointment-cell/src/services/booking.rs
use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, AppointmentError, NewAppointment};

pub struct AppointmentBookingService {
    supabase: SupabaseClient,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Insert one appointment row. A single request with two outcomes;
    /// retrying is the caller's (manual) decision.
    pub async fn create_appointment(
        &self,
        new: NewAppointment,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Creating appointment: hospital {} doctor {} on {} at {}",
            new.hospital_id, new.doctor_id, new.appointment_date, new.appointment_time
        );

        if new.appointment_time.trim().is_empty() {
            return Err(AppointmentError::InvalidTime(
                "appointment time must not be empty".to_string(),
            ));
        }

        let today = Local::now().date_naive();
        if new.appointment_date < today {
            return Err(AppointmentError::InvalidDate(format!(
                "appointment date {} is in the past",
                new.appointment_date
            )));
        }

        let appointment_data = json!({
            "hospital_id": new.hospital_id,
            "doctor_id": new.doctor_id,
            "appointment_date": new.appointment_date,
            "appointment_time": new.appointment_time,
            "patient_id": new.patient_id,
            "created_at": Utc::now().to_rfc3339()
        });

        let result: Vec<Value> = self.supabase
            .insert_returning("/rest/v1/appointments", appointment_data)
            .await
            .map_err(|e| AppointmentError::Backend(e.to_string()))?;

        if result.is_empty() {
            return Err(AppointmentError::Backend(
                "Failed to create appointment".to_string(),
            ));
        }

        let appointment: Appointment = serde_json::from_value(result[0].clone())
            .map_err(|e| AppointmentError::Backend(e.to_string()))?;

        info!("Appointment created with ID: {}", appointment.id);
        Ok(appointment)
    }

    /// Times already booked for a doctor on a date. The booking wizard's
    /// slot table is static and does not consult this; the query exists for
    /// clients that want the live picture.
    pub async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> Result<Vec<String>> {
        debug!("Fetching booked times for doctor {} on {}", doctor_id, date);

        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&appointment_date=eq.{}&select=appointment_time",
            doctor_id, date
        );
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await?;

        let times = result.into_iter()
            .filter_map(|row| row["appointment_time"].as_str().map(str::to_string))
            .collect();

        Ok(times)
    }
}
