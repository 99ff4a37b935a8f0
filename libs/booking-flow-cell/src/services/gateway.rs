// libs/booking-flow-cell/src/services/gateway.rs
use anyhow::Result;
use async_trait::async_trait;

use appointment_cell::models::{Appointment, NewAppointment};
use appointment_cell::services::booking::AppointmentBookingService;
use directory_cell::models::{Doctor, Hospital};
use directory_cell::services::doctor::DoctorService;
use directory_cell::services::hospital::HospitalService;
use shared_config::AppConfig;

/// The data-access boundary the wizard talks through: one request, one
/// response, success or failure. Retry and timeout policy belong behind
/// this trait, never in the wizard.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn list_hospitals(&self) -> Result<Vec<Hospital>>;

    async fn list_doctors(&self, hospital_code: &str) -> Result<Vec<Doctor>>;

    async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment>;
}

/// Production gateway, delegating to the directory and appointment cells.
pub struct SupabaseGateway {
    hospital_service: HospitalService,
    doctor_service: DoctorService,
    booking_service: AppointmentBookingService,
}

impl SupabaseGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            hospital_service: HospitalService::new(config),
            doctor_service: DoctorService::new(config),
            booking_service: AppointmentBookingService::new(config),
        }
    }
}

#[async_trait]
impl BookingGateway for SupabaseGateway {
    async fn list_hospitals(&self) -> Result<Vec<Hospital>> {
        self.hospital_service.list_hospitals().await
    }

    async fn list_doctors(&self, hospital_code: &str) -> Result<Vec<Doctor>> {
        self.doctor_service.list_doctors(hospital_code).await
    }

    async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment> {
        Ok(self.booking_service.create_appointment(new).await?)
    }
}
