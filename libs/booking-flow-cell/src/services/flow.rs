// libs/booking-flow-cell/src/services/flow.rs
use std::sync::Arc;

use chrono::Local;
use tracing::error;

use appointment_cell::models::NewAppointment;
use shared_config::AppConfig;

use crate::models::{Command, WizardEvent};
use crate::services::gateway::{BookingGateway, SupabaseGateway};
use crate::services::wizard::WizardState;

/// Drives a wizard: applies an input, executes whatever gateway command
/// the machine emits, and feeds the outcome back in before returning.
/// One input therefore always runs to completion.
pub struct FlowService {
    gateway: Arc<dyn BookingGateway>,
    patient_id: String,
}

impl FlowService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            gateway: Arc::new(SupabaseGateway::new(config)),
            patient_id: config.default_patient_id.clone(),
        }
    }

    pub fn with_gateway(gateway: Arc<dyn BookingGateway>, patient_id: String) -> Self {
        Self {
            gateway,
            patient_id,
        }
    }

    /// Create a fresh wizard and load the hospital directory.
    pub async fn start(&self) -> WizardState {
        let mut state = WizardState::new();
        self.dispatch(&mut state, WizardEvent::Start).await;
        state
    }

    /// Apply one input, running any resulting gateway call to completion.
    pub async fn dispatch(&self, state: &mut WizardState, event: WizardEvent) {
        let mut next = Some(event);

        while let Some(event) = next.take() {
            let now = Local::now().naive_local();
            let Some(command) = state.apply(event, now) else {
                break;
            };
            next = Some(self.execute(command).await);
        }
    }

    async fn execute(&self, command: Command) -> WizardEvent {
        match command {
            Command::FetchHospitals => match self.gateway.list_hospitals().await {
                Ok(hospitals) => WizardEvent::HospitalsLoaded(hospitals),
                Err(e) => {
                    error!("Hospital fetch failed: {}", e);
                    WizardEvent::HospitalsFailed(e.to_string())
                }
            },

            Command::FetchDoctors { hospital_code } => {
                match self.gateway.list_doctors(&hospital_code).await {
                    Ok(doctors) => WizardEvent::DoctorsLoaded {
                        hospital_code,
                        doctors,
                    },
                    Err(e) => {
                        error!("Doctor fetch failed for {}: {}", hospital_code, e);
                        WizardEvent::DoctorsFailed {
                            hospital_code,
                            message: e.to_string(),
                        }
                    }
                }
            }

            Command::CreateAppointment {
                hospital_id,
                doctor_id,
                appointment_date,
                appointment_time,
            } => {
                let new = NewAppointment {
                    hospital_id,
                    doctor_id,
                    appointment_date,
                    appointment_time,
                    patient_id: self.patient_id.clone(),
                };
                match self.gateway.create_appointment(new).await {
                    Ok(appointment) => WizardEvent::BookingSucceeded(appointment),
                    Err(e) => {
                        error!("Appointment creation failed: {}", e);
                        WizardEvent::BookingFailed(e.to_string())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    use anyhow::Result;
    use async_trait::async_trait;

    use appointment_cell::models::Appointment;
    use directory_cell::models::{Doctor, Hospital};

    use crate::models::{TimeSlot, WizardStep};

    #[derive(Default)]
    struct StubGateway {
        bookings: StdMutex<Vec<NewAppointment>>,
    }

    #[async_trait]
    impl BookingGateway for StubGateway {
        async fn list_hospitals(&self) -> Result<Vec<Hospital>> {
            Ok(vec![Hospital {
                id: 1,
                hospital_id: "H001".to_string(),
                name: "KIMST Hospital".to_string(),
                location: "Talap, Kannur, Kerala".to_string(),
                city: None,
                state: None,
                address: None,
                pincode: None,
                contact_no: None,
                email_id: None,
                status: "24 hours open".to_string(),
                created_at: None,
            }])
        }

        async fn list_doctors(&self, hospital_code: &str) -> Result<Vec<Doctor>> {
            Ok(vec![Doctor {
                id: 10,
                name: "Dr. Erick Kuhlman".to_string(),
                speciality: "Neurologist".to_string(),
                qualification: None,
                consultation_fee: None,
                hospital_id: hospital_code.to_string(),
                created_at: None,
            }])
        }

        async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment> {
            let appointment = Appointment {
                id: 99,
                hospital_id: new.hospital_id,
                doctor_id: new.doctor_id,
                appointment_date: new.appointment_date,
                appointment_time: new.appointment_time.clone(),
                patient_id: Some(new.patient_id.clone()),
                created_at: None,
            };
            self.bookings.lock().unwrap().push(new);
            Ok(appointment)
        }
    }

    #[tokio::test]
    async fn test_configured_patient_reaches_the_gateway() {
        let gateway = Arc::new(StubGateway::default());
        let service =
            FlowService::with_gateway(gateway.clone(), "patient-0042".to_string());

        let mut state = service.start().await;
        service.dispatch(&mut state, WizardEvent::SelectHospital(1)).await;
        service.dispatch(&mut state, WizardEvent::SelectDoctor(10)).await;
        service
            .dispatch(&mut state, WizardEvent::SelectTimeSlot(TimeSlot::Evening))
            .await;
        service
            .dispatch(&mut state, WizardEvent::SelectTime("04:00 PM".to_string()))
            .await;
        service.dispatch(&mut state, WizardEvent::Confirm).await;

        assert_eq!(state.step(), WizardStep::Confirmation);

        let bookings = gateway.bookings.lock().unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].patient_id, "patient-0042");
        assert_eq!(bookings[0].appointment_time, "04:00 PM");
        assert_eq!(bookings[0].appointment_date, Local::now().date_naive());
    }
}
