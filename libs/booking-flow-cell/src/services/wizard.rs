// libs/booking-flow-cell/src/services/wizard.rs
use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, warn};

use appointment_cell::models::Appointment;
use directory_cell::models::{Doctor, Hospital};

use crate::models::{
    Command, DateOption, FlowError, Loading, Notice, NoticeKind, TimeSlot, WizardEvent,
    WizardStep, WizardView,
};
use crate::services::{dates, slots};

/// All selection state of one booking flow. Owned by the flow service,
/// mutated only through `apply`, and rendered through `view` - never a
/// hidden global.
#[derive(Debug, Clone)]
pub struct WizardState {
    step: WizardStep,
    hospitals: Vec<Hospital>,
    doctors: Vec<Doctor>,
    selected_hospital: Option<Hospital>,
    selected_doctor: Option<Doctor>,
    search_query: String,
    selected_date: DateOption,
    selected_slot: TimeSlot,
    available_times: Vec<String>,
    selected_time: Option<String>,
    appointment: Option<Appointment>,
    loading: Option<Loading>,
    error: Option<FlowError>,
    notice: Option<Notice>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Hospital,
            hospitals: Vec::new(),
            doctors: Vec::new(),
            selected_hospital: None,
            selected_doctor: None,
            search_query: String::new(),
            selected_date: DateOption::Today,
            selected_slot: TimeSlot::Morning,
            available_times: Vec::new(),
            selected_time: None,
            appointment: None,
            loading: None,
            error: None,
            notice: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_hospital(&self) -> Option<&Hospital> {
        self.selected_hospital.as_ref()
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.selected_doctor.as_ref()
    }

    pub fn selected_date(&self) -> DateOption {
        self.selected_date
    }

    pub fn selected_slot(&self) -> TimeSlot {
        self.selected_slot
    }

    pub fn available_times(&self) -> &[String] {
        &self.available_times
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn appointment(&self) -> Option<&Appointment> {
        self.appointment.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Confirmation is only reachable with hospital, doctor and a concrete
    /// time all set.
    pub fn can_confirm(&self) -> bool {
        self.step == WizardStep::DateTime
            && self.selected_hospital.is_some()
            && self.selected_doctor.is_some()
            && self.selected_time.is_some()
    }

    /// Hospitals matching the search filter, case-insensitive on the name.
    pub fn filtered_hospitals(&self) -> Vec<&Hospital> {
        let query = self.search_query.to_lowercase();
        self.hospitals
            .iter()
            .filter(|h| query.is_empty() || h.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Doctors matching the search filter on name or speciality.
    pub fn filtered_doctors(&self) -> Vec<&Doctor> {
        let query = self.search_query.to_lowercase();
        self.doctors
            .iter()
            .filter(|d| {
                query.is_empty()
                    || d.name.to_lowercase().contains(&query)
                    || d.speciality.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// The transition function: one input in, at most one gateway command
    /// out. Illegal inputs are no-ops - no step change, no command.
    pub fn apply(&mut self, event: WizardEvent, now: NaiveDateTime) -> Option<Command> {
        debug!("Applying event at step {}: {:?}", self.step, event);

        if Self::is_user_event(&event) {
            // Notices are transient; the next interaction dismisses them.
            self.notice = None;
        }

        match event {
            WizardEvent::Start => {
                if self.loading.is_some() || !self.hospitals.is_empty() {
                    return None;
                }
                self.loading = Some(Loading::Hospitals);
                Some(Command::FetchHospitals)
            }

            WizardEvent::HospitalsLoaded(hospitals) => {
                if self.loading != Some(Loading::Hospitals) {
                    warn!("Ignoring hospital list: no fetch outstanding");
                    return None;
                }
                self.loading = None;
                self.hospitals = hospitals;
                None
            }

            WizardEvent::HospitalsFailed(message) => {
                if self.loading != Some(Loading::Hospitals) {
                    return None;
                }
                self.loading = None;
                self.error = Some(FlowError::Connection(message));
                None
            }

            WizardEvent::Search(query) => {
                if matches!(self.step, WizardStep::Hospital | WizardStep::Doctor) {
                    self.search_query = query;
                }
                None
            }

            WizardEvent::SelectHospital(hospital_id) => {
                if self.step != WizardStep::Hospital
                    || self.loading.is_some()
                    || self.error.is_some()
                {
                    return None;
                }
                let hospital = self.hospitals.iter().find(|h| h.id == hospital_id)?.clone();
                let hospital_code = hospital.hospital_id.clone();

                self.selected_hospital = Some(hospital);
                // A new hospital invalidates any earlier doctor choice.
                self.selected_doctor = None;
                self.doctors.clear();
                self.step = WizardStep::Doctor;
                self.loading = Some(Loading::Doctors {
                    hospital_code: hospital_code.clone(),
                });
                Some(Command::FetchDoctors { hospital_code })
            }

            WizardEvent::DoctorsLoaded {
                hospital_code,
                doctors,
            } => {
                if !self.doctors_fetch_current(&hospital_code) {
                    warn!("Ignoring stale doctor list for hospital {}", hospital_code);
                    return None;
                }
                self.loading = None;
                self.doctors = doctors;
                None
            }

            WizardEvent::DoctorsFailed {
                hospital_code,
                message,
            } => {
                if !self.doctors_fetch_current(&hospital_code) {
                    return None;
                }
                self.loading = None;
                self.error = Some(FlowError::Fetch(message));
                None
            }

            WizardEvent::SelectDoctor(doctor_id) => {
                if self.step != WizardStep::Doctor
                    || self.loading.is_some()
                    || self.error.is_some()
                {
                    return None;
                }
                let doctor = self.doctors.iter().find(|d| d.id == doctor_id)?.clone();

                self.selected_doctor = Some(doctor);
                self.step = WizardStep::DateTime;
                self.selected_date = DateOption::Today;
                self.selected_slot = slots::default_slot(now.hour());
                self.available_times = slots::slot_times(self.selected_slot);
                self.selected_time = None;
                None
            }

            WizardEvent::SelectDate(option) => {
                if self.step != WizardStep::DateTime || self.loading.is_some() {
                    return None;
                }
                self.selected_date = option;
                None
            }

            WizardEvent::SelectTimeSlot(slot) => {
                if self.step != WizardStep::DateTime || self.loading.is_some() {
                    return None;
                }
                self.selected_slot = slot;
                self.available_times = slots::slot_times(slot);
                // Always cleared, even when the new grid holds the same string.
                self.selected_time = None;
                None
            }

            WizardEvent::SelectTime(time) => {
                if self.step != WizardStep::DateTime || self.loading.is_some() {
                    return None;
                }
                if !self.available_times.iter().any(|t| *t == time) {
                    return None;
                }
                self.selected_time = Some(time);
                None
            }

            WizardEvent::Confirm => {
                if self.step != WizardStep::DateTime || self.loading.is_some() {
                    return None;
                }
                let (Some(hospital), Some(doctor), Some(time)) = (
                    self.selected_hospital.as_ref(),
                    self.selected_doctor.as_ref(),
                    self.selected_time.as_ref(),
                ) else {
                    return None;
                };

                self.loading = Some(Loading::Booking);
                Some(Command::CreateAppointment {
                    hospital_id: hospital.id,
                    doctor_id: doctor.id,
                    appointment_date: dates::appointment_date(self.selected_date, now.date()),
                    appointment_time: time.clone(),
                })
            }

            WizardEvent::BookingSucceeded(appointment) => {
                if self.loading != Some(Loading::Booking) {
                    return None;
                }
                self.loading = None;
                self.appointment = Some(appointment);
                self.step = WizardStep::Confirmation;
                self.notice = Some(Notice {
                    kind: NoticeKind::Success,
                    message: "Appointment booked successfully".to_string(),
                });
                None
            }

            WizardEvent::BookingFailed(message) => {
                if self.loading != Some(Loading::Booking) {
                    return None;
                }
                self.loading = None;
                // The step stays at DateTime; confirming again is the retry.
                self.notice = Some(Notice {
                    kind: NoticeKind::Failure,
                    message,
                });
                None
            }

            WizardEvent::Back => {
                match self.step {
                    WizardStep::Doctor => {
                        // Leaving the screen abandons an in-flight doctor
                        // fetch; the loading guard drops the late response.
                        self.loading = None;
                        if matches!(self.error, Some(FlowError::Fetch(_))) {
                            self.error = None;
                        }
                        self.selected_doctor = None;
                        self.doctors.clear();
                        self.step = WizardStep::Hospital;
                    }
                    WizardStep::DateTime => {
                        if self.loading == Some(Loading::Booking) {
                            return None;
                        }
                        // Doctor selection is retained.
                        self.step = WizardStep::Doctor;
                    }
                    WizardStep::Hospital | WizardStep::Confirmation => {}
                }
                None
            }

            WizardEvent::BackToHome => {
                if self.step != WizardStep::Confirmation {
                    return None;
                }
                self.step = WizardStep::Hospital;
                self.selected_hospital = None;
                self.selected_doctor = None;
                self.doctors.clear();
                self.selected_time = None;
                self.search_query.clear();
                self.appointment = None;
                None
            }

            // Dismissal itself is covered by the user-event sweep above.
            WizardEvent::DismissNotice => None,
        }
    }

    /// Render the state for the given wall-clock instant.
    pub fn view(&self, now: NaiveDateTime) -> WizardView {
        WizardView {
            step: self.step,
            search_query: self.search_query.clone(),
            hospitals: self.filtered_hospitals().into_iter().cloned().collect(),
            doctors: self.filtered_doctors().into_iter().cloned().collect(),
            selected_hospital: self.selected_hospital.clone(),
            selected_doctor: self.selected_doctor.clone(),
            date_options: dates::date_choices(now.date()),
            selected_date: self.selected_date,
            slot_options: slots::offered_slots(now.hour()),
            selected_slot: self.selected_slot,
            available_times: self.available_times.clone(),
            selected_time: self.selected_time.clone(),
            can_confirm: self.can_confirm(),
            appointment: self.appointment.clone(),
            loading: self.loading.as_ref().map(Loading::label),
            error: self.error.clone(),
            notice: self.notice.clone(),
        }
    }

    fn doctors_fetch_current(&self, hospital_code: &str) -> bool {
        matches!(
            &self.loading,
            Some(Loading::Doctors { hospital_code: current }) if current == hospital_code
        )
    }

    fn is_user_event(event: &WizardEvent) -> bool {
        !matches!(
            event,
            WizardEvent::HospitalsLoaded(_)
                | WizardEvent::HospitalsFailed(_)
                | WizardEvent::DoctorsLoaded { .. }
                | WizardEvent::DoctorsFailed { .. }
                | WizardEvent::BookingSucceeded(_)
                | WizardEvent::BookingFailed(_)
        )
    }
}
