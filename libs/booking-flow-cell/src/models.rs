// libs/booking-flow-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use appointment_cell::models::Appointment;
use directory_cell::models::{Doctor, Hospital};

// ==============================================================================
// WIZARD VOCABULARY
// ==============================================================================

/// The four screens of the booking flow, visited strictly in order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Hospital,
    Doctor,
    DateTime,
    Confirmation,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Hospital => write!(f, "hospital"),
            WizardStep::Doctor => write!(f, "doctor"),
            WizardStep::DateTime => write!(f, "date_time"),
            WizardStep::Confirmation => write!(f, "confirmation"),
        }
    }
}

/// The three selectable calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateOption {
    Today,
    Tomorrow,
    Later,
}

/// Coarse time-of-day bucket offered before choosing an exact time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateChoice {
    pub id: DateOption,
    pub label: String,
    pub sub_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotOption {
    pub id: TimeSlot,
    pub label: String,
    pub time_range: String,
}

// ==============================================================================
// NOTICES AND BLOCKING ERRORS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Transient acknowledgment, dismissed by the next user input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Blocking errors held in wizard state until the flow moves on.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FlowError {
    /// Backend unreachable at startup; fatal to the whole flow.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Doctor list retrieval failed; no partial list is shown.
    #[error("Fetch error: {0}")]
    Fetch(String),
}

// ==============================================================================
// EVENTS AND COMMANDS
// ==============================================================================

/// Every discrete input the wizard reacts to: user selections plus the
/// outcomes of gateway calls.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    Start,
    HospitalsLoaded(Vec<Hospital>),
    HospitalsFailed(String),
    Search(String),
    SelectHospital(i64),
    DoctorsLoaded { hospital_code: String, doctors: Vec<Doctor> },
    DoctorsFailed { hospital_code: String, message: String },
    SelectDoctor(i64),
    SelectDate(DateOption),
    SelectTimeSlot(TimeSlot),
    SelectTime(String),
    Confirm,
    BookingSucceeded(Appointment),
    BookingFailed(String),
    Back,
    BackToHome,
    DismissNotice,
}

/// A gateway call requested by a transition. The machine never performs
/// IO itself; the flow service executes these and feeds the result back.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchHospitals,
    FetchDoctors { hospital_code: String },
    CreateAppointment {
        hospital_id: i64,
        doctor_id: i64,
        appointment_date: NaiveDate,
        appointment_time: String,
    },
}

/// Loading sub-state while a gateway call is outstanding. A result event
/// only applies if it matches the sub-state that requested it.
#[derive(Debug, Clone, PartialEq)]
pub enum Loading {
    Hospitals,
    Doctors { hospital_code: String },
    Booking,
}

impl Loading {
    pub fn label(&self) -> &'static str {
        match self {
            Loading::Hospitals => "hospitals",
            Loading::Doctors { .. } => "doctors",
            Loading::Booking => "booking",
        }
    }
}

// ==============================================================================
// VIEW MODEL
// ==============================================================================

/// Everything a screen needs to render the current wizard state.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub search_query: String,
    pub hospitals: Vec<Hospital>,
    pub doctors: Vec<Doctor>,
    pub selected_hospital: Option<Hospital>,
    pub selected_doctor: Option<Doctor>,
    pub date_options: Vec<DateChoice>,
    pub selected_date: DateOption,
    pub slot_options: Vec<SlotOption>,
    pub selected_slot: TimeSlot,
    pub available_times: Vec<String>,
    pub selected_time: Option<String>,
    pub can_confirm: bool,
    pub appointment: Option<Appointment>,
    pub loading: Option<&'static str>,
    pub error: Option<FlowError>,
    pub notice: Option<Notice>,
}
