pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

// Re-export the wizard vocabulary for embedders
pub use models::{
    WizardStep, WizardEvent, Command, DateOption, TimeSlot,
    DateChoice, SlotOption, Notice, NoticeKind, FlowError, WizardView,
};
pub use services::wizard::WizardState;
pub use services::flow::FlowService;
pub use services::gateway::{BookingGateway, SupabaseGateway};
