// libs/booking-flow-cell/src/services/slots.rs
use crate::models::{SlotOption, TimeSlot};

const MORNING_RANGE: &str = "8 AM - 12 PM";
const AFTERNOON_RANGE: &str = "12 PM - 3 PM";
const EVENING_RANGE: &str = "3 PM - 8 PM";

// Fixed half-hour grids; real booked slots are not consulted here.
const MORNING_TIMES: [&str; 6] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
];
const AFTERNOON_TIMES: [&str; 6] = [
    "12:00 PM", "12:30 PM", "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM",
];
const EVENING_TIMES: [&str; 6] = [
    "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM", "05:00 PM", "05:30 PM",
];

/// Buckets offerable at the given hour of day, first rule wins:
/// after 20:00 everything is on offer again (for the next day), from 15:00
/// only the evening remains, from 12:00 the afternoon and evening, and
/// during the morning the morning bucket shows its remaining window.
pub fn offered_slots(hour: u32) -> Vec<SlotOption> {
    if hour >= 20 {
        all_slots()
    } else if hour >= 15 {
        vec![slot_option(TimeSlot::Evening, EVENING_RANGE.to_string())]
    } else if hour >= 12 {
        vec![
            slot_option(TimeSlot::Afternoon, AFTERNOON_RANGE.to_string()),
            slot_option(TimeSlot::Evening, EVENING_RANGE.to_string()),
        ]
    } else if hour >= 8 {
        vec![
            slot_option(
                TimeSlot::Morning,
                format!("{} - 12 PM", hour_label(hour + 1)),
            ),
            slot_option(TimeSlot::Afternoon, AFTERNOON_RANGE.to_string()),
            slot_option(TimeSlot::Evening, EVENING_RANGE.to_string()),
        ]
    } else {
        all_slots()
    }
}

/// The bucket the date/time screen opens on: the first one offerable now.
pub fn default_slot(hour: u32) -> TimeSlot {
    offered_slots(hour)[0].id
}

/// The six concrete half-hour times of a bucket. Static per bucket.
pub fn slot_times(slot: TimeSlot) -> Vec<String> {
    let times: &[&str; 6] = match slot {
        TimeSlot::Morning => &MORNING_TIMES,
        TimeSlot::Afternoon => &AFTERNOON_TIMES,
        TimeSlot::Evening => &EVENING_TIMES,
    };

    times.iter().map(|t| t.to_string()).collect()
}

fn all_slots() -> Vec<SlotOption> {
    vec![
        slot_option(TimeSlot::Morning, MORNING_RANGE.to_string()),
        slot_option(TimeSlot::Afternoon, AFTERNOON_RANGE.to_string()),
        slot_option(TimeSlot::Evening, EVENING_RANGE.to_string()),
    ]
}

fn slot_option(slot: TimeSlot, time_range: String) -> SlotOption {
    let label = match slot {
        TimeSlot::Morning => "Morning",
        TimeSlot::Afternoon => "Afternoon",
        TimeSlot::Evening => "Evening",
    };

    SlotOption {
        id: slot,
        label: label.to_string(),
        time_range,
    }
}

fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}
