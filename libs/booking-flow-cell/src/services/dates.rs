// libs/booking-flow-cell/src/services/dates.rs
use chrono::{Duration, NaiveDate};

use crate::models::{DateChoice, DateOption};

/// The three selectable days: today, tomorrow, and the day after that.
/// The "later" label carries the concrete date, e.g. "24 Jan".
pub fn date_choices(today: NaiveDate) -> Vec<DateChoice> {
    let later = today + Duration::days(2);

    vec![
        DateChoice {
            id: DateOption::Today,
            label: "Today".to_string(),
            sub_label: "Available".to_string(),
        },
        DateChoice {
            id: DateOption::Tomorrow,
            label: "Tomorrow".to_string(),
            sub_label: "Available".to_string(),
        },
        DateChoice {
            id: DateOption::Later,
            label: later.format("%-d %b").to_string(),
            sub_label: "Available".to_string(),
        },
    ]
}

/// Resolve a date option to the calendar day it stands for.
pub fn appointment_date(option: DateOption, today: NaiveDate) -> NaiveDate {
    match option {
        DateOption::Today => today,
        DateOption::Tomorrow => today + Duration::days(1),
        DateOption::Later => today + Duration::days(2),
    }
}
