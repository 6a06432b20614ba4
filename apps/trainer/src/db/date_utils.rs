//! Date utilities for study days and due-date display.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Local calendar day a review at `at` counts towards.
pub fn study_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Human-readable distance until `due`, e.g. "in 3 days" or "now".
pub fn describe_due(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = due - now;
    if remaining.num_seconds() <= 0 {
        return "now".to_string();
    }

    match remaining.num_days() {
        0 => format!("in {} hours", remaining.num_hours().max(1)),
        1 => "tomorrow".to_string(),
        days => format!("in {} days", days),
    }
}
