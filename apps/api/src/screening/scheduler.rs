//! Interview scheduling for shortlisted candidates.
//!
//! Slots are handed out in shortlist order: two per business day (10:00 and
//! 14:00), starting the business day after the reference date.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

const SLOT_HOURS: [u32; 2] = [10, 14];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewSlot {
    pub candidate: String,
    pub starts_at: NaiveDateTime,
    pub message: String,
}

/// Proposes one slot per candidate name, in the order given.
pub fn schedule_interviews(names: &[&str], from: NaiveDate) -> Vec<InterviewSlot> {
    let mut day = next_business_day(from);
    let mut slots = Vec::with_capacity(names.len());

    for (i, name) in names.iter().enumerate() {
        let slot_in_day = i % SLOT_HOURS.len();
        if i > 0 && slot_in_day == 0 {
            day = next_business_day(day);
        }
        let Some(starts_at) = day.and_hms_opt(SLOT_HOURS[slot_in_day], 0, 0) else {
            continue;
        };
        slots.push(InterviewSlot {
            candidate: name.to_string(),
            starts_at,
            message: format!(
                "📅 Interview scheduled for {name} on {} at {}",
                starts_at.format("%A, %B %-d"),
                starts_at.format("%H:%M")
            ),
        });
    }
    slots
}

fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next += Duration::days(1);
    }
    next
}
