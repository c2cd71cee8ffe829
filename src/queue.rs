use crate::types::{Appointment, AppointmentStatus};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const UPCOMING_WINDOW_MINUTES: i64 = 30;

/// Urgency bucket for the staff queue, derived fresh at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeStatus {
    Past,
    Upcoming,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(AppointmentStatus),
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only)
    }
}

pub fn time_status(start_at: NaiveDateTime, now: NaiveDateTime) -> TimeStatus {
    if start_at < now {
        TimeStatus::Past
    } else if start_at < now + Duration::minutes(UPCOMING_WINDOW_MINUTES) {
        TimeStatus::Upcoming
    } else {
        TimeStatus::Future
    }
}

/// Today's appointments matching the search and status filter, earliest
/// first. "Today" is calendar-day truncation, not a rolling 24h window.
pub fn todays_queue(
    appointments: &[Appointment],
    search: &str,
    status_filter: StatusFilter,
    now: NaiveDateTime,
) -> Vec<Appointment> {
    let query = search.to_lowercase();
    let mut queue: Vec<Appointment> = appointments
        .iter()
        .filter(|appointment| appointment.start_at.date() == now.date())
        .filter(|appointment| match status_filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => appointment.status == status,
        })
        .filter(|appointment| {
            if query.is_empty() {
                return true;
            }
            appointment.pickup_reference.to_lowercase().contains(&query)
                || appointment.customer_first_name.to_lowercase().contains(&query)
                || appointment.customer_last_name.to_lowercase().contains(&query)
                || appointment.customer_email.to_lowercase().contains(&query)
                // Phone numbers are not case-normalized.
                || appointment.customer_phone.contains(&query)
        })
        .cloned()
        .collect();
    queue.sort_by_key(|appointment| appointment.start_at);
    queue
}
