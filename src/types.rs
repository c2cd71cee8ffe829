use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    pub available: bool,
    pub capacity_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub is_blacked_out: bool,
}

impl DayAvailability {
    /// A blacked-out day offers no slots, whatever their own flags say.
    pub fn black_out(&mut self) {
        self.is_blacked_out = true;
        for slot in &mut self.slots {
            slot.available = false;
        }
    }

    pub fn has_open_slot(&self) -> bool {
        !self.is_blacked_out && self.slots.iter().any(|slot| slot.available)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    CheckedIn,
    Ready,
    Completed,
    NoShow,
    Canceled,
}

impl AppointmentStatus {
    /// The action set staff are offered from this status. Forward-progress
    /// only: nothing leads back to an earlier status, and terminal statuses
    /// offer nothing.
    pub fn allowed_transitions(&self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            Scheduled => &[Confirmed, CheckedIn, Canceled],
            Confirmed => &[CheckedIn, Canceled],
            CheckedIn => &[Ready, Completed, NoShow],
            Ready => &[Completed, NoShow],
            Completed | NoShow | Canceled => &[],
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        use AppointmentStatus::*;
        match value {
            "Scheduled" => Ok(Scheduled),
            "Confirmed" => Ok(Confirmed),
            "CheckedIn" => Ok(CheckedIn),
            "Ready" => Ok(Ready),
            "Completed" => Ok(Completed),
            "NoShow" => Ok(NoShow),
            "Canceled" => Ok(Canceled),
            other => Err(format!("Unknown appointment status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub pickup_reference: String,
    pub location_id: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub vehicle_info: Option<String>,
    pub customer_notes: Option<String>,
    pub staff_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Slot times travel as wall-clock "HH:MM" strings.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}
