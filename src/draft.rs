use crate::types::{Appointment, AppointmentStatus, TimeSlot};
use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerDetails {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        regex(path = *EMAIL_RE, message = "Please enter a valid email")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[serde(default)]
    pub vehicle_info: String,
    #[serde(default)]
    pub notes: String,
}

impl CustomerDetails {
    fn trimmed(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.vehicle_info = self.vehicle_info.trim().to_string();
        self.notes = self.notes.trim().to_string();
        self
    }
}

/// Wizard form state. Starts empty, is filled step by step, and is committed
/// into an Appointment on final confirmation; the appointment then belongs to
/// the store and the draft is reset.
#[derive(Debug, Clone, Default)]
pub struct PickupDraft {
    pickup_reference: String,
    location_id: String,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<TimeSlot>,
    details: Option<CustomerDetails>,
}

impl PickupDraft {
    pub fn set_reference(&mut self, pickup_reference: String, location_id: String) {
        self.pickup_reference = pickup_reference.trim().to_string();
        self.location_id = location_id;
    }

    /// Picking a date clears any slot chosen for the previous one.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        self.selected_slot = None;
    }

    pub fn set_slot(&mut self, slot: TimeSlot) {
        self.selected_slot = Some(slot);
    }

    pub fn set_details(&mut self, details: CustomerDetails) -> Result<(), ValidationErrors> {
        let details = details.trimmed();
        details.validate()?;
        self.details = Some(details);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn commit(&self, now: NaiveDateTime) -> Result<Appointment, String> {
        if self.pickup_reference.is_empty() {
            return Err("Please enter your pickup number".to_string());
        }
        if self.location_id.is_empty() {
            return Err("Please choose a pickup location".to_string());
        }
        let date = self
            .selected_date
            .ok_or_else(|| "Please choose a pickup date".to_string())?;
        let slot = self
            .selected_slot
            .as_ref()
            .ok_or_else(|| "Please choose a time slot".to_string())?;
        let details = self
            .details
            .as_ref()
            .ok_or_else(|| "Please fill in your contact details".to_string())?;

        Ok(Appointment {
            id: format!("apt-{}", now.and_utc().timestamp_millis()),
            pickup_reference: self.pickup_reference.clone(),
            location_id: self.location_id.clone(),
            start_at: date.and_time(slot.start_time),
            end_at: date.and_time(slot.end_time),
            status: AppointmentStatus::Scheduled,
            customer_first_name: details.first_name.clone(),
            customer_last_name: details.last_name.clone(),
            customer_email: details.email.clone(),
            customer_phone: details.phone.clone(),
            vehicle_info: none_if_empty(&details.vehicle_info),
            customer_notes: none_if_empty(&details.notes),
            staff_notes: None,
            created_at: now,
            updated_at: now,
        })
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
