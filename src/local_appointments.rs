use crate::backend::AppointmentBackend;
use crate::types::{Appointment, AppointmentStatus};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Append-only in-memory store. Appointments are never removed, only moved
/// through statuses.
#[derive(Debug, Clone, Default)]
pub struct LocalAppointments {
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl AppointmentBackend for LocalAppointments {
    fn insert_example_appointments(&self) {
        let today = Local::now().date_naive();
        let now = Local::now().naive_local();
        let at = |hour: u32, minute: u32| {
            today.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
        };

        let example = |id: &str,
                       reference: &str,
                       start_at: NaiveDateTime,
                       status: AppointmentStatus,
                       first: &str,
                       last: &str,
                       email: &str,
                       phone: &str,
                       vehicle_info: Option<&str>,
                       customer_notes: Option<&str>| Appointment {
            id: id.into(),
            pickup_reference: reference.into(),
            location_id: "loc-1".into(),
            start_at,
            end_at: start_at + Duration::minutes(30),
            status,
            customer_first_name: first.into(),
            customer_last_name: last.into(),
            customer_email: email.into(),
            customer_phone: phone.into(),
            vehicle_info: vehicle_info.map(Into::into),
            customer_notes: customer_notes.map(Into::into),
            staff_notes: None,
            created_at: now,
            updated_at: now,
        };

        let mut appointments = self.appointments.lock().unwrap();
        appointments.push(example(
            "apt-001",
            "PU-2024-001",
            at(10, 0),
            AppointmentStatus::Scheduled,
            "John",
            "Smith",
            "john.smith@email.com",
            "(303) 555-0123",
            Some("Blue Ford F-150"),
            Some("Large furniture items"),
        ));
        appointments.push(example(
            "apt-002",
            "PU-2024-002",
            at(11, 0),
            AppointmentStatus::CheckedIn,
            "Sarah",
            "Johnson",
            "sarah.j@email.com",
            "(303) 555-0456",
            None,
            None,
        ));
        appointments.push(example(
            "apt-003",
            "PU-2024-003",
            at(11, 30),
            AppointmentStatus::Confirmed,
            "Michael",
            "Davis",
            "mdavis@email.com",
            "(303) 555-0789",
            Some("White Chevy Silverado"),
            None,
        ));
        appointments.push(example(
            "apt-004",
            "PU-2024-004",
            at(14, 0),
            AppointmentStatus::Scheduled,
            "Emily",
            "Wilson",
            "emily.w@email.com",
            "(303) 555-0321",
            None,
            Some("Will need forklift assistance"),
        ));
    }

    fn appointments(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }

    fn add_appointment(&self, appointment: Appointment) {
        debug!(id = %appointment.id, "appointment added");
        self.appointments.lock().unwrap().push(appointment);
    }

    fn update_status(&self, id: &str, status: AppointmentStatus) {
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.iter_mut().find(|appointment| appointment.id == id) {
            Some(appointment) => {
                appointment.status = status;
                appointment.updated_at = Local::now().naive_local();
            }
            // Unknown ids are a no-op, not an error.
            None => debug!(id, "status update for unknown appointment ignored"),
        }
    }

    fn update_staff_notes(&self, id: &str, notes: String) {
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.iter_mut().find(|appointment| appointment.id == id) {
            Some(appointment) => {
                appointment.staff_notes = if notes.is_empty() { None } else { Some(notes) };
                appointment.updated_at = Local::now().naive_local();
            }
            None => debug!(id, "staff note for unknown appointment ignored"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn sample_appointment(id: &str, reference: &str) -> Appointment {
        let start_at = NaiveDate::from_ymd_opt(2024, 1, 8)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let created_at = start_at - Duration::days(2);
        Appointment {
            id: id.into(),
            pickup_reference: reference.into(),
            location_id: "loc-1".into(),
            start_at,
            end_at: start_at + Duration::minutes(30),
            status: AppointmentStatus::Scheduled,
            customer_first_name: "John".into(),
            customer_last_name: "Smith".into(),
            customer_email: "john.smith@email.com".into(),
            customer_phone: "(303) 555-0123".into(),
            vehicle_info: None,
            customer_notes: None,
            staff_notes: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_add_appends_without_touching_existing_entries() {
        let store = LocalAppointments::default();

        let first = sample_appointment("apt-001", "PU-2024-001");
        let second = sample_appointment("apt-002", "PU-2024-002");
        store.add_appointment(first.clone());
        store.add_appointment(second.clone());

        let appointments = store.appointments();
        assert_eq!(appointments, vec![first, second]);
    }

    #[test]
    fn test_update_status_stamps_updated_at() {
        let store = LocalAppointments::default();
        store.add_appointment(sample_appointment("apt-001", "PU-2024-001"));
        store.add_appointment(sample_appointment("apt-002", "PU-2024-002"));
        let before = store.appointments();

        store.update_status("apt-001", AppointmentStatus::Confirmed);

        let after = store.appointments();
        assert_eq!(after[0].status, AppointmentStatus::Confirmed);
        assert!(after[0].updated_at > before[0].updated_at);
        assert_eq!(after[0].created_at, before[0].created_at);
        // The other appointment is untouched.
        assert_eq!(after[1], before[1]);
    }

    #[test]
    fn test_update_status_ignores_unknown_ids() {
        let store = LocalAppointments::default();
        store.add_appointment(sample_appointment("apt-001", "PU-2024-001"));
        let before = store.appointments();

        store.update_status("nonexistent", AppointmentStatus::Canceled);

        assert_eq!(store.appointments(), before);
    }

    #[test]
    fn test_store_accepts_any_status_value() {
        // Legality of transitions lives in the presenting layer; the store
        // takes whatever it is handed.
        let store = LocalAppointments::default();
        store.add_appointment(sample_appointment("apt-001", "PU-2024-001"));

        store.update_status("apt-001", AppointmentStatus::Completed);
        assert_eq!(store.appointments()[0].status, AppointmentStatus::Completed);

        store.update_status("apt-001", AppointmentStatus::Scheduled);
        assert_eq!(store.appointments()[0].status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_staff_notes_are_set_and_cleared() {
        let store = LocalAppointments::default();
        store.add_appointment(sample_appointment("apt-001", "PU-2024-001"));
        let before = store.appointments();

        store.update_staff_notes("apt-001", "Pallet staged at dock 3".into());
        let after = store.appointments();
        assert_eq!(after[0].staff_notes.as_deref(), Some("Pallet staged at dock 3"));
        assert!(after[0].updated_at > before[0].updated_at);

        store.update_staff_notes("apt-001", String::new());
        assert_eq!(store.appointments()[0].staff_notes, None);

        store.update_staff_notes("nonexistent", "ignored".into());
        assert!(store.appointments()[0].staff_notes.is_none());
    }

    #[test]
    fn test_example_appointments_land_on_today() {
        let store = LocalAppointments::default();
        store.insert_example_appointments();

        let appointments = store.appointments();
        let today = Local::now().date_naive();
        assert_eq!(appointments.len(), 4);
        assert!(appointments.iter().all(|a| a.start_at.date() == today));
        assert_eq!(appointments[0].pickup_reference, "PU-2024-001");
        assert_eq!(appointments[1].status, AppointmentStatus::CheckedIn);
    }
}
