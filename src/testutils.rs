use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use crate::backend::AppointmentBackend;
use crate::configuration::Configuration;
use crate::types::{Appointment, AppointmentStatus};
use chrono::NaiveDate;

pub struct MockAppointmentBackendInner {
    pub calls_to_insert_example_appointments: AtomicU64,
    pub calls_to_appointments: AtomicU64,
    pub calls_to_add_appointment: AtomicU64,
    pub calls_to_update_status: AtomicU64,
    pub calls_to_update_staff_notes: AtomicU64,
    pub appointments: Mutex<Vec<Appointment>>,
    pub added: Mutex<Vec<Appointment>>,
}

#[derive(Clone)]
pub struct MockAppointmentBackend(pub Arc<MockAppointmentBackendInner>);

impl MockAppointmentBackendInner {
    fn new() -> Self {
        Self {
            calls_to_insert_example_appointments: AtomicU64::default(),
            calls_to_appointments: AtomicU64::default(),
            calls_to_add_appointment: AtomicU64::default(),
            calls_to_update_status: AtomicU64::default(),
            calls_to_update_staff_notes: AtomicU64::default(),
            appointments: Mutex::default(),
            added: Mutex::default(),
        }
    }
}

impl MockAppointmentBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockAppointmentBackendInner::new()))
    }
}

impl AppointmentBackend for MockAppointmentBackend {
    fn insert_example_appointments(&self) {
        self.0
            .calls_to_insert_example_appointments
            .fetch_add(1, Ordering::SeqCst);
    }

    fn appointments(&self) -> Vec<Appointment> {
        self.0.calls_to_appointments.fetch_add(1, Ordering::SeqCst);
        self.0.appointments.lock().unwrap().clone()
    }

    fn add_appointment(&self, appointment: Appointment) {
        self.0
            .calls_to_add_appointment
            .fetch_add(1, Ordering::SeqCst);
        self.0.added.lock().unwrap().push(appointment);
    }

    fn update_status(&self, _id: &str, _status: AppointmentStatus) {
        self.0.calls_to_update_status.fetch_add(1, Ordering::SeqCst);
    }

    fn update_staff_notes(&self, _id: &str, _notes: String) {
        self.0
            .calls_to_update_staff_notes
            .fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct MockConfiguration {
    pub port: u16,
    pub staff_password: String,
    pub booking_window_days: i64,
    pub blackout_dates: Vec<NaiveDate>,
}

impl MockConfiguration {
    pub fn on_port(port: u16) -> Self {
        Self {
            port,
            staff_password: "123".into(),
            booking_window_days: 60,
            blackout_dates: Vec::new(),
        }
    }
}

impl Configuration for MockConfiguration {
    fn port(&self) -> String {
        self.port.to_string()
    }

    fn staff_password(&self) -> String {
        self.staff_password.clone()
    }

    fn booking_window_days(&self) -> i64 {
        self.booking_window_days
    }

    fn blackout_dates(&self) -> Vec<NaiveDate> {
        self.blackout_dates.clone()
    }
}
