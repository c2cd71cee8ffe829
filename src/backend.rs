use crate::types::{Appointment, AppointmentStatus};

/// Store seam the presentation layer is generic over. The in-memory store is
/// the only implementation; a persistent one would plug in here.
pub trait AppointmentBackend: Clone + Send + Sync + 'static {
    fn insert_example_appointments(&self);
    fn appointments(&self) -> Vec<Appointment>;
    fn add_appointment(&self, appointment: Appointment);
    fn update_status(&self, id: &str, status: AppointmentStatus);
    fn update_staff_notes(&self, id: &str, notes: String);
}
