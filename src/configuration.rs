use chrono::NaiveDate;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> String;
    fn staff_password(&self) -> String;
    fn booking_window_days(&self) -> i64;
    fn blackout_dates(&self) -> Vec<NaiveDate>;
}
