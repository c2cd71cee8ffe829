use crate::configuration::Configuration;
use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(about = "Pickup appointment scheduler")]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on.
    #[arg(long, default_value = "3000")]
    port: String,

    /// Password staff routes expect in the x-staff-password header.
    /// Overridden by the STAFF_PASSWORD environment variable.
    #[arg(long, default_value = "123")]
    staff_password: String,

    /// How many days of availability the booking calendar offers.
    #[arg(long, default_value_t = 60)]
    booking_window_days: i64,

    /// Dates (YYYY-MM-DD) on which no pickups are offered.
    #[arg(long, value_delimiter = ',')]
    blackout_dates: Vec<NaiveDate>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> String {
        self.port.clone()
    }

    fn staff_password(&self) -> String {
        std::env::var("STAFF_PASSWORD").unwrap_or_else(|_| self.staff_password.clone())
    }

    fn booking_window_days(&self) -> i64 {
        self.booking_window_days
    }

    fn blackout_dates(&self) -> Vec<NaiveDate> {
        self.blackout_dates.clone()
    }
}
