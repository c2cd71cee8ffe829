use crate::types::{DayAvailability, TimeSlot};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rand::Rng;

const OPENING_HOUR: u32 = 9;
const WEEKDAY_CLOSING_HOUR: u32 = 17;
const SATURDAY_CLOSING_HOUR: u32 = 14;
const SLOT_MINUTES: u32 = 30;
const MAX_SLOT_CAPACITY: u32 = 5;

/// Where slot capacity comes from. The production source is mock data that
/// rolls fresh numbers on every read; a real capacity ledger would implement
/// this same trait.
pub trait CapacitySource {
    fn capacity(&self, date: NaiveDate, start_time: NaiveTime) -> u32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCapacity;

impl CapacitySource for RandomCapacity {
    fn capacity(&self, _date: NaiveDate, _start_time: NaiveTime) -> u32 {
        rand::thread_rng().gen_range(0..MAX_SLOT_CAPACITY)
    }
}

pub fn generate_time_slots(date: NaiveDate, source: &impl CapacitySource) -> Vec<TimeSlot> {
    // Closed on Sundays
    if date.weekday() == Weekday::Sun {
        return Vec::new();
    }

    // Saturday: 9am - 2pm
    let closing_hour = if date.weekday() == Weekday::Sat {
        SATURDAY_CLOSING_HOUR
    } else {
        WEEKDAY_CLOSING_HOUR
    };

    let mut slots = Vec::new();
    for hour in OPENING_HOUR..closing_hour {
        for minute in [0, SLOT_MINUTES] {
            let start_time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
            let end_time = start_time + Duration::minutes(SLOT_MINUTES as i64);
            let capacity_remaining = source.capacity(date, start_time);

            // Slot ids only need to be unique within a day; callers always
            // scope them by date.
            slots.push(TimeSlot {
                id: format!("slot-{}", start_time.format("%H%M")),
                start_time,
                end_time,
                available: capacity_remaining > 0,
                capacity_remaining,
            });
        }
    }
    slots
}

pub fn generate_availability(
    start_date: NaiveDate,
    days: i64,
    source: &impl CapacitySource,
) -> Vec<DayAvailability> {
    let mut availability = Vec::new();
    for offset in 0..days.max(0) {
        let date = start_date + Duration::days(offset);
        availability.push(DayAvailability {
            date,
            slots: generate_time_slots(date, source),
            is_blacked_out: false,
        });
    }
    availability
}

pub fn apply_blackouts(availability: &mut [DayAvailability], blackout_dates: &[NaiveDate]) {
    for day in availability {
        if blackout_dates.contains(&day.date) {
            day.black_out();
        }
    }
}
