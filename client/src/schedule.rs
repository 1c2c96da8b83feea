//! Groups fetched bookings by calendar day for display.
//!
//! The aggregator is rebuilt from each fetch (after a lifecycle
//! transition the caller refetches and replaces it); it never mutates
//! bookings in place.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use shared::{Booking, BookingStatus, DayIndicator, DayMark, DaySchedule};

#[derive(Debug, Clone, Default)]
pub struct ScheduleAggregator {
    bookings: Vec<Booking>,
}

impl ScheduleAggregator {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    /// Bookings whose range includes `date`, partitioned by status.
    /// Rejected bookings are invisible here.
    pub fn on_date(&self, date: NaiveDate) -> DaySchedule {
        let mut accepted = Vec::new();
        let mut pending = Vec::new();

        for booking in &self.bookings {
            if !(booking.start_date <= date && date <= booking.end_date) {
                continue;
            }
            match booking.status {
                BookingStatus::Accepted => accepted.push(booking.clone()),
                BookingStatus::Pending => pending.push(booking.clone()),
                BookingStatus::Rejected => {}
            }
        }

        DaySchedule {
            date,
            accepted,
            pending,
        }
    }

    /// Indicator per day of the given month. A day with an accepted
    /// booking renders confirmed even if a pending one (for another
    /// teacher) touches the same day.
    pub fn month_marks(&self, year: i32, month: u32) -> Vec<DayMark> {
        let mut indicators: BTreeMap<NaiveDate, DayIndicator> = BTreeMap::new();

        for booking in &self.bookings {
            let indicator = match booking.status {
                BookingStatus::Accepted => DayIndicator::Confirmed,
                BookingStatus::Pending => DayIndicator::Pending,
                BookingStatus::Rejected => continue,
            };
            let mut day = booking.start_date;
            while day <= booking.end_date {
                if day.year() == year && day.month() == month {
                    let entry = indicators.entry(day).or_insert(indicator);
                    if indicator == DayIndicator::Confirmed {
                        *entry = DayIndicator::Confirmed;
                    }
                }
                day += Duration::days(1);
            }
        }

        indicators
            .into_iter()
            .map(|(date, indicator)| DayMark { date, indicator })
            .collect()
    }
}
