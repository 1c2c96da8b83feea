//! Schedule aggregation: what is booked on a given day, and how a month
//! of calendar cells should be colored.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use shared::{BookingStatus, DayIndicator, DayMark, DaySchedule, MonthSchedule, Role};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::storage::BookingStore;

#[derive(Clone)]
pub struct ScheduleService {
    bookings: Arc<dyn BookingStore>,
}

impl ScheduleService {
    pub fn new(bookings: Arc<dyn BookingStore>) -> Self {
        Self { bookings }
    }

    /// Bookings touching a single day from one party's point of view,
    /// partitioned by status. Rejected bookings never show up.
    pub fn day_schedule(
        &self,
        date: NaiveDate,
        role: Role,
        party_id: Uuid,
    ) -> Result<DaySchedule, DomainError> {
        let mut accepted = Vec::new();
        let mut pending = Vec::new();

        for booking in self.bookings.bookings_covering(date)? {
            let is_mine = match role {
                Role::School => booking.school_id == party_id,
                Role::Teacher => booking.teacher_id == party_id,
            };
            if !is_mine {
                continue;
            }
            match booking.status {
                BookingStatus::Accepted => accepted.push(booking.to_dto()),
                BookingStatus::Pending => pending.push(booking.to_dto()),
                BookingStatus::Rejected => {}
            }
        }

        Ok(DaySchedule {
            date,
            accepted,
            pending,
        })
    }

    /// Per-day indicators for one party's month view. A day carrying
    /// both an accepted and a pending booking (possible for a school
    /// whose requests go to different teachers) shows as confirmed;
    /// pending never overrides confirmed.
    pub fn month_schedule(
        &self,
        role: Role,
        party_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<MonthSchedule, DomainError> {
        let mut indicators: BTreeMap<NaiveDate, DayIndicator> = BTreeMap::new();

        for booking in self.bookings.bookings_in_month(year, month)? {
            let is_mine = match role {
                Role::School => booking.school_id == party_id,
                Role::Teacher => booking.teacher_id == party_id,
            };
            if !is_mine {
                continue;
            }
            let indicator = match booking.status {
                BookingStatus::Accepted => DayIndicator::Confirmed,
                BookingStatus::Pending => DayIndicator::Pending,
                BookingStatus::Rejected => continue,
            };
            let mut day = booking.start_date;
            while day <= booking.end_date {
                if day.month() == month && day.year() == year {
                    let entry = indicators.entry(day).or_insert(indicator);
                    if indicator == DayIndicator::Confirmed {
                        *entry = DayIndicator::Confirmed;
                    }
                }
                day += Duration::days(1);
            }
        }

        Ok(MonthSchedule {
            year,
            month,
            marks: indicators
                .into_iter()
                .map(|(date, indicator)| DayMark { date, indicator })
                .collect(),
        })
    }
}
