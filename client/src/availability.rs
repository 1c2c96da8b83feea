//! Blocked-date availability for a teacher.
//!
//! Expands the teacher's live bookings into a per-day set so the
//! selector can reject occupied days. Membership is by calendar day,
//! never timestamp comparison. On fetch failure the index fails open:
//! empty, flagged degraded, the server revalidates at submit time.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use shared::FutureBooking;
use uuid::Uuid;

use crate::api::MarketplaceApi;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityIndex {
    blocked: BTreeSet<NaiveDate>,
    /// True when built from a failed fetch; the UI labels the calendar
    /// as possibly stale but keeps it usable
    degraded: bool,
}

impl AvailabilityIndex {
    /// Build the blocked set from live bookings, expanding each
    /// inclusive range day by day.
    pub fn from_bookings(bookings: &[FutureBooking]) -> Self {
        let mut blocked = BTreeSet::new();
        for booking in bookings {
            if !booking.status.is_live() {
                continue;
            }
            let mut day = booking.start_date;
            while day <= booking.end_date {
                blocked.insert(day);
                day += Duration::days(1);
            }
        }
        Self {
            blocked,
            degraded: false,
        }
    }

    /// Empty fail-open index after an unreachable availability service.
    pub fn degraded() -> Self {
        Self {
            blocked: BTreeSet::new(),
            degraded: true,
        }
    }

    /// Fetch a teacher's future bookings and rebuild the index.
    /// All-or-nothing: a failed fetch never patches an existing index,
    /// it yields a fresh degraded one.
    pub async fn refresh(api: &dyn MarketplaceApi, teacher_id: Uuid) -> Self {
        match api.get_future_bookings(teacher_id).await {
            Ok(bookings) => Self::from_bookings(&bookings),
            Err(e) => {
                log::warn!(
                    "availability fetch failed for teacher {}: {}; failing open",
                    teacher_id,
                    e
                );
                Self::degraded()
            }
        }
    }

    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.blocked.contains(&date)
    }

    /// Whether any day of `[start, end]` is blocked.
    pub fn blocks_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.blocked.range(start..=end).next().is_some()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn blocked_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.blocked.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}
