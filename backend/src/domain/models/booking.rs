//! Domain model for a booking.
use chrono::{DateTime, NaiveDate, Utc};
use shared::{BookingStatus, PaymentStatus};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub school_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub price_per_day: f64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a fresh pending booking at the teacher's current rate.
    pub fn new_pending(
        teacher_id: Uuid,
        school_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        price_per_day: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            teacher_id,
            school_id,
            start_date,
            end_date,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            price_per_day,
            created_at: Utc::now(),
        }
    }

    /// Whether this booking occupies the given calendar day.
    /// Membership is by calendar day, never by timestamp equality.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether this booking's range intersects `[start, end]` (inclusive
    /// on both sides).
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    pub fn to_dto(&self) -> shared::Booking {
        shared::Booking {
            id: self.id,
            teacher_id: self.teacher_id,
            school_id: self.school_id,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            payment_status: self.payment_status,
            price_per_day: self.price_per_day,
            created_at: self.created_at,
        }
    }
}
