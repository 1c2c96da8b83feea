//! # Storage Traits
//!
//! Storage abstraction for the booking engine. The domain layer works
//! against these traits so different backends (SQL, in-memory, ...) can
//! be swapped in without modification.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use shared::BookingStatus;
use uuid::Uuid;

use crate::domain::models::booking::Booking;
use crate::domain::models::notification::Notification;
use crate::domain::models::teacher::Teacher;

/// Interface for booking storage operations.
pub trait BookingStore: Send + Sync {
    /// Store a new booking
    fn insert_booking(&self, booking: &Booking) -> Result<()>;

    /// Retrieve a specific booking by id
    fn get_booking(&self, id: Uuid) -> Result<Option<Booking>>;

    /// Overwrite the status of an existing booking.
    /// Returns false if the booking does not exist.
    fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> Result<bool>;

    /// All bookings for a teacher, any status
    fn bookings_for_teacher(&self, teacher_id: Uuid) -> Result<Vec<Booking>>;

    /// All bookings whose inclusive range covers the given day
    fn bookings_covering(&self, date: NaiveDate) -> Result<Vec<Booking>>;

    /// All bookings whose range intersects the given month
    fn bookings_in_month(&self, year: i32, month: u32) -> Result<Vec<Booking>>;
}

/// Interface for notification storage operations.
pub trait NotificationStore: Send + Sync {
    /// Store a new notification
    fn insert_notification(&self, notification: &Notification) -> Result<()>;

    /// Retrieve a specific notification by id
    fn get_notification(&self, id: Uuid) -> Result<Option<Notification>>;

    /// List a recipient's notifications ordered by created_at descending
    /// (newest first), skipping `offset` and returning at most `limit`.
    fn list_for_recipient(&self, recipient_id: Uuid, offset: u32, limit: u32)
        -> Result<Vec<Notification>>;

    /// Total notifications addressed to a recipient
    fn count_for_recipient(&self, recipient_id: Uuid) -> Result<u32>;

    /// Unread notifications addressed to a recipient
    fn count_unread(&self, recipient_id: Uuid) -> Result<u32>;

    /// Set `read_at` if the notification is unread.
    /// Returns the previous read timestamp, if any (for idempotence).
    fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<DateTime<Utc>>>;
}

/// Interface for the teacher records the engine needs (id and rate).
pub trait TeacherStore: Send + Sync {
    /// Store a teacher record
    fn insert_teacher(&self, teacher: &Teacher) -> Result<()>;

    /// Retrieve a teacher by id
    fn get_teacher(&self, id: Uuid) -> Result<Option<Teacher>>;
}
