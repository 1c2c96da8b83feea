//! The logical API surface the engine consumes.
//!
//! Transport and serialization are the adapter's concern; the engine
//! only sees these operations and error kinds. The session token is
//! assumed to be attached by the implementation on every call.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    Booking, BookingAction, BookingStatus, DaySchedule, FutureBooking, MarkReadResponse,
    NotificationPage, Role, SubmitBookingRequest, UnreadCountResponse,
};
use thiserror::Error;
use uuid::Uuid;

/// Client-side error kinds, one per distinct handling policy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Malformed or conflicting date range; surfaced inline
    #[error("validation failed: {0}")]
    Validation(String),

    /// Mutation attempted on a terminal booking; surfaced as a toast
    #[error("booking is already {}", .0.as_str())]
    InvalidTransition(BookingStatus),

    /// Session expired; one token-refresh retry, then forced logout
    #[error("session expired")]
    Unauthorized,

    /// Transient; surfaced with a retry affordance, never swallowed
    #[error("network error: {0}")]
    Network(String),

    /// Referenced entity no longer exists; stale UI element removed
    #[error("{0} not found")]
    NotFound(String),
}

impl ApiError {
    /// Only network failures are safe to retry blindly.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Operations the engine performs against the marketplace server.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Live bookings of a teacher that end today or later.
    async fn get_future_bookings(&self, teacher_id: Uuid)
        -> Result<Vec<FutureBooking>, ApiError>;

    /// Create a pending booking; the server revalidates the range.
    async fn submit_booking(&self, request: SubmitBookingRequest) -> Result<Booking, ApiError>;

    /// Accept or reject a pending booking as the addressed teacher.
    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        action: BookingAction,
    ) -> Result<Booking, ApiError>;

    /// Bookings touching a date from the caller's perspective.
    async fn get_bookings_by_date(
        &self,
        date: NaiveDate,
        role: Role,
    ) -> Result<DaySchedule, ApiError>;

    /// One independent, restartable page of the caller's notifications.
    async fn list_notifications(&self, page: u32) -> Result<NotificationPage, ApiError>;

    /// Mark one notification read (idempotent on the server).
    async fn mark_notification_read(&self, id: Uuid) -> Result<MarkReadResponse, ApiError>;

    /// Current unread notification count for the caller.
    async fn unread_count(&self) -> Result<UnreadCountResponse, ApiError>;
}
