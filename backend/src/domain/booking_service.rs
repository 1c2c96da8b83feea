//! Booking lifecycle service.
//!
//! Owns the submit → accept/reject state machine and the invariants
//! around it: ranges are ordered, a teacher's live (pending or accepted)
//! bookings never overlap, terminal bookings reject further mutation,
//! and every transition emits exactly one notification.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    BookingAction, BookingStatus, FutureBooking, NotificationType, SubmitBookingRequest,
    UpdateBookingStatusRequest,
};
use tracing::info;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::models::booking::Booking;
use crate::domain::models::notification::Notification;
use crate::storage::{BookingStore, NotificationStore, TeacherStore};

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    teachers: Arc<dyn TeacherStore>,
    notifications: Arc<dyn NotificationStore>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        teachers: Arc<dyn TeacherStore>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self {
            bookings,
            teachers,
            notifications,
        }
    }

    /// Create a pending booking for a teacher over an inclusive range.
    ///
    /// Rejects reversed ranges and any range that intersects one of the
    /// teacher's live bookings. The price per day is frozen from the
    /// teacher's current rate.
    pub fn submit(&self, request: SubmitBookingRequest) -> Result<shared::Booking, DomainError> {
        if request.start_date > request.end_date {
            return Err(DomainError::validation(format!(
                "start date {} is after end date {}",
                request.start_date, request.end_date
            )));
        }

        let teacher = self
            .teachers
            .get_teacher(request.teacher_id)?
            .ok_or(DomainError::NotFound("teacher"))?;

        // Live bookings hold their dates; only a rejection releases them.
        let conflict = self
            .bookings
            .bookings_for_teacher(teacher.id)?
            .into_iter()
            .find(|b| b.status.is_live() && b.overlaps(request.start_date, request.end_date));
        if let Some(existing) = conflict {
            return Err(DomainError::validation(format!(
                "teacher already has a {} booking from {} to {}",
                existing.status.as_str(),
                existing.start_date,
                existing.end_date
            )));
        }

        let booking = Booking::new_pending(
            teacher.id,
            request.school_id,
            request.start_date,
            request.end_date,
            teacher.daily_rate,
        );
        self.bookings.insert_booking(&booking)?;

        let notification =
            Notification::new(teacher.id, NotificationType::NewBooking, Some(booking.id));
        self.notifications.insert_notification(&notification)?;

        info!(
            booking_id = %booking.id,
            teacher_id = %teacher.id,
            "booking submitted for {} to {}",
            booking.start_date,
            booking.end_date
        );
        Ok(booking.to_dto())
    }

    /// Drive a pending booking to its terminal state.
    ///
    /// Only the addressed teacher may act. A booking that is no longer
    /// pending yields `InvalidTransition` and emits nothing, so repeated
    /// calls cannot duplicate side effects.
    pub fn update_status(
        &self,
        booking_id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<shared::Booking, DomainError> {
        let booking = self
            .bookings
            .get_booking(booking_id)?
            .ok_or(DomainError::NotFound("booking"))?;

        if booking.teacher_id != request.teacher_id {
            return Err(DomainError::Unauthorized);
        }
        if booking.status != BookingStatus::Pending {
            return Err(DomainError::InvalidTransition {
                from: booking.status,
            });
        }

        let (new_status, notification_type) = match request.action {
            BookingAction::Accept => (BookingStatus::Accepted, NotificationType::BookingAccept),
            BookingAction::Reject => (BookingStatus::Rejected, NotificationType::BookingReject),
        };

        self.bookings.update_booking_status(booking_id, new_status)?;

        // The outcome is addressed to the requesting school.
        let notification =
            Notification::new(booking.school_id, notification_type, Some(booking_id));
        self.notifications.insert_notification(&notification)?;

        info!(
            booking_id = %booking_id,
            "booking {} by teacher {}",
            new_status.as_str(),
            booking.teacher_id
        );

        let updated = self
            .bookings
            .get_booking(booking_id)?
            .ok_or(DomainError::NotFound("booking"))?;
        Ok(updated.to_dto())
    }

    /// The teacher's live bookings that still lie ahead of `today`,
    /// projected for blocked-date computation.
    pub fn future_bookings(
        &self,
        teacher_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<FutureBooking>, DomainError> {
        self.teachers
            .get_teacher(teacher_id)?
            .ok_or(DomainError::NotFound("teacher"))?;

        let bookings = self
            .bookings
            .bookings_for_teacher(teacher_id)?
            .into_iter()
            .filter(|b| b.status.is_live() && b.end_date >= today)
            .map(|b| FutureBooking {
                start_date: b.start_date,
                end_date: b.end_date,
                status: b.status,
            })
            .collect();
        Ok(bookings)
    }
}
