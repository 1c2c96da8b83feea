//! Shared in-memory fake of the marketplace API for unit tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use shared::{
    Booking, BookingAction, BookingStatus, DaySchedule, FutureBooking, MarkReadResponse,
    Notification, NotificationPage, PageInfo, PaymentStatus, Role, SubmitBookingRequest,
    UnreadCountResponse,
};
use uuid::Uuid;

use crate::api::{ApiError, MarketplaceApi};

pub const FAKE_PAGE_SIZE: u32 = 20;

pub struct FakeApi {
    pub future_bookings: Mutex<Result<Vec<FutureBooking>, ApiError>>,
    /// Stored newest-first, as the server would return them
    pub notifications: Mutex<Vec<Notification>>,
    /// Scripted error for the next status update, if any
    pub update_error: Mutex<Option<ApiError>>,
    /// Artificial latency for status updates
    pub update_delay: Mutex<Option<Duration>>,
    pub update_calls: AtomicU32,
    pub submit_calls: AtomicU32,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            future_bookings: Mutex::new(Ok(Vec::new())),
            notifications: Mutex::new(Vec::new()),
            update_error: Mutex::new(None),
            update_delay: Mutex::new(None),
            update_calls: AtomicU32::new(0),
            submit_calls: AtomicU32::new(0),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_future_bookings(bookings: Vec<FutureBooking>) -> Self {
        let api = Self::new();
        *api.future_bookings.lock().unwrap() = Ok(bookings);
        api
    }

    pub fn with_unreachable_availability() -> Self {
        let api = Self::new();
        *api.future_bookings.lock().unwrap() =
            Err(ApiError::Network("unreachable".to_string()));
        api
    }

    pub fn push_notification(&self, notification: Notification) {
        // Keep newest-first ordering
        self.notifications.lock().unwrap().insert(0, notification);
    }

    pub fn fresh_booking(request: &SubmitBookingRequest, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            teacher_id: request.teacher_id,
            school_id: request.school_id,
            start_date: request.start_date,
            end_date: request.end_date,
            status,
            payment_status: PaymentStatus::Pending,
            price_per_day: 100.0,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl MarketplaceApi for FakeApi {
    async fn get_future_bookings(
        &self,
        _teacher_id: Uuid,
    ) -> Result<Vec<FutureBooking>, ApiError> {
        self.future_bookings.lock().unwrap().clone()
    }

    async fn submit_booking(&self, request: SubmitBookingRequest) -> Result<Booking, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::fresh_booking(&request, BookingStatus::Pending))
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        action: BookingAction,
    ) -> Result<Booking, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.update_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.update_error.lock().unwrap().take() {
            return Err(error);
        }

        let status = match action {
            BookingAction::Accept => BookingStatus::Accepted,
            BookingAction::Reject => BookingStatus::Rejected,
        };
        let mut booking = Self::fresh_booking(
            &SubmitBookingRequest {
                teacher_id: Uuid::new_v4(),
                school_id: Uuid::new_v4(),
                start_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            },
            status,
        );
        booking.id = booking_id;
        Ok(booking)
    }

    async fn get_bookings_by_date(
        &self,
        date: NaiveDate,
        _role: Role,
    ) -> Result<DaySchedule, ApiError> {
        Ok(DaySchedule {
            date,
            accepted: Vec::new(),
            pending: Vec::new(),
        })
    }

    async fn list_notifications(&self, page: u32) -> Result<NotificationPage, ApiError> {
        if page == 0 {
            return Err(ApiError::Validation("page numbers start at 1".to_string()));
        }
        let all = self.notifications.lock().unwrap();
        let offset = ((page - 1) * FAKE_PAGE_SIZE) as usize;
        let items: Vec<Notification> = all
            .iter()
            .skip(offset)
            .take(FAKE_PAGE_SIZE as usize)
            .cloned()
            .collect();
        Ok(NotificationPage {
            notifications: items,
            pagination: PageInfo {
                page,
                per_page: FAKE_PAGE_SIZE,
                has_more: offset + (FAKE_PAGE_SIZE as usize) < all.len(),
            },
        })
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<MarkReadResponse, ApiError> {
        let mut all = self.notifications.lock().unwrap();
        let notification = all
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ApiError::NotFound("notification".to_string()))?;
        let already_read = notification.read_at.is_some();
        if !already_read {
            notification.read_at = Some(Utc::now());
        }
        Ok(MarkReadResponse { id, already_read })
    }

    async fn unread_count(&self) -> Result<UnreadCountResponse, ApiError> {
        let unread = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.read_at.is_none())
            .count() as u32;
        Ok(UnreadCountResponse { unread })
    }
}
