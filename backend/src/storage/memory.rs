//! In-memory storage backend.
//!
//! Keeps everything behind a single mutex; good enough for tests and for
//! running the server without a database. Implements every storage trait
//! so one instance can back all services.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use shared::BookingStatus;
use uuid::Uuid;

use crate::domain::models::booking::Booking;
use crate::domain::models::notification::Notification;
use crate::domain::models::teacher::Teacher;
use crate::storage::traits::{BookingStore, NotificationStore, TeacherStore};

#[derive(Default)]
struct Inner {
    bookings: HashMap<Uuid, Booking>,
    notifications: Vec<Notification>,
    teachers: HashMap<Uuid, Teacher>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Poisoning only happens if a panic occurred mid-write; recover
        // with whatever state is there rather than cascading the panic.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// First and last calendar day of a month.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

impl BookingStore for MemoryStore {
    fn insert_booking(&self, booking: &Booking) -> Result<()> {
        self.lock().bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self.lock().bookings.get(&id).cloned())
    }

    fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> Result<bool> {
        let mut inner = self.lock();
        match inner.bookings.get_mut(&id) {
            Some(booking) => {
                booking.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn bookings_for_teacher(&self, teacher_id: Uuid) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .lock()
            .bookings
            .values()
            .filter(|b| b.teacher_id == teacher_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start_date);
        Ok(bookings)
    }

    fn bookings_covering(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .lock()
            .bookings
            .values()
            .filter(|b| b.covers(date))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.created_at);
        Ok(bookings)
    }

    fn bookings_in_month(&self, year: i32, month: u32) -> Result<Vec<Booking>> {
        let Some((first, last)) = month_bounds(year, month) else {
            return Ok(Vec::new());
        };
        let mut bookings: Vec<Booking> = self
            .lock()
            .bookings
            .values()
            .filter(|b| b.overlaps(first, last))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start_date);
        Ok(bookings)
    }
}

impl NotificationStore for MemoryStore {
    fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.lock().notifications.push(notification.clone());
        Ok(())
    }

    fn get_notification(&self, id: Uuid) -> Result<Option<Notification>> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    fn list_for_recipient(
        &self,
        recipient_id: Uuid,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .lock()
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    fn count_for_recipient(&self, recipient_id: Uuid) -> Result<u32> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .count() as u32)
    }

    fn count_unread(&self, recipient_id: Uuid) -> Result<u32> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read())
            .count() as u32)
    }

    fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let mut inner = self.lock();
        let notification = inner.notifications.iter_mut().find(|n| n.id == id);
        match notification {
            Some(n) => match n.read_at {
                Some(existing) => Ok(Some(existing)),
                None => {
                    n.read_at = Some(at);
                    Ok(None)
                }
            },
            None => anyhow::bail!("notification {} not found", id),
        }
    }
}

impl TeacherStore for MemoryStore {
    fn insert_teacher(&self, teacher: &Teacher) -> Result<()> {
        self.lock().teachers.insert(teacher.id, teacher.clone());
        Ok(())
    }

    fn get_teacher(&self, id: Uuid) -> Result<Option<Teacher>> {
        Ok(self.lock().teachers.get(&id).cloned())
    }
}
