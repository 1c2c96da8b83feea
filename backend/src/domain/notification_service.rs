//! Notification read/unread tracking.
//!
//! Pages are computed per request from the current store, so a consumer
//! can always restart from page 1; within a page items are newest-first.

use std::sync::Arc;

use chrono::Utc;
use shared::{MarkReadResponse, NotificationPage, PageInfo, UnreadCountResponse};
use tracing::debug;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::storage::NotificationStore;

/// Fixed page size for notification listing.
pub const PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// One page of a recipient's stream, newest first. Pages are
    /// 1-based; a page past the end is empty, not an error.
    pub fn list(&self, recipient_id: Uuid, page: u32) -> Result<NotificationPage, DomainError> {
        if page == 0 {
            return Err(DomainError::validation("page numbers start at 1"));
        }

        // Saturate rather than overflow on absurd page numbers; a page
        // past the end is empty, not an error.
        let offset = (page - 1).saturating_mul(PAGE_SIZE);
        let items = self
            .notifications
            .list_for_recipient(recipient_id, offset, PAGE_SIZE)?;
        let total = self.notifications.count_for_recipient(recipient_id)?;

        debug!(
            recipient_id = %recipient_id,
            page,
            returned = items.len(),
            "listed notifications"
        );

        Ok(NotificationPage {
            notifications: items.iter().map(|n| n.to_dto()).collect(),
            pagination: PageInfo {
                page,
                per_page: PAGE_SIZE,
                has_more: offset.saturating_add(PAGE_SIZE) < total,
            },
        })
    }

    /// Mark one notification read. Idempotent: re-marking an already-read
    /// notification leaves its timestamp untouched and reports the fact.
    pub fn mark_read(
        &self,
        recipient_id: Uuid,
        notification_id: Uuid,
    ) -> Result<MarkReadResponse, DomainError> {
        let notification = self
            .notifications
            .get_notification(notification_id)?
            .ok_or(DomainError::NotFound("notification"))?;
        if notification.recipient_id != recipient_id {
            return Err(DomainError::Unauthorized);
        }

        let previous = self.notifications.mark_read(notification_id, Utc::now())?;
        Ok(MarkReadResponse {
            id: notification_id,
            already_read: previous.is_some(),
        })
    }

    pub fn unread_count(&self, recipient_id: Uuid) -> Result<UnreadCountResponse, DomainError> {
        let unread = self.notifications.count_unread(recipient_id)?;
        Ok(UnreadCountResponse { unread })
    }
}
