//! Notification read/unread bridge.
//!
//! Wraps the notification API and broadcasts read events on a typed
//! channel, so the unread badge and the notification list stay in sync
//! without sharing state. This replaces the ad-hoc global events the
//! UI regions used to poke each other with.

use std::sync::Arc;

use shared::{MarkReadResponse, NotificationPage, UnreadCountResponse};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::api::{ApiError, MarketplaceApi};

/// Payload for a successful read-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadEvent {
    pub notification_id: Uuid,
}

#[derive(Clone)]
pub struct NotificationBridge {
    api: Arc<dyn MarketplaceApi>,
    read_events: broadcast::Sender<ReadEvent>,
}

impl NotificationBridge {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        let (read_events, _) = broadcast::channel(32);
        Self { api, read_events }
    }

    /// Subscribe to read-state changes. Any number of independent UI
    /// regions (badge counter, list view) can hold a receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<ReadEvent> {
        self.read_events.subscribe()
    }

    /// Fetch one page, newest first. Pages are independent server-side
    /// snapshots; fetching page 1 again after a list reload (e.g. a
    /// language switch rebuilding the view) is the normal restart path.
    pub async fn page(&self, page: u32) -> Result<NotificationPage, ApiError> {
        self.api.list_notifications(page).await
    }

    /// Mark a notification read and, if this actually changed its
    /// state, broadcast the event. Re-marking an already-read
    /// notification is a quiet no-op: acknowledged, nothing broadcast,
    /// so listeners cannot double-handle it.
    pub async fn mark_read(&self, notification_id: Uuid) -> Result<MarkReadResponse, ApiError> {
        let ack = self.api.mark_notification_read(notification_id).await?;
        if !ack.already_read {
            // Listeners may come and go; an empty channel is fine.
            let _ = self.read_events.send(ReadEvent { notification_id });
        }
        Ok(ack)
    }

    pub async fn unread_count(&self) -> Result<UnreadCountResponse, ApiError> {
        self.api.unread_count().await
    }
}
