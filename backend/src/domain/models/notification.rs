//! Domain model for a notification.
//!
//! Unlike the wire DTO, the domain record carries the recipient: the
//! REST layer only ever serves the authenticated user's own stream.
use chrono::{DateTime, Utc};
use shared::NotificationType;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    pub reference_id: Option<Uuid>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        recipient_id: Uuid,
        notification_type: NotificationType,
        reference_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id,
            notification_type,
            reference_id,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    pub fn to_dto(&self) -> shared::Notification {
        shared::Notification {
            id: self.id,
            notification_type: self.notification_type,
            reference_id: self.reference_id,
            read_at: self.read_at,
            created_at: self.created_at,
        }
    }
}
