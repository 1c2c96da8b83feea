use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request for a teacher to substitute at a school over an inclusive
/// date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    /// Teacher who fulfills the booking
    pub teacher_id: Uuid,
    /// School that requested the booking
    pub school_id: Uuid,
    /// First day of the engagement (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the engagement (inclusive)
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    /// Teacher's daily rate frozen at request time
    pub price_per_day: f64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Inclusive day count of the booking range.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Lifecycle status of a booking. `Accepted` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BookingStatus {
    /// Whether the booking still occupies the teacher's calendar.
    pub fn is_live(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Accepted)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// Legacy wire encoding used by older API consumers (1 = pending,
    /// 2 = accepted, 3 = rejected). Only boundary code should touch this.
    pub fn as_code(&self) -> u8 {
        match self {
            BookingStatus::Pending => 1,
            BookingStatus::Accepted => 2,
            BookingStatus::Rejected => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BookingStatus::Pending),
            2 => Some(BookingStatus::Accepted),
            3 => Some(BookingStatus::Rejected),
            _ => None,
        }
    }
}

/// Settlement status. Payments are cash-settled; this is display state
/// only, no processing happens in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Which side of the marketplace a caller is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    School,
    Teacher,
}

/// Slim projection of a booking used to build the blocked-date set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureBooking {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitBookingRequest {
    pub teacher_id: Uuid,
    pub school_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The only two mutations a booking accepts after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    Accept,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub action: BookingAction,
    /// Teacher performing the action; must match the booking's teacher
    pub teacher_id: Uuid,
}

/// Bookings touching a single calendar day, partitioned by status for
/// display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub accepted: Vec<Booking>,
    pub pending: Vec<Booking>,
}

/// Calendar cell coloring for a month view. Confirmed wins over Pending
/// when a day carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayIndicator {
    Confirmed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMark {
    pub date: NaiveDate,
    pub indicator: DayIndicator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSchedule {
    pub year: i32,
    pub month: u32,
    pub marks: Vec<DayMark>,
}

/// Kind of event a notification records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewBooking,
    BookingAccept,
    BookingReject,
    ProfileApproved,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::NewBooking => "new_booking",
            NotificationType::BookingAccept => "booking_accept",
            NotificationType::BookingReject => "booking_reject",
            NotificationType::ProfileApproved => "profile_approved",
        }
    }
}

/// A read-tracked event addressed to one user. `read_at == None` means
/// unread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub notification_type: NotificationType,
    /// Entity the event refers to (e.g. a booking id)
    pub reference_id: Option<Uuid>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Page-number pagination metadata. Each page request is independent;
/// restarting from page 1 is always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub per_page: u32,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub pagination: PageInfo,
}

/// Acknowledgement for a mark-read call. `already_read` distinguishes the
/// idempotent no-op case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub id: Uuid,
    pub already_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: u32,
}
