pub mod booking_service;
pub mod error;
pub mod models;
pub mod notification_service;
pub mod schedule_service;

pub use booking_service::BookingService;
pub use error::DomainError;
pub use notification_service::NotificationService;
pub use schedule_service::ScheduleService;
