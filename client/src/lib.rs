//! Booking engine for the substitute-teacher marketplace client.
//!
//! The UI shell renders calendar cells and dialogs; everything with
//! actual rules lives here: blocked-date availability, range selection,
//! pricing, booking lifecycle dispatch, schedule coloring, and the
//! notification read/unread bridge.

pub mod api;
pub mod availability;
pub mod lifecycle;
pub mod net;
pub mod notifications;
pub mod pricing;
pub mod range_selector;
pub mod schedule;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiError, MarketplaceApi};
pub use availability::AvailabilityIndex;
pub use lifecycle::{LifecycleClient, LifecycleError};
pub use net::{NetAdapter, RetryPolicy, SessionHooks};
pub use notifications::{NotificationBridge, ReadEvent};
pub use pricing::{quote, Quote};
pub use range_selector::{ClickOutcome, DateRange, RangeSelector, Selection};
pub use schedule::ScheduleAggregator;
