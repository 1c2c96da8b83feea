//! Client-side booking lifecycle dispatch.
//!
//! The displayed status of a booking only ever changes from a server
//! response; nothing here transitions optimistically. Mutations for the
//! same booking are serialized: while an accept or reject is in flight
//! the next one is refused, which is also what the UI keys its
//! button-disabling off. Submit runs detached so closing the dialog
//! does not cancel it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use shared::{Booking, BookingAction, SubmitBookingRequest};
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::{ApiError, MarketplaceApi};

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A mutation for this booking is already in flight; the caller
    /// should keep its control disabled and not re-dispatch.
    #[error("a mutation for this booking is already in flight")]
    AlreadyInFlight,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct LifecycleClient {
    api: Arc<dyn MarketplaceApi>,
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

/// Releases the in-flight slot when the call resolves, errors, or is
/// dropped mid-await.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<Uuid>>>,
    id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.id);
    }
}

impl LifecycleClient {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            api,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether a mutation for this booking is currently awaiting the
    /// server. The UI disables the booking's accept/reject buttons
    /// while this is true.
    pub fn is_in_flight(&self, booking_id: Uuid) -> bool {
        self.in_flight.lock().unwrap().contains(&booking_id)
    }

    pub async fn accept(&self, booking_id: Uuid) -> Result<Booking, LifecycleError> {
        self.mutate(booking_id, BookingAction::Accept).await
    }

    pub async fn reject(&self, booking_id: Uuid) -> Result<Booking, LifecycleError> {
        self.mutate(booking_id, BookingAction::Reject).await
    }

    async fn mutate(
        &self,
        booking_id: Uuid,
        action: BookingAction,
    ) -> Result<Booking, LifecycleError> {
        let guard = {
            let mut in_flight = self.in_flight.lock().unwrap();
            if !in_flight.insert(booking_id) {
                return Err(LifecycleError::AlreadyInFlight);
            }
            InFlightGuard {
                set: self.in_flight.clone(),
                id: booking_id,
            }
        };

        let result = self.api.update_booking_status(booking_id, action).await;
        drop(guard);

        match &result {
            Ok(booking) => log::info!("booking {} is now {}", booking.id, booking.status.as_str()),
            Err(e) => log::warn!("status update for booking {} failed: {}", booking_id, e),
        }
        Ok(result?)
    }

    /// Fire a booking request and hand the eventual result to `apply`.
    ///
    /// Runs on a spawned task, so the originating dialog can be torn
    /// down freely; `apply` updates background state (availability and
    /// notification refresh) whenever the response lands.
    pub fn submit_detached<F>(&self, request: SubmitBookingRequest, apply: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Booking, ApiError>) + Send + 'static,
    {
        let api = self.api.clone();
        tokio::spawn(async move {
            let result = api.submit_booking(request).await;
            if let Err(e) = &result {
                log::warn!("booking submission failed: {}", e);
            }
            apply(result);
        })
    }
}
