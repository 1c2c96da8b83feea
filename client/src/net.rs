//! Network adapter policy layer.
//!
//! Sits between the engine and a concrete [`MarketplaceApi`] transport
//! and centralizes what used to be scattered per-call-site handling:
//! bounded exponential backoff for transient failures, a single
//! token-refresh retry on an expired session, and a client-side timeout
//! so fetches fail open instead of hanging the UI.
//!
//! Reads get the full treatment. Mutations (`submit`, `accept`/`reject`,
//! `mark read`) are never auto-retried on network failure and never
//! time-limited, so side effects cannot be duplicated or abandoned
//! mid-flight; they still get the one-shot session refresh.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    Booking, BookingAction, DaySchedule, FutureBooking, MarkReadResponse, NotificationPage, Role,
    SubmitBookingRequest, UnreadCountResponse,
};
use uuid::Uuid;

use crate::api::{ApiError, MarketplaceApi};

/// Bounded-attempt exponential backoff for transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry; doubles per attempt
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Session collaborator: token refresh and forced logout live outside
/// the engine.
#[async_trait]
pub trait SessionHooks: Send + Sync {
    /// Attempt to refresh the bearer credential.
    async fn refresh_token(&self) -> Result<(), ApiError>;

    /// Tear down the session; called after a second auth failure.
    fn force_logout(&self);
}

pub struct NetAdapter<A, S> {
    inner: A,
    session: S,
    policy: RetryPolicy,
    /// Fetches slower than this fail open rather than hang the caller
    fetch_timeout: Duration,
}

impl<A, S> NetAdapter<A, S> {
    pub fn new(inner: A, session: S) -> Self {
        Self {
            inner,
            session,
            policy: RetryPolicy::default(),
            fetch_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// Retry loop for read operations: timeout, transient backoff, and the
/// one-shot session refresh. `$call` is re-issued on every attempt.
macro_rules! read_call {
    ($self:ident, $call:expr) => {{
        let mut attempt: u32 = 0;
        let mut refreshed = false;
        loop {
            let result = match tokio::time::timeout($self.fetch_timeout, $call).await {
                Ok(result) => result,
                Err(_) => Err(ApiError::Network("request timed out".to_string())),
            };
            match result {
                Ok(value) => break Ok(value),
                Err(ApiError::Unauthorized) if !refreshed => {
                    if $self.session.refresh_token().await.is_err() {
                        $self.session.force_logout();
                        break Err(ApiError::Unauthorized);
                    }
                    refreshed = true;
                }
                Err(ApiError::Unauthorized) => {
                    $self.session.force_logout();
                    break Err(ApiError::Unauthorized);
                }
                Err(e) if e.is_transient() && attempt + 1 < $self.policy.max_attempts => {
                    let delay = $self.policy.delay(attempt);
                    log::warn!(
                        "transient failure (attempt {}): {}; retrying in {:?}",
                        attempt + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => break Err(e),
            }
        }
    }};
}

/// Mutations: surface network failures immediately, refresh the session
/// at most once.
macro_rules! mutate_call {
    ($self:ident, $call:expr) => {{
        match $call.await {
            Err(ApiError::Unauthorized) => {
                if $self.session.refresh_token().await.is_err() {
                    $self.session.force_logout();
                    Err(ApiError::Unauthorized)
                } else {
                    match $call.await {
                        Err(ApiError::Unauthorized) => {
                            $self.session.force_logout();
                            Err(ApiError::Unauthorized)
                        }
                        other => other,
                    }
                }
            }
            other => other,
        }
    }};
}

#[async_trait]
impl<A, S> MarketplaceApi for NetAdapter<A, S>
where
    A: MarketplaceApi,
    S: SessionHooks,
{
    async fn get_future_bookings(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<FutureBooking>, ApiError> {
        read_call!(self, self.inner.get_future_bookings(teacher_id))
    }

    async fn submit_booking(&self, request: SubmitBookingRequest) -> Result<Booking, ApiError> {
        mutate_call!(self, self.inner.submit_booking(request.clone()))
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        action: BookingAction,
    ) -> Result<Booking, ApiError> {
        mutate_call!(self, self.inner.update_booking_status(booking_id, action))
    }

    async fn get_bookings_by_date(
        &self,
        date: NaiveDate,
        role: Role,
    ) -> Result<DaySchedule, ApiError> {
        read_call!(self, self.inner.get_bookings_by_date(date, role))
    }

    async fn list_notifications(&self, page: u32) -> Result<NotificationPage, ApiError> {
        read_call!(self, self.inner.list_notifications(page))
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<MarkReadResponse, ApiError> {
        mutate_call!(self, self.inner.mark_notification_read(id))
    }

    async fn unread_count(&self) -> Result<UnreadCountResponse, ApiError> {
        read_call!(self, self.inner.unread_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;

    /// Fake transport: scripted failures before a success, per call kind.
    #[derive(Default)]
    struct ScriptedApi {
        fail_reads_with: std::sync::Mutex<Vec<ApiError>>,
        read_calls: AtomicU32,
        mutate_calls: AtomicU32,
        slow_reads: AtomicBool,
    }

    impl ScriptedApi {
        fn failing(errors: Vec<ApiError>) -> Self {
            Self {
                fail_reads_with: std::sync::Mutex::new(errors),
                ..Default::default()
            }
        }

        fn next_error(&self) -> Option<ApiError> {
            let mut errors = self.fail_reads_with.lock().unwrap();
            if errors.is_empty() {
                None
            } else {
                Some(errors.remove(0))
            }
        }
    }

    #[async_trait]
    impl MarketplaceApi for ScriptedApi {
        async fn get_future_bookings(
            &self,
            _teacher_id: Uuid,
        ) -> Result<Vec<FutureBooking>, ApiError> {
            unimplemented!()
        }

        async fn submit_booking(
            &self,
            _request: SubmitBookingRequest,
        ) -> Result<Booking, ApiError> {
            unimplemented!()
        }

        async fn update_booking_status(
            &self,
            _booking_id: Uuid,
            _action: BookingAction,
        ) -> Result<Booking, ApiError> {
            self.mutate_calls.fetch_add(1, Ordering::SeqCst);
            match self.next_error() {
                Some(e) => Err(e),
                None => Err(ApiError::NotFound("booking".to_string())),
            }
        }

        async fn get_bookings_by_date(
            &self,
            _date: NaiveDate,
            _role: Role,
        ) -> Result<DaySchedule, ApiError> {
            unimplemented!()
        }

        async fn list_notifications(&self, _page: u32) -> Result<NotificationPage, ApiError> {
            unimplemented!()
        }

        async fn mark_notification_read(&self, _id: Uuid) -> Result<MarkReadResponse, ApiError> {
            unimplemented!()
        }

        async fn unread_count(&self) -> Result<UnreadCountResponse, ApiError> {
            self.read_calls.fetch_add(1, Ordering::SeqCst);
            if self.slow_reads.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            match self.next_error() {
                Some(e) => Err(e),
                None => Ok(UnreadCountResponse { unread: 7 }),
            }
        }
    }

    #[derive(Default)]
    struct FakeSession {
        refreshes: AtomicU32,
        refresh_fails: AtomicBool,
        logged_out: AtomicBool,
    }

    #[async_trait]
    impl SessionHooks for Arc<FakeSession> {
        async fn refresh_token(&self) -> Result<(), ApiError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if self.refresh_fails.load(Ordering::SeqCst) {
                Err(ApiError::Unauthorized)
            } else {
                Ok(())
            }
        }

        fn force_logout(&self) {
            self.logged_out.store(true, Ordering::SeqCst);
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_read_retries_until_success() {
        let api = ScriptedApi::failing(vec![
            ApiError::Network("down".into()),
            ApiError::Network("still down".into()),
        ]);
        let session = Arc::new(FakeSession::default());
        let adapter = NetAdapter::new(api, session).with_policy(fast_policy());

        let count = adapter.unread_count().await.unwrap();
        assert_eq!(count.unread, 7);
        assert_eq!(adapter.inner.read_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_read_gives_up_after_bounded_attempts() {
        let api = ScriptedApi::failing(vec![
            ApiError::Network("1".into()),
            ApiError::Network("2".into()),
            ApiError::Network("3".into()),
            ApiError::Network("4".into()),
        ]);
        let session = Arc::new(FakeSession::default());
        let adapter = NetAdapter::new(api, session).with_policy(fast_policy());

        let err = adapter.unread_count().await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(adapter.inner.read_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unauthorized_refreshes_once_then_succeeds() {
        let api = ScriptedApi::failing(vec![ApiError::Unauthorized]);
        let session = Arc::new(FakeSession::default());
        let adapter = NetAdapter::new(api, session.clone()).with_policy(fast_policy());

        adapter.unread_count().await.unwrap();
        assert_eq!(session.refreshes.load(Ordering::SeqCst), 1);
        assert!(!session.logged_out.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_unauthorized_forces_logout() {
        let api = ScriptedApi::failing(vec![ApiError::Unauthorized, ApiError::Unauthorized]);
        let session = Arc::new(FakeSession::default());
        let adapter = NetAdapter::new(api, session.clone()).with_policy(fast_policy());

        let err = adapter.unread_count().await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert!(session.logged_out.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_read_fails_open_as_network_error() {
        let api = ScriptedApi::default();
        api.slow_reads.store(true, Ordering::SeqCst);
        let session = Arc::new(FakeSession::default());
        let adapter = NetAdapter::new(api, session)
            .with_policy(RetryPolicy {
                max_attempts: 1,
                base_delay: Duration::from_millis(1),
            })
            .with_fetch_timeout(Duration::from_millis(50));

        let err = adapter.unread_count().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_is_not_retried_on_network_error() {
        let api = ScriptedApi::failing(vec![ApiError::Network("drop".into())]);
        let session = Arc::new(FakeSession::default());
        let adapter = NetAdapter::new(api, session).with_policy(fast_policy());

        let err = adapter
            .update_booking_status(Uuid::new_v4(), BookingAction::Accept)
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert_eq!(adapter.inner.mutate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_gets_single_session_refresh() {
        let api = ScriptedApi::failing(vec![ApiError::Unauthorized]);
        let session = Arc::new(FakeSession::default());
        let adapter = NetAdapter::new(api, session.clone()).with_policy(fast_policy());

        // After the refresh the scripted api returns NotFound, which must
        // pass through untouched.
        let err = adapter
            .update_booking_status(Uuid::new_v4(), BookingAction::Accept)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(session.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(adapter.inner.mutate_calls.load(Ordering::SeqCst), 2);
    }
}
