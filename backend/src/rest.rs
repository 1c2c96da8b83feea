use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::{Role, SubmitBookingRequest, UpdateBookingStatusRequest};
use tracing::info;
use uuid::Uuid;

use crate::domain::{BookingService, DomainError, NotificationService, ScheduleService};

/// Application state shared across handlers.
///
/// Caller identity comes from the session layer in front of this
/// service; here it arrives as an explicit id on each request.
#[derive(Clone)]
pub struct AppState {
    pub booking_service: BookingService,
    pub schedule_service: ScheduleService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(
        booking_service: BookingService,
        schedule_service: ScheduleService,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            booking_service,
            schedule_service,
            notification_service,
        }
    }
}

/// Build the API router over the given state.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/teachers/:id/future-bookings", get(future_bookings))
        .route("/bookings", post(submit_booking))
        .route("/bookings/:id/status", post(update_booking_status))
        .route("/schedule/day", get(day_schedule))
        .route("/schedule/month", get(month_schedule))
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/:id/read", post(mark_notification_read));

    Router::new().nest("/api", api).with_state(state)
}

/// Map a domain error onto an HTTP response.
fn error_response(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("internal error: {:?}", err);
        (status, "internal error".to_string())
    } else {
        (status, err.to_string())
    }
}

#[derive(Deserialize, Debug)]
pub struct FutureBookingsQuery {
    /// Reference day; defaults to today (UTC)
    pub today: Option<NaiveDate>,
}

/// GET /api/teachers/:id/future-bookings
pub async fn future_bookings(
    State(state): State<AppState>,
    Path(teacher_id): Path<Uuid>,
    Query(query): Query<FutureBookingsQuery>,
) -> impl IntoResponse {
    info!("GET /api/teachers/{}/future-bookings", teacher_id);

    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    match state.booking_service.future_bookings(teacher_id, today) {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// POST /api/bookings
pub async fn submit_booking(
    State(state): State<AppState>,
    Json(request): Json<SubmitBookingRequest>,
) -> impl IntoResponse {
    info!("POST /api/bookings - request: {:?}", request);

    match state.booking_service.submit(request) {
        Ok(booking) => (StatusCode::CREATED, Json(booking)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// POST /api/bookings/:id/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/bookings/{}/status - action: {:?}",
        booking_id, request.action
    );

    match state.booking_service.update_status(booking_id, request) {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[derive(Deserialize, Debug)]
pub struct DayScheduleQuery {
    pub date: NaiveDate,
    pub role: Role,
    pub party_id: Uuid,
}

/// GET /api/schedule/day
pub async fn day_schedule(
    State(state): State<AppState>,
    Query(query): Query<DayScheduleQuery>,
) -> impl IntoResponse {
    info!("GET /api/schedule/day - query: {:?}", query);

    match state
        .schedule_service
        .day_schedule(query.date, query.role, query.party_id)
    {
        Ok(schedule) => (StatusCode::OK, Json(schedule)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[derive(Deserialize, Debug)]
pub struct MonthScheduleQuery {
    pub role: Role,
    pub party_id: Uuid,
    pub year: i32,
    pub month: u32,
}

/// GET /api/schedule/month
pub async fn month_schedule(
    State(state): State<AppState>,
    Query(query): Query<MonthScheduleQuery>,
) -> impl IntoResponse {
    info!("GET /api/schedule/month - query: {:?}", query);

    match state.schedule_service.month_schedule(
        query.role,
        query.party_id,
        query.year,
        query.month,
    ) {
        Ok(schedule) => (StatusCode::OK, Json(schedule)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[derive(Deserialize, Debug)]
pub struct NotificationListQuery {
    pub recipient_id: Uuid,
    pub page: Option<u32>,
}

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> impl IntoResponse {
    info!("GET /api/notifications - query: {:?}", query);

    let page = query.page.unwrap_or(1);
    match state.notification_service.list(query.recipient_id, page) {
        Ok(notifications) => (StatusCode::OK, Json(notifications)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[derive(Deserialize, Debug)]
pub struct MarkReadRequest {
    pub recipient_id: Uuid,
}

/// POST /api/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
    Json(request): Json<MarkReadRequest>,
) -> impl IntoResponse {
    info!("POST /api/notifications/{}/read", notification_id);

    match state
        .notification_service
        .mark_read(request.recipient_id, notification_id)
    {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[derive(Deserialize, Debug)]
pub struct UnreadCountQuery {
    pub recipient_id: Uuid,
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Query(query): Query<UnreadCountQuery>,
) -> impl IntoResponse {
    match state.notification_service.unread_count(query.recipient_id) {
        Ok(count) => (StatusCode::OK, Json(count)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
