use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use subwork_backend::domain::{BookingService, NotificationService, ScheduleService};
use subwork_backend::rest::{api_router, AppState};
use subwork_backend::storage::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up stores");
    let store = MemoryStore::new();

    let state = AppState::new(
        BookingService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        ),
        ScheduleService::new(Arc::new(store.clone())),
        NotificationService::new(Arc::new(store)),
    );

    // CORS setup to allow the booking UI to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = api_router(state).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
