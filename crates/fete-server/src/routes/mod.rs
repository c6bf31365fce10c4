//! Router assembly and the serve entry point.

mod events;
mod generate;
mod items;
mod profile;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::routing::{get, patch, post};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use fete_core::gateway::ChatGateway;

/// Shared handler state: the connection pool and the chat gateway.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub gateway: Arc<dyn ChatGateway>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/events", get(events::list).post(events::create))
        .route(
            "/api/events/{id}",
            get(events::detail)
                .patch(events::update)
                .delete(events::delete),
        )
        .route("/api/events/{id}/themes", get(events::list_themes))
        .route("/api/events/{id}/themes/generate", post(events::generate_themes))
        .route("/api/events/{id}/select-theme", post(events::select_theme))
        .route("/api/events/{id}/items", get(items::list).post(items::create))
        .route("/api/events/{id}/budget", get(items::budget))
        .route("/api/items/{id}", patch(items::update).delete(items::delete))
        .route("/api/profile", get(profile::fetch).put(profile::upsert))
        .route("/generate-themes", post(generate::themes))
        .route("/generate-event-plan", post(generate::event_plan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("fete serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("fete serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
