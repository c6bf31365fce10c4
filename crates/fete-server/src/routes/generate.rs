//! Stateless generation endpoints.
//!
//! These mirror the original hosted functions: the caller posts the event
//! (and theme) it already holds, the handler forwards a templated prompt to
//! the chat gateway and returns the extracted JSON. Nothing is persisted
//! here. Any failure -- missing API key, upstream error, unparseable reply
//! -- comes back as `{"error": ...}` with HTTP 500.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use fete_core::extract::{self, GeneratedItem, GeneratedTheme};
use fete_core::gateway::ChatRequest;
use fete_core::prompt::{self, PLAN_TEMPERATURE, THEME_TEMPERATURE};
use fete_db::models::{Event, EventTheme};

use super::AppState;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct GenerateThemesRequest {
    pub event: Event,
}

#[derive(Debug, Serialize)]
pub struct GenerateThemesResponse {
    pub themes: Vec<GeneratedTheme>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub event: Event,
    pub theme: EventTheme,
}

#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    pub items: Vec<GeneratedItem>,
}

pub async fn themes(
    State(state): State<AppState>,
    Json(request): Json<GenerateThemesRequest>,
) -> Result<axum::response::Response, AppError> {
    let chat = ChatRequest {
        prompt: prompt::build_theme_prompt(&request.event),
        temperature: THEME_TEMPERATURE,
    };

    let reply = state
        .gateway
        .complete(&chat)
        .await
        .map_err(AppError::internal)?;

    let themes = extract::extract_themes(&reply)
        .map_err(|e| AppError::internal(anyhow::Error::new(e)))?;

    Ok(Json(GenerateThemesResponse { themes }).into_response())
}

pub async fn event_plan(
    State(state): State<AppState>,
    Json(request): Json<GeneratePlanRequest>,
) -> Result<axum::response::Response, AppError> {
    let chat = ChatRequest {
        prompt: prompt::build_plan_prompt(&request.event, &request.theme),
        temperature: PLAN_TEMPERATURE,
    };

    let reply = state
        .gateway
        .complete(&chat)
        .await
        .map_err(AppError::internal)?;

    let items = extract::extract_plan(&reply)
        .map_err(|e| AppError::internal(anyhow::Error::new(e)))?;

    Ok(Json(GeneratePlanResponse { items }).into_response())
}
