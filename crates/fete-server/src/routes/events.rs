//! Event CRUD and the event-scoped generation flows.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fete_core::{cost, planner};
use fete_db::models::{Event, EventItem, EventStatus, EventTheme};
use fete_db::queries::{events as event_db, items as item_db, themes as theme_db};

use super::AppState;
use crate::error::AppError;
use crate::identity::UserId;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: Event,
    pub themes: Vec<EventTheme>,
    pub items: Vec<EventItem>,
    pub budget_summary: cost::BudgetSummary,
}

#[derive(Debug, Serialize)]
pub struct ThemesResponse {
    pub themes: Vec<EventTheme>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    #[serde(flatten)]
    pub event: Event,
    pub items: Vec<EventItem>,
}

#[derive(Debug, Deserialize)]
pub struct SelectThemeRequest {
    pub theme_id: Uuid,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_new_event(new: &event_db::NewEvent) -> Result<(), AppError> {
    if new.name.trim().is_empty() {
        return Err(AppError::unprocessable("event name must not be empty"));
    }
    if new.guest_count <= 0 {
        return Err(AppError::unprocessable("guest count must be positive"));
    }
    if new.budget < 0.0 {
        return Err(AppError::unprocessable("budget must not be negative"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<axum::response::Response, AppError> {
    let events = event_db::list_events(&state.pool, user_id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(events).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(new): Json<event_db::NewEvent>,
) -> Result<axum::response::Response, AppError> {
    validate_new_event(&new)?;

    let event = event_db::insert_event(&state.pool, user_id, &new)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    let event = event_db::get_event(&state.pool, user_id, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("event {id} not found")))?;

    let themes = theme_db::list_themes(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    let items = item_db::list_items(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    let budget_summary = cost::budget_summary(event.budget, &items);

    Ok(Json(EventDetailResponse {
        event,
        themes,
        items,
        budget_summary,
    })
    .into_response())
}

pub async fn update(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
    Json(update): Json<event_db::EventUpdate>,
) -> Result<axum::response::Response, AppError> {
    // Status only ever moves forward: draft -> planning -> complete.
    if let Some(next) = update.status {
        let current = event_db::get_event(&state.pool, user_id, id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found(format!("event {id} not found")))?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::unprocessable(format!(
                "event status cannot move from {} to {}",
                current.status, next
            )));
        }
    }

    let event = event_db::update_event(&state.pool, user_id, id, &update)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("event {id} not found")))?;

    Ok(Json(event).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    let deleted = event_db::delete_event(&state.pool, user_id, id)
        .await
        .map_err(AppError::internal)?;

    if !deleted {
        return Err(AppError::not_found(format!("event {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn list_themes(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    // Ownership check before touching the child table.
    event_db::get_event(&state.pool, user_id, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("event {id} not found")))?;

    let themes = theme_db::list_themes(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(themes).into_response())
}

/// Generate theme suggestions for an event and persist them.
///
/// There is no de-duplication: a second click while the first request is in
/// flight produces a second batch of themes.
pub async fn generate_themes(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    let event = event_db::get_event(&state.pool, user_id, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("event {id} not found")))?;

    let themes = planner::generate_themes_for_event(&state.pool, state.gateway.as_ref(), &event)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(ThemesResponse { themes }).into_response())
}

/// Record a theme choice and generate the item plan for it.
pub async fn select_theme(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectThemeRequest>,
) -> Result<axum::response::Response, AppError> {
    let event = event_db::get_event(&state.pool, user_id, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("event {id} not found")))?;

    if event.status == EventStatus::Complete {
        return Err(AppError::unprocessable(format!(
            "event {id} is already complete"
        )));
    }

    let theme = theme_db::get_theme(&state.pool, request.theme_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("theme {} not found", request.theme_id)))?;

    if theme.event_id != event.id {
        return Err(AppError::unprocessable(format!(
            "theme {} does not belong to event {id}",
            request.theme_id
        )));
    }

    let (event, items) = planner::select_theme_and_plan(
        &state.pool,
        state.gateway.as_ref(),
        user_id,
        id,
        request.theme_id,
    )
    .await
    .map_err(AppError::internal)?;

    Ok(Json(PlanResponse { event, items }).into_response())
}
