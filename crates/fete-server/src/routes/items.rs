//! Plan item routes: listing, bulk insert, per-item updates, and the
//! budget summary.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use fete_core::cost;
use fete_db::queries::{events as event_db, items as item_db};

use super::AppState;
use crate::error::AppError;
use crate::identity::UserId;

#[derive(Debug, Deserialize)]
pub struct BulkItemsRequest {
    pub items: Vec<item_db::NewItem>,
}

/// Resolve the event and confirm the caller owns it, or 404.
async fn owned_event(
    state: &AppState,
    user_id: Uuid,
    event_id: Uuid,
) -> Result<fete_db::models::Event, AppError> {
    event_db::get_event(&state.pool, user_id, event_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("event {event_id} not found")))
}

pub async fn list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    owned_event(&state, user_id, id).await?;

    let items = item_db::list_items(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(items).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
    Json(request): Json<BulkItemsRequest>,
) -> Result<axum::response::Response, AppError> {
    owned_event(&state, user_id, id).await?;

    for item in &request.items {
        if item.quantity < 0 {
            return Err(AppError::unprocessable(format!(
                "item {:?} has negative quantity",
                item.name
            )));
        }
        if matches!(item.estimated_price, Some(p) if p < 0.0) {
            return Err(AppError::unprocessable(format!(
                "item {:?} has a negative estimated price",
                item.name
            )));
        }
    }

    let items = item_db::insert_items(&state.pool, id, &request.items)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(items)).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
    Json(update): Json<item_db::ItemUpdate>,
) -> Result<axum::response::Response, AppError> {
    if matches!(update.quantity, Some(q) if q < 0) {
        return Err(AppError::unprocessable("quantity must not be negative"));
    }
    if matches!(update.estimated_price, Some(p) if p < 0.0) {
        return Err(AppError::unprocessable(
            "estimated price must not be negative",
        ));
    }

    let item = item_db::update_item(&state.pool, user_id, id, &update)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("item {id} not found")))?;

    Ok(Json(item).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    let deleted = item_db::delete_item(&state.pool, user_id, id)
        .await
        .map_err(AppError::internal)?;

    if !deleted {
        return Err(AppError::not_found(format!("item {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn budget(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    let event = owned_event(&state, user_id, id).await?;

    let items = item_db::list_items(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(cost::budget_summary(event.budget, &items)).into_response())
}
