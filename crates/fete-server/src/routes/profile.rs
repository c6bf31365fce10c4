//! Profile routes: the 1:1 extension of the authenticated identity.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;

use fete_db::queries::profiles as profile_db;

use super::AppState;
use crate::error::AppError;
use crate::identity::UserId;

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

pub async fn fetch(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<axum::response::Response, AppError> {
    let profile = profile_db::get_profile(&state.pool, user_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found("profile not found"))?;

    Ok(Json(profile).into_response())
}

pub async fn upsert(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(request): Json<ProfileRequest>,
) -> Result<axum::response::Response, AppError> {
    let profile = profile_db::upsert_profile(
        &state.pool,
        user_id,
        request.full_name.as_deref(),
        request.avatar_url.as_deref(),
    )
    .await
    .map_err(AppError::internal)?;

    Ok(Json(profile).into_response())
}
