//! Database query functions for the `events` table.
//!
//! Every function takes the owning user id and filters on it, so a caller
//! can never read or mutate another user's events.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    Event, EventOccasion, EventStatus, FoodPreference, GuestType, StylePreference,
};

/// Parameters for inserting a new event row, matching the creation wizard's
/// form payload. New events always start in `draft`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub occasion: EventOccasion,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub guest_count: i32,
    pub budget: f64,
    pub guest_type: GuestType,
    pub food_preference: FoodPreference,
    #[serde(default)]
    pub allergies: Option<String>,
    pub style_preference: StylePreference,
}

/// Partial update for an event. `None` fields are left unchanged.
///
/// Status is handled separately (see [`update_status`]) because the
/// forward-only transition check needs the current row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub guest_count: Option<i32>,
    pub budget: Option<f64>,
    pub allergies: Option<String>,
    pub status: Option<EventStatus>,
}

/// Insert a new event row in `draft` status. Returns the inserted event with
/// server-generated defaults (id, status, timestamps).
pub async fn insert_event(pool: &PgPool, user_id: Uuid, new: &NewEvent) -> Result<Event> {
    let event = sqlx::query_as::<_, Event>(
        "INSERT INTO events (user_id, name, occasion, event_date, location, \
         guest_count, budget, guest_type, food_preference, allergies, style_preference) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(&new.name)
    .bind(new.occasion)
    .bind(new.event_date)
    .bind(&new.location)
    .bind(new.guest_count)
    .bind(new.budget)
    .bind(new.guest_type)
    .bind(new.food_preference)
    .bind(&new.allergies)
    .bind(new.style_preference)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert event {:?}", new.name))?;

    Ok(event)
}

/// Fetch one of the user's events by id.
pub async fn get_event(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Event>> {
    let event =
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch event")?;

    Ok(event)
}

/// List the user's events, newest first.
pub async fn list_events(pool: &PgPool, user_id: Uuid) -> Result<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT * FROM events WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("failed to list events")?;

    Ok(events)
}

/// Apply a partial update to one of the user's events. Returns the updated
/// row, or `None` if the event does not exist (or is not theirs).
///
/// The caller is responsible for having validated any status change against
/// the forward-only rule; this function applies fields verbatim.
pub async fn update_event(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    update: &EventUpdate,
) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>(
        "UPDATE events SET \
             name = COALESCE($3, name), \
             event_date = COALESCE($4, event_date), \
             location = COALESCE($5, location), \
             guest_count = COALESCE($6, guest_count), \
             budget = COALESCE($7, budget), \
             allergies = COALESCE($8, allergies), \
             status = COALESCE($9, status), \
             updated_at = now() \
         WHERE id = $1 AND user_id = $2 \
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(&update.name)
    .bind(update.event_date)
    .bind(&update.location)
    .bind(update.guest_count)
    .bind(update.budget)
    .bind(&update.allergies)
    .bind(update.status)
    .fetch_optional(pool)
    .await
    .context("failed to update event")?;

    Ok(event)
}

/// Move an event's status forward. Fails if the event is not found or the
/// transition would move backward (draft -> planning -> complete only).
pub async fn update_status(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    status: EventStatus,
) -> Result<Event> {
    let current = get_event(pool, user_id, id)
        .await?
        .with_context(|| format!("event {id} not found"))?;

    if !current.status.can_transition_to(status) {
        anyhow::bail!(
            "event {id} cannot move from {} to {}: status only moves forward",
            current.status,
            status
        );
    }

    let event = sqlx::query_as::<_, Event>(
        "UPDATE events SET status = $3, updated_at = now() \
         WHERE id = $1 AND user_id = $2 \
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(status)
    .fetch_one(pool)
    .await
    .context("failed to update event status")?;

    Ok(event)
}

/// Record the user's theme choice: set `selected_theme_id` and flip status
/// to `planning` in one statement.
///
/// The guarded UPDATE only matches when the theme row belongs to this event,
/// so a theme id from another event can never be attached. Fails with a
/// descriptive error distinguishing a missing event from a mismatched theme.
pub async fn select_theme(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
    theme_id: Uuid,
) -> Result<Event> {
    let event = sqlx::query_as::<_, Event>(
        "UPDATE events \
         SET selected_theme_id = $3, status = 'planning', updated_at = now() \
         WHERE id = $1 AND user_id = $2 AND status <> 'complete' \
           AND EXISTS ( \
               SELECT 1 FROM event_themes t WHERE t.id = $3 AND t.event_id = $1 \
           ) \
         RETURNING *",
    )
    .bind(event_id)
    .bind(user_id)
    .bind(theme_id)
    .fetch_optional(pool)
    .await
    .context("failed to select theme")?;

    match event {
        Some(e) => Ok(e),
        None => {
            // Distinguish between "event missing", "already complete", and
            // "theme belongs to a different event".
            let existing = get_event(pool, user_id, event_id).await?;
            match existing {
                None => anyhow::bail!("event {event_id} not found"),
                Some(e) if e.status == EventStatus::Complete => {
                    anyhow::bail!("event {event_id} is already complete")
                }
                Some(_) => anyhow::bail!(
                    "theme {theme_id} does not belong to event {event_id}"
                ),
            }
        }
    }
}

/// Delete one of the user's events. Themes and items cascade via foreign
/// keys. Returns `true` if a row was deleted.
pub async fn delete_event(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("failed to delete event")?;

    Ok(result.rows_affected() > 0)
}
