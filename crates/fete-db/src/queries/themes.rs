//! Database query functions for the `event_themes` table.
//!
//! Themes are immutable once created: there is no update function. They are
//! bulk-inserted after a successful generation call and removed only by the
//! cascade when their event is deleted.

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::EventTheme;

/// Parameters for inserting one generated theme.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTheme {
    pub name: String,
    pub description: String,
    pub color_palette: Vec<String>,
    pub decor_vibe: String,
}

/// Bulk-insert generated themes for an event inside one transaction.
/// Returns the inserted rows in insertion order.
pub async fn insert_themes(
    pool: &PgPool,
    event_id: Uuid,
    themes: &[NewTheme],
) -> Result<Vec<EventTheme>> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let mut inserted = Vec::with_capacity(themes.len());
    for theme in themes {
        let row = sqlx::query_as::<_, EventTheme>(
            "INSERT INTO event_themes (event_id, name, description, color_palette, decor_vibe) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(event_id)
        .bind(&theme.name)
        .bind(&theme.description)
        .bind(&theme.color_palette)
        .bind(&theme.decor_vibe)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("failed to insert theme {:?}", theme.name))?;

        inserted.push(row);
    }

    tx.commit().await.context("failed to commit themes")?;
    Ok(inserted)
}

/// Fetch a theme by its id.
pub async fn get_theme(pool: &PgPool, id: Uuid) -> Result<Option<EventTheme>> {
    let theme = sqlx::query_as::<_, EventTheme>("SELECT * FROM event_themes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch theme")?;

    Ok(theme)
}

/// List an event's themes, oldest first (generation order).
pub async fn list_themes(pool: &PgPool, event_id: Uuid) -> Result<Vec<EventTheme>> {
    let themes = sqlx::query_as::<_, EventTheme>(
        "SELECT * FROM event_themes WHERE event_id = $1 ORDER BY created_at ASC",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
    .context("failed to list themes")?;

    Ok(themes)
}
