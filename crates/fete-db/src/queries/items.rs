//! Database query functions for the `event_items` table.
//!
//! Item mutations are reachable by item id alone, so ownership is enforced
//! by joining through `events` on the owning user id.

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{EventItem, ItemCategory};

/// Parameters for inserting one plan item. `is_owned` always starts false.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ItemCategory,
    pub quantity: i32,
    #[serde(default)]
    pub estimated_price: Option<f64>,
    #[serde(default)]
    pub is_veg: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for an item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub estimated_price: Option<f64>,
    pub is_owned: Option<bool>,
    pub notes: Option<String>,
}

/// Bulk-insert generated items for an event inside one transaction.
/// Returns the inserted rows in insertion order.
pub async fn insert_items(
    pool: &PgPool,
    event_id: Uuid,
    items: &[NewItem],
) -> Result<Vec<EventItem>> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let mut inserted = Vec::with_capacity(items.len());
    for item in items {
        let row = sqlx::query_as::<_, EventItem>(
            "INSERT INTO event_items (event_id, name, description, category, \
             quantity, estimated_price, is_veg, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(event_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.category)
        .bind(item.quantity)
        .bind(item.estimated_price)
        .bind(item.is_veg)
        .bind(&item.notes)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("failed to insert item {:?}", item.name))?;

        inserted.push(row);
    }

    tx.commit().await.context("failed to commit items")?;
    Ok(inserted)
}

/// List an event's items, grouped by category then insertion order.
pub async fn list_items(pool: &PgPool, event_id: Uuid) -> Result<Vec<EventItem>> {
    let items = sqlx::query_as::<_, EventItem>(
        "SELECT * FROM event_items WHERE event_id = $1 ORDER BY category ASC, created_at ASC",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
    .context("failed to list items")?;

    Ok(items)
}

/// Apply a partial update to an item the user owns (via its event).
/// Returns the updated row, or `None` if no such item is visible to them.
pub async fn update_item(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    update: &ItemUpdate,
) -> Result<Option<EventItem>> {
    let item = sqlx::query_as::<_, EventItem>(
        "UPDATE event_items i SET \
             name = COALESCE($3, i.name), \
             description = COALESCE($4, i.description), \
             quantity = COALESCE($5, i.quantity), \
             estimated_price = COALESCE($6, i.estimated_price), \
             is_owned = COALESCE($7, i.is_owned), \
             notes = COALESCE($8, i.notes), \
             updated_at = now() \
         FROM events e \
         WHERE i.id = $1 AND e.id = i.event_id AND e.user_id = $2 \
         RETURNING i.*",
    )
    .bind(id)
    .bind(user_id)
    .bind(&update.name)
    .bind(&update.description)
    .bind(update.quantity)
    .bind(update.estimated_price)
    .bind(update.is_owned)
    .bind(&update.notes)
    .fetch_optional(pool)
    .await
    .context("failed to update item")?;

    Ok(item)
}

/// Delete an item the user owns (via its event). Returns `true` if a row
/// was deleted.
pub async fn delete_item(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM event_items i \
         USING events e \
         WHERE i.id = $1 AND e.id = i.event_id AND e.user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await
    .context("failed to delete item")?;

    Ok(result.rows_affected() > 0)
}

/// Total estimated cost for an event: owned items contribute zero, the rest
/// contribute price x quantity (missing prices count as zero).
pub async fn total_estimated_cost(pool: &PgPool, event_id: Uuid) -> Result<f64> {
    let total: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM( \
             CASE WHEN is_owned THEN 0 \
                  ELSE COALESCE(estimated_price, 0) * quantity END \
         ), 0)::double precision \
         FROM event_items WHERE event_id = $1",
    )
    .bind(event_id)
    .fetch_one(pool)
    .await
    .context("failed to compute total cost")?;

    Ok(total)
}
