//! Generate-and-persist flows.
//!
//! Ties the prompt builders, the chat gateway, and the bulk-insert queries
//! together. Each flow is a single user action: there is no retry, no
//! de-duplication of concurrent identical requests, and a failure partway
//! leaves whatever already committed (an event whose theme generation
//! failed stays in `draft` with no themes and can simply be retried).

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use fete_db::models::{Event, EventItem, EventTheme};
use fete_db::queries::{events, items, themes};

use crate::extract::{extract_plan, extract_themes};
use crate::gateway::{ChatGateway, ChatRequest};
use crate::prompt::{self, PLAN_TEMPERATURE, THEME_TEMPERATURE};

/// Generate theme suggestions for an event and persist them.
///
/// Returns the inserted theme rows in generation order.
pub async fn generate_themes_for_event(
    pool: &PgPool,
    gateway: &dyn ChatGateway,
    event: &Event,
) -> Result<Vec<EventTheme>> {
    let request = ChatRequest {
        prompt: prompt::build_theme_prompt(event),
        temperature: THEME_TEMPERATURE,
    };
    let reply = gateway
        .complete(&request)
        .await
        .context("theme generation failed")?;

    let generated = extract_themes(&reply).context("failed to parse themes from AI response")?;

    let new_themes: Vec<themes::NewTheme> = generated
        .into_iter()
        .map(|t| themes::NewTheme {
            name: t.name,
            description: t.description,
            color_palette: t.color_palette,
            decor_vibe: t.decor_vibe,
        })
        .collect();

    let inserted = themes::insert_themes(pool, event.id, &new_themes).await?;
    info!(event_id = %event.id, count = inserted.len(), "themes generated");
    Ok(inserted)
}

/// Record a theme choice and generate the item plan for it.
///
/// Sets `selected_theme_id`, moves the event to `planning`, then asks the
/// gateway for the categorized item list and bulk-inserts it with
/// `is_owned = false`. If plan generation fails, the event stays in
/// `planning` with no items; re-selecting the theme retries.
pub async fn select_theme_and_plan(
    pool: &PgPool,
    gateway: &dyn ChatGateway,
    user_id: Uuid,
    event_id: Uuid,
    theme_id: Uuid,
) -> Result<(Event, Vec<EventItem>)> {
    let theme = themes::get_theme(pool, theme_id)
        .await?
        .with_context(|| format!("theme {theme_id} not found"))?;

    let event = events::select_theme(pool, user_id, event_id, theme_id).await?;

    let request = ChatRequest {
        prompt: prompt::build_plan_prompt(&event, &theme),
        temperature: PLAN_TEMPERATURE,
    };
    let reply = gateway
        .complete(&request)
        .await
        .context("plan generation failed")?;

    let generated = extract_plan(&reply).context("failed to parse plan from AI response")?;

    let new_items: Vec<items::NewItem> = generated
        .into_iter()
        .map(|i| items::NewItem {
            name: i.name,
            description: i.description,
            category: i.category,
            quantity: i.quantity,
            estimated_price: i.estimated_price,
            is_veg: i.is_veg,
            notes: i.notes,
        })
        .collect();

    let inserted = items::insert_items(pool, event.id, &new_items).await?;
    info!(event_id = %event.id, theme_id = %theme_id, count = inserted.len(), "event plan created");
    Ok((event, inserted))
}
