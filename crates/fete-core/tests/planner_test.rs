//! Integration tests for the generate-and-persist flows, using a scripted
//! gateway so no network is involved.

use chrono::Utc;
use uuid::Uuid;

use fete_core::planner;
use fete_db::models::{
    EventOccasion, EventStatus, FoodPreference, GuestType, ItemCategory, StylePreference,
};
use fete_db::queries::{events, items, themes};
use fete_test_utils::{ScriptedGateway, create_test_db, drop_test_db};

async fn seed_event(pool: &sqlx::PgPool, user_id: Uuid) -> fete_db::models::Event {
    events::insert_event(
        pool,
        user_id,
        &events::NewEvent {
            name: "Anniversary dinner".to_string(),
            occasion: EventOccasion::Anniversary,
            event_date: Utc::now(),
            location: "Rooftop".to_string(),
            guest_count: 8,
            budget: 800.0,
            guest_type: GuestType::Adults,
            food_preference: FoodPreference::NonVeg,
            allergies: None,
            style_preference: StylePreference::Luxury,
        },
    )
    .await
    .expect("insert event should succeed")
}

const THEMES_REPLY: &str = r##"Here you go:
[
  {"name": "Golden Hour", "description": "Warm and elegant.", "color_palette": ["#d4af37", "#fff8e7", "#8b6f2f", "#2c1e0f"], "decor_vibe": "Candlelit warmth."},
  {"name": "Midnight Velvet", "description": "Deep and moody.", "color_palette": ["#191970", "#4b0082", "#c0c0c0", "#0b0b1f"], "decor_vibe": "Rich textures under low light."},
  {"name": "Garden Romance", "description": "Florals all around.", "color_palette": ["#f7cad0", "#b5e2b3", "#ffffff", "#6b8f71"], "decor_vibe": "Soft petals and greens."},
  {"name": "Modern Minimal", "description": "Clean lines.", "color_palette": ["#ffffff", "#e0e0e0", "#333333", "#b5a27f"], "decor_vibe": "Uncluttered elegance."}
]"##;

const PLAN_REPLY: &str = r#"{
  "items": [
    {"name": "Centerpiece", "category": "decor", "quantity": 2, "estimated_price": 30.0, "description": "Gold floral centerpiece"},
    {"name": "Charger Plates", "category": "tableware", "quantity": 8, "estimated_price": 4.5},
    {"name": "Taper Candles", "category": "lighting", "quantity": 12, "estimated_price": 1.5},
    {"name": "Grilled Skewers", "category": "starters", "quantity": 24, "estimated_price": 2.0, "is_veg": false},
    {"name": "Sparkling Water", "category": "beverages", "quantity": 10, "estimated_price": 1.25, "is_veg": true, "notes": "Chill ahead"}
  ]
}"#;

#[tokio::test]
async fn generate_themes_persists_all_four() {
    let (pool, db_name) = create_test_db().await;
    let user_id = Uuid::new_v4();
    let event = seed_event(&pool, user_id).await;

    let gateway = ScriptedGateway::reply(THEMES_REPLY);
    let inserted = planner::generate_themes_for_event(&pool, &gateway, &event)
        .await
        .expect("generation should succeed");

    assert_eq!(inserted.len(), 4);
    assert_eq!(inserted[0].name, "Golden Hour");
    assert_eq!(inserted[0].event_id, event.id);
    assert_eq!(inserted[1].color_palette.len(), 4);

    let listed = themes::list_themes(&pool, event.id)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 4);

    // The event itself is untouched by theme generation.
    let refreshed = events::get_event(&pool, user_id, event.id)
        .await
        .expect("get should succeed")
        .expect("event should exist");
    assert_eq!(refreshed.status, EventStatus::Draft);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn failed_generation_leaves_event_in_draft_with_no_themes() {
    let (pool, db_name) = create_test_db().await;
    let user_id = Uuid::new_v4();
    let event = seed_event(&pool, user_id).await;

    let gateway = ScriptedGateway::reply("Sorry, I can't do that.");
    let result = planner::generate_themes_for_event(&pool, &gateway, &event).await;
    assert!(result.is_err(), "reply without a JSON array must fail");

    let refreshed = events::get_event(&pool, user_id, event.id)
        .await
        .expect("get should succeed")
        .expect("event should exist");
    assert_eq!(refreshed.status, EventStatus::Draft);
    assert!(themes::list_themes(&pool, event.id).await.expect("list").is_empty());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn select_theme_and_plan_persists_items() {
    let (pool, db_name) = create_test_db().await;
    let user_id = Uuid::new_v4();
    let event = seed_event(&pool, user_id).await;

    let theme_gateway = ScriptedGateway::reply(THEMES_REPLY);
    let generated = planner::generate_themes_for_event(&pool, &theme_gateway, &event)
        .await
        .expect("theme generation should succeed");
    let chosen = generated[0].id;

    let plan_gateway = ScriptedGateway::reply(PLAN_REPLY);
    let (updated, inserted) =
        planner::select_theme_and_plan(&pool, &plan_gateway, user_id, event.id, chosen)
            .await
            .expect("plan flow should succeed");

    assert_eq!(updated.status, EventStatus::Planning);
    assert_eq!(updated.selected_theme_id, Some(chosen));
    assert_eq!(inserted.len(), 5);
    assert!(inserted.iter().all(|i| !i.is_owned));
    assert!(
        inserted
            .iter()
            .any(|i| i.category == ItemCategory::Beverages && i.is_veg == Some(true))
    );

    let listed = items::list_items(&pool, event.id)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 5);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn plan_failure_after_selection_leaves_planning_with_no_items() {
    let (pool, db_name) = create_test_db().await;
    let user_id = Uuid::new_v4();
    let event = seed_event(&pool, user_id).await;

    let theme_gateway = ScriptedGateway::reply(THEMES_REPLY);
    let generated = planner::generate_themes_for_event(&pool, &theme_gateway, &event)
        .await
        .expect("theme generation should succeed");

    // Selection commits before the gateway call; the plan call then fails.
    let failing = ScriptedGateway::failure("upstream unavailable");
    let result =
        planner::select_theme_and_plan(&pool, &failing, user_id, event.id, generated[0].id).await;
    assert!(result.is_err());

    let refreshed = events::get_event(&pool, user_id, event.id)
        .await
        .expect("get should succeed")
        .expect("event should exist");
    assert_eq!(refreshed.status, EventStatus::Planning);
    assert_eq!(refreshed.selected_theme_id, Some(generated[0].id));
    assert!(items::list_items(&pool, event.id).await.expect("list").is_empty());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn foreign_theme_is_rejected() {
    let (pool, db_name) = create_test_db().await;
    let user_id = Uuid::new_v4();
    let event_a = seed_event(&pool, user_id).await;
    let event_b = seed_event(&pool, user_id).await;

    let gateway = ScriptedGateway::reply(THEMES_REPLY);
    let themes_b = planner::generate_themes_for_event(&pool, &gateway, &event_b)
        .await
        .expect("theme generation should succeed");

    let plan_gateway = ScriptedGateway::reply(PLAN_REPLY);
    let result =
        planner::select_theme_and_plan(&pool, &plan_gateway, user_id, event_a.id, themes_b[0].id)
            .await;
    assert!(result.is_err(), "theme from another event must be rejected");

    pool.close().await;
    drop_test_db(&db_name).await;
}
