//! Prompt templates for the two generation calls.
//!
//! Wording is deliberately stable: the extraction layer depends on the
//! "only respond with JSON" instruction, and the quantities/categories the
//! model returns track the phrasing here.

use fete_db::models::{Event, EventTheme};

/// Temperature for theme generation (more variety wanted).
pub const THEME_TEMPERATURE: f32 = 0.8;

/// Temperature for plan generation.
pub const PLAN_TEMPERATURE: f32 = 0.7;

/// The shared "Event Details" block embedded in both prompts.
fn event_details(event: &Event) -> String {
    let mut details = format!(
        "Event Details:\n\
         - Name: {name}\n\
         - Occasion: {occasion}\n\
         - Location: {location}\n\
         - Guest Count: {guest_count}\n\
         - Guest Type: {guest_type}\n\
         - Budget: ${budget}\n\
         - Food Preference: {food}\n\
         - Style Preference: {style}",
        name = event.name,
        occasion = event.occasion,
        location = event.location,
        guest_count = event.guest_count,
        guest_type = event.guest_type,
        budget = event.budget,
        food = event.food_preference,
        style = event.style_preference,
    );
    if let Some(allergies) = &event.allergies {
        details.push_str(&format!("\n- Allergies/Restrictions: {allergies}"));
    }
    details
}

/// Prompt asking for 4 theme suggestions as a JSON array.
pub fn build_theme_prompt(event: &Event) -> String {
    format!(
        "You are an expert event planner. Generate 4 unique and creative theme ideas for this event:\n\n\
         {details}\n\n\
         For each theme, provide:\n\
         1. A creative theme name\n\
         2. A brief description (2-3 sentences)\n\
         3. A color palette (array of 4-5 hex colors)\n\
         4. A decor vibe description (1-2 sentences about the overall aesthetic)\n\n\
         Respond with a JSON array of 4 themes in this exact format:\n\
         [\n\
           {{\n\
             \"name\": \"Theme Name\",\n\
             \"description\": \"Theme description here\",\n\
             \"color_palette\": [\"#hex1\", \"#hex2\", \"#hex3\", \"#hex4\"],\n\
             \"decor_vibe\": \"Decor vibe description\"\n\
           }}\n\
         ]\n\n\
         Only respond with the JSON array, no other text.",
        details = event_details(event),
    )
}

/// Prompt asking for a complete categorized item plan as a JSON object.
pub fn build_plan_prompt(event: &Event, theme: &EventTheme) -> String {
    format!(
        "You are an expert event planner. Generate a complete event plan for this event:\n\n\
         {details}\n\n\
         Selected Theme:\n\
         - Name: {theme_name}\n\
         - Description: {theme_description}\n\
         - Color Palette: {palette}\n\
         - Decor Vibe: {decor_vibe}\n\n\
         Generate a comprehensive event plan with:\n\n\
         1. DECOR & SUPPLIES - Items categorized as:\n\
            - decor (balloons, banners, centerpieces, etc.)\n\
            - tableware (plates, cups, napkins, cutlery)\n\
            - lighting (string lights, candles, etc.)\n\
            - party_supplies (favors, games, etc.)\n\n\
         2. RETURN GIFTS - 4-5 gift ideas categorized as \"return_gifts\"\n\n\
         3. FOOD MENU - Items categorized as:\n\
            - starters\n\
            - main_course\n\
            - desserts\n\
            - beverages\n\n\
         For each item provide:\n\
         - name: item name\n\
         - category: one of the categories above\n\
         - quantity: recommended quantity based on guest count\n\
         - estimated_price: price per unit in USD\n\
         - description: brief description\n\
         - is_veg: true/false (for food items only)\n\
         - notes: any helpful tips\n\n\
         Respond with a JSON object in this exact format:\n\
         {{\n\
           \"items\": [\n\
             {{\n\
               \"name\": \"Item name\",\n\
               \"category\": \"category\",\n\
               \"quantity\": 10,\n\
               \"estimated_price\": 5.99,\n\
               \"description\": \"Brief description\",\n\
               \"is_veg\": true,\n\
               \"notes\": \"Optional tips\"\n\
             }}\n\
           ]\n\
         }}\n\n\
         Generate at least 25-30 items total across all categories. \
         Only respond with the JSON object, no other text.",
        details = event_details(event),
        theme_name = theme.name,
        theme_description = theme.description,
        palette = theme.color_palette.join(", "),
        decor_vibe = theme.decor_vibe,
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use fete_db::models::{
        Event, EventOccasion, EventStatus, EventTheme, FoodPreference, GuestType,
        StylePreference,
    };

    use super::*;

    fn sample_event(allergies: Option<&str>) -> Event {
        Event {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Mia's 7th".to_string(),
            occasion: EventOccasion::Birthday,
            event_date: Utc::now(),
            location: "Backyard".to_string(),
            guest_count: 20,
            budget: 500.0,
            guest_type: GuestType::Kids,
            food_preference: FoodPreference::Veg,
            allergies: allergies.map(str::to_owned),
            style_preference: StylePreference::Fun,
            status: EventStatus::Draft,
            selected_theme_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn theme_prompt_embeds_event_fields() {
        let prompt = build_theme_prompt(&sample_event(None));
        assert!(prompt.contains("- Name: Mia's 7th"));
        assert!(prompt.contains("- Occasion: birthday"));
        assert!(prompt.contains("- Guest Count: 20"));
        assert!(prompt.contains("- Budget: $500"));
        assert!(prompt.contains("Respond with a JSON array of 4 themes"));
        assert!(!prompt.contains("Allergies"));
    }

    #[test]
    fn theme_prompt_includes_allergies_when_present() {
        let prompt = build_theme_prompt(&sample_event(Some("peanuts")));
        assert!(prompt.contains("- Allergies/Restrictions: peanuts"));
    }

    #[test]
    fn plan_prompt_embeds_theme() {
        let event = sample_event(None);
        let theme = EventTheme {
            id: Uuid::new_v4(),
            event_id: event.id,
            name: "Enchanted Garden".to_string(),
            description: "A whimsical garden party.".to_string(),
            color_palette: vec!["#a3c9a8".to_string(), "#f7e1d7".to_string()],
            decor_vibe: "Soft florals everywhere.".to_string(),
            created_at: Utc::now(),
        };
        let prompt = build_plan_prompt(&event, &theme);
        assert!(prompt.contains("- Name: Enchanted Garden"));
        assert!(prompt.contains("- Color Palette: #a3c9a8, #f7e1d7"));
        assert!(prompt.contains("at least 25-30 items"));
        assert!(prompt.contains("Only respond with the JSON object"));
    }
}
