use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Occasion an event is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventOccasion {
    Birthday,
    BabyShower,
    Wedding,
    HouseParty,
    Festival,
    Corporate,
    Anniversary,
    Graduation,
    Holiday,
    Other,
}

impl EventOccasion {
    /// Human-readable label, as shown to users and embedded in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Birthday => "Birthday Party",
            Self::BabyShower => "Baby Shower",
            Self::Wedding => "Wedding",
            Self::HouseParty => "House Party",
            Self::Festival => "Festival Celebration",
            Self::Corporate => "Corporate Event",
            Self::Anniversary => "Anniversary",
            Self::Graduation => "Graduation",
            Self::Holiday => "Holiday Party",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for EventOccasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Birthday => "birthday",
            Self::BabyShower => "baby_shower",
            Self::Wedding => "wedding",
            Self::HouseParty => "house_party",
            Self::Festival => "festival",
            Self::Corporate => "corporate",
            Self::Anniversary => "anniversary",
            Self::Graduation => "graduation",
            Self::Holiday => "holiday",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for EventOccasion {
    type Err = EventOccasionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birthday" => Ok(Self::Birthday),
            "baby_shower" => Ok(Self::BabyShower),
            "wedding" => Ok(Self::Wedding),
            "house_party" => Ok(Self::HouseParty),
            "festival" => Ok(Self::Festival),
            "corporate" => Ok(Self::Corporate),
            "anniversary" => Ok(Self::Anniversary),
            "graduation" => Ok(Self::Graduation),
            "holiday" => Ok(Self::Holiday),
            "other" => Ok(Self::Other),
            other => Err(EventOccasionParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`EventOccasion`] string.
#[derive(Debug, Clone)]
pub struct EventOccasionParseError(pub String);

impl fmt::Display for EventOccasionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid occasion: {:?}", self.0)
    }
}

impl std::error::Error for EventOccasionParseError {}

// ---------------------------------------------------------------------------

/// Kind of crowd attending the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GuestType {
    Kids,
    Adults,
    Mixed,
}

impl GuestType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kids => "Kids",
            Self::Adults => "Adults",
            Self::Mixed => "Mixed (Kids & Adults)",
        }
    }
}

impl fmt::Display for GuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Kids => "kids",
            Self::Adults => "adults",
            Self::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

impl FromStr for GuestType {
    type Err = GuestTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kids" => Ok(Self::Kids),
            "adults" => Ok(Self::Adults),
            "mixed" => Ok(Self::Mixed),
            other => Err(GuestTypeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`GuestType`] string.
#[derive(Debug, Clone)]
pub struct GuestTypeParseError(pub String);

impl fmt::Display for GuestTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid guest type: {:?}", self.0)
    }
}

impl std::error::Error for GuestTypeParseError {}

// ---------------------------------------------------------------------------

/// Food preference for the event menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FoodPreference {
    Veg,
    NonVeg,
    Mixed,
}

impl FoodPreference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Veg => "Vegetarian",
            Self::NonVeg => "Non-Vegetarian",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for FoodPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Veg => "veg",
            Self::NonVeg => "non_veg",
            Self::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

impl FromStr for FoodPreference {
    type Err = FoodPreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "veg" => Ok(Self::Veg),
            "non_veg" => Ok(Self::NonVeg),
            "mixed" => Ok(Self::Mixed),
            other => Err(FoodPreferenceParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`FoodPreference`] string.
#[derive(Debug, Clone)]
pub struct FoodPreferenceParseError(pub String);

impl fmt::Display for FoodPreferenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid food preference: {:?}", self.0)
    }
}

impl std::error::Error for FoodPreferenceParseError {}

// ---------------------------------------------------------------------------

/// Overall aesthetic the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StylePreference {
    Minimal,
    Luxury,
    Fun,
    Traditional,
    Modern,
}

impl StylePreference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Luxury => "Luxury",
            Self::Fun => "Fun & Playful",
            Self::Traditional => "Traditional",
            Self::Modern => "Modern",
        }
    }
}

impl fmt::Display for StylePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Minimal => "minimal",
            Self::Luxury => "luxury",
            Self::Fun => "fun",
            Self::Traditional => "traditional",
            Self::Modern => "modern",
        };
        f.write_str(s)
    }
}

impl FromStr for StylePreference {
    type Err = StylePreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(Self::Minimal),
            "luxury" => Ok(Self::Luxury),
            "fun" => Ok(Self::Fun),
            "traditional" => Ok(Self::Traditional),
            "modern" => Ok(Self::Modern),
            other => Err(StylePreferenceParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`StylePreference`] string.
#[derive(Debug, Clone)]
pub struct StylePreferenceParseError(pub String);

impl fmt::Display for StylePreferenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid style preference: {:?}", self.0)
    }
}

impl std::error::Error for StylePreferenceParseError {}

// ---------------------------------------------------------------------------

/// Lifecycle stage of an event. Transitions only move forward:
/// draft -> planning -> complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Planning,
    Complete,
}

impl EventStatus {
    /// Position in the lifecycle, used to reject backward transitions.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Planning => 1,
            Self::Complete => 2,
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: EventStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Planning => "planning",
            Self::Complete => "complete",
        };
        f.write_str(s)
    }
}

impl FromStr for EventStatus {
    type Err = EventStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "planning" => Ok(Self::Planning),
            "complete" => Ok(Self::Complete),
            other => Err(EventStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`EventStatus`] string.
#[derive(Debug, Clone)]
pub struct EventStatusParseError(pub String);

impl fmt::Display for EventStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid event status: {:?}", self.0)
    }
}

impl std::error::Error for EventStatusParseError {}

// ---------------------------------------------------------------------------

/// Broad grouping of item categories, as presented in the plan view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Shopping,
    Gifts,
    Food,
}

/// Category of a plan item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Decor,
    Tableware,
    Lighting,
    PartySupplies,
    ReturnGifts,
    Starters,
    MainCourse,
    Desserts,
    Beverages,
}

impl ItemCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Decor => "Decor",
            Self::Tableware => "Tableware",
            Self::Lighting => "Lighting",
            Self::PartySupplies => "Party Supplies",
            Self::ReturnGifts => "Return Gifts",
            Self::Starters => "Starters",
            Self::MainCourse => "Main Course",
            Self::Desserts => "Desserts",
            Self::Beverages => "Beverages",
        }
    }

    /// Which tab of the plan view this category falls under.
    pub fn group(&self) -> CategoryGroup {
        match self {
            Self::Decor | Self::Tableware | Self::Lighting | Self::PartySupplies => {
                CategoryGroup::Shopping
            }
            Self::ReturnGifts => CategoryGroup::Gifts,
            Self::Starters | Self::MainCourse | Self::Desserts | Self::Beverages => {
                CategoryGroup::Food
            }
        }
    }

    /// Whether items in this category are food (and may carry `is_veg`).
    pub fn is_food(&self) -> bool {
        self.group() == CategoryGroup::Food
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Decor => "decor",
            Self::Tableware => "tableware",
            Self::Lighting => "lighting",
            Self::PartySupplies => "party_supplies",
            Self::ReturnGifts => "return_gifts",
            Self::Starters => "starters",
            Self::MainCourse => "main_course",
            Self::Desserts => "desserts",
            Self::Beverages => "beverages",
        };
        f.write_str(s)
    }
}

impl FromStr for ItemCategory {
    type Err = ItemCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decor" => Ok(Self::Decor),
            "tableware" => Ok(Self::Tableware),
            "lighting" => Ok(Self::Lighting),
            "party_supplies" => Ok(Self::PartySupplies),
            "return_gifts" => Ok(Self::ReturnGifts),
            "starters" => Ok(Self::Starters),
            "main_course" => Ok(Self::MainCourse),
            "desserts" => Ok(Self::Desserts),
            "beverages" => Ok(Self::Beverages),
            other => Err(ItemCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ItemCategory`] string.
#[derive(Debug, Clone)]
pub struct ItemCategoryParseError(pub String);

impl fmt::Display for ItemCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid item category: {:?}", self.0)
    }
}

impl std::error::Error for ItemCategoryParseError {}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// An event -- a single planned occasion owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub occasion: EventOccasion,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub guest_count: i32,
    pub budget: f64,
    pub guest_type: GuestType,
    pub food_preference: FoodPreference,
    pub allergies: Option<String>,
    pub style_preference: StylePreference,
    pub status: EventStatus,
    pub selected_theme_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A generated theme suggestion attached to an event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventTheme {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: String,
    pub color_palette: Vec<String>,
    pub decor_vibe: String,
    pub created_at: DateTime<Utc>,
}

/// A single planning line (decor/food/gift) attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventItem {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub quantity: i32,
    pub estimated_price: Option<f64>,
    pub is_owned: bool,
    pub is_veg: Option<bool>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 1:1 extension of the authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occasion_display_roundtrip() {
        let variants = [
            EventOccasion::Birthday,
            EventOccasion::BabyShower,
            EventOccasion::Wedding,
            EventOccasion::HouseParty,
            EventOccasion::Festival,
            EventOccasion::Corporate,
            EventOccasion::Anniversary,
            EventOccasion::Graduation,
            EventOccasion::Holiday,
            EventOccasion::Other,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: EventOccasion = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn occasion_invalid() {
        let result = "rave".parse::<EventOccasion>();
        assert!(result.is_err());
    }

    #[test]
    fn guest_type_display_roundtrip() {
        let variants = [GuestType::Kids, GuestType::Adults, GuestType::Mixed];
        for v in &variants {
            let s = v.to_string();
            let parsed: GuestType = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn food_preference_display_roundtrip() {
        let variants = [
            FoodPreference::Veg,
            FoodPreference::NonVeg,
            FoodPreference::Mixed,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: FoodPreference = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn style_preference_display_roundtrip() {
        let variants = [
            StylePreference::Minimal,
            StylePreference::Luxury,
            StylePreference::Fun,
            StylePreference::Traditional,
            StylePreference::Modern,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: StylePreference = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn status_display_roundtrip() {
        let variants = [
            EventStatus::Draft,
            EventStatus::Planning,
            EventStatus::Complete,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: EventStatus = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn status_invalid() {
        let result = "archived".parse::<EventStatus>();
        assert!(result.is_err());
    }

    #[test]
    fn status_transitions_forward_only() {
        assert!(EventStatus::Draft.can_transition_to(EventStatus::Planning));
        assert!(EventStatus::Planning.can_transition_to(EventStatus::Complete));
        assert!(EventStatus::Draft.can_transition_to(EventStatus::Complete));
        assert!(EventStatus::Draft.can_transition_to(EventStatus::Draft));
        assert!(!EventStatus::Planning.can_transition_to(EventStatus::Draft));
        assert!(!EventStatus::Complete.can_transition_to(EventStatus::Planning));
    }

    #[test]
    fn category_display_roundtrip() {
        let variants = [
            ItemCategory::Decor,
            ItemCategory::Tableware,
            ItemCategory::Lighting,
            ItemCategory::PartySupplies,
            ItemCategory::ReturnGifts,
            ItemCategory::Starters,
            ItemCategory::MainCourse,
            ItemCategory::Desserts,
            ItemCategory::Beverages,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: ItemCategory = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn category_invalid() {
        let result = "fireworks".parse::<ItemCategory>();
        assert!(result.is_err());
    }

    #[test]
    fn category_groups() {
        assert_eq!(ItemCategory::Decor.group(), CategoryGroup::Shopping);
        assert_eq!(ItemCategory::PartySupplies.group(), CategoryGroup::Shopping);
        assert_eq!(ItemCategory::ReturnGifts.group(), CategoryGroup::Gifts);
        assert_eq!(ItemCategory::Starters.group(), CategoryGroup::Food);
        assert_eq!(ItemCategory::Beverages.group(), CategoryGroup::Food);
        assert!(ItemCategory::MainCourse.is_food());
        assert!(!ItemCategory::Lighting.is_food());
    }
}
