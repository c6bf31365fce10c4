//! Extraction of generated content from free-text model replies.
//!
//! Models are asked to reply with bare JSON, but in practice replies may be
//! wrapped in prose or markdown fences. The scanner finds the first
//! top-level bracketed block (string-escape aware, so brackets inside JSON
//! strings don't terminate it early), then the block must deserialize into
//! the typed theme/item shapes and pass range validation. A reply with no
//! block, invalid JSON, or out-of-range values is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fete_db::models::ItemCategory;

/// Errors from extracting and validating generated content.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON array found in model reply")]
    NoArray,

    #[error("no JSON object found in model reply")]
    NoObject,

    #[error("model reply contained invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("theme {name:?} has an empty color palette")]
    EmptyPalette { name: String },

    #[error("item {name:?} has negative quantity {quantity}")]
    NegativeQuantity { name: String, quantity: i32 },

    #[error("item {name:?} has a negative estimated price")]
    NegativePrice { name: String },
}

/// One theme as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTheme {
    pub name: String,
    pub description: String,
    pub color_palette: Vec<String>,
    pub decor_vibe: String,
}

/// One plan item as returned by the model. The category must be one of the
/// nine known values; serde rejects anything else at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub name: String,
    pub category: ItemCategory,
    pub quantity: i32,
    #[serde(default)]
    pub estimated_price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_veg: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratedPlan {
    items: Vec<GeneratedItem>,
}

/// Find the first balanced `open`..`close` block in `text`.
///
/// Brackets inside JSON string literals (including escaped quotes) are
/// ignored. Returns `None` if no opening bracket exists or the block is
/// never closed (e.g. a truncated reply).
fn extract_block(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + offset + c.len_utf8()]);
            }
        }
    }
    None
}

/// Extract and validate the theme list from a model reply.
pub fn extract_themes(reply: &str) -> Result<Vec<GeneratedTheme>, ExtractError> {
    let block = extract_block(reply, '[', ']').ok_or(ExtractError::NoArray)?;
    let themes: Vec<GeneratedTheme> = serde_json::from_str(block)?;

    for theme in &themes {
        if theme.color_palette.is_empty() {
            return Err(ExtractError::EmptyPalette {
                name: theme.name.clone(),
            });
        }
    }

    Ok(themes)
}

/// Extract and validate the item plan from a model reply.
pub fn extract_plan(reply: &str) -> Result<Vec<GeneratedItem>, ExtractError> {
    let block = extract_block(reply, '{', '}').ok_or(ExtractError::NoObject)?;
    let plan: GeneratedPlan = serde_json::from_str(block)?;

    for item in &plan.items {
        if item.quantity < 0 {
            return Err(ExtractError::NegativeQuantity {
                name: item.name.clone(),
                quantity: item.quantity,
            });
        }
        if matches!(item.estimated_price, Some(p) if p < 0.0) {
            return Err(ExtractError::NegativePrice {
                name: item.name.clone(),
            });
        }
    }

    Ok(plan.items)
}
