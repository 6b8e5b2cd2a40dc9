use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Wardrobe slot a garment occupies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GarmentCategory {
    Outerwear,
    Top,
    Bottom,
    Dress,
    Shoes,
    Accessory,
}

/// Visual pattern of a garment, used for aesthetic matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Solid,
    Patterned,
    Busy,
}

impl Default for PatternKind {
    fn default() -> Self {
        PatternKind::Solid
    }
}

/// A single catalog item. Read-only to the engine; attribute scores are
/// validated when the catalog is loaded, not at scoring time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GarmentItem {
    /// Stable identifier used for history tracking (e.g. an image link)
    pub id: String,
    /// Human-readable name (e.g. "wool coat")
    #[serde(default)]
    pub label: String,
    pub category: GarmentCategory,
    /// Color identifier, a lowercase name or hex code
    pub color: String,
    #[serde(default)]
    pub pattern: PatternKind,
    /// How warm the garment is, 1 (light) to 5 (very warm)
    pub warmth_score: u8,
    /// Rain resistance, 1 (none) to 3 (waterproof)
    pub impermeability_score: u8,
    /// How well the garment layers, 1 to 5
    pub layering_score: u8,
}

impl GarmentItem {
    /// Validates attribute bounds and required fields.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "garment id must not be empty".to_string(),
            ));
        }
        if self.color.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "garment '{}' is missing a color",
                self.id
            )));
        }
        if !(1..=5).contains(&self.warmth_score) {
            return Err(AppError::InvalidInput(format!(
                "garment '{}' has warmth_score {} outside 1-5",
                self.id, self.warmth_score
            )));
        }
        if !(1..=3).contains(&self.impermeability_score) {
            return Err(AppError::InvalidInput(format!(
                "garment '{}' has impermeability_score {} outside 1-3",
                self.id, self.impermeability_score
            )));
        }
        if !(1..=5).contains(&self.layering_score) {
            return Err(AppError::InvalidInput(format!(
                "garment '{}' has layering_score {} outside 1-5",
                self.id, self.layering_score
            )));
        }
        Ok(())
    }
}

/// Loads and validates the wardrobe catalog from a JSON dataset file.
///
/// Duplicate ids are rejected so that history entries map to exactly one item.
pub fn load_catalog(path: &str) -> AppResult<Vec<GarmentItem>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Internal(format!("Failed to read catalog {}: {}", path, e)))?;

    let items: Vec<GarmentItem> = serde_json::from_str(&raw)
        .map_err(|e| AppError::InvalidInput(format!("Malformed catalog {}: {}", path, e)))?;

    let mut seen = std::collections::HashSet::new();
    for item in &items {
        item.validate()?;
        if !seen.insert(item.id.clone()) {
            return Err(AppError::InvalidInput(format!(
                "duplicate garment id '{}' in catalog",
                item.id
            )));
        }
    }

    Ok(items)
}
