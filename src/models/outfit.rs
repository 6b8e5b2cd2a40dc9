use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GarmentItem, RequiredAttributes, WeatherReading};

/// A catalog item with its per-request scores.
///
/// `final_score` is always `fitness + diversity_penalty + color_adjustment`
/// and may be negative; negative scores are still ranked, never clamped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredItem {
    pub item: GarmentItem,
    pub fitness: f64,
    pub diversity_penalty: f64,
    pub color_adjustment: f64,
    pub final_score: f64,
}

impl ScoredItem {
    pub fn new(item: GarmentItem, fitness: f64) -> Self {
        Self {
            item,
            fitness,
            diversity_penalty: 0.0,
            color_adjustment: 0.0,
            final_score: fitness,
        }
    }

    /// Applies a diversity penalty and recomputes the final score.
    pub fn set_diversity_penalty(&mut self, penalty: f64) {
        self.diversity_penalty = penalty;
        self.recompute();
    }

    /// Returns a copy with the given color adjustment folded in.
    pub fn with_color_adjustment(&self, adjustment: f64) -> Self {
        let mut adjusted = self.clone();
        adjusted.color_adjustment = adjustment;
        adjusted.recompute();
        adjusted
    }

    fn recompute(&mut self) {
        self.final_score = self.fitness + self.diversity_penalty + self.color_adjustment;
    }
}

/// Which of the two mutually exclusive outfit paths was taken
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutfitKind {
    Layered,
    Dress,
}

/// A complete outfit recommendation for one request.
///
/// Exactly one of the two paths is populated: `top` + `bottom` for
/// `Layered`, `dress` for `Dress`. Outerwear, shoes and accessory are
/// optional on either path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Uuid,
    pub kind: OutfitKind,
    pub weather: WeatherReading,
    pub required: RequiredAttributes,
    pub outerwear: Option<ScoredItem>,
    pub top: Option<ScoredItem>,
    pub bottom: Option<ScoredItem>,
    pub dress: Option<ScoredItem>,
    pub shoes: Option<ScoredItem>,
    pub accessory: Option<ScoredItem>,
    pub top_alternatives: Vec<ScoredItem>,
    pub bottom_alternatives: Vec<ScoredItem>,
    pub dress_alternatives: Vec<ScoredItem>,
    /// Sum of the selected items' final scores, color adjustments included
    pub total_score: f64,
    /// Mean selected fitness normalized to 0-100
    pub match_percent: f64,
    /// Set when the history store was unavailable for this request;
    /// the recommendation is still valid but diversity data was skipped
    /// or the wear record was not persisted
    pub history_degraded: bool,
}

impl Recommendation {
    /// Selected items in assembly order.
    pub fn selected_items(&self) -> Vec<&ScoredItem> {
        [
            self.outerwear.as_ref(),
            self.top.as_ref(),
            self.bottom.as_ref(),
            self.dress.as_ref(),
            self.shoes.as_ref(),
            self.accessory.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
