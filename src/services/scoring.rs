use crate::models::{GarmentCategory, GarmentItem, RequiredAttributes, ScoredItem};

/// Fixed scoring weights. These must sum to exactly 1.0; any deviation is a
/// defect (asserted in tests).
pub const WARMTH_WEIGHT: f64 = 0.40;
pub const IMPERMEABILITY_WEIGHT: f64 = 0.25;
pub const LAYERING_WEIGHT: f64 = 0.15;
/// Weight of the user-style placeholder. The style score itself comes from
/// configuration and defaults to the neutral 5.0, so this term shifts every
/// item equally until per-user preferences exist.
pub const STYLE_WEIGHT: f64 = 0.20;

/// Scale of each fit term: an exact attribute match scores 10, and every
/// point of mismatch subtracts one.
const FIT_SCALE: f64 = 10.0;

/// Computes the weather fitness of one garment against the required
/// attributes. Always in [0, 10] for valid inputs; exact matches score
/// highest and large mismatches approach zero without going negative.
pub fn fitness(item: &GarmentItem, required: &RequiredAttributes, style_score: f64) -> f64 {
    let warmth_fit = attribute_fit(item.warmth_score, required.warmth);
    let impermeability_fit = attribute_fit(item.impermeability_score, required.impermeability);
    let layering_fit = attribute_fit(item.layering_score, required.layering);

    WARMTH_WEIGHT * warmth_fit
        + IMPERMEABILITY_WEIGHT * impermeability_fit
        + LAYERING_WEIGHT * layering_fit
        + STYLE_WEIGHT * style_score.clamp(0.0, FIT_SCALE)
}

fn attribute_fit(item_value: u8, required_value: u8) -> f64 {
    let diff = (item_value as f64 - required_value as f64).abs();
    (FIT_SCALE - diff).max(0.0)
}

/// Scores and ranks every catalog item of one category.
///
/// Ordered by descending fitness; ties are broken by ascending item id so
/// rankings are reproducible.
pub fn rank_category(
    catalog: &[GarmentItem],
    category: GarmentCategory,
    required: &RequiredAttributes,
    style_score: f64,
) -> Vec<ScoredItem> {
    let mut ranked: Vec<ScoredItem> = catalog
        .iter()
        .filter(|item| item.category == category)
        .map(|item| ScoredItem::new(item.clone(), fitness(item, required, style_score)))
        .collect();

    sort_ranked(&mut ranked);
    ranked
}

/// Sorts scored items by descending final score, ties by ascending id.
pub fn sort_ranked(items: &mut [ScoredItem]) {
    items.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.item.id.cmp(&b.item.id))
    });
}
