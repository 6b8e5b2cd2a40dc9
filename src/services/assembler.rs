use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::HistoryStore,
    error::{AppError, AppResult},
    models::{
        GarmentCategory, GarmentItem, OutfitKind, Recommendation, ScoredItem, WeatherReading,
    },
    services::{color, diversity, requirements, scoring},
};

/// Adjusted score an optional-slot candidate must exceed to be selected
const MIN_SLOT_SCORE: f64 = 0.0;
/// Runners-up surfaced per slot
const ALTERNATIVE_COUNT: usize = 2;
/// Fitness is on a 0-10 scale; match percentage maps it to 0-100
const MATCH_PERCENT_FACTOR: f64 = 10.0;

/// Greedy pick for the layered path
struct LayeredPick {
    top: ScoredItem,
    top_alts: Vec<ScoredItem>,
    bottom: ScoredItem,
    bottom_alts: Vec<ScoredItem>,
}

/// Assembles a complete outfit for the given weather reading.
///
/// Selection proceeds slot by slot: outerwear (when cold enough), then top or
/// dress, then bottom, then shoes and accessory. At each slot candidates are
/// ranked by fitness plus diversity penalty, adjusted for color compatibility
/// against everything already chosen, and the top candidate wins. No
/// backtracking.
///
/// History unavailability never fails the request: a failed read degrades to
/// an empty history, a failed write is reported via `history_degraded`.
pub async fn recommend_outfit(
    catalog: &[GarmentItem],
    reading: &WeatherReading,
    history: &dyn HistoryStore,
    style_score: f64,
) -> AppResult<Recommendation> {
    let required = requirements::required_attributes(reading)?;

    let mut history_degraded = false;
    let worn = match history.load_all().await {
        Ok(worn) => worn,
        Err(e) => {
            tracing::warn!(error = %e, "History load failed, recommending without diversity data");
            history_degraded = true;
            Default::default()
        }
    };
    let now = Utc::now();

    let rank = |category: GarmentCategory| {
        let mut ranked = scoring::rank_category(catalog, category, &required, style_score);
        diversity::apply(&mut ranked, &worn, now);
        ranked
    };

    // Items selected so far, in assembly order. Later slots are color-matched
    // against every entry.
    let mut selected: Vec<ScoredItem> = Vec::new();

    let mut outerwear = None;
    if required.warmth >= 3 {
        if let Some((best, _)) = pick_adjusted(&rank(GarmentCategory::Outerwear), &selected) {
            if best.final_score > MIN_SLOT_SCORE {
                selected.push(best.clone());
                outerwear = Some(best);
            }
        }
    }

    let tops = rank(GarmentCategory::Top);
    let bottoms = rank(GarmentCategory::Bottom);
    // A dress is only an option in mild weather
    let dresses = if required.warmth <= 3 {
        rank(GarmentCategory::Dress)
    } else {
        Vec::new()
    };

    let layered = if let Some((top, top_alts)) = pick_adjusted(&tops, &selected) {
        let mut with_top = selected.clone();
        with_top.push(top.clone());
        pick_adjusted(&bottoms, &with_top).map(|(bottom, bottom_alts)| LayeredPick {
            top,
            top_alts,
            bottom,
            bottom_alts,
        })
    } else {
        None
    };
    let dress_pick = pick_adjusted(&dresses, &selected);

    let mut top = None;
    let mut bottom = None;
    let mut dress = None;
    let mut top_alternatives = Vec::new();
    let mut bottom_alternatives = Vec::new();
    let mut dress_alternatives = Vec::new();

    let kind = match (layered, dress_pick) {
        (layered_pick, Some((best_dress, alts))) if dress_preferred(&layered_pick, &best_dress) => {
            selected.push(best_dress.clone());
            dress = Some(best_dress);
            dress_alternatives = alts;
            OutfitKind::Dress
        }
        (Some(pick), _) => {
            selected.push(pick.top.clone());
            selected.push(pick.bottom.clone());
            top = Some(pick.top);
            top_alternatives = pick.top_alts;
            bottom = Some(pick.bottom);
            bottom_alternatives = pick.bottom_alts;
            OutfitKind::Layered
        }
        (None, _) => {
            return Err(AppError::IncompleteCatalog(missing_slot_message(
                &tops, &bottoms,
            )));
        }
    };

    let mut shoes = None;
    if let Some((best, _)) = pick_adjusted(&rank(GarmentCategory::Shoes), &selected) {
        if best.final_score > MIN_SLOT_SCORE {
            selected.push(best.clone());
            shoes = Some(best);
        }
    }

    let mut accessory = None;
    if let Some((best, _)) = pick_adjusted(&rank(GarmentCategory::Accessory), &selected) {
        if best.final_score > MIN_SLOT_SCORE {
            selected.push(best.clone());
            accessory = Some(best);
        }
    }

    let total_score: f64 = selected.iter().map(|s| s.final_score).sum();
    let mean_fitness: f64 =
        selected.iter().map(|s| s.fitness).sum::<f64>() / selected.len() as f64;
    let match_percent = (mean_fitness * MATCH_PERCENT_FACTOR).clamp(0.0, 100.0);

    for scored in &selected {
        if let Err(e) = history.put(&scored.item.id, now).await {
            tracing::warn!(
                item_id = %scored.item.id,
                error = %e,
                "History write failed, wear record not persisted"
            );
            history_degraded = true;
        }
    }

    tracing::info!(
        kind = ?kind,
        item_count = selected.len(),
        match_percent = match_percent,
        history_degraded = history_degraded,
        "Outfit assembled"
    );

    Ok(Recommendation {
        id: Uuid::new_v4(),
        kind,
        weather: *reading,
        required,
        outerwear,
        top,
        bottom,
        dress,
        shoes,
        accessory,
        top_alternatives,
        bottom_alternatives,
        dress_alternatives,
        total_score,
        match_percent,
        history_degraded,
    })
}

/// The dress path wins only when its adjusted score beats the mean of the
/// layered pick; with no layered pick available it wins by default.
fn dress_preferred(layered: &Option<LayeredPick>, dress: &ScoredItem) -> bool {
    match layered {
        Some(pick) => dress.final_score > (pick.top.final_score + pick.bottom.final_score) / 2.0,
        None => true,
    }
}

/// Applies the summed color adjustment against everything already selected,
/// re-ranks, and returns the winner plus a few runners-up.
fn pick_adjusted(
    candidates: &[ScoredItem],
    selected: &[ScoredItem],
) -> Option<(ScoredItem, Vec<ScoredItem>)> {
    if candidates.is_empty() {
        return None;
    }

    let mut adjusted: Vec<ScoredItem> = candidates
        .iter()
        .map(|candidate| {
            let adjustment: f64 = selected
                .iter()
                .map(|chosen| color::compatibility(&candidate.item, &chosen.item))
                .sum();
            candidate.with_color_adjustment(adjustment)
        })
        .collect();

    scoring::sort_ranked(&mut adjusted);
    let best = adjusted.remove(0);
    adjusted.truncate(ALTERNATIVE_COUNT);
    Some((best, adjusted))
}

fn missing_slot_message(tops: &[ScoredItem], bottoms: &[ScoredItem]) -> String {
    match (tops.is_empty(), bottoms.is_empty()) {
        (true, true) => "no eligible top or bottom candidates in the catalog".to_string(),
        (true, false) => "no eligible top candidates in the catalog".to_string(),
        _ => "no eligible bottom candidates in the catalog".to_string(),
    }
}
