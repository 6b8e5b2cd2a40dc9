use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::{GarmentCategory, ScoredItem};
use crate::services::scoring;

/// Cooldown rule for one garment category
#[derive(Debug, Clone, Copy)]
pub struct CooldownRule {
    pub cooldown_hours: i64,
    pub penalty: f64,
}

/// Per-category cooldown windows and penalties.
///
/// Dresses are tracked in history but carry no penalty; outerwear, shoes and
/// accessories are rewearable immediately.
pub fn rule_for(category: GarmentCategory) -> CooldownRule {
    match category {
        GarmentCategory::Top => CooldownRule {
            cooldown_hours: 48,
            penalty: -7.0,
        },
        GarmentCategory::Bottom => CooldownRule {
            cooldown_hours: 72,
            penalty: -3.0,
        },
        GarmentCategory::Dress => CooldownRule {
            cooldown_hours: 24,
            penalty: 0.0,
        },
        GarmentCategory::Outerwear | GarmentCategory::Shoes | GarmentCategory::Accessory => {
            CooldownRule {
                cooldown_hours: 0,
                penalty: 0.0,
            }
        }
    }
}

/// Penalty for one item given the wear history.
///
/// Zero when the item has never been recommended, when its last
/// recommendation is older than the category cooldown, or when the category
/// carries no penalty.
pub fn penalty(
    item_id: &str,
    category: GarmentCategory,
    history: &HashMap<String, DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f64 {
    let rule = rule_for(category);
    if rule.cooldown_hours == 0 || rule.penalty == 0.0 {
        return 0.0;
    }

    match history.get(item_id) {
        Some(last_worn) if now - *last_worn < Duration::hours(rule.cooldown_hours) => rule.penalty,
        _ => 0.0,
    }
}

/// Applies diversity penalties to a ranked category and re-sorts by the
/// adjusted final score.
pub fn apply(
    items: &mut Vec<ScoredItem>,
    history: &HashMap<String, DateTime<Utc>>,
    now: DateTime<Utc>,
) {
    for scored in items.iter_mut() {
        let p = penalty(&scored.item.id, scored.item.category, history, now);
        scored.set_diversity_penalty(p);
    }
    scoring::sort_ranked(items);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GarmentItem, PatternKind};

    fn garment(id: &str, category: GarmentCategory) -> GarmentItem {
        GarmentItem {
            id: id.to_string(),
            label: String::new(),
            category,
            color: "black".to_string(),
            pattern: PatternKind::Solid,
            warmth_score: 3,
            impermeability_score: 1,
            layering_score: 3,
        }
    }

    #[test]
    fn test_empty_history_is_a_no_op() {
        let history = HashMap::new();
        let now = Utc::now();
        for category in [
            GarmentCategory::Top,
            GarmentCategory::Bottom,
            GarmentCategory::Outerwear,
            GarmentCategory::Dress,
        ] {
            assert_eq!(penalty("any", category, &history, now), 0.0);
        }
    }

    #[test]
    fn test_top_within_cooldown_is_penalized() {
        let now = Utc::now();
        let mut history = HashMap::new();
        history.insert("shirt".to_string(), now - Duration::hours(12));

        assert_eq!(penalty("shirt", GarmentCategory::Top, &history, now), -7.0);
    }

    #[test]
    fn test_top_outside_cooldown_is_not_penalized() {
        let now = Utc::now();
        let mut history = HashMap::new();
        history.insert("shirt".to_string(), now - Duration::hours(49));

        assert_eq!(penalty("shirt", GarmentCategory::Top, &history, now), 0.0);
    }

    #[test]
    fn test_bottom_cooldown_is_72_hours() {
        let now = Utc::now();
        let mut history = HashMap::new();
        history.insert("jeans".to_string(), now - Duration::hours(60));

        assert_eq!(penalty("jeans", GarmentCategory::Bottom, &history, now), -3.0);

        history.insert("jeans".to_string(), now - Duration::hours(73));
        assert_eq!(penalty("jeans", GarmentCategory::Bottom, &history, now), 0.0);
    }

    #[test]
    fn test_outerwear_has_no_cooldown() {
        let now = Utc::now();
        let mut history = HashMap::new();
        history.insert("coat".to_string(), now);

        assert_eq!(penalty("coat", GarmentCategory::Outerwear, &history, now), 0.0);
    }

    #[test]
    fn test_dress_is_tracked_but_not_penalized() {
        let now = Utc::now();
        let mut history = HashMap::new();
        history.insert("dress".to_string(), now - Duration::hours(1));

        assert_eq!(penalty("dress", GarmentCategory::Dress, &history, now), 0.0);
    }

    #[test]
    fn test_apply_reorders_by_adjusted_score() {
        let now = Utc::now();
        let mut history = HashMap::new();
        history.insert("best".to_string(), now - Duration::hours(2));

        let mut ranked = vec![
            ScoredItem::new(garment("best", GarmentCategory::Top), 9.0),
            ScoredItem::new(garment("runner_up", GarmentCategory::Top), 8.0),
        ];

        apply(&mut ranked, &history, now);

        // 9.0 - 7.0 = 2.0 drops below 8.0
        assert_eq!(ranked[0].item.id, "runner_up");
        assert_eq!(ranked[1].item.id, "best");
        assert_eq!(ranked[1].final_score, 2.0);
    }

    #[test]
    fn test_penalty_may_drive_score_negative() {
        let now = Utc::now();
        let mut history = HashMap::new();
        history.insert("thin".to_string(), now);

        let mut ranked = vec![ScoredItem::new(garment("thin", GarmentCategory::Top), 3.5)];
        apply(&mut ranked, &history, now);

        assert_eq!(ranked[0].final_score, -3.5);
    }
}
