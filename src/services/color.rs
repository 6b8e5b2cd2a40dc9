use crate::models::{GarmentItem, PatternKind};

/// Color pairs that visibly clash regardless of the rest of the outfit
const CLASH_PAIRS: [(&str, &str); 3] = [
    ("red", "green"),
    ("blue", "orange"),
    ("purple", "yellow"),
];

/// Colors that combine safely with each other
const NEUTRAL_COLORS: [&str; 5] = ["black", "white", "grey", "navy", "beige"];

const CLASH_PENALTY: f64 = -5.0;
const BUSY_PENALTY: f64 = -2.0;
const NEUTRAL_BONUS: f64 = 1.0;

/// Pairwise aesthetic adjustment between two garments.
///
/// Returns -5.0 for a clashing color pair, -2.0 when both patterns are busy,
/// +1.0 when both colors are neutral, 0.0 otherwise. Symmetric:
/// `compatibility(a, b) == compatibility(b, a)` for all pairs.
///
/// Colors are matched as lowercase substrings so that identifiers like
/// "dark green" or "navy blue" participate in the rules.
pub fn compatibility(a: &GarmentItem, b: &GarmentItem) -> f64 {
    let color_a = a.color.to_lowercase();
    let color_b = b.color.to_lowercase();

    for (c1, c2) in CLASH_PAIRS {
        if (color_a.contains(c1) && color_b.contains(c2))
            || (color_a.contains(c2) && color_b.contains(c1))
        {
            return CLASH_PENALTY;
        }
    }

    if a.pattern == PatternKind::Busy && b.pattern == PatternKind::Busy {
        return BUSY_PENALTY;
    }

    let a_neutral = NEUTRAL_COLORS.iter().any(|n| color_a.contains(n));
    let b_neutral = NEUTRAL_COLORS.iter().any(|n| color_b.contains(n));
    if a_neutral && b_neutral {
        return NEUTRAL_BONUS;
    }

    0.0
}
