//! Scoring module - line-clear, combo and hard-drop points
//!
//! Rules:
//! - Clearing `n` rows with combo index `c` scores `n * 100 + c * 50`.
//! - The combo index is `-1` outside a chain; the first clear of a chain lifts it
//!   to `0`, so the bonus starts at zero.
//! - A hard drop earns 2 points per row fallen.
//! - Level is `1 + score / 500`.

use crate::types::{COMBO_POINTS, HARD_DROP_POINTS_PER_ROW, LINE_CLEAR_POINTS};

pub use crate::types::{fall_interval_ms, level_for_score};

/// Score breakdown for one clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    /// Row points, `lines * 100`.
    pub base: u32,
    /// Combo bonus added on top of `base`.
    pub combo_bonus: u32,
    pub total: u32,
}

/// Combo bonus for a combo index (negative indices earn nothing)
pub fn combo_bonus(combo: i32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_POINTS.saturating_mul(combo as u32)
}

/// Full breakdown for clearing `lines` rows at combo index `combo`
pub fn clear_score(lines: u32, combo: i32) -> ClearScore {
    if lines == 0 {
        return ClearScore::default();
    }
    let base = LINE_CLEAR_POINTS.saturating_mul(lines);
    let combo_bonus = combo_bonus(combo);
    ClearScore {
        base,
        combo_bonus,
        total: base.saturating_add(combo_bonus),
    }
}

/// Points for a hard drop of `rows` rows
pub fn hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_bonus() {
        assert_eq!(combo_bonus(-1), 0);
        assert_eq!(combo_bonus(0), 0);
        assert_eq!(combo_bonus(1), 50);
        assert_eq!(combo_bonus(3), 150);
    }

    #[test]
    fn test_clear_score() {
        assert_eq!(clear_score(1, 0).total, 100);
        assert_eq!(clear_score(2, 0).total, 200);
        assert_eq!(clear_score(4, 0).total, 400);

        let s = clear_score(3, 2);
        assert_eq!(s.base, 300);
        assert_eq!(s.combo_bonus, 100);
        assert_eq!(s.total, 400);
    }

    #[test]
    fn test_no_lines_no_points() {
        assert_eq!(clear_score(0, 5), ClearScore::default());
    }

    #[test]
    fn test_hard_drop_score() {
        assert_eq!(hard_drop_score(0), 0);
        assert_eq!(hard_drop_score(16), 32);
    }

    #[test]
    fn test_level_and_interval_reexports() {
        assert_eq!(level_for_score(1_000), 3);
        assert_eq!(fall_interval_ms(3), 260);
    }
}
