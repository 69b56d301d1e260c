//! Scoring module - line clears, drops, levels and gravity
//!
//! Rules:
//! - A clear of N lines awards `LINE_SCORES[N] * level * min(combo, 10)`.
//! - Combo counts consecutive clearing locks and is already incremented for
//!   the clear being scored, so the multiplier is at least 1.
//! - Soft drop: +1 per row moved. Hard drop: +2 per row travelled.
//! - Level is `floor(lines / 10) + start_level - 1`, never below 1.
//! - Gravity is `max(100, 1000 - (level - 1) * 80)` ms per row.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_MS_PER_LEVEL, HARD_DROP_POINTS_PER_ROW,
    LINES_PER_LEVEL, LINE_SCORES, MAX_COMBO_MULTIPLIER, SOFT_DROP_POINTS,
};

/// Score calculation result for one clearing lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points before multipliers.
    pub base: u32,
    /// Capped combo multiplier that was applied.
    pub combo_multiplier: u32,
    pub total: u32,
}

/// Combo multiplier, capped at 10.
pub fn combo_multiplier(combo: u32) -> u32 {
    combo.min(MAX_COMBO_MULTIPLIER)
}

/// Table points for a clear of `lines` rows.
///
/// More than four rows at once cannot come from a single piece; such clears
/// score as four.
pub fn base_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(4)]
}

/// Calculate the award for clearing `lines` rows at `level` with the given combo.
pub fn calculate_line_score(lines: usize, level: u32, combo: u32) -> ScoreResult {
    let base = base_line_score(lines);
    let combo_multiplier = combo_multiplier(combo);
    ScoreResult {
        base,
        combo_multiplier,
        total: base
            .saturating_mul(level)
            .saturating_mul(combo_multiplier),
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS_PER_ROW)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level for a cumulative line count and the configured starting level.
pub fn calculate_level(total_lines: u32, start_level: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + start_level)
        .saturating_sub(1)
        .max(1)
}

/// Get drop interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_sub(1).saturating_mul(DROP_MS_PER_LEVEL))
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_at_level_one() {
        assert_eq!(calculate_line_score(1, 1, 1).total, 40);
        assert_eq!(calculate_line_score(2, 1, 1).total, 100);
        assert_eq!(calculate_line_score(3, 1, 1).total, 300);
        assert_eq!(calculate_line_score(4, 1, 1).total, 1200);
    }

    #[test]
    fn test_tetris_at_level_two_first_combo() {
        let result = calculate_line_score(4, 2, 1);
        assert_eq!(result.base, 1200);
        assert_eq!(result.combo_multiplier, 1);
        assert_eq!(result.total, 2400);
    }

    #[test]
    fn test_combo_multiplier_caps_at_ten() {
        assert_eq!(combo_multiplier(3), 3);
        assert_eq!(combo_multiplier(10), 10);
        assert_eq!(combo_multiplier(57), 10);
        assert_eq!(calculate_line_score(1, 1, 25).total, 400);
    }

    #[test]
    fn test_oversized_clear_scores_as_four() {
        assert_eq!(base_line_score(6), 1200);
        assert_eq!(base_line_score(0), 0);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(1, false), 1);
        assert_eq!(calculate_drop_score(15, true), 30);
        assert_eq!(calculate_drop_score(0, true), 0);
    }

    #[test]
    fn test_level_formula() {
        assert_eq!(calculate_level(23, 3), 4);
        assert_eq!(calculate_level(0, 1), 1);
        assert_eq!(calculate_level(10, 1), 1);
        assert_eq!(calculate_level(20, 1), 2);
        assert_eq!(calculate_level(149, 1), 14);
    }

    #[test]
    fn test_level_never_below_one() {
        assert_eq!(calculate_level(5, 1), 1);
    }

    #[test]
    fn test_level_steps_back_below_ten_lines() {
        // The first clear applies the formula, which is one below the start level.
        assert_eq!(calculate_level(2, 5), 4);
    }

    #[test]
    fn test_drop_interval() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(4), 760);
        assert_eq!(drop_interval_ms(12), 120);
        assert_eq!(drop_interval_ms(13), 100);
        assert_eq!(drop_interval_ms(40), 100);
    }
}
