//! Word scoring, timer bonuses, and level progression

use super::letters::letter_points;

/// Points needed to leave level 1.
const LEVEL_BASE_POINTS: f64 = 25.0;

/// Growth of the per-level requirement.
const LEVEL_GROWTH: f64 = 1.15;

/// Sum of the letter values in `word`.
pub fn letter_score(word: &str) -> u32 {
    word.chars().map(letter_points).sum()
}

/// Letter score plus a 10% bonus per level above 1, rounded down.
pub fn score(word: &str, level: u32) -> u32 {
    let base = letter_score(word);
    let bonus = u64::from(base) * u64::from(level.saturating_sub(1)) / 10;
    base.saturating_add(u32::try_from(bonus).unwrap_or(u32::MAX))
}

/// Seconds of base time bonus by word length.
fn base_time_bonus(length: usize) -> u32 {
    match length {
        3 => 1,
        4 => 2,
        5 => 3,
        6 => 4,
        7 => 5,
        8 => 6,
        _ => 0,
    }
}

/// How much higher levels cut into the time bonus.
fn time_bonus_reduction(level: u32) -> u32 {
    (level / 5).min(4)
}

/// Seconds added to the clock for a word of `length` letters at `level`.
pub fn time_bonus(length: usize, level: u32) -> u32 {
    base_time_bonus(length).saturating_sub(time_bonus_reduction(level))
}

/// Points required to advance from level `n` to `n + 1`.
pub fn points_for_level(n: u32) -> u64 {
    let exponent = n.saturating_sub(1) as i32;
    (LEVEL_BASE_POINTS * LEVEL_GROWTH.powi(exponent)).floor() as u64
}

/// Total points needed to reach level `level` from level 1.
pub fn cumulative_points(level: u32) -> u64 {
    (1..level).map(points_for_level).sum()
}

/// Tracks the current level against the threshold curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelProgression {
    level: u32,
}

impl Default for LevelProgression {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelProgression {
    pub fn new() -> Self {
        Self { level: 1 }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Score at which the next level-up fires.
    pub fn next_threshold(&self) -> u64 {
        cumulative_points(self.level + 1)
    }

    /// Advance at most one level if `score` has reached the next threshold.
    ///
    /// Returns the new level on a level-up. A score that clears several
    /// thresholds at once takes one call per level.
    pub fn evaluate(&mut self, score: u64) -> Option<u32> {
        if score >= self.next_threshold() {
            self.level += 1;
            Some(self.level)
        } else {
            None
        }
    }
}
