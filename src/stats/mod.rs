//! Statistics: the end-of-match sink seam and lifetime aggregates
//!
//! This module provides:
//! - `StatsSink`, the write-only destination for finished matches
//! - Lifetime stats tracking (matches played, scores, words, levels)
//! - Deterministic rebuild from stored match history

use crate::app::FinalStats;
use std::convert::Infallible;

/// Where a host forwards the summary of a finished match.
///
/// The engine never calls this itself; retries, auth and transport belong
/// to the implementation.
pub trait StatsSink {
    type Error;

    fn submit(&mut self, stats: &FinalStats) -> Result<(), Self::Error>;
}

/// A finished match as kept in history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Unique match ID (insertion order for deterministic replay)
    pub match_id: i64,
    pub stats: FinalStats,
    /// Unix timestamp (milliseconds) when the match was recorded
    pub recorded_at: i64,
}

/// Lifetime statistics for the local player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStats {
    /// Total matches finished
    pub matches_played: u32,
    /// Total points scored across all matches
    pub total_points: u64,
    /// Best single-match score
    pub best_score: u64,
    /// Highest level reached in any match
    pub highest_level: u32,
    /// Total words found across all matches
    pub words_found: u32,
    /// Longest word found (by character count)
    pub longest_word: String,
}

impl PlayerStats {
    /// Average score per match
    pub fn average_score(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            self.total_points as f64 / self.matches_played as f64
        }
    }
}

/// Accumulates lifetime stats from finished matches
#[derive(Debug, Default)]
pub struct StatsTracker {
    stats: PlayerStats,
}

impl StatsTracker {
    pub fn new() -> Self {
        StatsTracker::default()
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Fold one finished match into the totals
    pub fn process_match(&mut self, result: &FinalStats) {
        let stats = &mut self.stats;
        stats.matches_played += 1;
        stats.total_points += result.final_score;
        stats.best_score = stats.best_score.max(result.final_score);
        stats.highest_level = stats.highest_level.max(result.highest_level);
        stats.words_found += result.word_count() as u32;
        if let Some(word) = result.longest_word() {
            if word.len() > stats.longest_word.len() {
                stats.longest_word = word.to_string();
            }
        }
    }

    /// Rebuild stats from a list of match records
    ///
    /// Records are sorted by match_id so the result does not depend on the
    /// order they were loaded in.
    pub fn rebuild_from_matches(&mut self, matches: &mut [MatchRecord]) {
        self.stats = PlayerStats::default();
        matches.sort_by_key(|m| m.match_id);
        for record in matches.iter() {
            self.process_match(&record.stats);
        }
    }
}

impl StatsSink for StatsTracker {
    type Error = Infallible;

    fn submit(&mut self, stats: &FinalStats) -> Result<(), Self::Error> {
        self.process_match(stats);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u64, words: &[&str], level: u32) -> FinalStats {
        FinalStats {
            final_score: score,
            found_words: words.iter().map(|w| w.to_string()).collect(),
            highest_level: level,
        }
    }

    #[test]
    fn test_new_stats_are_empty() {
        let tracker = StatsTracker::new();
        assert_eq!(tracker.stats(), &PlayerStats::default());
        assert_eq!(tracker.stats().average_score(), 0.0);
    }

    #[test]
    fn test_process_match() {
        let mut tracker = StatsTracker::new();
        tracker.process_match(&result(40, &["CAT", "STONE"], 2));
        tracker.process_match(&result(20, &["DOG"], 1));

        let stats = tracker.stats();
        assert_eq!(stats.matches_played, 2);
        assert_eq!(stats.total_points, 60);
        assert_eq!(stats.best_score, 40);
        assert_eq!(stats.highest_level, 2);
        assert_eq!(stats.words_found, 3);
        assert_eq!(stats.longest_word, "STONE");
        assert_eq!(stats.average_score(), 30.0);
    }

    #[test]
    fn test_tracker_is_a_sink() {
        let mut tracker = StatsTracker::new();
        assert!(tracker.submit(&result(5, &["CAT"], 1)).is_ok());
        assert_eq!(tracker.stats().matches_played, 1);
    }

    #[test]
    fn test_rebuild_is_order_independent() {
        let mut matches = vec![
            MatchRecord {
                match_id: 2,
                stats: result(10, &["TREE"], 1),
                recorded_at: 200,
            },
            MatchRecord {
                match_id: 1,
                stats: result(10, &["BARN"], 1),
                recorded_at: 100,
            },
        ];
        let mut tracker = StatsTracker::new();
        tracker.process_match(&result(99, &[], 9));
        tracker.rebuild_from_matches(&mut matches);

        // Equal lengths keep the earlier match's word.
        assert_eq!(tracker.stats().longest_word, "BARN");
        assert_eq!(tracker.stats().matches_played, 2);
        assert_eq!(tracker.stats().best_score, 10);
    }
}
