//! Events emitted by a match session for the host to consume

use crate::game::validation::ValidationResult;
use crate::game::Board;

/// Categorized reasons for rejected words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TooShort { length: usize, minimum: usize },
    NotInDictionary,
    DictionaryUnavailable,
}

impl RejectReason {
    /// Map a failed validation to a rejection. `Valid` has no rejection.
    pub fn from_validation(result: ValidationResult) -> Option<Self> {
        match result {
            ValidationResult::Valid => None,
            ValidationResult::TooShort { length, minimum } => {
                Some(RejectReason::TooShort { length, minimum })
            }
            ValidationResult::NotInDictionary => Some(RejectReason::NotInDictionary),
            ValidationResult::DictionaryUnavailable => Some(RejectReason::DictionaryUnavailable),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::TooShort { .. } => "Too Short",
            RejectReason::NotInDictionary => "Not In Dictionary",
            RejectReason::DictionaryUnavailable => "Dictionary Unavailable",
        }
    }

    /// Short feedback line for the player
    pub fn message(&self) -> String {
        match self {
            RejectReason::TooShort { length, minimum } => {
                format!("Too short ({} letters, need {}+)", length, minimum)
            }
            RejectReason::NotInDictionary => "NOPE".to_string(),
            RejectReason::DictionaryUnavailable => "Dictionary still loading".to_string(),
        }
    }
}

/// End-of-match summary handed to the stats sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalStats {
    pub final_score: u64,
    /// Accepted words in the order they were found (duplicates kept)
    pub found_words: Vec<String>,
    pub highest_level: u32,
}

impl FinalStats {
    pub fn word_count(&self) -> usize {
        self.found_words.len()
    }

    /// Longest word found (by letter count); the earliest wins ties
    pub fn longest_word(&self) -> Option<&str> {
        self.found_words
            .iter()
            .fold(None, |best: Option<&String>, w| match best {
                Some(b) if b.len() >= w.len() => Some(b),
                _ => Some(w),
            })
            .map(String::as_str)
    }
}

/// Everything a host needs to react to, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    WordAccepted {
        word: String,
        points: u32,
        /// Seconds of bonus earned (before clamping to the timer ceiling)
        time_bonus: u32,
    },
    WordRejected {
        word: String,
        reason: RejectReason,
    },
    LevelUp {
        new_level: u32,
    },
    BoardChanged {
        board: Board,
    },
    SessionTerminal {
        stats: FinalStats,
    },
}
