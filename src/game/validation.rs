//! Word validation for committed selections
//!
//! Checks in order:
//! - Dictionary is loaded
//! - Minimum length for the current level
//! - Dictionary presence

use super::dictionary::WordOracle;

/// Minimum word length for normal play
pub const MIN_WORD_LENGTH: usize = 3;

/// Minimum word length once the late levels are reached
pub const LATE_MIN_WORD_LENGTH: usize = 4;

/// First level that requires the longer minimum
pub const LATE_LEVEL: u32 = 40;

/// Result of word validation with specific error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Word is valid
    Valid,
    /// Word is shorter than the level allows
    TooShort { length: usize, minimum: usize },
    /// Word not found in dictionary
    NotInDictionary,
    /// Dictionary still loading; nothing can be judged yet
    DictionaryUnavailable,
}

impl ValidationResult {
    /// Returns true if the word is valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Returns a user-friendly message
    pub fn message(&self) -> String {
        match self {
            ValidationResult::Valid => "Valid word!".to_string(),
            ValidationResult::TooShort { length, minimum } => {
                format!("Too short ({} letters, need {}+)", length, minimum)
            }
            ValidationResult::NotInDictionary => "Not in dictionary".to_string(),
            ValidationResult::DictionaryUnavailable => "Dictionary still loading".to_string(),
        }
    }
}

/// Shortest word accepted at `level`.
pub fn minimum_word_length(level: u32) -> usize {
    if level >= LATE_LEVEL {
        LATE_MIN_WORD_LENGTH
    } else {
        MIN_WORD_LENGTH
    }
}

/// Validate a word for the given level against the oracle.
pub fn validate_word<O: WordOracle + ?Sized>(
    word: &str,
    level: u32,
    oracle: &O,
) -> ValidationResult {
    if !oracle.is_loaded() {
        return ValidationResult::DictionaryUnavailable;
    }

    let length = word.chars().count();
    let minimum = minimum_word_length(level);
    if length < minimum {
        return ValidationResult::TooShort { length, minimum };
    }

    if !oracle.contains(word) {
        return ValidationResult::NotInDictionary;
    }

    ValidationResult::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dictionary::Dictionary;

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["cat", "cats", "dog"])
    }

    #[test]
    fn test_valid_word() {
        assert_eq!(validate_word("CAT", 1, &dictionary()), ValidationResult::Valid);
        assert_eq!(validate_word("dog", 39, &dictionary()), ValidationResult::Valid);
    }

    #[test]
    fn test_minimum_length_by_level() {
        assert_eq!(minimum_word_length(1), 3);
        assert_eq!(minimum_word_length(39), 3);
        assert_eq!(minimum_word_length(40), 4);
        assert_eq!(
            validate_word("CAT", 40, &dictionary()),
            ValidationResult::TooShort {
                length: 3,
                minimum: 4
            }
        );
        assert_eq!(validate_word("CATS", 40, &dictionary()), ValidationResult::Valid);
    }

    #[test]
    fn test_not_in_dictionary() {
        assert_eq!(
            validate_word("TAC", 1, &dictionary()),
            ValidationResult::NotInDictionary
        );
    }

    #[test]
    fn test_unloaded_dictionary_is_distinct() {
        assert_eq!(
            validate_word("CAT", 1, &Dictionary::unloaded()),
            ValidationResult::DictionaryUnavailable
        );
    }

    #[test]
    fn test_message_format() {
        assert_eq!(ValidationResult::Valid.message(), "Valid word!");
        assert_eq!(
            ValidationResult::TooShort {
                length: 3,
                minimum: 4
            }
            .message(),
            "Too short (3 letters, need 4+)"
        );
        assert_eq!(
            ValidationResult::NotInDictionary.message(),
            "Not in dictionary"
        );
    }
}
