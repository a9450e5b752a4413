//! Word-membership oracle
//!
//! The engine only needs to ask "is this a word?". A dictionary may still be
//! loading when play starts, so "not loaded" is reported separately from
//! "not a word".

use std::collections::HashSet;
use std::path::Path;

/// Errors from loading a word list.
#[derive(Debug)]
pub enum DictionaryError {
    /// The word list could not be read
    Io(std::io::Error),
    /// The word list contained no usable words
    Empty,
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryError::Io(e) => write!(f, "could not read word list: {}", e),
            DictionaryError::Empty => write!(f, "word list contains no words"),
        }
    }
}

impl std::error::Error for DictionaryError {}

impl From<std::io::Error> for DictionaryError {
    fn from(e: std::io::Error) -> Self {
        DictionaryError::Io(e)
    }
}

/// Answers case-insensitive word-membership queries.
pub trait WordOracle {
    /// Whether the word set is ready to answer queries.
    fn is_loaded(&self) -> bool;

    /// Whether `word` is a valid word. Meaningless until loaded.
    fn contains(&self, word: &str) -> bool;
}

/// A hash-set backed word list.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Option<HashSet<String>>,
}

impl Dictionary {
    /// A dictionary that has not been loaded yet.
    pub fn unloaded() -> Self {
        Self { words: None }
    }

    /// Build a loaded dictionary from an iterator of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::unloaded();
        dictionary.load_words(words);
        dictionary
    }

    /// Read a newline-separated word list from disk.
    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let text = std::fs::read_to_string(path)?;
        let dictionary = Self::from_words(text.lines());
        if dictionary.word_count() == 0 {
            return Err(DictionaryError::Empty);
        }
        log::debug!(
            "loaded {} words from {}",
            dictionary.word_count(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Replace the contents with `words` and mark the dictionary loaded.
    /// Blank lines and entries with non-alphabetic characters are skipped.
    pub fn load_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();
        self.words = Some(set);
    }

    /// Number of words, 0 while unloaded.
    pub fn word_count(&self) -> usize {
        self.words.as_ref().map_or(0, HashSet::len)
    }
}

impl WordOracle for Dictionary {
    fn is_loaded(&self) -> bool {
        self.words.is_some()
    }

    fn contains(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.words
            .as_ref()
            .is_some_and(|words| words.contains(lower.as_str()))
    }
}
