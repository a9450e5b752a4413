//! Letter tables: draw frequencies, point values, and the rare-letter tracker

use once_cell::sync::Lazy;

/// English letter frequencies (percentages * 100 for integer weights).
/// The weights sum to exactly 10_000.
const LETTER_WEIGHTS: [(char, u32); 26] = [
    ('E', 1270),
    ('T', 910),
    ('A', 820),
    ('O', 750),
    ('I', 700),
    ('N', 674),
    ('S', 632),
    ('H', 609),
    ('R', 598),
    ('D', 425),
    ('L', 402),
    ('C', 278),
    ('U', 275),
    ('M', 240),
    ('W', 236),
    ('F', 222),
    ('G', 201),
    ('Y', 197),
    ('P', 192),
    ('B', 149),
    ('V', 97),
    ('K', 77),
    ('J', 15),
    ('X', 15),
    ('Q', 9),
    ('Z', 7),
];

/// Cumulative upper bounds for each letter bucket, built once.
static CUMULATIVE_WEIGHTS: Lazy<Vec<(char, u32)>> = Lazy::new(|| {
    let mut running = 0;
    LETTER_WEIGHTS
        .iter()
        .map(|&(c, w)| {
            running += w;
            (c, running)
        })
        .collect()
});

/// Letters whose on-board density is capped.
pub const RARE_LETTERS: [char; 6] = ['Z', 'Q', 'X', 'J', 'K', 'V'];

/// Maximum number of distinct rare letters on the board at once.
pub const RARE_LETTER_CAP: usize = 2;

/// Non-rare letters drawn uniformly once the rare cap is reached.
pub const COMMON_LETTERS: [char; 20] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'L', 'M', 'N', 'O', 'P', 'R', 'S', 'T', 'U',
    'W', 'Y',
];

/// Letters used when the anti-clustering retry budget runs out.
pub const FALLBACK_LETTERS: [char; 10] = ['E', 'T', 'A', 'O', 'I', 'N', 'S', 'R', 'H', 'L'];

/// Letter returned when a draw falls past every bucket.
const MOST_FREQUENT_LETTER: char = 'E';

/// Map a uniform draw in `[0, 1)` to a letter by English frequency.
///
/// Deterministic in `draw`. Anything that lands past the last bucket
/// (rounding, or a draw of exactly 1.0) yields 'E'.
pub fn letter_for_draw(draw: f64) -> char {
    let total = CUMULATIVE_WEIGHTS.last().map(|&(_, w)| w).unwrap_or(0);
    let target = draw * f64::from(total);

    for &(letter, upper) in CUMULATIVE_WEIGHTS.iter() {
        if target < f64::from(upper) {
            return letter;
        }
    }

    MOST_FREQUENT_LETTER
}

/// Whether `letter` belongs to the capped rare subset.
pub fn is_rare(letter: char) -> bool {
    RARE_LETTERS.contains(&letter)
}

/// Scrabble-style point value of a letter. Non-letters score 0.
pub fn letter_points(letter: char) -> u32 {
    match letter.to_ascii_uppercase() {
        'A' | 'E' | 'I' | 'L' | 'N' | 'O' | 'R' | 'S' | 'T' | 'U' => 1,
        'D' | 'G' => 2,
        'B' | 'C' | 'M' | 'P' => 3,
        'F' | 'H' | 'V' | 'W' | 'Y' => 4,
        'K' => 5,
        'J' | 'X' => 8,
        'Q' | 'Z' => 10,
        _ => 0,
    }
}

/// Tracks which rare letters currently sit on a session's board.
///
/// Owned by the session, so nothing leaks from one game into the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RareLetterTracker {
    present: Vec<char>,
}

impl RareLetterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the cap of distinct rare letters is reached.
    pub fn contains_at_cap(&self) -> bool {
        self.present.len() >= RARE_LETTER_CAP
    }

    /// Note that `letter` was placed on the board.
    ///
    /// Returns whether the letter is tracked afterwards. Non-rare letters are
    /// ignored, and a new rare letter is refused once the cap is reached.
    pub fn record(&mut self, letter: char) -> bool {
        if !is_rare(letter) {
            return false;
        }
        if self.present.contains(&letter) {
            return true;
        }
        if self.contains_at_cap() {
            log::warn!("rare letter {} refused, tracker already at cap", letter);
            return false;
        }
        self.present.push(letter);
        true
    }

    /// Forget `letter`. No-op if it is not rare or not tracked.
    pub fn release(&mut self, letter: char) {
        self.present.retain(|&c| c != letter);
    }

    pub fn reset(&mut self) {
        self.present.clear();
    }

    pub fn contains(&self, letter: char) -> bool {
        self.present.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }
}
