//! Match session state management
//!
//! A [`MatchSession`] owns one game: the board, its rare-letter tracker, the
//! tile selection, score, level, clock and found words. The host feeds it
//! clicks and clock ticks and drains the resulting [`GameEvent`]s.

use super::events::{FinalStats, GameEvent, RejectReason};
use crate::game::letters::is_rare;
use crate::game::selection::{ChainViolation, ClickAction, Transition, MIN_COMMIT_LENGTH};
use crate::game::validation::validate_word;
use crate::game::{
    scoring, Board, BoardGenerator, Coordinate, LevelProgression, RareLetterTracker,
    SelectionPath, SelectionStateMachine, WordOracle,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default match length in milliseconds; also the clock's ceiling
pub const DEFAULT_MATCH_DURATION_MS: u64 = 90_000;

/// Default idle time before an in-progress path commits itself
pub const DEFAULT_INACTIVITY_TIMEOUT_MS: u64 = 1_500;

/// Below this share of filled cells the board counts as exhausted
pub const DEFAULT_TERMINAL_FILL_RATIO: f64 = 0.10;

/// Per-session settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub initial_time_ms: u64,
    /// How long the host should wait after a click before calling
    /// [`MatchSession::on_inactivity_timeout`]
    pub inactivity_timeout_ms: u64,
    pub terminal_fill_ratio: f64,
    /// Fixed seed for reproducible boards; fresh entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_time_ms: DEFAULT_MATCH_DURATION_MS,
            inactivity_timeout_ms: DEFAULT_INACTIVITY_TIMEOUT_MS,
            terminal_fill_ratio: DEFAULT_TERMINAL_FILL_RATIO,
            seed: None,
        }
    }
}

/// A host-supplied path that breaks the selection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    Empty,
    Duplicate(Coordinate),
    NotAdjacent { from: Coordinate, to: Coordinate },
    OutOfBounds(Coordinate),
    EmptyCell(Coordinate),
    SessionOver,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::Empty => write!(f, "path is empty"),
            PathError::Duplicate(at) => write!(f, "tile ({}, {}) selected twice", at.row, at.col),
            PathError::NotAdjacent { from, to } => write!(
                f,
                "tile ({}, {}) is not adjacent to ({}, {})",
                to.row, to.col, from.row, from.col
            ),
            PathError::OutOfBounds(at) => {
                write!(f, "tile ({}, {}) is off the board", at.row, at.col)
            }
            PathError::EmptyCell(at) => write!(f, "tile ({}, {}) has no letter", at.row, at.col),
            PathError::SessionOver => write!(f, "session is over"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<ChainViolation> for PathError {
    fn from(v: ChainViolation) -> Self {
        match v {
            ChainViolation::Empty => PathError::Empty,
            ChainViolation::Duplicate(at) => PathError::Duplicate(at),
            ChainViolation::NotAdjacent { from, to } => PathError::NotAdjacent { from, to },
        }
    }
}

/// One game from first click to final score.
pub struct MatchSession<O: WordOracle> {
    config: SessionConfig,
    oracle: O,
    rng: StdRng,
    board: Board,
    rare_letters: RareLetterTracker,
    selection: SelectionStateMachine,
    progression: LevelProgression,
    score: u64,
    time_remaining_ms: u64,
    found_words: Vec<String>,
    /// Set once the board has held letters, arming the exhaustion check
    board_was_populated: bool,
    terminal: bool,
    events: Vec<GameEvent>,
}

impl<O: WordOracle> MatchSession<O> {
    /// Start a session on a freshly generated board.
    pub fn new(oracle: O, config: SessionConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut rare_letters = RareLetterTracker::new();
        let board = BoardGenerator::generate_with_rng(&mut rng, &mut rare_letters);
        Self::assemble(oracle, config, rng, board, rare_letters)
    }

    /// Start a session on a prepared board (replays, puzzles, tests).
    ///
    /// The rare-letter tracker is rebuilt from the board in row-major order;
    /// rare letters beyond the cap are left untracked.
    pub fn with_board(oracle: O, config: SessionConfig, board: Board) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut rare_letters = RareLetterTracker::new();
        for (_, cell) in board.iter() {
            if let Some(letter) = cell {
                rare_letters.record(letter);
            }
        }
        Self::assemble(oracle, config, rng, board, rare_letters)
    }

    fn assemble(
        oracle: O,
        config: SessionConfig,
        rng: StdRng,
        board: Board,
        rare_letters: RareLetterTracker,
    ) -> Self {
        let board_was_populated = board.filled_count() > 0;
        let time_remaining_ms = config.initial_time_ms;
        Self {
            config,
            oracle,
            rng,
            board,
            rare_letters,
            selection: SelectionStateMachine::new(),
            progression: LevelProgression::new(),
            score: 0,
            time_remaining_ms,
            found_words: Vec::new(),
            board_was_populated,
            terminal: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rare_letters(&self) -> &RareLetterTracker {
        &self.rare_letters
    }

    pub fn selection(&self) -> &SelectionPath {
        self.selection.path()
    }

    /// Letters under the in-progress path, in order.
    pub fn current_word(&self) -> String {
        self.selection
            .path()
            .coords()
            .iter()
            .filter_map(|&at| self.board.get(at))
            .collect()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn time_remaining_ms(&self) -> u64 {
        self.time_remaining_ms
    }

    pub fn found_words(&self) -> &[String] {
        &self.found_words
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Mutable access for hosts that finish loading the word list later.
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    /// Whether the host should keep an inactivity timer running.
    pub fn inactivity_timer_armed(&self) -> bool {
        !self.terminal && self.selection.is_timer_armed()
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn final_stats(&self) -> FinalStats {
        FinalStats {
            final_score: self.score,
            found_words: self.found_words.clone(),
            highest_level: self.progression.level(),
        }
    }

    /// Handle a tile click.
    ///
    /// Clicks on empty or off-board cells, and any click once the session is
    /// over, are ignored.
    pub fn on_tile_click(&mut self, at: Coordinate) {
        if self.terminal {
            return;
        }
        if !at.in_bounds() || !self.board.is_filled(at) {
            log::trace!("ignoring click on empty tile ({}, {})", at.row, at.col);
            return;
        }

        if matches!(self.selection.classify(at), ClickAction::Finish { .. })
            && self.refuse_while_unloaded()
        {
            return;
        }

        if let Transition::Finished { path, restarted } = self.selection.click(at) {
            if !restarted {
                self.commit(path, None);
                return;
            }
            // The commit can move the clicked letter; restart wherever it lands.
            let landed = self.commit(path, Some(at));
            match landed {
                Some(to) if !self.terminal => self.selection.start_at(to),
                _ => self.selection.clear(),
            }
        }
    }

    /// The host's inactivity timer fired: commit whatever is selected.
    pub fn on_inactivity_timeout(&mut self) {
        if self.terminal || self.selection.is_idle() {
            return;
        }
        if self.refuse_while_unloaded() {
            return;
        }
        let path = self.selection.take_path();
        self.commit(path, None);
    }

    /// Drop the in-progress path without committing it.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Commit a whole path chosen outside the click state machine.
    ///
    /// A path that breaks the chain rules is refused with no change to the
    /// session. Any in-progress selection is discarded.
    pub fn submit_path(&mut self, coords: &[Coordinate]) -> Result<(), PathError> {
        if self.terminal {
            return Err(PathError::SessionOver);
        }
        if let Some(&at) = coords.iter().find(|at| !at.in_bounds()) {
            log::warn!("rejected submitted path: {}", PathError::OutOfBounds(at));
            return Err(PathError::OutOfBounds(at));
        }
        let path = SelectionPath::from_coords(coords).map_err(|v| {
            let err = PathError::from(v);
            log::warn!("rejected submitted path: {}", err);
            err
        })?;
        if let Some(&at) = coords.iter().find(|&&at| !self.board.is_filled(at)) {
            log::warn!("rejected submitted path: {}", PathError::EmptyCell(at));
            return Err(PathError::EmptyCell(at));
        }

        if path.len() >= MIN_COMMIT_LENGTH && !self.oracle.is_loaded() {
            self.reject(self.word_for(&path), RejectReason::DictionaryUnavailable);
            return Ok(());
        }

        self.selection.clear();
        self.commit(path, None);
        Ok(())
    }

    /// Advance the match clock by `elapsed_ms`.
    pub fn on_tick(&mut self, elapsed_ms: u64) {
        if self.terminal {
            return;
        }
        self.time_remaining_ms = self.time_remaining_ms.saturating_sub(elapsed_ms);

        // Catch up on any level thresholds a single word jumped past.
        self.check_level_up();

        if self.time_remaining_ms == 0 {
            log::debug!("match clock ran out");
            self.finish();
        } else {
            self.check_board_exhausted();
        }
    }

    /// Replace every cell with a freshly generated board.
    pub fn reshuffle(&mut self) {
        if self.terminal {
            return;
        }
        self.selection.clear();
        self.rare_letters.reset();
        self.board = BoardGenerator::generate_with_rng(&mut self.rng, &mut self.rare_letters);
        self.board_was_populated = true;
        log::debug!("board reshuffled");
        self.events.push(GameEvent::BoardChanged {
            board: self.board.clone(),
        });
    }

    /// With the dictionary still loading, a commit of a real word is refused
    /// and the path is kept. Returns true if that happened.
    fn refuse_while_unloaded(&mut self) -> bool {
        if self.oracle.is_loaded() || self.selection.path().len() < MIN_COMMIT_LENGTH {
            return false;
        }
        let word = self.current_word();
        self.reject(word, RejectReason::DictionaryUnavailable);
        true
    }

    fn word_for(&self, path: &SelectionPath) -> String {
        path.coords()
            .iter()
            .filter_map(|&at| self.board.get(at))
            .collect()
    }

    /// Commit `path`, returning where the letter at `follow` sits afterwards.
    fn commit(&mut self, path: SelectionPath, follow: Option<Coordinate>) -> Option<Coordinate> {
        if path.len() < MIN_COMMIT_LENGTH {
            log::trace!("discarding {}-tile path", path.len());
            return follow;
        }
        debug_assert!(path.is_valid(), "selection produced an invalid path");
        if !path.is_valid() || path.coords().iter().any(|&at| !self.board.is_filled(at)) {
            log::warn!("discarding path that no longer matches the board");
            return follow;
        }

        let word = self.word_for(&path);
        match RejectReason::from_validation(validate_word(&word, self.level(), &self.oracle)) {
            None => self.accept(word, &path, follow),
            Some(reason) => {
                self.reject(word, reason);
                follow
            }
        }
    }

    fn reject(&mut self, word: String, reason: RejectReason) {
        log::debug!("rejected {}: {}", word, reason.label());
        self.events.push(GameEvent::WordRejected { word, reason });
    }

    fn accept(
        &mut self,
        word: String,
        path: &SelectionPath,
        follow: Option<Coordinate>,
    ) -> Option<Coordinate> {
        let level = self.level();
        let points = scoring::score(&word, level);
        let time_bonus = scoring::time_bonus(word.chars().count(), level);

        self.found_words.push(word.clone());
        self.score += u64::from(points);
        self.time_remaining_ms = self
            .time_remaining_ms
            .saturating_add(u64::from(time_bonus) * 1_000)
            .min(self.config.initial_time_ms);
        log::debug!("accepted {} for {} points (+{}s)", word, points, time_bonus);
        self.events.push(GameEvent::WordAccepted {
            word,
            points,
            time_bonus,
        });
        self.check_level_up();

        let mut consumed = Vec::with_capacity(path.len());
        for &at in path.coords() {
            if let Some(letter) = self.board.get(at) {
                consumed.push(letter);
                self.board.set(at, None);
            }
        }
        for letter in consumed {
            if is_rare(letter) && !self.board.contains_letter(letter) {
                self.rare_letters.release(letter);
            }
        }

        let (cleared, landed) = match follow {
            Some(at) => self.board.settle_following(at),
            None => (self.board.settle(), None),
        };
        if !cleared.is_empty() {
            log::debug!("constricted around cleared columns {:?}", cleared);
        }
        self.events.push(GameEvent::BoardChanged {
            board: self.board.clone(),
        });

        self.check_board_exhausted();
        landed
    }

    fn check_level_up(&mut self) {
        if let Some(new_level) = self.progression.evaluate(self.score) {
            log::debug!("level up: {}", new_level);
            self.events.push(GameEvent::LevelUp { new_level });
        }
    }

    fn check_board_exhausted(&mut self) {
        if self.board.filled_count() > 0 {
            self.board_was_populated = true;
        }
        if self.board_was_populated && self.board.filled_ratio() < self.config.terminal_fill_ratio {
            log::debug!("board exhausted");
            self.finish();
        }
    }

    fn finish(&mut self) {
        if self.terminal {
            return;
        }
        self.terminal = true;
        self.selection.clear();
        let stats = self.final_stats();
        log::info!(
            "match over: {} points, {} words, level {}",
            stats.final_score,
            stats.word_count(),
            stats.highest_level
        );
        self.events.push(GameEvent::SessionTerminal { stats });
    }
}
