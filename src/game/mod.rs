//! Game logic: letter tables, board generation and mutation, tile selection,
//! word validation, scoring and levels
//!
//! Everything here is pure or owns its own state; nothing touches I/O or
//! wall-clock time. The session in [`crate::app`] wires the pieces together.

pub mod board;
pub mod dictionary;
pub mod generator;
pub mod letters;
pub mod scoring;
pub mod selection;
pub mod validation;

pub use board::{Board, Cell, Coordinate, BOARD_SIZE};
pub use dictionary::{Dictionary, DictionaryError, WordOracle};
pub use generator::BoardGenerator;
pub use letters::RareLetterTracker;
pub use scoring::LevelProgression;
pub use selection::{SelectionPath, SelectionStateMachine};
pub use validation::ValidationResult;
