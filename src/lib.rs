//! Wordfall - find words in a falling 8x8 letter grid
//!
//! The engine is deterministic and free of I/O: hosts feed a
//! [`app::MatchSession`] tile clicks and clock ticks, then drain its events.
//! Finished matches go to a [`stats::StatsSink`], such as the SQLite-backed
//! [`storage::Storage`].

pub mod app;
pub mod game;
pub mod stats;
pub mod storage;
