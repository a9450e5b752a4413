//! Match session state and the events it emits

pub mod events;
pub mod state;

pub use events::{FinalStats, GameEvent, RejectReason};
pub use state::{MatchSession, PathError, SessionConfig};
