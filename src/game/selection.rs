//! Tile-click selection state machine
//!
//! A path is built by clicking king-adjacent tiles. Clicking the last tile
//! again, any tile already in the path, or a tile that is not adjacent ends
//! the path. A non-adjacent click also starts a new path at that tile.

use super::board::Coordinate;

/// Paths shorter than this are dropped without being validated.
pub const MIN_COMMIT_LENGTH: usize = 3;

/// An ordered chain of distinct, consecutively adjacent coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPath {
    coords: Vec<Coordinate>,
}

/// Why a list of coordinates is not a legal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainViolation {
    Empty,
    Duplicate(Coordinate),
    NotAdjacent { from: Coordinate, to: Coordinate },
}

impl SelectionPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path from raw coordinates, checking every chain rule.
    pub fn from_coords(coords: &[Coordinate]) -> Result<Self, ChainViolation> {
        check_chain(coords)?;
        Ok(Self {
            coords: coords.to_vec(),
        })
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.coords.last().copied()
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.coords.contains(&at)
    }

    /// Whether the path still satisfies the adjacency and uniqueness rules.
    pub fn is_valid(&self) -> bool {
        self.coords.is_empty() || check_chain(&self.coords).is_ok()
    }

    fn push(&mut self, at: Coordinate) {
        self.coords.push(at);
    }
}

/// Check that `coords` is non-empty, has no repeats, and every consecutive
/// pair is king-adjacent.
pub fn check_chain(coords: &[Coordinate]) -> Result<(), ChainViolation> {
    if coords.is_empty() {
        return Err(ChainViolation::Empty);
    }
    for (i, at) in coords.iter().enumerate() {
        if coords[..i].contains(at) {
            return Err(ChainViolation::Duplicate(*at));
        }
    }
    for pair in coords.windows(2) {
        if !pair[0].is_adjacent(&pair[1]) {
            return Err(ChainViolation::NotAdjacent {
                from: pair[0],
                to: pair[1],
            });
        }
    }
    Ok(())
}

/// What a click would do to the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Extend the path (or start one from idle).
    Append,
    /// End the path. `restart` is set when the click also starts a new path.
    Finish { restart: bool },
}

/// Result of applying a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Appended,
    /// The previous path ended and is handed back for commit.
    Finished { path: SelectionPath, restarted: bool },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionStateMachine {
    path: SelectionPath,
}

impl SelectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    /// Idle means no tile is selected.
    pub fn is_idle(&self) -> bool {
        self.path.is_empty()
    }

    /// The inactivity timer is armed whenever a path is being built.
    pub fn is_timer_armed(&self) -> bool {
        !self.is_idle()
    }

    /// Decide what a click at `at` would do, without changing anything.
    pub fn classify(&self, at: Coordinate) -> ClickAction {
        match self.path.last() {
            None => ClickAction::Append,
            Some(last) if at == last || self.path.contains(at) => {
                ClickAction::Finish { restart: false }
            }
            Some(last) if !last.is_adjacent(&at) => ClickAction::Finish { restart: true },
            Some(_) => ClickAction::Append,
        }
    }

    /// Apply a click.
    pub fn click(&mut self, at: Coordinate) -> Transition {
        match self.classify(at) {
            ClickAction::Append => {
                self.path.push(at);
                log::trace!("selection extended to {} tiles", self.path.len());
                Transition::Appended
            }
            ClickAction::Finish { restart } => {
                let path = self.take_path();
                if restart {
                    self.path.push(at);
                }
                Transition::Finished {
                    path,
                    restarted: restart,
                }
            }
        }
    }

    /// Hand back the current path and return to idle.
    pub fn take_path(&mut self) -> SelectionPath {
        std::mem::take(&mut self.path)
    }

    /// Drop the current path.
    pub fn clear(&mut self) {
        self.path = SelectionPath::new();
    }

    /// Replace the current path with a single tile.
    pub fn start_at(&mut self, at: Coordinate) {
        self.clear();
        self.path.push(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col).unwrap()
    }

    fn build(machine: &mut SelectionStateMachine, coords: &[(usize, usize)]) {
        for &(r, c) in coords {
            assert_eq!(machine.click(at(r, c)), Transition::Appended);
        }
    }

    #[test]
    fn test_start_at_replaces_path() {
        let mut machine = SelectionStateMachine::new();
        build(&mut machine, &[(0, 0), (0, 1)]);
        machine.start_at(at(4, 2));
        assert_eq!(machine.path().coords(), &[at(4, 2)]);
        assert!(machine.is_timer_armed());
    }

    #[test]
    fn test_idle_click_starts_path() {
        let mut machine = SelectionStateMachine::new();
        assert!(machine.is_idle());
        assert!(!machine.is_timer_armed());
        assert_eq!(machine.click(at(4, 4)), Transition::Appended);
        assert_eq!(machine.path().coords(), &[at(4, 4)]);
        assert!(machine.is_timer_armed());
    }

    #[test]
    fn test_adjacent_clicks_extend() {
        let mut machine = SelectionStateMachine::new();
        build(&mut machine, &[(0, 0), (1, 1), (2, 1), (2, 2)]);
        assert_eq!(machine.path().len(), 4);
        assert!(machine.path().is_valid());
    }

    #[test]
    fn test_clicking_last_tile_finishes_without_restart() {
        let mut machine = SelectionStateMachine::new();
        build(&mut machine, &[(0, 0), (0, 1), (0, 2)]);

        match machine.click(at(0, 2)) {
            Transition::Finished { path, restarted } => {
                assert_eq!(path.len(), 3);
                assert!(!restarted);
            }
            other => panic!("Expected Finished, got {:?}", other),
        }
        assert!(machine.is_idle());
    }

    #[test]
    fn test_clicking_selected_tile_finishes_without_restart() {
        let mut machine = SelectionStateMachine::new();
        build(&mut machine, &[(0, 0), (0, 1), (1, 1)]);

        assert_eq!(
            machine.classify(at(0, 1)),
            ClickAction::Finish { restart: false }
        );
        let transition = machine.click(at(0, 1));
        assert!(matches!(transition, Transition::Finished { restarted: false, .. }));
        assert!(machine.is_idle());
    }

    #[test]
    fn test_non_adjacent_click_restarts_path() {
        let mut machine = SelectionStateMachine::new();
        build(&mut machine, &[(0, 0), (0, 1)]);

        match machine.click(at(5, 5)) {
            Transition::Finished { path, restarted } => {
                assert_eq!(path.coords(), &[at(0, 0), at(0, 1)]);
                assert!(restarted);
            }
            other => panic!("Expected Finished, got {:?}", other),
        }
        assert_eq!(machine.path().coords(), &[at(5, 5)]);
    }

    #[test]
    fn test_classify_does_not_mutate() {
        let mut machine = SelectionStateMachine::new();
        build(&mut machine, &[(3, 3)]);
        assert_eq!(machine.classify(at(7, 7)), ClickAction::Finish { restart: true });
        assert_eq!(machine.classify(at(3, 4)), ClickAction::Append);
        assert_eq!(machine.path().len(), 1);
    }

    #[test]
    fn test_take_and_clear() {
        let mut machine = SelectionStateMachine::new();
        build(&mut machine, &[(1, 1), (1, 2)]);
        let path = machine.take_path();
        assert_eq!(path.len(), 2);
        assert!(machine.is_idle());

        build(&mut machine, &[(6, 6)]);
        machine.clear();
        assert!(machine.is_idle());
    }

    #[test]
    fn test_check_chain() {
        assert_eq!(check_chain(&[]), Err(ChainViolation::Empty));
        assert!(check_chain(&[at(2, 2)]).is_ok());
        assert_eq!(
            check_chain(&[at(0, 0), at(0, 1), at(0, 0)]),
            Err(ChainViolation::Duplicate(at(0, 0)))
        );
        assert_eq!(
            check_chain(&[at(0, 0), at(0, 2)]),
            Err(ChainViolation::NotAdjacent {
                from: at(0, 0),
                to: at(0, 2)
            })
        );
        assert!(SelectionPath::from_coords(&[at(0, 0), at(1, 1), at(2, 0)]).is_ok());
    }
}
