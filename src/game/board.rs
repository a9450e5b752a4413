//! The 8x8 letter grid and its mutation pipeline
//!
//! Coordinates are `(row, col)` with row 0 at the top. Gravity pulls letters
//! toward row 7. When a column empties out completely, the columns between it
//! and the nearer edge slide one step inward ("constriction"). None of these
//! operations ever changes the grid's dimensions.

use std::fmt;

/// Rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// A cell holds an uppercase letter or nothing.
pub type Cell = Option<char>;

/// A position on the board. `Coordinate::new` checks bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Create a coordinate, or `None` if it falls outside the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Whether the coordinate lies on the board. Only false for values
    /// built directly from the public fields.
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// King-adjacent: distinct, and both row and column differ by at most one.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        self != other && dr <= 1 && dc <= 1
    }

    /// The up-to-8 in-bounds neighbours of this coordinate.
    pub fn neighbors(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (-1i32..=1)
            .flat_map(|dr| (-1i32..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter_map(move |(dr, dc)| {
                let row = usize::try_from(self.row as i32 + dr).ok()?;
                let col = usize::try_from(self.col as i32 + dc).ok()?;
                Coordinate::new(row, col)
            })
    }
}

/// The letter grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An entirely empty board.
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Build a board from up to 8 row strings, `.` or space meaning empty.
    /// Missing rows and columns stay empty; extra ones are ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (r, line) in rows.iter().take(BOARD_SIZE).enumerate() {
            for (c, ch) in line.chars().take(BOARD_SIZE).enumerate() {
                if ch.is_ascii_alphabetic() {
                    board.cells[r][c] = Some(ch.to_ascii_uppercase());
                }
            }
        }
        board
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        BOARD_SIZE
    }

    pub fn get(&self, at: Coordinate) -> Cell {
        self.cells[at.row][at.col]
    }

    pub fn set(&mut self, at: Coordinate, cell: Cell) {
        self.cells[at.row][at.col] = cell;
    }

    pub fn is_filled(&self, at: Coordinate) -> bool {
        self.get(at).is_some()
    }

    /// Iterate over every cell with its coordinate, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, &cell)| (Coordinate { row, col }, cell))
        })
    }

    /// Letters in one row, for hosts that draw the grid.
    pub fn row(&self, row: usize) -> &[Cell; BOARD_SIZE] {
        &self.cells[row]
    }

    pub fn filled_count(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.is_some()).count()
    }

    /// Share of the 64 cells currently holding a letter.
    pub fn filled_ratio(&self) -> f64 {
        self.filled_count() as f64 / (BOARD_SIZE * BOARD_SIZE) as f64
    }

    pub fn contains_letter(&self, letter: char) -> bool {
        self.iter().any(|(_, cell)| cell == Some(letter))
    }

    /// All non-empty letters, sorted. Handy for comparing letter multisets.
    pub fn letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self.iter().filter_map(|(_, cell)| cell).collect();
        letters.sort_unstable();
        letters
    }

    /// Return a copy with every column compacted toward the bottom.
    pub fn fall(&self) -> Board {
        let mut next = self.clone();
        next.apply_gravity();
        next
    }

    /// Compact each column toward row 7, keeping the letters' relative order.
    pub fn apply_gravity(&mut self) {
        for col in 0..BOARD_SIZE {
            let mut write = BOARD_SIZE;
            for row in (0..BOARD_SIZE).rev() {
                if let Some(letter) = self.cells[row][col] {
                    write -= 1;
                    self.cells[row][col] = None;
                    self.cells[write][col] = Some(letter);
                }
            }
        }
    }

    pub fn is_column_empty(&self, col: usize) -> bool {
        self.cells.iter().all(|line| line[col].is_none())
    }

    /// Indices of columns with no letters at all.
    pub fn cleared_columns(&self) -> Vec<usize> {
        (0..BOARD_SIZE).filter(|&c| self.is_column_empty(c)).collect()
    }

    /// Slide columns inward over each cleared column.
    ///
    /// For every cleared column, the columns between it and the nearer edge
    /// shift one step toward it and the edge column is emptied. Columns are
    /// handled nearest-to-an-edge first, each against the board as left by
    /// the previous shift.
    pub fn constrict(&mut self, cleared: &[usize]) {
        self.constrict_following(cleared, None);
    }

    /// `constrict`, carrying `follow` along with whichever column it sits in.
    fn constrict_following(
        &mut self,
        cleared: &[usize],
        mut follow: Option<Coordinate>,
    ) -> Option<Coordinate> {
        let mut order: Vec<usize> = cleared.iter().copied().filter(|&c| c < BOARD_SIZE).collect();
        order.sort_by_key(|&c| (edge_distance(c), c));
        order.dedup();

        for col in order {
            if !self.is_column_empty(col) {
                // An earlier shift refilled it; nothing left to close.
                continue;
            }
            if col < BOARD_SIZE - 1 - col {
                for c in (0..col).rev() {
                    self.copy_column(c, c + 1);
                }
                self.clear_column(0);
                if let Some(at) = follow.as_mut().filter(|at| at.col < col) {
                    at.col += 1;
                }
            } else {
                for c in col + 1..BOARD_SIZE {
                    self.copy_column(c, c - 1);
                }
                self.clear_column(BOARD_SIZE - 1);
                if let Some(at) = follow.as_mut().filter(|at| at.col > col) {
                    at.col -= 1;
                }
            }
        }
        follow
    }

    /// Gravity, then cleared-column detection, then constriction.
    /// Returns the columns that were found empty after gravity.
    pub fn settle(&mut self) -> Vec<usize> {
        self.apply_gravity();
        let cleared = self.cleared_columns();
        if !cleared.is_empty() {
            self.constrict(&cleared);
        }
        cleared
    }

    /// `settle`, also reporting where the letter at `follow` ends up.
    /// `None` if `follow` was empty to begin with.
    pub fn settle_following(&mut self, follow: Coordinate) -> (Vec<usize>, Option<Coordinate>) {
        let landed = self.is_filled(follow).then(|| {
            let gaps = (follow.row + 1..BOARD_SIZE)
                .filter(|&row| self.cells[row][follow.col].is_none())
                .count();
            Coordinate {
                row: follow.row + gaps,
                col: follow.col,
            }
        });
        self.apply_gravity();
        let cleared = self.cleared_columns();
        let landed = self.constrict_following(&cleared, landed);
        (cleared, landed)
    }

    fn copy_column(&mut self, from: usize, to: usize) {
        for line in self.cells.iter_mut() {
            line[to] = line[from];
        }
    }

    fn clear_column(&mut self, col: usize) {
        for line in self.cells.iter_mut() {
            line[col] = None;
        }
    }
}

/// Distance from a column to the nearer left/right edge.
fn edge_distance(col: usize) -> usize {
    col.min(BOARD_SIZE - 1 - col)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            let text: String = line.iter().map(|cell| cell.unwrap_or('.')).collect();
            writeln!(f, "{}", text)?;
        }
        Ok(())
    }
}
