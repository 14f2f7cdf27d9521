//! Grid coordinates and move directions.
//!
//! A `Cell` is a `(row, col)` pair on the 4x4 grid. A `Direction` is one of
//! the four slide directions; it knows its unit vector and the order in which
//! the resolver must visit cells so that tiles nearest the destination wall
//! settle first.
//!
//! ```
//! use rust_2048::core::{Cell, Direction};
//!
//! let dir: Direction = "left".parse().unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(Cell::new(0, 0).offset(dir), None);
//! assert_eq!(Cell::new(0, 1).offset(dir), Some(Cell::new(0, 0)));
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Width and height of the board.
pub const GRID_SIZE: u8 = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

const FORWARD: [u8; 4] = [0, 1, 2, 3];
const BACKWARD: [u8; 4] = [3, 2, 1, 0];

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True if the cell lies on the grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Row-major index in `0..CELL_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * GRID_SIZE as usize + self.col as usize
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Cell::new(row, col)))
    }

    /// The neighboring cell one step in `dir`, or `None` if that is off-grid.
    #[must_use]
    pub fn offset(self, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.vector();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Cell::new(row, col);
        next.in_bounds().then_some(next)
    }

    /// The 4-adjacent on-grid cells (no diagonals).
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        Direction::ALL.into_iter().filter_map(move |dir| self.offset(dir))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four slide directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector as `(row delta, col delta)`.
    #[must_use]
    pub const fn vector(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Row and column visiting orders for this direction.
    ///
    /// Rows run 3→0 only for `Down`, columns run 3→0 only for `Right`.
    #[must_use]
    pub const fn traversal(self) -> ([u8; 4], [u8; 4]) {
        match self {
            Direction::Up | Direction::Left => (FORWARD, FORWARD),
            Direction::Down => (BACKWARD, FORWARD),
            Direction::Right => (FORWARD, BACKWARD),
        }
    }

    /// Cells in the order the resolver visits them.
    pub fn cells_in_order(self) -> impl Iterator<Item = Cell> {
        let (rows, cols) = self.traversal();
        rows.into_iter()
            .flat_map(move |row| cols.into_iter().map(move |col| Cell::new(row, col)))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Input that does not name one of the four directions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseDirectionError {
    #[error("unrecognized direction {0:?}")]
    Unrecognized(String),
    #[error("direction code {0} out of range (expected 0..=3)")]
    BadCode(u8),
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError::Unrecognized(s.to_string())),
        }
    }
}

/// 0 = Up, 1 = Down, 2 = Left, 3 = Right.
impl TryFrom<u8> for Direction {
    type Error = ParseDirectionError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(code as usize)
            .copied()
            .ok_or(ParseDirectionError::BadCode(code))
    }
}
