//! Session snapshot published to the presentation layer.
//!
//! `SessionState` is immutable from the caller's point of view. Tiles are held
//! in an `im::Vector` so handing out a snapshot after every move is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::direction::Cell;
use super::tile::Tile;

/// Session lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    #[default]
    Active,
    /// Board is full and no merge remains. Absorbing until a new game.
    Terminal,
}

/// Read-only view of a session: live tiles, score, and phase.
///
/// Tile order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub tiles: Vector<Tile>,
    pub score: u64,
    pub phase: Phase,
}

impl SessionState {
    #[must_use]
    pub fn new(tiles: Vector<Tile>, score: u64, phase: Phase) -> Self {
        Self { tiles, score, phase }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Largest tile value on the board, or 0 if empty.
    #[must_use]
    pub fn highest_tile(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    /// The tile at `cell`, if any.
    #[must_use]
    pub fn tile_at(&self, cell: Cell) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.cell() == cell)
    }
}
