//! Tile identity and records.
//!
//! Every tile on the board has a unique `TileId`. Ids are allocated by a
//! session-scoped `TileRegistry`, start at 1 and strictly increase; a new
//! session resets the counter.
//!
//! ## Usage
//!
//! ```
//! use rust_2048::core::{Cell, TileRegistry};
//!
//! let mut registry = TileRegistry::new();
//! let a = registry.create(2, Cell::new(0, 0));
//! let b = registry.create(4, Cell::new(3, 3));
//!
//! assert_eq!(a.id.raw(), 1);
//! assert!(b.id > a.id);
//! ```

use serde::{Deserialize, Serialize};

use super::direction::Cell;

/// Unique identifier for a tile within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Id handed out first in a fresh session.
    pub const FIRST: TileId = TileId(1);

    /// Last id a registry can hand out.
    pub const LAST: TileId = TileId(u32::MAX);

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Largest legal tile value.
pub const MAX_VALUE: u32 = 1 << 31;

/// Returns true if `value` is a legal tile value (a power of two, at least 2).
#[must_use]
pub const fn is_valid_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Returns true if two tiles of `value` may merge. `MAX_VALUE` tiles never do.
#[must_use]
pub const fn can_merge(value: u32) -> bool {
    value < MAX_VALUE
}

/// A single numbered piece on the board.
///
/// `just_created` and `just_merged` are presentation hints. The engine sets
/// them on the move or spawn that produced the tile and clears them at the
/// start of the next move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: u8,
    pub col: u8,
    pub just_created: bool,
    pub just_merged: bool,
}

impl Tile {
    /// Build a tile record with both flags cleared.
    ///
    /// Panics if `value` is not a power of two >= 2 or the cell is off-grid.
    #[must_use]
    pub fn new(id: TileId, value: u32, cell: Cell) -> Self {
        assert!(is_valid_value(value), "invalid tile value {value}");
        assert!(cell.in_bounds(), "tile cell {cell} is off the grid");
        Self {
            id,
            value,
            row: cell.row,
            col: cell.col,
            just_created: false,
            just_merged: false,
        }
    }

    /// Mark the tile as freshly spawned.
    #[must_use]
    pub fn created(mut self) -> Self {
        self.just_created = true;
        self
    }

    /// The cell this tile occupies.
    #[must_use]
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    /// Copy of this tile with both presentation flags cleared.
    #[must_use]
    pub fn settled(mut self) -> Self {
        self.just_created = false;
        self.just_merged = false;
        self
    }

    /// Copy of this tile placed at `cell`.
    #[must_use]
    pub fn at(mut self, cell: Cell) -> Self {
        self.row = cell.row;
        self.col = cell.col;
        self
    }
}

/// Allocates tile identities for one session.
#[derive(Clone, Debug)]
pub struct TileRegistry {
    // u64 so that handing out `TileId::LAST` does not overflow.
    next_id: u64,
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TileRegistry {
    /// Create a registry whose first id is `TileId::FIRST`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: u64::from(TileId::FIRST.0),
        }
    }

    /// Create a registry that continues after the largest id in `tiles`.
    #[must_use]
    pub fn continuing_after<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Self {
        let next_id = tiles
            .into_iter()
            .map(|t| u64::from(t.id.0) + 1)
            .max()
            .unwrap_or(u64::from(TileId::FIRST.0));
        Self { next_id }
    }

    /// Restart numbering from `TileId::FIRST`.
    pub fn reset(&mut self) {
        self.next_id = u64::from(TileId::FIRST.0);
    }

    /// The id the next `create` call will assign, or `None` once
    /// `TileId::LAST` has been handed out.
    #[must_use]
    pub fn peek(&self) -> Option<TileId> {
        u32::try_from(self.next_id).ok().map(TileId)
    }

    /// Allocate a new tile id.
    ///
    /// Panics once every id up to `TileId::LAST` has been used.
    pub fn alloc(&mut self) -> TileId {
        let Some(id) = self.peek() else {
            panic!("tile id space exhausted");
        };
        self.next_id += 1;
        id
    }

    /// Create a tile with the next id. Both flags start cleared.
    pub fn create(&mut self, value: u32, cell: Cell) -> Tile {
        Tile::new(self.alloc(), value, cell)
    }

    /// Create a tile with the next id, flagged as just created.
    pub fn spawn(&mut self, value: u32, cell: Cell) -> Tile {
        self.create(value, cell).created()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut registry = TileRegistry::new();

        let a = registry.alloc();
        let b = registry.alloc();
        let c = registry.alloc();

        assert_eq!(a, TileId(1));
        assert_eq!(b, TileId(2));
        assert_eq!(c, TileId(3));
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut registry = TileRegistry::new();
        registry.alloc();
        registry.alloc();

        registry.reset();

        assert_eq!(registry.peek(), Some(TileId::FIRST));
        assert_eq!(registry.alloc(), TileId(1));
    }

    #[test]
    fn test_continuing_after() {
        let tiles = [
            Tile::new(TileId(4), 2, Cell::new(0, 0)),
            Tile::new(TileId(9), 8, Cell::new(1, 2)),
        ];

        let registry = TileRegistry::continuing_after(&tiles);
        assert_eq!(registry.peek(), Some(TileId(10)));

        let empty = TileRegistry::continuing_after(std::iter::empty());
        assert_eq!(empty.peek(), Some(TileId::FIRST));
    }

    #[test]
    fn test_create_and_spawn_flags() {
        let mut registry = TileRegistry::new();

        let plain = registry.create(2, Cell::new(1, 1));
        assert!(!plain.just_created);
        assert!(!plain.just_merged);

        let spawned = registry.spawn(4, Cell::new(2, 3));
        assert!(spawned.just_created);
        assert_eq!(spawned.value, 4);
        assert_eq!(spawned.cell(), Cell::new(2, 3));
    }

    #[test]
    fn test_settled_clears_flags() {
        let mut tile = Tile::new(TileId(1), 2, Cell::new(0, 0)).created();
        tile.just_merged = true;

        let settled = tile.settled();
        assert!(!settled.just_created);
        assert!(!settled.just_merged);
        assert_eq!(settled.id, tile.id);
    }

    #[test]
    fn test_valid_values() {
        assert!(is_valid_value(2));
        assert!(is_valid_value(4));
        assert!(is_valid_value(2048));
        assert!(!is_valid_value(0));
        assert!(!is_valid_value(1));
        assert!(!is_valid_value(6));
        assert!(is_valid_value(MAX_VALUE));
    }

    #[test]
    fn test_merge_cap() {
        assert!(can_merge(2));
        assert!(can_merge(MAX_VALUE / 2));
        assert!(!can_merge(MAX_VALUE));
    }

    #[test]
    fn test_registry_hands_out_last_id() {
        let tiles = [Tile::new(TileId(u32::MAX - 1), 2, Cell::new(0, 3))];
        let mut registry = TileRegistry::continuing_after(&tiles);

        assert_eq!(registry.alloc(), TileId::LAST);
        assert_eq!(registry.peek(), None);
    }

    #[test]
    #[should_panic(expected = "tile id space exhausted")]
    fn test_registry_exhaustion_panics() {
        let tiles = [Tile::new(TileId::LAST, 2, Cell::new(0, 3))];
        let mut registry = TileRegistry::continuing_after(&tiles);
        let _ = registry.alloc();
    }

    #[test]
    #[should_panic(expected = "invalid tile value")]
    fn test_invalid_value_panics() {
        let _ = Tile::new(TileId(1), 3, Cell::new(0, 0));
    }

    #[test]
    #[should_panic(expected = "off the grid")]
    fn test_off_grid_panics() {
        let _ = Tile::new(TileId(1), 2, Cell::new(4, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TileId(42)), "Tile(42)");
    }

    #[test]
    fn test_serialization() {
        let tile = Tile::new(TileId(7), 16, Cell::new(2, 1)).created();
        let json = serde_json::to_string(&tile).unwrap();
        let deserialized: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, deserialized);
    }
}
