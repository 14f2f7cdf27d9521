//! Occupancy lookup for the 4x4 grid.
//!
//! A `Board` is derived state: it is rebuilt from a tile collection whenever
//! positional reasoning is needed and never stored alongside the tiles.

use smallvec::SmallVec;
use thiserror::Error;

use crate::core::direction::{Cell, CELL_COUNT};
use crate::core::tile::{can_merge, is_valid_value, Tile, TileId};

/// Empty cells in row-major order. Never more than 16, so no heap use.
pub type CellList = SmallVec<[Cell; CELL_COUNT]>;

/// Why a tile collection cannot form a board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{first} and {second} both occupy cell {cell}")]
    Overlap { first: TileId, second: TileId, cell: Cell },
    #[error("{id} sits off the grid at {cell}")]
    OffGrid { id: TileId, cell: Cell },
    #[error("{id} has value {value}, which is not a power of two >= 2")]
    BadValue { id: TileId, value: u32 },
    #[error("{id} appears more than once")]
    DuplicateId { id: TileId },
    #[error("{id} leaves no id for the next spawn")]
    IdExhausted { id: TileId },
}

/// Maps each cell to at most one tile.
///
/// ## Usage
///
/// ```
/// use rust_2048::board::Board;
/// use rust_2048::core::{Cell, TileRegistry};
///
/// let mut registry = TileRegistry::new();
/// let tiles = vec![registry.create(2, Cell::new(0, 0)), registry.create(4, Cell::new(3, 3))];
///
/// let board = Board::from_tiles(&tiles);
/// assert_eq!(board.len(), 2);
/// assert_eq!(board.empty_cells().len(), 14);
/// assert_eq!(board.get(Cell::new(3, 3)).map(|t| t.value), Some(4));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Tile>; CELL_COUNT],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the occupancy lookup for `tiles`.
    ///
    /// Panics if two tiles share a cell. Tiles produced by the engine never
    /// do; use `try_from_tiles` for layouts from outside the engine.
    #[must_use]
    pub fn from_tiles<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Self {
        let mut board = Self::new();
        for tile in tiles {
            if let Some(existing) = board.place(*tile) {
                panic!(
                    "board invariant violated: {} and {} both occupy {}",
                    existing.id,
                    tile.id,
                    tile.cell()
                );
            }
        }
        board
    }

    /// Build the occupancy lookup, reporting the first invariant violation.
    pub fn try_from_tiles<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut seen: rustc_hash::FxHashSet<TileId> = Default::default();

        for tile in tiles {
            let cell = tile.cell();
            if !cell.in_bounds() {
                return Err(BoardError::OffGrid { id: tile.id, cell });
            }
            if !is_valid_value(tile.value) {
                return Err(BoardError::BadValue { id: tile.id, value: tile.value });
            }
            if tile.id >= TileId::LAST {
                return Err(BoardError::IdExhausted { id: tile.id });
            }
            if !seen.insert(tile.id) {
                return Err(BoardError::DuplicateId { id: tile.id });
            }
            if let Some(existing) = board.place(*tile) {
                return Err(BoardError::Overlap {
                    first: existing.id,
                    second: tile.id,
                    cell,
                });
            }
        }
        Ok(board)
    }

    /// Tile at `cell`, if any.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&Tile> {
        self.cells[cell.index()].as_ref()
    }

    /// Mutable tile at `cell`, if any.
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        self.cells[cell.index()].as_mut()
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Put `tile` at its own cell, returning whatever was there.
    pub fn place(&mut self, tile: Tile) -> Option<Tile> {
        self.cells[tile.cell().index()].replace(tile)
    }

    /// Remove and return the tile at `cell`.
    pub fn take(&mut self, cell: Cell) -> Option<Tile> {
        self.cells[cell.index()].take()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// True when all 16 cells are occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Unoccupied cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> CellList {
        Cell::all().filter(|&c| !self.is_occupied(c)).collect()
    }

    /// Tiles 4-adjacent to `cell`.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = &Tile> + '_ {
        cell.neighbors().filter_map(move |n| self.get(n))
    }

    /// True if any two 4-adjacent tiles share a value that can still merge.
    #[must_use]
    pub fn has_adjacent_pair(&self) -> bool {
        self.tiles()
            .filter(|tile| can_merge(tile.value))
            .any(|tile| self.neighbors(tile.cell()).any(|n| n.value == tile.value))
    }

    /// Occupying tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    /// Consume the board, yielding its tiles in row-major order.
    pub fn into_tiles(self) -> impl Iterator<Item = Tile> {
        self.cells.into_iter().flatten()
    }
}

/// Build the occupancy lookup for `tiles`. Panics on overlapping tiles.
#[must_use]
pub fn occupants<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Board {
    Board::from_tiles(tiles)
}

/// Unoccupied cells in row-major order.
#[must_use]
pub fn empty_cells<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> CellList {
    Board::from_tiles(tiles).empty_cells()
}

/// True when `tiles` covers all 16 cells.
#[must_use]
pub fn is_full<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> bool {
    tiles.into_iter().count() == CELL_COUNT
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cell) in Cell::all().enumerate() {
            if i > 0 && cell.col == 0 {
                writeln!(f)?;
            }
            if cell.col > 0 {
                f.write_str("|")?;
            }
            match self.get(cell) {
                Some(tile) => write!(f, "{:>5}", tile.value)?,
                None => write!(f, "{:>5}", ".")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tile::MAX_VALUE;

    fn tile(id: u32, value: u32, row: u8, col: u8) -> Tile {
        Tile::new(TileId(id), value, Cell::new(row, col))
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(board.len(), 0);
        assert_eq!(board.empty_cells().len(), 16);
    }

    #[test]
    fn test_from_tiles_lookup() {
        let tiles = [tile(1, 2, 0, 1), tile(2, 8, 3, 0)];
        let board = Board::from_tiles(&tiles);

        assert_eq!(board.get(Cell::new(0, 1)).map(|t| t.id), Some(TileId(1)));
        assert_eq!(board.get(Cell::new(3, 0)).map(|t| t.value), Some(8));
        assert!(board.get(Cell::new(2, 2)).is_none());
        assert_eq!(board.len(), 2);
    }

    #[test]
    #[should_panic(expected = "board invariant violated")]
    fn test_overlap_panics() {
        let tiles = [tile(1, 2, 1, 1), tile(2, 4, 1, 1)];
        let _ = Board::from_tiles(&tiles);
    }

    #[test]
    fn test_try_from_tiles_errors() {
        let overlap = [tile(1, 2, 1, 1), tile(2, 4, 1, 1)];
        assert_eq!(
            Board::try_from_tiles(&overlap),
            Err(BoardError::Overlap {
                first: TileId(1),
                second: TileId(2),
                cell: Cell::new(1, 1),
            })
        );

        let dup = [tile(1, 2, 0, 0), tile(1, 2, 0, 1)];
        assert_eq!(Board::try_from_tiles(&dup), Err(BoardError::DuplicateId { id: TileId(1) }));

        let mut bad_value = tile(3, 2, 0, 0);
        bad_value.value = 12;
        assert_eq!(
            Board::try_from_tiles(&[bad_value]),
            Err(BoardError::BadValue { id: TileId(3), value: 12 })
        );

        let mut off_grid = tile(4, 2, 0, 0);
        off_grid.row = 7;
        assert_eq!(
            Board::try_from_tiles(&[off_grid]),
            Err(BoardError::OffGrid { id: TileId(4), cell: Cell::new(7, 0) })
        );

        let last_id = tile(u32::MAX, 2, 0, 3);
        assert_eq!(
            Board::try_from_tiles(&[last_id]),
            Err(BoardError::IdExhausted { id: TileId::LAST })
        );
        assert!(Board::try_from_tiles(&[tile(u32::MAX - 1, 2, 0, 3)]).is_ok());
    }

    #[test]
    fn test_max_value_pair_is_not_mergeable() {
        let capped = [tile(1, MAX_VALUE, 0, 0), tile(2, MAX_VALUE, 0, 1)];
        let board = Board::try_from_tiles(&capped).unwrap();
        assert!(!board.has_adjacent_pair());

        let below = [tile(1, MAX_VALUE / 2, 0, 0), tile(2, MAX_VALUE / 2, 0, 1)];
        assert!(Board::from_tiles(&below).has_adjacent_pair());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let tiles = [tile(1, 2, 0, 0), tile(2, 2, 0, 2)];
        let empty = empty_cells(&tiles);

        assert_eq!(empty.len(), 14);
        assert_eq!(empty[0], Cell::new(0, 1));
        assert_eq!(empty[1], Cell::new(0, 3));
        assert_eq!(empty[2], Cell::new(1, 0));
        assert!(empty.windows(2).all(|w| w[0].index() < w[1].index()));
    }

    #[test]
    fn test_is_full() {
        let tiles: Vec<_> = Cell::all()
            .enumerate()
            .map(|(i, c)| Tile::new(TileId(i as u32 + 1), 2, c))
            .collect();

        assert!(is_full(&tiles));
        assert!(Board::from_tiles(&tiles).is_full());
        assert!(Board::from_tiles(&tiles).empty_cells().is_empty());
        assert!(!is_full(&tiles[..15]));
    }

    #[test]
    fn test_take_and_place() {
        let mut board = occupants(&[tile(1, 2, 2, 2)]);

        let taken = board.take(Cell::new(2, 2));
        assert_eq!(taken.map(|t| t.id), Some(TileId(1)));
        assert!(board.is_empty());

        let moved = tile(1, 2, 2, 0);
        assert!(board.place(moved).is_none());
        assert!(board.is_occupied(Cell::new(2, 0)));
    }

    #[test]
    fn test_neighbors_and_adjacent_pair() {
        let board = Board::from_tiles(&[tile(1, 2, 1, 1), tile(2, 4, 1, 2), tile(3, 8, 2, 2)]);
        assert_eq!(board.neighbors(Cell::new(1, 1)).count(), 1);
        assert_eq!(board.neighbors(Cell::new(1, 2)).count(), 2);
        assert!(!board.has_adjacent_pair());

        let pair = Board::from_tiles(&[tile(1, 4, 0, 0), tile(2, 4, 1, 0)]);
        assert!(pair.has_adjacent_pair());

        let diagonal = Board::from_tiles(&[tile(1, 4, 0, 0), tile(2, 4, 1, 1)]);
        assert!(!diagonal.has_adjacent_pair());
    }

    #[test]
    fn test_display() {
        let board = Board::from_tiles(&[tile(1, 2, 0, 0), tile(2, 2048, 3, 3)]);
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "    2|    .|    .|    .");
        assert_eq!(lines[3], "    .|    .|    .| 2048");
    }
}
