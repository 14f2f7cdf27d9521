//! Move resolution: slide and merge every tile in one direction.
//!
//! ## Algorithm
//!
//! 1. Copy the caller's tiles into a local `Board`, clearing presentation flags
//! 2. Visit cells in the direction's traversal order (nearest the wall first)
//! 3. Walk each tile along the direction vector until it hits the wall or
//!    another tile
//! 4. On an equal-valued obstruction where neither side merged this move,
//!    double the obstruction and drop the moving tile
//!
//! The caller's tiles are never touched; a fresh collection is returned.
//!
//! ## Merge-once rule
//!
//! A tile takes part in at most one merge per move, as survivor or as
//! absorbed tile. A row `[2, 2, 2, _]` moved left becomes `[4, 2, _, _]`, and
//! `[4, 4, 8, _]` becomes `[8, 8, _, _]` rather than `[16, _, _, _]`.
//!
//! Tiles at `MAX_VALUE` are never merged, since doubling them leaves `u32`.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::direction::{Cell, Direction};
use crate::core::tile::{can_merge, Tile, TileId};

/// One merge performed during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Tile that stayed in place and doubled.
    pub survivor: TileId,
    /// Tile that slid into the survivor and was removed.
    pub absorbed: TileId,
    /// Value of the survivor after doubling.
    pub value: u32,
    /// Cell of the survivor.
    pub cell: Cell,
}

/// Merges of a single move. A 4x4 board allows at most 8.
pub type MergeList = SmallVec<[Merge; 8]>;

/// Result of resolving one direction against a tile set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Tiles after sliding and merging, row-major.
    pub tiles: Vector<Tile>,
    /// Sum of the values of all merged tiles.
    pub score_delta: u64,
    /// True if any tile changed cell or any merge happened.
    pub moved: bool,
    pub merges: MergeList,
}

/// Slide and merge `tiles` toward `direction`.
///
/// ```
/// use rust_2048::core::{Cell, Direction, TileRegistry};
/// use rust_2048::rules::resolve;
///
/// let mut registry = TileRegistry::new();
/// let tiles = vec![
///     registry.create(2, Cell::new(0, 0)),
///     registry.create(2, Cell::new(0, 1)),
///     registry.create(4, Cell::new(0, 2)),
/// ];
///
/// let outcome = resolve(Direction::Left, &tiles);
/// assert!(outcome.moved);
/// assert_eq!(outcome.score_delta, 4);
/// let row: Vec<_> = outcome.tiles.iter().map(|t| (t.col, t.value)).collect();
/// assert_eq!(row, vec![(0, 4), (1, 4)]);
/// ```
#[must_use]
pub fn resolve<'a>(direction: Direction, tiles: impl IntoIterator<Item = &'a Tile>) -> MoveOutcome {
    let settled: Vec<Tile> = tiles.into_iter().map(|t| t.settled()).collect();
    let mut board = Board::from_tiles(&settled);
    let mut merged: FxHashSet<TileId> = FxHashSet::default();
    let mut merges = MergeList::new();
    let mut score_delta = 0u64;
    let mut moved = false;

    for start in direction.cells_in_order() {
        let Some(tile) = board.get(start).copied() else {
            continue;
        };

        let mut current = start;
        let mut merged_into = None;

        while let Some(next) = current.offset(direction) {
            match board.get(next) {
                None => current = next,
                Some(target) => {
                    if target.value == tile.value
                        && can_merge(tile.value)
                        && !merged.contains(&target.id)
                        && !merged.contains(&tile.id)
                    {
                        merged_into = Some(next);
                    }
                    break;
                }
            }
        }

        if let Some(cell) = merged_into {
            board.take(start);
            let Some(target) = board.get_mut(cell) else {
                panic!("merge target missing at {cell}");
            };
            target.value *= 2;
            target.just_merged = true;
            merged.insert(target.id);
            merged.insert(tile.id);
            score_delta += u64::from(target.value);
            merges.push(Merge {
                survivor: target.id,
                absorbed: tile.id,
                value: target.value,
                cell,
            });
            moved = true;
        } else if current != start {
            board.take(start);
            board.place(tile.at(current));
            moved = true;
        }
    }

    MoveOutcome {
        tiles: board.into_tiles().collect(),
        score_delta,
        moved,
        merges,
    }
}

/// Directions in which a move would change the board.
#[must_use]
pub fn available_moves<'a, I>(tiles: I) -> Vec<Direction>
where
    I: IntoIterator<Item = &'a Tile> + Clone,
{
    Direction::ALL
        .into_iter()
        .filter(|&dir| resolve(dir, tiles.clone()).moved)
        .collect()
}
