//! Tile spawning and the initial layout.
//!
//! Both draw cells from the row-major empty-cell list, so a seeded
//! `RandomSource` reproduces the same layout every time.

use im::Vector;

use crate::board::Board;
use crate::core::config::{GameConfig, START_TILES, START_VALUE};
use crate::core::rng::RandomSource;
use crate::core::tile::{Tile, TileRegistry};

/// Add one tile to a random empty cell.
///
/// The value is 4 with probability `config.four_probability`, else 2. The new
/// tile is flagged `just_created`. On a full board the tiles are returned
/// unchanged and no randomness is consumed.
#[must_use]
pub fn spawn<R: RandomSource + ?Sized>(
    tiles: &Vector<Tile>,
    registry: &mut TileRegistry,
    config: &GameConfig,
    rng: &mut R,
) -> Vector<Tile> {
    let mut next = tiles.clone();
    if let Some(tile) = spawn_tile(tiles, registry, config, rng) {
        next.push_back(tile);
    }
    next
}

/// Pick the tile `spawn` would add, without adding it.
pub fn spawn_tile<R: RandomSource + ?Sized>(
    tiles: &Vector<Tile>,
    registry: &mut TileRegistry,
    config: &GameConfig,
    rng: &mut R,
) -> Option<Tile> {
    let empty = Board::from_tiles(tiles).empty_cells();
    if empty.is_empty() {
        return None;
    }

    let cell = empty[rng.pick_index(empty.len())];
    let value = if rng.chance(config.four_probability) { 4 } else { 2 };
    Some(registry.spawn(value, cell))
}

/// Place the starting tiles: two 2s on two distinct random cells.
///
/// Each placement draws from the cells still empty, so the cells differ by
/// construction.
#[must_use]
pub fn initial_tiles<R: RandomSource + ?Sized>(registry: &mut TileRegistry, rng: &mut R) -> Vector<Tile> {
    let mut tiles = Vector::new();
    for _ in 0..START_TILES {
        let empty = Board::from_tiles(&tiles).empty_cells();
        let cell = empty[rng.pick_index(empty.len())];
        tiles.push_back(registry.spawn(START_VALUE, cell));
    }
    tiles
}
