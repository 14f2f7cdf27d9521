//! Terminal detection: the board is full and no merge remains.

use crate::board::Board;
use crate::core::tile::Tile;

/// True when every cell is occupied and no two 4-adjacent tiles share a value.
///
/// Any empty cell means a slide is still possible.
#[must_use]
pub fn is_terminal<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> bool {
    let board = Board::from_tiles(tiles);
    board.is_full() && !board.has_adjacent_pair()
}
