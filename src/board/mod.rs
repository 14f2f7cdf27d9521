//! Board: the 4x4 grid derived from a tile collection.
//!
//! ## Key Types
//!
//! - `Board`: cell -> tile lookup with empty-cell and adjacency queries
//! - `BoardError`: why an externally supplied layout is not a valid board

pub mod grid;

pub use grid::{empty_cells, is_full, occupants, Board, BoardError, CellList};
