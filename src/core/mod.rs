//! Core engine types: tiles, cells, directions, state, RNG, configuration.
//!
//! This module holds the data model shared by the board, the rules and the
//! session. Nothing here knows how a move is resolved.

pub mod tile;
pub mod direction;
pub mod rng;
pub mod config;
pub mod state;

pub use tile::{can_merge, is_valid_value, Tile, TileId, TileRegistry, MAX_VALUE};
pub use direction::{Cell, Direction, ParseDirectionError, CELL_COUNT, GRID_SIZE};
pub use rng::{GameRng, RandomSource};
pub use config::{ConfigError, GameConfig, DEFAULT_FOUR_PROBABILITY, START_TILES, START_VALUE};
pub use state::{Phase, SessionState};
