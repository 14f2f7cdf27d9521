//! # rust-2048
//!
//! Rule engine for the sliding-tile merge puzzle on a fixed 4x4 grid.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: Resolving a move never mutates its input; it returns a
//!    fresh tile collection, score delta and merge list.
//!
//! 2. **Injected randomness**: Spawning and the starting layout draw from a
//!    `RandomSource`, so games replay exactly from a seed.
//!
//! 3. **Transactional moves**: A session commits a whole move (slide, merge,
//!    spawn, score, terminal check) or nothing.
//!
//! ## Modules
//!
//! - `core`: Tiles, cells, directions, RNG, configuration, snapshots
//! - `board`: Occupancy lookup derived from a tile collection
//! - `rules`: Move resolver, spawner, terminal detector
//! - `game`: Game session and builder
//!
//! ## Quick start
//!
//! ```
//! use rust_2048::{Direction, GameBuilder};
//!
//! let mut game = GameBuilder::new().seed(7).build().unwrap();
//! while !game.is_terminal() {
//!     let Some(&dir) = game.available_moves().first() else { break };
//!     game.apply_move(dir);
//! }
//! assert!(game.state().tile_count() <= 16);
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Cell, Direction, ParseDirectionError,
    Tile, TileId, TileRegistry,
    GameRng, RandomSource,
    GameConfig, ConfigError,
    Phase, SessionState,
    GRID_SIZE, CELL_COUNT,
};

pub use crate::board::{Board, BoardError};

pub use crate::rules::{available_moves, is_terminal, resolve, spawn, Merge, MoveOutcome};

pub use crate::game::{GameBuilder, GameSession, SessionError};
