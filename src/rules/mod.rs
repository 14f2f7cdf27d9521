//! Game rules: move resolution, spawning, terminal detection.
//!
//! Each rule is a pure function over a tile collection. Randomness enters
//! only through the `RandomSource` the spawner receives.

pub mod resolver;
pub mod spawner;
pub mod terminal;

pub use resolver::{available_moves, resolve, Merge, MergeList, MoveOutcome};
pub use spawner::{initial_tiles, spawn, spawn_tile};
pub use terminal::is_terminal;
