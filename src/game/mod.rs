//! Game session: orchestrates resolve, spawn and terminal detection.
//!
//! ## Lifecycle
//!
//! - `start_game` deals two 2-tiles on distinct cells, score 0, phase `Active`
//! - `apply_move` commits a whole move or nothing
//! - `Terminal` is absorbing until the next `start_game`

mod session;

pub use session::{GameBuilder, GameSession, SessionError};
