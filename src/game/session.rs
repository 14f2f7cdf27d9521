//! Game session: the transactional move loop.
//!
//! `GameSession` owns the tile collection, score, phase, identity counter and
//! randomness for one game. Each `apply_move` either commits a whole move
//! (slide/merge, one spawn, score, terminal check) or changes nothing.

use im::Vector;
use thiserror::Error;
use tracing::{debug, trace};

use crate::board::{Board, BoardError};
use crate::core::config::{ConfigError, GameConfig};
use crate::core::direction::{Direction, ParseDirectionError};
use crate::core::rng::{GameRng, RandomSource};
use crate::core::state::{Phase, SessionState};
use crate::core::tile::{Tile, TileId, TileRegistry};
use crate::rules::{available_moves, initial_tiles, is_terminal, resolve, spawn_tile, MergeList};

/// Why a session could not be constructed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// One game of the merge puzzle.
///
/// ## Usage
///
/// ```
/// use rust_2048::game::GameBuilder;
/// use rust_2048::core::Direction;
///
/// let mut game = GameBuilder::new().seed(42).build().unwrap();
/// assert_eq!(game.state().tile_count(), 2);
///
/// let before = game.score();
/// let state = game.apply_move(Direction::Left);
/// assert!(state.score >= before);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession<R = GameRng> {
    config: GameConfig,
    rng: R,
    registry: TileRegistry,
    state: SessionState,
    moves_made: u32,
    last_merges: MergeList,
    last_spawn: Option<TileId>,
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session and deal the starting tiles.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            config,
            rng,
            registry: TileRegistry::new(),
            state: SessionState::default(),
            moves_made: 0,
            last_merges: MergeList::new(),
            last_spawn: None,
        };
        session.start_game();
        Ok(session)
    }

    /// Create a session from an existing layout.
    ///
    /// The layout is validated, the identity counter continues after the
    /// largest id present, and the phase is derived from the tiles.
    pub fn from_tiles(
        config: GameConfig,
        rng: R,
        tiles: impl IntoIterator<Item = Tile>,
        score: u64,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let tiles: Vector<Tile> = tiles.into_iter().collect();
        Board::try_from_tiles(&tiles)?;

        let phase = if is_terminal(&tiles) { Phase::Terminal } else { Phase::Active };
        Ok(Self {
            config,
            rng,
            registry: TileRegistry::continuing_after(&tiles),
            state: SessionState::new(tiles, score, phase),
            moves_made: 0,
            last_merges: MergeList::new(),
            last_spawn: None,
        })
    }

    /// Discard the current game and deal a fresh one.
    ///
    /// Tile ids restart at 1, score returns to 0 and the phase to `Active`.
    pub fn start_game(&mut self) -> SessionState {
        self.registry.reset();
        let tiles = initial_tiles(&mut self.registry, &mut self.rng);

        debug!(
            cells = ?tiles.iter().map(Tile::cell).collect::<Vec<_>>(),
            "new game"
        );

        self.state = SessionState::new(tiles, 0, Phase::Active);
        self.moves_made = 0;
        self.last_merges.clear();
        self.last_spawn = None;
        self.state.clone()
    }

    /// Attempt a move and return the resulting state.
    ///
    /// Nothing changes if the game is over or no tile can slide or merge.
    pub fn apply_move(&mut self, direction: Direction) -> SessionState {
        if self.state.is_terminal() {
            trace!(%direction, "move ignored: game over");
            return self.state.clone();
        }

        let outcome = resolve(direction, &self.state.tiles);
        if !outcome.moved {
            trace!(%direction, "move ignored: nothing moved");
            return self.state.clone();
        }

        let mut tiles = outcome.tiles;
        let spawned = spawn_tile(&tiles, &mut self.registry, &self.config, &mut self.rng);
        if let Some(tile) = spawned {
            tiles.push_back(tile);
        }

        let score = self.state.score + outcome.score_delta;
        let phase = if is_terminal(&tiles) { Phase::Terminal } else { Phase::Active };

        debug!(
            %direction,
            score_delta = outcome.score_delta,
            score,
            merges = outcome.merges.len(),
            spawned = ?spawned.map(|t| (t.cell(), t.value)),
            "move applied"
        );
        if phase == Phase::Terminal {
            debug!(score, moves = self.moves_made + 1, "game over");
        }

        self.state = SessionState::new(tiles, score, phase);
        self.moves_made += 1;
        self.last_merges = outcome.merges;
        self.last_spawn = spawned.map(|t| t.id);
        self.state.clone()
    }

    /// Parse `input` as a direction and apply it.
    ///
    /// Unrecognized input is rejected before any rule runs.
    pub fn apply_input(&mut self, input: &str) -> Result<SessionState, ParseDirectionError> {
        let direction: Direction = input.parse()?;
        Ok(self.apply_move(direction))
    }
}

impl<R> GameSession<R> {
    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.state.score
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Accepted moves since the last `start_game`.
    #[must_use]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Merges performed by the last accepted move.
    #[must_use]
    pub fn last_merges(&self) -> &MergeList {
        &self.last_merges
    }

    /// Tile spawned by the last accepted move.
    #[must_use]
    pub fn last_spawn(&self) -> Option<TileId> {
        self.last_spawn
    }

    /// Directions that would currently change the board. Empty once terminal.
    #[must_use]
    pub fn available_moves(&self) -> Vec<Direction> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        available_moves(&self.state.tiles)
    }

    /// The board for the current tiles.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::from_tiles(&self.state.tiles)
    }
}

/// Builder for a `GameSession` backed by `GameRng`.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    seed: Option<u64>,
    config: GameConfig,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the RNG for a reproducible game. Unseeded games use OS entropy.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn four_probability(mut self, probability: f64) -> Self {
        self.config.four_probability = probability;
        self
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the session and deal the starting tiles.
    pub fn build(self) -> Result<GameSession<GameRng>, ConfigError> {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        GameSession::new(self.config, rng)
    }

    /// Build the session with a caller-supplied randomness source.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> Result<GameSession<R>, ConfigError> {
        GameSession::new(self.config, rng)
    }
}
