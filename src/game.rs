use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{EngineConfig, GridSize};
use crate::food::spawn_position;
use crate::input::Direction;
use crate::random::RandomSource;
use crate::snake::{Position, Snake};

/// Direction every new game starts with.
pub const START_DIRECTION: Direction = Direction::Right;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Created or reset, no tick has run yet.
    Ready,
    Running,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOutcome {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can spawn.
    BoardFilled,
}

/// Owned, read-only copy of the engine state for rendering.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameSnapshot {
    pub grid: GridSize,
    /// Body cells, head first.
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub is_over: bool,
    pub status: GameStatus,
    pub outcome: Option<GameOutcome>,
    pub tick_count: u64,
}

impl GameSnapshot {
    /// Returns the head cell.
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    /// Returns the number of body cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Returns true when the snapshot holds no body cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }
}

/// Tick-driven snake simulation for one session.
///
/// Deterministic apart from food placement, which draws from the injected
/// [`RandomSource`].
#[derive(Debug, Clone)]
pub struct GameEngine<R: RandomSource = StdRng> {
    config: EngineConfig,
    snake: Snake,
    food: Position,
    score: u32,
    tick_interval_ms: u64,
    tick_count: u64,
    status: GameStatus,
    outcome: Option<GameOutcome>,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Creates a deterministic engine for tests and reproducible sessions.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Creates a fresh game: one-cell snake at the start cell heading right,
    /// randomly placed food.
    ///
    /// # Panics
    ///
    /// Panics when `config` fails [`EngineConfig::validate`].
    #[must_use]
    pub fn new(config: EngineConfig, mut rng: R) -> Self {
        assert!(config.validate().is_ok(), "engine config must be valid");

        let snake = Snake::new(config.start_cell(), START_DIRECTION);
        let food = initial_food(&mut rng, &config, &snake);

        Self {
            config,
            snake,
            food,
            score: 0,
            tick_interval_ms: config.base_tick_interval_ms,
            tick_count: 0,
            status: GameStatus::Ready,
            outcome: None,
            rng,
        }
    }

    /// Creates a game from an explicit board layout, as if play had already
    /// reached it. The heading is taken from `snake`.
    ///
    /// # Panics
    ///
    /// Panics when `config` fails [`EngineConfig::validate`], or when `food`
    /// lies on the snake or outside the grid.
    #[must_use]
    pub fn from_layout(config: EngineConfig, rng: R, snake: Snake, food: Position) -> Self {
        assert!(config.validate().is_ok(), "engine config must be valid");
        assert!(
            !snake.occupies(food) && food.is_within_bounds(config.grid()),
            "food must sit on a free cell inside the grid"
        );

        Self {
            config,
            snake,
            food,
            score: 0,
            tick_interval_ms: config.base_tick_interval_ms,
            tick_count: 0,
            status: GameStatus::Ready,
            outcome: None,
            rng,
        }
    }

    /// Buffers a turn for the next tick.
    ///
    /// Reversals of the live heading are ignored, as is any call after the
    /// game is over.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.is_over() {
            return;
        }

        self.snake.buffer_direction(direction);
    }

    /// Advances the simulation by exactly one step.
    pub fn tick(&mut self) {
        if self.is_over() {
            return;
        }

        self.status = GameStatus::Running;
        self.tick_count += 1;
        self.snake.commit_direction();

        let next_head = self.snake.next_head_position();
        if !next_head.is_within_bounds(self.config.grid()) {
            self.finish(GameOutcome::WallCollision);
            return;
        }

        let eats = next_head == self.food;
        if self.snake.collides_with_body(next_head, !eats) {
            self.finish(GameOutcome::SelfCollision);
            return;
        }

        self.snake.advance(next_head, eats);
        if eats {
            self.consume_food();
        }
    }

    /// Restores the creation state with a freshly placed food.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.config.start_cell(), START_DIRECTION);
        self.food = initial_food(&mut self.rng, &self.config, &self.snake);
        self.score = 0;
        self.tick_interval_ms = self.config.base_tick_interval_ms;
        self.tick_count = 0;
        self.status = GameStatus::Ready;
        self.outcome = None;
        debug!("game reset");
    }

    /// Returns an owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.config.grid(),
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.snake.direction(),
            pending_direction: self.snake.pending_direction(),
            score: self.score,
            tick_interval_ms: self.tick_interval_ms,
            is_over: self.is_over(),
            status: self.status,
            outcome: self.outcome,
            tick_count: self.tick_count,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the current driver period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn consume_food(&mut self) {
        self.score = self.score.saturating_add(self.config.food_reward);
        self.tick_interval_ms = self.config.ramped_interval_ms(self.tick_interval_ms);
        debug!(
            "food eaten at ({}, {}); score {}, interval {}ms",
            self.food.x, self.food.y, self.score, self.tick_interval_ms
        );

        match spawn_position(&mut self.rng, self.config.grid(), &self.snake) {
            Some(position) => self.food = position,
            None => self.finish(GameOutcome::BoardFilled),
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.status = GameStatus::GameOver;
        self.outcome = Some(outcome);
        info!(
            "game over after {} ticks: {outcome:?}, score {}, length {}",
            self.tick_count,
            self.score,
            self.snake.len()
        );
    }
}

fn initial_food<R: RandomSource + ?Sized>(
    rng: &mut R,
    config: &EngineConfig,
    snake: &Snake,
) -> Position {
    // A validated grid has at least four cells and the snake holds one.
    spawn_position(rng, config.grid(), snake).unwrap_or_else(|| config.grid().center())
}
