//! Snake game state and core simulation types
//!
//! All per-episode state lives on `GameState` and is rebuilt by
//! `reset_session`; nothing survives a reset except the session high score
//! and the configuration.

use std::collections::{HashSet, VecDeque};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::world::{Grid, generate_obstacles};
use crate::Difficulty;
use crate::consts::TICK_RATE;
use crate::effects::EffectTimers;
use crate::phase::{GamePhase, SettingsCursor};

/// Starting body length
pub const INITIAL_LENGTH: usize = 3;

/// Timed food effects last 5 seconds
pub const EFFECT_DURATION_TICKS: u32 = 5 * TICK_RATE;

/// Rows on the snake settings screen: difficulty, special foods, obstacles
pub(super) const SETTINGS_ROWS: usize = 3;

/// A grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Travel direction of the snake head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell delta in screen coordinates (y grows downward)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Exact 180-degree reversal of the current heading
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }
}

/// Why the episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathReason {
    SelfCollision,
    ObstacleCollision,
}

/// Timed modifiers affecting the move cadence. Mutually exclusive: picking
/// one up replaces whatever was active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEffect {
    SpeedBoost,
    SlowMotion,
}

impl SnakeEffect {
    /// Multiplier applied to the base move rate
    pub fn speed_factor(&self) -> f32 {
        match self {
            SnakeEffect::SpeedBoost => 1.5,
            SnakeEffect::SlowMotion => 0.5,
        }
    }
}

/// Food varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Normal,
    Bonus,
    Speed,
    Slow,
}

impl FoodKind {
    /// Score awarded on consumption
    pub fn value(&self) -> u32 {
        match self {
            FoodKind::Normal => 1,
            FoodKind::Bonus => 5,
            FoodKind::Speed | FoodKind::Slow => 2,
        }
    }

    /// Segments added to the pending-growth counter
    pub fn growth(&self) -> u32 {
        match self {
            FoodKind::Bonus => 2,
            _ => 1,
        }
    }

    /// Timed effect granted on consumption, if any
    pub fn effect(&self) -> Option<SnakeEffect> {
        match self {
            FoodKind::Speed => Some(SnakeEffect::SpeedBoost),
            FoodKind::Slow => Some(SnakeEffect::SlowMotion),
            _ => None,
        }
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy)]
pub struct Food {
    pub pos: Point,
    pub kind: FoodKind,
}

/// The player snake: occupied cells head-first, plus a membership set for
/// O(1) self-collision tests
#[derive(Debug, Clone)]
pub struct Snake {
    pub body: VecDeque<Point>,
    body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    /// Tail pops are deferred while this is positive
    pub grow_queue: u32,
}

impl Snake {
    /// Build a snake of `INITIAL_LENGTH` cells with the body trailing the
    /// head opposite the travel direction, wrapped onto the grid
    pub fn new(head: Point, direction: Direction, grid: &Grid) -> Self {
        let (dx, dy) = direction.delta();
        let mut body = VecDeque::with_capacity(INITIAL_LENGTH);
        let mut body_set = HashSet::new();
        for i in 0..INITIAL_LENGTH as i32 {
            let cell = grid.wrap(head.x - dx * i, head.y - dy * i);
            body.push_back(cell);
            body_set.insert(cell);
        }
        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
            grow_queue: 0,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Point) -> bool {
        self.body_set.contains(&cell)
    }

    /// Request a turn; exact reversals of the current heading are rejected
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending_direction = Some(direction);
        }
    }

    fn push_head(&mut self, cell: Point) {
        self.body.push_front(cell);
        self.body_set.insert(cell);
    }

    fn pop_tail(&mut self) {
        if let Some(tail) = self.body.pop_back() {
            self.body_set.remove(&tail);
        }
    }
}

/// Per-session configuration, fixed at reset time
#[derive(Debug, Clone)]
pub struct SnakeConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub difficulty: Difficulty,
    pub special_foods: bool,
    /// Chance that a respawned food is a special kind
    pub special_food_chance: f64,
    pub obstacles: bool,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            difficulty: Difficulty::Normal,
            special_foods: true,
            special_food_chance: 0.2,
            obstacles: true,
        }
    }
}

impl SnakeConfig {
    /// Base move rate in cells per second
    pub fn base_speed(&self) -> f32 {
        match self.difficulty {
            Difficulty::Easy => 6.0,
            Difficulty::Normal | Difficulty::Endless => 10.0,
            Difficulty::Hard => 15.0,
        }
    }

    /// Obstacle patterns generated per episode
    pub fn obstacle_clusters(&self) -> u32 {
        match self.difficulty {
            Difficulty::Easy => 3,
            Difficulty::Normal | Difficulty::Endless => 5,
            Difficulty::Hard => 8,
        }
    }
}

/// Complete snake game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SnakeConfig,
    pub phase: GamePhase,
    pub snake: Snake,
    pub grid: Grid,
    pub food: Food,
    pub effects: EffectTimers<SnakeEffect>,
    pub score: u32,
    /// Score of the most recently finished episode
    pub last_score: u32,
    /// Best score this process lifetime; the persisted leaderboard is owned
    /// by the embedder
    pub high_score: u32,
    pub death_reason: Option<DeathReason>,
    pub elapsed_ticks: u64,
    /// Seconds accumulated toward the next move step
    pub move_timer: f32,
    pub settings_cursor: SettingsCursor,
    pub(super) rng: Pcg32,
}

impl GameState {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let center = Point::new(config.grid_width / 2, config.grid_height / 2);
        let snake = Snake::new(center, Direction::Right, &grid);
        let mut state = Self {
            config,
            phase: GamePhase::Menu,
            food: Food {
                pos: center,
                kind: FoodKind::Normal,
            },
            snake,
            grid,
            effects: EffectTimers::new(),
            score: 0,
            last_score: 0,
            high_score: 0,
            death_reason: None,
            elapsed_ticks: 0,
            move_timer: 0.0,
            settings_cursor: SettingsCursor::new(SETTINGS_ROWS),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_session();
        state
    }

    /// Rebuild all per-episode state: fresh snake and world, cleared timers,
    /// zeroed score
    pub fn reset_session(&mut self) {
        self.grid = Grid::new(self.config.grid_width, self.config.grid_height);
        let center = Point::new(self.config.grid_width / 2, self.config.grid_height / 2);
        let direction = match self.rng.random_range(0..4u32) {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        };
        self.snake = Snake::new(center, direction, &self.grid);

        if self.config.obstacles {
            let start_cells: Vec<Point> = self.snake.body.iter().copied().collect();
            generate_obstacles(
                &mut self.grid,
                &start_cells,
                self.config.obstacle_clusters(),
                &mut self.rng,
            );
        }

        self.effects.clear();
        self.score = 0;
        self.death_reason = None;
        self.elapsed_ticks = 0;
        self.move_timer = 0.0;
        self.respawn_food();
    }

    /// Move rate multiplier from the active timed effect
    pub fn speed_factor(&self) -> f32 {
        if self.effects.is_active(SnakeEffect::SpeedBoost) {
            SnakeEffect::SpeedBoost.speed_factor()
        } else if self.effects.is_active(SnakeEffect::SlowMotion) {
            SnakeEffect::SlowMotion.speed_factor()
        } else {
            1.0
        }
    }

    /// Episode length in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ticks * 1000 / TICK_RATE as u64
    }

    /// Advance the head one cell in the current direction.
    ///
    /// Applies the pending turn, wraps around the grid, and resolves
    /// collisions synchronously: an obstacle cell or a body cell (other
    /// than the tail about to vacate) ends the episode.
    pub(super) fn try_step(&mut self) -> Result<(), DeathReason> {
        if let Some(turn) = self.snake.pending_direction.take() {
            self.snake.direction = turn;
        }

        let (dx, dy) = self.snake.direction.delta();
        let head = self.snake.head();
        let next = self.grid.wrap(head.x + dx, head.y + dy);

        if self.grid.is_obstacle(next) {
            return Err(DeathReason::ObstacleCollision);
        }

        let growing = self.snake.grow_queue > 0;
        let tail_vacates = !growing && next == self.snake.tail();
        if self.snake.occupies(next) && !tail_vacates {
            return Err(DeathReason::SelfCollision);
        }

        self.snake.push_head(next);
        if growing {
            self.snake.grow_queue -= 1;
        } else {
            self.snake.pop_tail();
        }

        Ok(())
    }

    /// Place a fresh food item, uniformly among free cells.
    ///
    /// If the board has no free cell left, an unchecked random cell is used
    /// rather than failing; the episode is effectively over at that point.
    pub(super) fn respawn_food(&mut self) {
        let kind = if self.config.special_foods
            && self.rng.random_bool(self.config.special_food_chance)
        {
            match self.rng.random_range(0..3u32) {
                0 => FoodKind::Bonus,
                1 => FoodKind::Speed,
                _ => FoodKind::Slow,
            }
        } else {
            FoodKind::Normal
        };

        let mut free = Vec::new();
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let p = Point::new(x, y);
                if !self.snake.occupies(p) && !self.grid.is_obstacle(p) {
                    free.push(p);
                }
            }
        }

        let pos = if free.is_empty() {
            Point::new(
                self.rng.random_range(0..self.grid.width()),
                self.rng.random_range(0..self.grid.height()),
            )
        } else {
            free[self.rng.random_range(0..free.len())]
        };

        self.food = Food { pos, kind };
    }
}
