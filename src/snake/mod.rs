//! Grid snake simulation
//!
//! Deterministic and fixed-timestep. Movement happens in whole grid cells,
//! gated by a move timer derived from the difficulty speed and any active
//! timed effect; collisions are resolved synchronously as part of the move.
//! No rendering or platform dependencies.

pub mod state;
pub mod tick;
pub mod world;

pub use state::{
    DeathReason, Direction, Food, FoodKind, GameState, Point, Snake, SnakeConfig, SnakeEffect,
};
pub use tick::{TickInput, tick};
pub use world::{Cell, Grid};
