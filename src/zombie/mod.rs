//! Top-down survival arena simulation
//!
//! Continuous movement on a bounded plane, advanced once per fixed
//! simulation tick. Enemies pour in from the arena edges on a timer, the
//! avatar dodges, sprints and collects powerups until its health runs out.
//! No rendering or platform dependencies.

pub mod spawn;
pub mod state;
pub mod tick;

pub use state::{
    AiMode, GameState, Player, Powerup, PowerupKind, Zombie, ZombieConfig, ZombieKind,
};
pub use tick::{TickInput, tick};
