//! Timer-driven enemy and powerup spawning
//!
//! Enemies enter from a uniformly chosen arena edge on a fixed interval;
//! powerups drop inside the arena on their own interval, capped to a small
//! concurrent count. Kind selection is a percentile roll over fixed
//! category weights.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, Powerup, PowerupKind, Zombie, ZombieKind};

/// Margin kept between a powerup and every arena edge
const POWERUP_EDGE_MARGIN: f32 = 50.0;

/// 70% normal / 10% tank / 15% runner / 5% exploder
fn roll_zombie_kind(rng: &mut Pcg32) -> ZombieKind {
    let roll = rng.random_range(0..100u32);
    if roll < 70 {
        ZombieKind::Normal
    } else if roll < 80 {
        ZombieKind::Tank
    } else if roll < 95 {
        ZombieKind::Runner
    } else {
        ZombieKind::Exploder
    }
}

/// 25% speed / 20% freeze / 25% health / 15% shield / 5% nuke / 10% slowmo
fn roll_powerup_kind(rng: &mut Pcg32) -> PowerupKind {
    let roll = rng.random_range(0..100u32);
    if roll < 25 {
        PowerupKind::Speed
    } else if roll < 45 {
        PowerupKind::Freeze
    } else if roll < 70 {
        PowerupKind::Health
    } else if roll < 85 {
        PowerupKind::Shield
    } else if roll < 90 {
        PowerupKind::Nuke
    } else {
        PowerupKind::SlowMo
    }
}

/// Uniform position on a uniformly chosen arena edge
fn edge_position(arena: Vec2, rng: &mut Pcg32) -> Vec2 {
    match rng.random_range(0..4u32) {
        // Top
        0 => Vec2::new(rng.random_range(0.0..=arena.x), 0.0),
        // Right
        1 => Vec2::new(arena.x, rng.random_range(0.0..=arena.y)),
        // Bottom
        2 => Vec2::new(rng.random_range(0.0..=arena.x), arena.y),
        // Left
        _ => Vec2::new(0.0, rng.random_range(0.0..=arena.y)),
    }
}

/// Spawn one enemy at an arena edge
pub fn spawn_zombie(state: &mut GameState) {
    let pos = edge_position(state.config.arena, &mut state.rng);
    let kind = roll_zombie_kind(&mut state.rng);
    let zombie = Zombie::new(kind, pos, state.config.difficulty, &mut state.rng);
    log::debug!(
        "Spawned {:?} zombie at ({:.0}, {:.0}){}",
        kind,
        pos.x,
        pos.y,
        if zombie.elite { " [elite]" } else { "" }
    );
    state.zombies.push(zombie);
}

/// Spawn one powerup inside the arena, unless the floor is full
pub fn spawn_powerup(state: &mut GameState) {
    if state.powerups.len() >= state.config.max_powerups {
        return;
    }

    let arena = state.config.arena;
    let pos = Vec2::new(
        state
            .rng
            .random_range(POWERUP_EDGE_MARGIN..=arena.x - POWERUP_EDGE_MARGIN),
        state
            .rng
            .random_range(POWERUP_EDGE_MARGIN..=arena.y - POWERUP_EDGE_MARGIN),
    );
    let kind = roll_powerup_kind(&mut state.rng);
    log::debug!("Spawned {} powerup at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
    state.powerups.push(Powerup::new(pos, kind));
}
