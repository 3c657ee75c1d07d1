//! Zombie survival fixed-timestep tick
//!
//! One call advances the simulation by a single fixed step: avatar
//! movement, spawn timers, enemy AI, collision resolution, effect decay,
//! score. The step order matters: a lethal hit ends the episode before
//! any powerup or effect processing for that frame.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::spawn::{spawn_powerup, spawn_zombie};
use super::state::{
    GameState, KNOCKBACK_DISTANCE, NUKE_SCORE_BONUS, PowerupKind, SCORE_PER_SECOND, aabb_overlap,
};
use crate::Difficulty;
use crate::consts::TICK_RATE;
use crate::phase::GamePhase;
use crate::settings::adjust_volume;

/// Endless mode shrinks the spawn interval every 30 seconds
const RAMP_INTERVAL_TICKS: u32 = 30 * TICK_RATE;
/// Ticks shaved off the spawn interval per ramp step
const RAMP_STEP: u32 = 5;
/// Endless mode never spawns faster than this
const MIN_SPAWN_INTERVAL: u32 = 20;

/// Input for a single tick: held movement axes plus discrete events,
/// already decoded from raw keys/clicks by the frontend
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement axes
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Held sprint modifier
    pub sprint: bool,
    /// Confirm / start (menu, game-over retry)
    pub confirm: bool,
    /// Toggle pause
    pub pause: bool,
    /// Open the settings screen (from the menu or the pause screen)
    pub open_settings: bool,
    /// Back out to the menu (or leave the settings screen)
    pub menu: bool,
    /// Menu difficulty selection / settings-screen adjustment
    pub adjust_left: bool,
    pub adjust_right: bool,
    /// Settings-screen navigation
    pub nav_up: bool,
    pub nav_down: bool,
}

impl TickInput {
    fn adjust_step(&self) -> i32 {
        match (self.adjust_left, self.adjust_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Advance the game by one fixed simulation step
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu => {
            let step = input.adjust_step();
            if step != 0 {
                state.config.difficulty = state.config.difficulty.cycled(step);
            }
            if input.confirm {
                state.reset_session();
                state.phase = GamePhase::Playing;
                log::info!(
                    "Arena episode started ({})",
                    state.config.difficulty.as_str()
                );
            } else if input.open_settings {
                state.settings_from = GamePhase::Menu;
                state.phase = GamePhase::Settings;
            }
        }

        GamePhase::Settings => {
            handle_settings(state, input);
        }

        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            } else if input.open_settings {
                state.settings_from = GamePhase::Paused;
                state.phase = GamePhase::Settings;
            } else if input.menu {
                state.phase = GamePhase::Menu;
            }
        }

        GamePhase::GameOver => {
            if input.confirm {
                state.reset_session();
                state.phase = GamePhase::Playing;
            } else if input.menu {
                state.phase = GamePhase::Menu;
            }
        }

        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
            simulate(state, input);
        }
    }
}

fn simulate(state: &mut GameState, input: &TickInput) {
    state.elapsed_ticks += 1;

    move_player(state, input);

    // Spawn directors
    state.spawn_timer += 1;
    if state.spawn_timer >= state.spawn_interval {
        spawn_zombie(state);
        state.spawn_timer = 0;
    }
    state.powerup_timer += 1;
    if state.powerup_timer >= state.config.powerup_interval {
        spawn_powerup(state);
        state.powerup_timer = 0;
    }
    if state.config.difficulty == Difficulty::Endless {
        state.ramp_timer += 1;
        if state.ramp_timer >= RAMP_INTERVAL_TICKS {
            state.spawn_interval = state.spawn_interval.saturating_sub(RAMP_STEP).max(MIN_SPAWN_INTERVAL);
            state.ramp_timer = 0;
        }
    }

    // Global movement modifiers come from the avatar's active effects
    let frozen = state.player.effects.is_active(PowerupKind::Freeze);
    let slow = state.player.effects.is_active(PowerupKind::SlowMo);

    let player_pos = state.player.pos;
    let arena = state.config.arena;
    for zombie in &mut state.zombies {
        zombie.advance(player_pos, frozen, slow, arena, &mut state.rng);
    }

    if resolve_enemy_collisions(state) {
        // Lethal hit: the episode is over, skip the rest of the frame
        return;
    }
    resolve_powerup_collisions(state);

    state.player.effects.tick();

    state.score =
        (state.elapsed_ticks / TICK_RATE as u64) as u32 * SCORE_PER_SECOND + state.bonus_score;
}

/// Continuous avatar movement with diagonal normalization, sprint stamina
/// and the speed powerup, clamped to the arena
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    let mut dx = 0.0f32;
    let mut dy = 0.0f32;
    if input.up {
        dy -= 1.0;
    }
    if input.down {
        dy += 1.0;
    }
    if input.left {
        dx -= 1.0;
    }
    if input.right {
        dx += 1.0;
    }
    if dx != 0.0 && dy != 0.0 {
        dx *= FRAC_1_SQRT_2;
        dy *= FRAC_1_SQRT_2;
    }

    let mut speed = player.speed;
    if input.sprint && player.stamina > 0.0 {
        speed *= player.sprint_multiplier;
        player.stamina -= 1.0;
    } else if !input.sprint {
        player.stamina += player.stamina_regen;
    }
    player.stamina = player.stamina.clamp(0.0, player.max_stamina);

    if player.effects.is_active(PowerupKind::Speed) {
        speed *= 1.5;
    }

    let half = player.half_extents();
    player.pos += Vec2::new(dx, dy) * speed;
    player.pos = player.pos.clamp(half, state.config.arena - half);
}

/// Avatar-enemy overlaps: shield consumption, damage, knockback.
/// Returns true when the hit was lethal and the episode ended.
fn resolve_enemy_collisions(state: &mut GameState) -> bool {
    let arena = state.config.arena;
    let player_half = state.player.half_extents();

    for i in 0..state.zombies.len() {
        let (zombie_pos, zombie_half, zombie_damage) = {
            let z = &state.zombies[i];
            (z.pos, z.half_extents(), z.damage)
        };
        if !aabb_overlap(state.player.pos, player_half, zombie_pos, zombie_half) {
            continue;
        }

        if state.player.take_damage(zombie_damage) {
            state.phase = GamePhase::GameOver;
            log::info!(
                "Arena episode over, score {} after {} ticks",
                state.score,
                state.elapsed_ticks
            );
            return true;
        }

        // Fixed-magnitude knockback away from the enemy, re-clamped;
        // simultaneous hits each push independently
        let delta = state.player.pos - zombie_pos;
        let distance = delta.length().max(0.1);
        state.player.pos += delta / distance * KNOCKBACK_DISTANCE;
        state.player.pos = state.player.pos.clamp(player_half, arena - player_half);
    }

    false
}

/// Avatar-powerup overlaps: consume and apply
fn resolve_powerup_collisions(state: &mut GameState) {
    let player_half = state.player.half_extents();
    let mut picked = Vec::new();

    for (i, powerup) in state.powerups.iter().enumerate() {
        if aabb_overlap(
            state.player.pos,
            player_half,
            powerup.pos,
            powerup.half_extents(),
        ) {
            picked.push(i);
        }
    }

    for &i in picked.iter().rev() {
        let powerup = state.powerups.swap_remove(i);
        apply_powerup(state, powerup.kind);
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerupKind) {
    log::info!("Picked up {}", kind.as_str());
    state.player.effects.apply(kind, kind.duration_ticks());

    // Instantaneous payloads land once, at acquisition
    match kind {
        PowerupKind::Health => state.player.heal(25.0),
        PowerupKind::Shield => state.player.shield = true,
        PowerupKind::Nuke => {
            state.zombies.clear();
            state.bonus_score += NUKE_SCORE_BONUS;
        }
        _ => {}
    }
}

fn handle_settings(state: &mut GameState, input: &TickInput) {
    if input.nav_up {
        state.settings_cursor.up();
    }
    if input.nav_down {
        state.settings_cursor.down();
    }

    let step = input.adjust_step();
    if step != 0 {
        let settings = &mut state.settings;
        match state.settings_cursor.selected {
            0 => adjust_volume(&mut settings.master_volume, 0.1 * step as f32),
            1 => adjust_volume(&mut settings.music_volume, 0.1 * step as f32),
            2 => adjust_volume(&mut settings.sfx_volume, 0.1 * step as f32),
            3 => settings.fullscreen = !settings.fullscreen,
            _ => settings.cycle_frame_rate(step),
        }
        state.settings_dirty = true;
    }

    if input.menu {
        state.phase = state.settings_from;
    }
}
