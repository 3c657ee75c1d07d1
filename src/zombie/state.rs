//! Zombie game state and core simulation types
//!
//! All per-episode state lives on `GameState` and is rebuilt by
//! `reset_session`. Positions are continuous `Vec2` coordinates on a
//! bounded plane; hitboxes are axis-aligned boxes centered on the entity.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Difficulty;
use crate::consts::TICK_RATE;
use crate::effects::EffectTimers;
use crate::phase::{GamePhase, SettingsCursor};
use crate::settings::Settings;

/// Knockback distance applied to the avatar per enemy hit
pub const KNOCKBACK_DISTANCE: f32 = 20.0;

/// Score bonus for clearing the arena with a nuke
pub const NUKE_SCORE_BONUS: u32 = 100;

/// Survival score per second
pub const SCORE_PER_SECOND: u32 = 10;

/// Distance from an arena edge at which a roaming enemy reflects
const ROAM_EDGE_MARGIN: f32 = 20.0;

/// Rows on the settings screen: three volumes, fullscreen, frame rate
pub(super) const SETTINGS_ROWS: usize = 5;

/// Overlap test between two centered axis-aligned boxes
pub fn aabb_overlap(pos_a: Vec2, half_a: Vec2, pos_b: Vec2, half_b: Vec2) -> bool {
    let d = (pos_a - pos_b).abs();
    d.x < half_a.x + half_b.x && d.y < half_a.y + half_b.y
}

/// Powerup varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Speed,
    Freeze,
    Health,
    Shield,
    Nuke,
    SlowMo,
}

impl PowerupKind {
    /// Timed duration in ticks; 0 marks an effect applied once at pickup
    pub fn duration_ticks(&self) -> u32 {
        match self {
            PowerupKind::Speed | PowerupKind::SlowMo => 5 * TICK_RATE,
            PowerupKind::Freeze => 3 * TICK_RATE,
            PowerupKind::Health | PowerupKind::Shield | PowerupKind::Nuke => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Speed => "Speed Boost",
            PowerupKind::Freeze => "Freeze",
            PowerupKind::Health => "Health",
            PowerupKind::Shield => "Shield",
            PowerupKind::Nuke => "Nuke",
            PowerupKind::SlowMo => "Slow Motion",
        }
    }
}

/// A powerup waiting on the floor
#[derive(Debug, Clone, Copy)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub size: Vec2,
}

impl Powerup {
    pub fn new(pos: Vec2, kind: PowerupKind) -> Self {
        Self {
            pos,
            kind,
            size: Vec2::splat(25.0),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Enemy varieties with fixed base stats, scaled at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZombieKind {
    Normal,
    Tank,
    Runner,
    Exploder,
}

impl ZombieKind {
    /// Units per tick
    pub fn base_speed(&self) -> f32 {
        match self {
            ZombieKind::Normal => 2.0,
            ZombieKind::Tank => 1.0,
            ZombieKind::Runner => 3.0,
            ZombieKind::Exploder => 1.5,
        }
    }

    pub fn base_health(&self) -> f32 {
        match self {
            ZombieKind::Normal => 100.0,
            ZombieKind::Tank => 200.0,
            ZombieKind::Runner => 50.0,
            ZombieKind::Exploder => 75.0,
        }
    }

    pub fn base_damage(&self) -> f32 {
        match self {
            ZombieKind::Normal => 10.0,
            ZombieKind::Tank => 15.0,
            ZombieKind::Runner => 5.0,
            ZombieKind::Exploder => 25.0,
        }
    }
}

/// Enemy AI mode. Roaming wanders until the player enters detection range;
/// chase never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    Roam,
    Chase,
}

/// One enemy
#[derive(Debug, Clone)]
pub struct Zombie {
    pub pos: Vec2,
    pub kind: ZombieKind,
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
    pub size: Vec2,
    pub elite: bool,
    pub mode: AiMode,
    /// Roam heading in radians
    pub heading: f32,
    /// Ticks until the roam heading re-randomizes
    pub roam_timer: u32,
    pub detection_radius: f32,
}

impl Zombie {
    /// Build an enemy at `pos`, applying difficulty scaling and the random
    /// elite upgrade
    pub fn new(kind: ZombieKind, pos: Vec2, difficulty: Difficulty, rng: &mut Pcg32) -> Self {
        let (speed_mul, damage_mul, health_mul) = match difficulty {
            Difficulty::Easy => (0.8, 0.8, 1.0),
            Difficulty::Normal | Difficulty::Endless => (1.0, 1.0, 1.0),
            Difficulty::Hard => (1.2, 1.2, 1.2),
        };

        let mut speed = kind.base_speed() * speed_mul;
        let mut health = kind.base_health() * health_mul;
        let mut damage = kind.base_damage() * damage_mul;
        let mut size = Vec2::splat(30.0);

        let elite = rng.random_bool(0.1);
        if elite {
            speed *= 1.3;
            health *= 1.5;
            damage *= 1.2;
            size += Vec2::splat(10.0);
        }

        let mode = if rng.random_bool(0.3) {
            AiMode::Roam
        } else {
            AiMode::Chase
        };

        Self {
            pos,
            kind,
            speed,
            health,
            damage,
            size,
            elite,
            mode,
            heading: rng.random_range(0.0..TAU),
            roam_timer: rng.random_range(30..=90),
            detection_radius: 250.0,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Advance one tick toward (or around) the player.
    ///
    /// `frozen` halts all movement; `slow` halves speed. Both come from the
    /// player's active effects.
    pub fn advance(
        &mut self,
        player_pos: Vec2,
        frozen: bool,
        slow: bool,
        arena: Vec2,
        rng: &mut Pcg32,
    ) {
        if frozen {
            return;
        }
        let speed = self.speed * if slow { 0.5 } else { 1.0 };

        if self.mode == AiMode::Roam {
            if self.pos.distance(player_pos) < self.detection_radius {
                // Once alerted there is no going back
                self.mode = AiMode::Chase;
            } else {
                self.roam_timer = self.roam_timer.saturating_sub(1);
                if self.roam_timer == 0 {
                    self.heading = rng.random_range(0.0..TAU);
                    self.roam_timer = rng.random_range(30..=90);
                }

                let mut dir = Vec2::new(self.heading.cos(), self.heading.sin());
                if self.pos.x <= ROAM_EDGE_MARGIN || self.pos.x >= arena.x - ROAM_EDGE_MARGIN {
                    self.heading = PI - self.heading;
                    dir.x = -dir.x;
                }
                if self.pos.y <= ROAM_EDGE_MARGIN || self.pos.y >= arena.y - ROAM_EDGE_MARGIN {
                    self.heading = -self.heading;
                    dir.y = -dir.y;
                }

                self.pos += dir * speed;
                self.pos = self.pos.clamp(Vec2::ZERO, arena);
                return;
            }
        }

        let delta = player_pos - self.pos;
        let distance = delta.length().max(0.1);
        self.pos += delta / distance * speed;
        self.pos = self.pos.clamp(Vec2::ZERO, arena);
    }
}

/// The player avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per tick before modifiers
    pub speed: f32,
    pub max_health: f32,
    pub health: f32,
    pub max_stamina: f32,
    pub stamina: f32,
    pub stamina_regen: f32,
    pub sprint_multiplier: f32,
    /// One-hit protection latch, consumed by the next hit
    pub shield: bool,
    pub effects: EffectTimers<PowerupKind>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(40.0),
            speed: 5.0,
            max_health: 100.0,
            health: 100.0,
            max_stamina: 100.0,
            stamina: 100.0,
            stamina_regen: 0.5,
            sprint_multiplier: 1.5,
            shield: false,
            effects: EffectTimers::new(),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Apply a hit; the shield absorbs it whole. Returns true when lethal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.shield {
            self.shield = false;
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.health <= 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}

/// Per-session configuration, fixed at reset time
#[derive(Debug, Clone)]
pub struct ZombieConfig {
    pub arena: Vec2,
    pub difficulty: Difficulty,
    /// Maximum concurrent powerups on the floor
    pub max_powerups: usize,
    /// Ticks between powerup spawn attempts
    pub powerup_interval: u32,
}

impl Default for ZombieConfig {
    fn default() -> Self {
        Self {
            arena: Vec2::new(1280.0, 720.0),
            difficulty: Difficulty::Normal,
            max_powerups: 3,
            powerup_interval: 10 * TICK_RATE,
        }
    }
}

impl ZombieConfig {
    /// Initial ticks between enemy spawns
    pub fn spawn_interval(&self) -> u32 {
        match self.difficulty {
            Difficulty::Easy => 90,
            Difficulty::Normal | Difficulty::Endless => 60,
            Difficulty::Hard => 45,
        }
    }
}

/// Complete zombie game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: ZombieConfig,
    /// Persisted preferences, adjustable on the settings screen; the
    /// embedder owns flushing them to disk
    pub settings: Settings,
    pub phase: GamePhase,
    pub player: Player,
    pub zombies: Vec<Zombie>,
    pub powerups: Vec<Powerup>,
    /// Time-derived survival score plus accumulated bonuses
    pub score: u32,
    pub(super) bonus_score: u32,
    pub elapsed_ticks: u64,
    pub(super) spawn_timer: u32,
    pub(super) powerup_timer: u32,
    /// Current enemy spawn interval (shrinks on Endless)
    pub spawn_interval: u32,
    pub(super) ramp_timer: u32,
    pub settings_cursor: SettingsCursor,
    /// Phase to return to when leaving the settings screen
    pub(super) settings_from: GamePhase,
    /// Set when the settings screen changed something the embedder should
    /// persist
    pub settings_dirty: bool,
    pub(super) rng: Pcg32,
}

impl GameState {
    pub fn new(config: ZombieConfig, settings: Settings, seed: u64) -> Self {
        let player = Player::new(config.arena * 0.5);
        let spawn_interval = config.spawn_interval();
        Self {
            config,
            settings,
            phase: GamePhase::Menu,
            player,
            zombies: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            bonus_score: 0,
            elapsed_ticks: 0,
            spawn_timer: 0,
            powerup_timer: 0,
            spawn_interval,
            ramp_timer: 0,
            settings_cursor: SettingsCursor::new(SETTINGS_ROWS),
            settings_from: GamePhase::Menu,
            settings_dirty: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Rebuild all per-episode state: fresh avatar, empty arena, zeroed
    /// score and timers
    pub fn reset_session(&mut self) {
        self.player = Player::new(self.config.arena * 0.5);
        self.zombies.clear();
        self.powerups.clear();
        self.score = 0;
        self.bonus_score = 0;
        self.elapsed_ticks = 0;
        self.spawn_timer = 0;
        self.powerup_timer = 0;
        self.spawn_interval = self.config.spawn_interval();
        self.ramp_timer = 0;
    }

    /// Episode length in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ticks * 1000 / TICK_RATE as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_aabb_overlap() {
        let half = Vec2::splat(20.0);
        assert!(aabb_overlap(
            Vec2::new(100.0, 100.0),
            half,
            Vec2::new(130.0, 100.0),
            half
        ));
        assert!(!aabb_overlap(
            Vec2::new(100.0, 100.0),
            half,
            Vec2::new(141.0, 100.0),
            half
        ));
    }

    #[test]
    fn test_shield_absorbs_one_hit() {
        let mut player = Player::new(Vec2::new(640.0, 360.0));
        player.shield = true;

        assert!(!player.take_damage(50.0));
        assert_eq!(player.health, 100.0);
        assert!(!player.shield);

        assert!(!player.take_damage(50.0));
        assert_eq!(player.health, 50.0);
    }

    #[test]
    fn test_health_never_goes_negative() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.take_damage(500.0));
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = Player::new(Vec2::ZERO);
        player.health = 90.0;
        player.heal(25.0);
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn test_difficulty_scales_enemy_stats() {
        // Elite is a 10% roll; draw until we get a plain one of each
        fn plain(difficulty: Difficulty) -> Zombie {
            let mut r = Pcg32::seed_from_u64(7);
            loop {
                let z = Zombie::new(ZombieKind::Normal, Vec2::ZERO, difficulty, &mut r);
                if !z.elite {
                    return z;
                }
            }
        }
        let easy = plain(Difficulty::Easy);
        let hard = plain(Difficulty::Hard);
        assert!((easy.speed - 1.6).abs() < 1e-5);
        assert!((easy.damage - 8.0).abs() < 1e-5);
        assert!((easy.health - 100.0).abs() < 1e-5);
        assert!((hard.speed - 2.4).abs() < 1e-5);
        assert!((hard.health - 120.0).abs() < 1e-5);
    }

    #[test]
    fn test_chase_moves_straight_at_player() {
        // Enemy at (640, 0) closing on a player at (640, 360) with speed 2
        let mut zombie = Zombie::new(
            ZombieKind::Normal,
            Vec2::new(640.0, 0.0),
            Difficulty::Normal,
            &mut rng(),
        );
        zombie.mode = AiMode::Chase;
        zombie.speed = 2.0;

        let arena = Vec2::new(1280.0, 720.0);
        zombie.advance(Vec2::new(640.0, 360.0), false, false, arena, &mut rng());

        assert!((zombie.pos.x - 640.0).abs() < 1e-4);
        assert!((zombie.pos.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_frozen_enemy_does_not_move() {
        let mut zombie = Zombie::new(
            ZombieKind::Runner,
            Vec2::new(100.0, 100.0),
            Difficulty::Normal,
            &mut rng(),
        );
        zombie.mode = AiMode::Chase;
        let before = zombie.pos;
        zombie.advance(
            Vec2::new(640.0, 360.0),
            true,
            false,
            Vec2::new(1280.0, 720.0),
            &mut rng(),
        );
        assert_eq!(zombie.pos, before);
    }

    #[test]
    fn test_slow_halves_chase_speed() {
        let arena = Vec2::new(1280.0, 720.0);
        let mut zombie = Zombie::new(
            ZombieKind::Normal,
            Vec2::new(640.0, 0.0),
            Difficulty::Normal,
            &mut rng(),
        );
        zombie.mode = AiMode::Chase;
        zombie.speed = 2.0;
        zombie.advance(Vec2::new(640.0, 360.0), false, true, arena, &mut rng());
        assert!((zombie.pos.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_roam_switches_to_chase_in_detection_range() {
        let mut zombie = Zombie::new(
            ZombieKind::Normal,
            Vec2::new(600.0, 360.0),
            Difficulty::Normal,
            &mut rng(),
        );
        zombie.mode = AiMode::Roam;
        zombie.advance(
            Vec2::new(640.0, 360.0),
            false,
            false,
            Vec2::new(1280.0, 720.0),
            &mut rng(),
        );
        assert_eq!(zombie.mode, AiMode::Chase);
    }

    #[test]
    fn test_roam_ignores_player_outside_range() {
        let mut zombie = Zombie::new(
            ZombieKind::Normal,
            Vec2::new(100.0, 100.0),
            Difficulty::Normal,
            &mut rng(),
        );
        zombie.mode = AiMode::Roam;
        zombie.advance(
            Vec2::new(1200.0, 700.0),
            false,
            false,
            Vec2::new(1280.0, 720.0),
            &mut rng(),
        );
        assert_eq!(zombie.mode, AiMode::Roam);
    }
}
