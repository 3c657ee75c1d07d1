//! Snake fixed-timestep tick
//!
//! One call advances the simulation by `dt` seconds. The head only moves
//! when the move timer crosses the difficulty-derived delay; everything else
//! (phase transitions, effect decay) runs per tick.

use super::state::{Direction, EFFECT_DURATION_TICKS, GameState};
use crate::Difficulty;
use crate::phase::GamePhase;

/// Input for a single tick, already decoded from raw events by the frontend
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Most recent turn request this frame
    pub turn: Option<Direction>,
    /// Confirm / start (menu, game-over restart)
    pub confirm: bool,
    /// Toggle pause
    pub pause: bool,
    /// Open the settings screen (from the menu)
    pub open_settings: bool,
    /// Back out to the menu (or leave the settings screen)
    pub menu: bool,
    /// Settings-screen navigation
    pub nav_up: bool,
    pub nav_down: bool,
    /// Settings-screen adjustment of the selected row
    pub adjust_left: bool,
    pub adjust_right: bool,
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

/// Advance the game by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                state.reset_session();
                state.phase = GamePhase::Playing;
                log::info!("Snake episode started ({})", state.config.difficulty.as_str());
            } else if input.open_settings {
                state.phase = GamePhase::Settings;
            }
        }

        GamePhase::Settings => {
            handle_settings(state, input);
        }

        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
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
            simulate(state, input, dt);
        }
    }
}

/// One Playing-phase step: turn intake, gated movement, food check,
/// effect decay
fn simulate(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(turn) = input.turn {
        state.snake.set_direction(turn);
    }

    state.elapsed_ticks += 1;

    let delay = 1.0 / (state.config.base_speed() * state.speed_factor());
    state.move_timer += dt;
    if state.move_timer >= delay {
        state.move_timer = 0.0;

        if let Err(reason) = state.try_step() {
            state.death_reason = Some(reason);
            state.last_score = state.score;
            state.high_score = state.high_score.max(state.score);
            state.phase = GamePhase::GameOver;
            log::info!("Snake episode over ({:?}), score {}", reason, state.score);
            return;
        }

        // Food is an exact-equality check against the fresh head cell
        if state.snake.head() == state.food.pos {
            let food = state.food;
            state.score += food.kind.value();
            state.snake.grow_queue += food.kind.growth();
            if let Some(effect) = food.kind.effect() {
                // Most recent pickup wins outright; no stacking, no mixing
                state.effects.clear();
                state.effects.apply(effect, EFFECT_DURATION_TICKS);
            }
            state.respawn_food();
        }
    }

    state.effects.tick();
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
        match state.settings_cursor.selected {
            0 => {
                // The snake game plays Easy/Normal/Hard; skip Endless
                let mut difficulty = state.config.difficulty.cycled(step);
                if difficulty == Difficulty::Endless {
                    difficulty = difficulty.cycled(step);
                }
                state.config.difficulty = difficulty;
            }
            1 => state.config.special_foods = !state.config.special_foods,
            _ => state.config.obstacles = !state.config.obstacles,
        }
    }

    if input.menu {
        state.phase = GamePhase::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::state::{
        DeathReason, Food, FoodKind, INITIAL_LENGTH, Point, Snake, SnakeConfig, SnakeEffect,
    };
    use crate::snake::world::Grid;

    /// dt large enough to trigger exactly one move step at Normal speed
    fn step_dt(state: &GameState) -> f32 {
        1.0 / (state.config.base_speed() * state.speed_factor())
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(
            SnakeConfig {
                obstacles: false,
                special_foods: false,
                ..SnakeConfig::default()
            },
            123,
        );
        state.phase = GamePhase::Playing;
        let grid = Grid::new(40, 30);
        state.snake = Snake::new(Point::new(20, 15), Direction::Right, &grid);
        state.food = Food {
            pos: Point::new(0, 0),
            kind: FoodKind::Normal,
        };
        state
    }

    #[test]
    fn test_menu_confirm_starts_fresh_episode() {
        let mut state = GameState::new(SnakeConfig::default(), 9);
        state.score = 30;
        let input = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &input, 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = playing_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 1.0);
        assert_eq!(state.phase, GamePhase::Paused);

        let head_before = state.snake.head();
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.snake.head(), head_before);

        tick(&mut state, &pause, 1.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_head_advances_one_cell_per_move_step() {
        let mut state = playing_state();
        let dt = step_dt(&state);
        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.snake.head(), Point::new(21, 15));
        assert_eq!(state.snake.len(), INITIAL_LENGTH);

        // A shorter tick accumulates but does not move
        tick(&mut state, &TickInput::default(), dt * 0.25);
        assert_eq!(state.snake.head(), Point::new(21, 15));
    }

    #[test]
    fn test_consumption_grows_over_following_ticks() {
        // 40x30 grid, length 3 at (20,15) heading right, food dead ahead
        // at (21,15) with growth 1
        let mut state = playing_state();
        state.food = Food {
            pos: Point::new(21, 15),
            kind: FoodKind::Normal,
        };
        let dt = step_dt(&state);

        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.snake.head(), Point::new(21, 15));
        assert_eq!(state.snake.len(), INITIAL_LENGTH);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.grow_queue, 1);
        // Food was immediately replaced somewhere else
        assert_ne!(state.food.pos, Point::new(21, 15));
        // Park the replacement food out of the flight path
        state.food = Food {
            pos: Point::new(0, 0),
            kind: FoodKind::Normal,
        };

        // No tail pop on the tick immediately following consumption
        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.snake.len(), INITIAL_LENGTH + 1);

        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.snake.len(), INITIAL_LENGTH + 1);
    }

    #[test]
    fn test_speed_food_replaces_prior_effect() {
        let mut state = playing_state();
        state.effects.apply(SnakeEffect::SlowMotion, 77);
        state.food = Food {
            pos: Point::new(21, 15),
            kind: FoodKind::Speed,
        };
        let dt = step_dt(&state);
        tick(&mut state, &TickInput::default(), dt);

        assert!(state.effects.is_active(SnakeEffect::SpeedBoost));
        assert!(!state.effects.is_active(SnakeEffect::SlowMotion));
        // Duration is the fresh pickup's full value, minus this tick's decay
        assert_eq!(
            state.effects.remaining(SnakeEffect::SpeedBoost),
            Some(EFFECT_DURATION_TICKS - 1)
        );
    }

    #[test]
    fn test_obstacle_collision_ends_episode() {
        let mut state = playing_state();
        state.score = 4;
        state.grid.set_obstacle(Point::new(21, 15));

        let dt = step_dt(&state);
        tick(&mut state, &TickInput::default(), dt);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::ObstacleCollision));
        assert_eq!(state.last_score, 4);
        // The head never entered the obstacle cell
        assert_eq!(state.snake.head(), Point::new(20, 15));
    }

    #[test]
    fn test_reversal_ignored_mid_flight() {
        let mut state = playing_state();
        let dt = step_dt(&state);
        let input = TickInput {
            turn: Some(Direction::Left),
            ..Default::default()
        };
        tick(&mut state, &input, dt);
        // Still heading right: the reversal was rejected
        assert_eq!(state.snake.head(), Point::new(21, 15));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_settings_cursor_and_adjust() {
        let mut state = GameState::new(SnakeConfig::default(), 11);
        let open = TickInput {
            open_settings: true,
            ..Default::default()
        };
        tick(&mut state, &open, 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Settings);

        // Row 0: difficulty cycles without entering Endless
        let right = TickInput {
            adjust_right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 1.0 / 60.0);
        assert_eq!(state.config.difficulty, Difficulty::Hard);
        tick(&mut state, &right, 1.0 / 60.0);
        assert_eq!(state.config.difficulty, Difficulty::Easy);

        // Row 1 toggles special foods
        let down_and_toggle = TickInput {
            nav_down: true,
            adjust_left: true,
            ..Default::default()
        };
        tick(&mut state, &down_and_toggle, 1.0 / 60.0);
        assert!(!state.config.special_foods);

        let back = TickInput {
            menu: true,
            ..Default::default()
        };
        tick(&mut state, &back, 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_game_over_restart_resets() {
        let mut state = playing_state();
        state.score = 12;
        state.phase = GamePhase::GameOver;
        state.last_score = 12;

        let restart = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &restart, 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), INITIAL_LENGTH);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Body length always equals the initial length plus applied
            /// growth, whatever the (non-fatal) input sequence
            #[test]
            fn prop_length_tracks_growth(turns in proptest::collection::vec(0u8..5, 1..60)) {
                let mut state = playing_state();
                let dt = step_dt(&state);
                let mut eaten_growth = 0u32;

                for t in turns {
                    let turn = match t {
                        0 => Some(Direction::Up),
                        1 => Some(Direction::Down),
                        2 => Some(Direction::Left),
                        3 => Some(Direction::Right),
                        _ => None,
                    };
                    let score_before = state.score;
                    tick(&mut state, &TickInput { turn, ..Default::default() }, dt);
                    if state.phase != GamePhase::Playing {
                        break;
                    }
                    if state.score > score_before {
                        eaten_growth += 1; // Normal food only in this config
                    }
                }

                prop_assert_eq!(
                    state.snake.len() as u32 + state.snake.grow_queue,
                    INITIAL_LENGTH as u32 + eaten_growth
                );
            }
        }
    }
}
