//! Headless demo runner
//!
//! Drives both simulations for a short episode each without a renderer:
//! useful for profiling, soak-testing the tick loop, and exercising the
//! persistence round trip. A real frontend would do exactly this, plus
//! decode raw input into `TickInput` and draw the state each frame.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use cosmic_arcade::consts::{SIM_DT, TICK_RATE};
use cosmic_arcade::phase::GamePhase;
use cosmic_arcade::{HighScores, Settings, snake, zombie};

/// Cap demo episodes so an immortal snake cannot run forever
const MAX_DEMO_TICKS: u64 = 30 * TICK_RATE as u64;

fn main() {
    env_logger::init();

    let settings_path = Path::new(Settings::FILE_NAME);
    let scores_path = Path::new(HighScores::FILE_NAME);
    let settings = Settings::load(settings_path);
    let mut scores = HighScores::load(scores_path);

    let seed = now_ms();
    log::info!("Demo run with seed {}", seed);

    run_snake(seed, &settings, &mut scores);
    run_zombie(seed ^ 0x5eed, &settings, &mut scores);

    // Flush persisted state before exit
    scores.save(scores_path);
    settings.save(settings_path);

    if let Some(top) = scores.top_score() {
        log::info!("Current top score: {}", top);
    }
}

fn run_snake(seed: u64, settings: &Settings, scores: &mut HighScores) {
    let mut state = snake::GameState::new(snake::SnakeConfig::default(), seed);
    let start = snake::TickInput {
        confirm: true,
        ..Default::default()
    };
    snake::tick(&mut state, &start, SIM_DT);

    let mut pacer = FramePacer::new(settings.frame_rate);
    while state.phase == GamePhase::Playing && state.elapsed_ticks < MAX_DEMO_TICKS {
        // Wander: turn clockwise once a second to keep things interesting
        let turn = if state.elapsed_ticks % TICK_RATE as u64 == 0 {
            Some(clockwise(state.snake.direction))
        } else {
            None
        };
        let input = snake::TickInput {
            turn,
            ..Default::default()
        };
        snake::tick(&mut state, &input, SIM_DT);
        pacer.wait();
    }

    log::info!(
        "Snake demo finished: score {}, length {}",
        state.score,
        state.snake.len()
    );
    if state.phase == GamePhase::GameOver {
        scores.add_score(
            state.last_score as u64,
            state.elapsed_ms(),
            state.config.difficulty,
            now_ms(),
        );
    }
}

fn run_zombie(seed: u64, settings: &Settings, scores: &mut HighScores) {
    let mut state = zombie::GameState::new(
        zombie::ZombieConfig::default(),
        settings.clone(),
        seed,
    );
    let start = zombie::TickInput {
        confirm: true,
        ..Default::default()
    };
    zombie::tick(&mut state, &start);

    let mut pacer = FramePacer::new(settings.frame_rate);
    while state.phase == GamePhase::Playing && state.elapsed_ticks < MAX_DEMO_TICKS {
        // Stand and fight (i.e. stand)
        zombie::tick(&mut state, &zombie::TickInput::default());
        pacer.wait();
    }

    log::info!(
        "Arena demo finished: score {}, {} zombies on field",
        state.score,
        state.zombies.len()
    );
    if state.phase == GamePhase::GameOver {
        scores.add_score(
            state.score as u64,
            state.elapsed_ms(),
            state.config.difficulty,
            now_ms(),
        );
    }
}

fn clockwise(direction: snake::Direction) -> snake::Direction {
    match direction {
        snake::Direction::Up => snake::Direction::Right,
        snake::Direction::Right => snake::Direction::Down,
        snake::Direction::Down => snake::Direction::Left,
        snake::Direction::Left => snake::Direction::Up,
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Cooperative frame-rate limiter: a pacing mechanism, not a correctness
/// dependency
struct FramePacer {
    frame: Duration,
    next: Instant,
}

impl FramePacer {
    fn new(target_fps: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        Self {
            frame,
            next: Instant::now() + frame,
        }
    }

    fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        self.next += self.frame;
    }
}
