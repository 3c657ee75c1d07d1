//! Game phase machine shared by both games
//!
//! Transitions are driven exclusively by discrete input events; entering
//! `Playing` from `Menu` or `GameOver` always performs a full session reset.
//! The only time-driven behavior anywhere near the phase machine is the
//! simulation itself, which runs while `Playing` and nowhere else.

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for start/settings input
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, still rendered
    Paused,
    /// Episode ended; score recorded, waiting for restart or menu
    GameOver,
    /// Settings screen (reachable from Menu, and from Paused in the arena game)
    Settings,
}

impl GamePhase {
    /// Whether simulation state advances during this phase
    pub fn is_simulating(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Cursor over the rows of a settings screen.
///
/// Selection is explicit input-driven state: up/down wrap around the row
/// list, and the owning screen interprets left/right adjustments against
/// the selected row.
#[derive(Debug, Clone, Copy)]
pub struct SettingsCursor {
    pub selected: usize,
    rows: usize,
}

impl SettingsCursor {
    pub fn new(rows: usize) -> Self {
        Self { selected: 0, rows }
    }

    pub fn up(&mut self) {
        self.selected = if self.selected == 0 {
            self.rows - 1
        } else {
            self.selected - 1
        };
    }

    pub fn down(&mut self) {
        self.selected = (self.selected + 1) % self.rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_playing_simulates() {
        assert!(GamePhase::Playing.is_simulating());
        for phase in [
            GamePhase::Menu,
            GamePhase::Paused,
            GamePhase::GameOver,
            GamePhase::Settings,
        ] {
            assert!(!phase.is_simulating());
        }
    }

    #[test]
    fn test_cursor_wraps_both_directions() {
        let mut cursor = SettingsCursor::new(3);
        cursor.up();
        assert_eq!(cursor.selected, 2);
        cursor.down();
        assert_eq!(cursor.selected, 0);
        cursor.down();
        cursor.down();
        cursor.down();
        assert_eq!(cursor.selected, 0);
    }
}
