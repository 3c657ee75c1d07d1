//! Timed gameplay modifiers
//!
//! Active effects are stored as kind -> remaining ticks and decremented once
//! per simulation tick. Acquiring a kind that is already active overwrites
//! its remaining duration; durations never stack. Instantaneous effects
//! enter the table with duration 0 (their action happens at acquisition
//! time) and fall out on the next decrement.
//!
//! Shield-style one-hit protections are not effect timers; they live as a
//! boolean latch on the entity that owns them.

/// Table of active timed effects, in acquisition order
#[derive(Debug, Clone)]
pub struct EffectTimers<K> {
    active: Vec<(K, u32)>,
}

impl<K> Default for EffectTimers<K> {
    fn default() -> Self {
        Self { active: Vec::new() }
    }
}

impl<K> EffectTimers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl<K: Copy + PartialEq> EffectTimers<K> {
    /// Activate an effect, replacing any prior duration of the same kind
    pub fn apply(&mut self, kind: K, duration_ticks: u32) {
        if let Some(entry) = self.active.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = duration_ticks;
        } else {
            self.active.push((kind, duration_ticks));
        }
    }

    /// Advance one tick: decrement every duration, dropping expired entries
    pub fn tick(&mut self) {
        for entry in &mut self.active {
            entry.1 = entry.1.saturating_sub(1);
        }
        self.active.retain(|(_, ticks)| *ticks > 0);
    }

    pub fn is_active(&self, kind: K) -> bool {
        self.active.iter().any(|(k, _)| *k == kind)
    }

    pub fn remaining(&self, kind: K) -> Option<u32> {
        self.active
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, ticks)| *ticks)
    }

    /// Active kinds with their remaining ticks (HUD display)
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.active.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Haste,
        Chill,
    }

    #[test]
    fn test_effect_expires_after_duration() {
        let mut timers = EffectTimers::new();
        timers.apply(Kind::Haste, 3);

        for _ in 0..2 {
            timers.tick();
            assert!(timers.is_active(Kind::Haste));
        }
        timers.tick();
        assert!(!timers.is_active(Kind::Haste));
    }

    #[test]
    fn test_reacquire_resets_duration() {
        let mut timers = EffectTimers::new();
        timers.apply(Kind::Haste, 10);
        timers.tick();
        timers.tick();
        assert_eq!(timers.remaining(Kind::Haste), Some(8));

        // A fresh pickup resets the clock, it does not extend it
        timers.apply(Kind::Haste, 10);
        assert_eq!(timers.remaining(Kind::Haste), Some(10));
    }

    #[test]
    fn test_instantaneous_effect_removed_on_next_tick() {
        let mut timers = EffectTimers::new();
        timers.apply(Kind::Chill, 0);
        assert!(timers.is_active(Kind::Chill));

        timers.tick();
        assert!(!timers.is_active(Kind::Chill));
    }

    #[test]
    fn test_kinds_tracked_independently() {
        let mut timers = EffectTimers::new();
        timers.apply(Kind::Haste, 2);
        timers.apply(Kind::Chill, 5);

        timers.tick();
        timers.tick();
        assert!(!timers.is_active(Kind::Haste));
        assert_eq!(timers.remaining(Kind::Chill), Some(3));
    }
}
