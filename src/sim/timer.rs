//! Scheduled actions
//!
//! Every delayed action in a match (relaunch after a goal, the NPC's attack
//! swing, the power-up spawn cadence, the return to the menu) is a timer the
//! loop advances explicitly. Cancelling a timer is just dropping or resetting it.

use serde::{Deserialize, Serialize};

/// One-shot countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    /// A countdown that is already armed
    pub fn started(seconds: f32) -> Self {
        let mut countdown = Self::default();
        countdown.start(seconds);
        countdown
    }

    /// Arm (or re-arm) the countdown, superseding any pending one
    pub fn start(&mut self, seconds: f32) {
        self.remaining = Some(seconds.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Advance by `dt`; returns true exactly once, on the tick it elapses
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(left) => {
                let left = left - dt;
                if left <= 0.0 {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

/// Repeating timer with a fixed period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repeating {
    period: f32,
    elapsed: f32,
}

impl Repeating {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`; returns how many periods completed
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.elapsed += dt;
        if self.elapsed < self.period {
            return 0;
        }
        let fired = (self.elapsed / self.period).floor();
        self.elapsed = self.elapsed.rem_euclid(self.period);
        fired as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut c = Countdown::started(0.25);
        assert!(!c.tick(0.1));
        assert!(!c.tick(0.1));
        assert!(c.tick(0.1));
        assert!(!c.tick(0.1));
        assert!(!c.is_pending());
    }

    #[test]
    fn test_countdown_restart_supersedes() {
        let mut c = Countdown::started(0.1);
        c.tick(0.05);
        c.start(1.0);
        assert!(!c.tick(0.1));
        assert!(c.remaining().unwrap() > 0.8);
    }

    #[test]
    fn test_zero_countdown_fires_next_tick() {
        let mut c = Countdown::started(0.0);
        assert!(c.tick(0.0));
    }

    #[test]
    fn test_repeating_counts_periods() {
        let mut r = Repeating::new(1.0);
        assert_eq!(r.tick(0.5), 0);
        assert_eq!(r.tick(0.5), 1);
        assert_eq!(r.tick(2.5), 2);
        assert_eq!(r.tick(0.5), 1);
    }

    #[test]
    fn test_tiny_period_large_step_returns() {
        let mut r = Repeating::new(0.0);
        assert!(r.tick(100.0) > 0);
        assert!(r.tick(0.0) <= 1);
    }
}
