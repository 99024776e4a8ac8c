//! Status effects applied to contestants from outside

use serde::{Deserialize, Serialize};

/// Temporary movement-speed debuff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowEffect {
    remaining: f32,
    factor: f32,
}

impl SlowEffect {
    pub fn new(factor: f32) -> Self {
        Self {
            remaining: 0.0,
            factor,
        }
    }

    /// Start or extend the slow; an overlapping shorter slow never cuts a longer one
    pub fn apply(&mut self, duration: f32) {
        self.remaining = self.remaining.max(duration);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}
