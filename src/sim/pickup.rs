//! Power-up pickups and their spawner

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallType};
use super::timer::Repeating;
use crate::settings::PowerUpSettings;
use crate::within_radius;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Fire,
    Ice,
}

impl From<PickupKind> for BallType {
    fn from(kind: PickupKind) -> Self {
        match kind {
            PickupKind::Fire => BallType::Fire,
            PickupKind::Ice => BallType::Ice,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Cleared once collected; the spawner drops it on its next interval
    pub active: bool,
}

/// Places at most one pickup in the world at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpSpawner {
    timer: Repeating,
    positions: Vec<Vec2>,
    radius: f32,
    current: Option<Pickup>,
    next_id: u32,
}

impl PowerUpSpawner {
    pub fn new(settings: &PowerUpSettings) -> Self {
        Self {
            timer: Repeating::new(settings.spawn_interval),
            positions: settings.spawn_positions.clone(),
            radius: settings.pickup_radius,
            current: None,
            next_id: 1,
        }
    }

    /// Advance the spawn cadence; returns the pickup spawned this frame, if any
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Option<Pickup> {
        // Extra intervals in one frame would only find the new pickup still waiting
        if self.timer.tick(dt) == 0 {
            return None;
        }
        self.on_interval(rng)
    }

    /// One spawn interval elapsed: spawn unless a pickup is still waiting
    pub fn on_interval(&mut self, rng: &mut impl Rng) -> Option<Pickup> {
        if self.current.as_ref().is_some_and(|p| p.active) {
            return None;
        }
        if let Some(stale) = self.current.take() {
            log::debug!("Clearing collected pickup #{}", stale.id);
        }
        if self.positions.is_empty() {
            log::error!("No spawn positions for power-ups!");
            return None;
        }

        let pos = self.positions[rng.random_range(0..self.positions.len())];
        let kind = if rng.random_bool(0.5) {
            PickupKind::Fire
        } else {
            PickupKind::Ice
        };
        let pickup = Pickup {
            id: self.next_id,
            kind,
            pos,
            radius: self.radius,
            active: true,
        };
        self.next_id += 1;
        log::info!("Power-up {kind:?} spawned at {pos}");
        self.current = Some(pickup.clone());
        Some(pickup)
    }

    /// A paddle touched the pickup: power up the ball and deactivate
    pub fn try_collect(&mut self, paddle_pos: Vec2, paddle_radius: f32, ball: &mut Ball) -> Option<PickupKind> {
        let pickup = self.current.as_mut().filter(|p| p.active)?;
        if !within_radius(pickup.pos, pickup.radius + paddle_radius, paddle_pos) {
            return None;
        }
        ball.set_ball_type(pickup.kind.into());
        pickup.active = false;
        log::info!("Power-up {:?} collected", pickup.kind);
        Some(pickup.kind)
    }

    /// The pickup currently in the world, if it has not been collected
    pub fn active(&self) -> Option<&Pickup> {
        self.current.as_ref().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        usize::from(self.active().is_some())
    }
}
