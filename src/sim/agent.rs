//! Shared contestant plumbing: the per-side slot, reach checks, animation signal

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::field::Side;
use super::npc::Npc;
use super::paddle::Paddle;
use crate::within_radius;

/// Animation driver signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    Idle = 0,
    Moving = 1,
    Attacking = 2,
}

impl MovementState {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Point in front of a contestant (toward the centerline) its strikes originate from
pub fn hit_point(pos: Vec2, side: Side, reach: f32) -> Vec2 {
    pos - Vec2::new(side.outward_sign() * reach, 0.0)
}

/// Range query: does a circle of `range` around `point` touch the ball?
pub fn reaches(point: Vec2, range: f32, ball: &Ball) -> bool {
    within_radius(point, range + ball.radius, ball.pos)
}

/// Whoever occupies one side of the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Contestant {
    Human(Paddle),
    Npc(Npc),
}

impl Contestant {
    pub fn side(&self) -> Side {
        match self {
            Contestant::Human(p) => p.side,
            Contestant::Npc(n) => n.side,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Contestant::Human(p) => p.pos,
            Contestant::Npc(n) => n.pos,
        }
    }

    pub fn vel(&self) -> Vec2 {
        match self {
            Contestant::Human(p) => p.vel,
            Contestant::Npc(n) => n.vel,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Contestant::Human(p) => p.radius,
            Contestant::Npc(n) => n.radius,
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        match self {
            Contestant::Human(p) => p.integrate(dt),
            Contestant::Npc(n) => n.integrate(dt),
        }
    }

    pub fn apply_slow(&mut self, duration: f32) {
        match self {
            Contestant::Human(p) => p.apply_slow(duration),
            Contestant::Npc(n) => n.apply_slow(duration),
        }
    }

    pub fn slow_remaining(&self) -> f32 {
        match self {
            Contestant::Human(p) => p.slow_remaining(),
            Contestant::Npc(n) => n.slow_remaining(),
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Contestant::Human(p) => p.speed_multiplier(),
            Contestant::Npc(n) => n.speed_multiplier(),
        }
    }

    pub fn movement_state(&self) -> MovementState {
        match self {
            Contestant::Human(p) => p.movement_state(),
            Contestant::Npc(n) => n.movement_state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_point_faces_centerline() {
        let origin = Vec2::new(5.0, 5.0);
        assert_eq!(hit_point(origin, Side::Left, 0.5), Vec2::new(5.5, 5.0));
        assert_eq!(hit_point(origin, Side::Right, 0.5), Vec2::new(4.5, 5.0));
    }

    #[test]
    fn test_movement_state_values() {
        assert_eq!(MovementState::Idle.as_i32(), 0);
        assert_eq!(MovementState::Moving.as_i32(), 1);
        assert_eq!(MovementState::Attacking.as_i32(), 2);
    }
}
