//! Human-controlled paddle
//!
//! Input is read once per presentation frame; movement is integrated on the
//! fixed step and clamped to the paddle's own half of the field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{MovementState, hit_point, reaches};
use super::ball::Ball;
use super::effects::SlowEffect;
use super::field::{Bounds, Field, Side};
use crate::settings::PaddleSettings;

/// Input for one paddle for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleInput {
    /// Raw directional axes, each in [-1, 1]
    pub axis: Vec2,
    pub run_down: bool,
    pub run_up: bool,
    pub attack_down: bool,
    pub attack_up: bool,
}

/// Which speed rule currently applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedState {
    Normal,
    Running,
    Attacking,
    Slowed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    /// Velocity measured over the last fixed step
    pub vel: Vec2,
    pub radius: f32,
    base_speed: f32,
    run_speed: f32,
    hit_reach: f32,
    hit_range: f32,
    hit_force: f32,
    axis: Vec2,
    running: bool,
    attacking: bool,
    slow: SlowEffect,
    bounds: Bounds,
}

impl Paddle {
    pub fn new(side: Side, spawn: Vec2, field: &Field, settings: &PaddleSettings, slow_factor: f32) -> Self {
        let pos = field.correct_spawn(side, spawn, crate::consts::SPAWN_NUDGE);
        Self {
            side,
            pos,
            vel: Vec2::ZERO,
            radius: settings.radius,
            base_speed: settings.speed,
            run_speed: settings.run_speed,
            hit_reach: settings.hit_reach,
            hit_range: settings.hit_range,
            hit_force: settings.hit_force,
            axis: Vec2::ZERO,
            running: false,
            attacking: false,
            slow: SlowEffect::new(slow_factor),
            bounds: field.half(side),
        }
    }

    /// Frame update: status timers, run/attack keys, and the attack itself
    pub fn update(&mut self, input: &PaddleInput, ball: &mut Ball, dt: f32) {
        self.slow.tick(dt);
        self.axis = input.axis.clamp(Vec2::NEG_ONE, Vec2::ONE);

        if input.run_down && !self.attacking {
            self.running = true;
        } else if input.run_up {
            self.running = false;
        }

        if input.attack_down {
            self.attacking = true;
            self.running = false;
            self.try_hit(ball);
        }
        if input.attack_up {
            self.attacking = false;
        }
    }

    fn try_hit(&self, ball: &mut Ball) {
        let point = hit_point(self.pos, self.side, self.hit_reach);
        if reaches(point, self.hit_range, ball) {
            ball.hit(ball.pos - self.pos, self.hit_force);
            log::debug!("{:?} paddle struck the ball", self.side);
        }
    }

    /// Fixed-step movement, clamped to this paddle's half
    pub fn integrate(&mut self, dt: f32) {
        let next = self.bounds.clamp(self.pos + self.axis * self.current_speed() * dt);
        self.vel = if dt > 0.0 { (next - self.pos) / dt } else { Vec2::ZERO };
        self.pos = next;
    }

    pub fn speed_state(&self) -> SpeedState {
        if self.attacking {
            SpeedState::Attacking
        } else if self.slow.is_active() {
            SpeedState::Slowed
        } else if self.running {
            SpeedState::Running
        } else {
            SpeedState::Normal
        }
    }

    pub fn current_speed(&self) -> f32 {
        match self.speed_state() {
            SpeedState::Attacking => 0.0,
            SpeedState::Slowed => self.base_speed * self.slow.factor(),
            SpeedState::Running => self.run_speed,
            SpeedState::Normal => self.base_speed,
        }
    }

    /// Current speed relative to the base speed
    pub fn speed_multiplier(&self) -> f32 {
        if self.base_speed > 0.0 {
            self.current_speed() / self.base_speed
        } else {
            0.0
        }
    }

    pub fn apply_slow(&mut self, duration: f32) {
        self.slow.apply(duration);
        log::info!("{:?} paddle slowed for {duration}s", self.side);
    }

    pub fn slow_remaining(&self) -> f32 {
        self.slow.remaining()
    }

    pub fn movement_state(&self) -> MovementState {
        if self.attacking {
            MovementState::Attacking
        } else if self.axis.length_squared() > 0.0 {
            MovementState::Moving
        } else {
            MovementState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::BallSettings;

    fn setup() -> (Field, Paddle, Ball) {
        let field = Field::default();
        let paddle = Paddle::new(
            Side::Left,
            Vec2::new(5.0, 5.0),
            &field,
            &PaddleSettings::default(),
            SLOW_FACTOR,
        );
        let ball = Ball::new(&field, &BallSettings::default());
        (field, paddle, ball)
    }

    fn held(axis: Vec2) -> PaddleInput {
        PaddleInput {
            axis,
            ..Default::default()
        }
    }

    #[test]
    fn test_never_crosses_centerline() {
        let (field, mut paddle, mut ball) = setup();
        for _ in 0..600 {
            paddle.update(&held(Vec2::new(1.0, 1.0)), &mut ball, SIM_DT);
            paddle.integrate(SIM_DT);
            assert!(paddle.pos.x <= field.centerline_x);
            assert!(paddle.pos.y <= field.upper_y);
        }
        assert_eq!(paddle.pos.x, field.centerline_x);
    }

    #[test]
    fn test_spawn_in_wrong_half_is_corrected() {
        let field = Field::default();
        let paddle = Paddle::new(
            Side::Left,
            Vec2::new(15.0, 5.0),
            &field,
            &PaddleSettings::default(),
            SLOW_FACTOR,
        );
        assert!((paddle.pos.x - (field.centerline_x - SPAWN_NUDGE)).abs() < 1e-5);
    }

    #[test]
    fn test_speed_state_machine() {
        let (_, mut paddle, mut ball) = setup();
        ball.pos = Vec2::new(18.0, 9.0); // out of reach
        assert_eq!(paddle.current_speed(), PADDLE_SPEED);

        let run = PaddleInput {
            run_down: true,
            ..Default::default()
        };
        paddle.update(&run, &mut ball, SIM_DT);
        assert_eq!(paddle.speed_state(), SpeedState::Running);
        assert_eq!(paddle.current_speed(), PADDLE_RUN_SPEED);

        let attack = PaddleInput {
            attack_down: true,
            ..Default::default()
        };
        paddle.update(&attack, &mut ball, SIM_DT);
        assert_eq!(paddle.speed_state(), SpeedState::Attacking);
        assert_eq!(paddle.current_speed(), 0.0);

        // Run key is ignored mid-attack
        paddle.update(&run, &mut ball, SIM_DT);
        assert_eq!(paddle.current_speed(), 0.0);

        paddle.apply_slow(5.0);
        assert_eq!(paddle.current_speed(), 0.0);

        let release = PaddleInput {
            attack_up: true,
            ..Default::default()
        };
        paddle.update(&release, &mut ball, SIM_DT);
        assert_eq!(paddle.speed_state(), SpeedState::Slowed);
        assert!((paddle.speed_multiplier() - SLOW_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_release_attack_returns_to_normal() {
        let (_, mut paddle, mut ball) = setup();
        ball.pos = Vec2::new(18.0, 9.0);
        let attack = PaddleInput {
            attack_down: true,
            ..Default::default()
        };
        paddle.update(&attack, &mut ball, SIM_DT);
        let release = PaddleInput {
            attack_up: true,
            ..Default::default()
        };
        paddle.update(&release, &mut ball, SIM_DT);
        assert_eq!(paddle.speed_state(), SpeedState::Normal);
    }

    #[test]
    fn test_attack_hits_ball_in_range() {
        let (_, mut paddle, mut ball) = setup();
        ball.pos = paddle.pos + Vec2::new(1.0, 0.0);
        let attack = PaddleInput {
            attack_down: true,
            ..Default::default()
        };
        paddle.update(&attack, &mut ball, SIM_DT);
        assert!((ball.vel - Vec2::new(HIT_FORCE, 0.0)).length() < 1e-4);
        assert!(ball.in_play);
        assert_eq!(paddle.movement_state(), MovementState::Attacking);
    }

    #[test]
    fn test_attack_misses_ball_out_of_range() {
        let (_, mut paddle, mut ball) = setup();
        ball.pos = paddle.pos + Vec2::new(4.0, 0.0);
        let attack = PaddleInput {
            attack_down: true,
            ..Default::default()
        };
        paddle.update(&attack, &mut ball, SIM_DT);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_measured_velocity() {
        let (_, mut paddle, mut ball) = setup();
        paddle.update(&held(Vec2::new(0.0, 1.0)), &mut ball, SIM_DT);
        paddle.integrate(SIM_DT);
        assert!((paddle.vel.y - PADDLE_SPEED).abs() < 1e-3);
        assert_eq!(paddle.movement_state(), MovementState::Moving);
    }
}
