//! Computer-controlled paddle
//!
//! The NPC only thinks every `reaction_time` seconds. Each decision either
//! commits to an attack (ball within reach) or re-plans a movement target
//! from a linear extrapolation of the ball. Bounces are ignored, so the
//! prediction gets worse the further ahead it looks.
//!
//! Speed precedence, highest first:
//! 1. attacking: 0
//! 2. running while slowed: `base * slow * 1.2`
//! 3. slowed: `base * slow`
//! 4. running: `base * run_multiplier`
//! 5. base

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{MovementState, hit_point, reaches};
use super::ball::Ball;
use super::effects::SlowEffect;
use super::field::{Field, Side};
use super::timer::Countdown;
use crate::consts::{NPC_MOVING_THRESHOLD_SQ, SLOWED_RUN_BONUS};
use crate::settings::NpcSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcMode {
    Positioning,
    Attacking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub side: Side,
    pub pos: Vec2,
    /// Velocity measured over the last fixed step
    pub vel: Vec2,
    pub radius: f32,
    base_speed: f32,
    run_multiplier: f32,
    reaction_time: f32,
    anticipation: f32,
    attack_range: f32,
    attack_buffer: f32,
    defense_offset: f32,
    hit_reach: f32,
    hit_force: f32,
    mode: NpcMode,
    target: Vec2,
    running: bool,
    speed: f32,
    swing: Countdown,
    next_decision_at: f32,
    slow: SlowEffect,
    field: Field,
}

impl Npc {
    pub fn new(side: Side, spawn: Vec2, field: &Field, settings: &NpcSettings, slow_factor: f32) -> Self {
        // The defensive line never sits past the centerline
        let defense_offset = settings.defense_offset.max(0.0);
        let pos = field.correct_spawn(side, spawn, defense_offset);
        let reaction_time = if settings.reaction_time.is_finite() && settings.reaction_time >= 0.0 {
            settings.reaction_time
        } else {
            log::warn!(
                "NPC reaction time {} is invalid; deciding every frame",
                settings.reaction_time
            );
            0.0
        };
        Self {
            side,
            pos,
            vel: Vec2::ZERO,
            radius: settings.radius,
            base_speed: settings.speed,
            run_multiplier: settings.run_multiplier,
            reaction_time,
            anticipation: settings.anticipation,
            attack_range: settings.attack_range,
            attack_buffer: settings.attack_buffer,
            defense_offset,
            hit_reach: settings.hit_reach,
            hit_force: settings.hit_force,
            mode: NpcMode::Positioning,
            target: pos,
            running: false,
            speed: settings.speed,
            swing: Countdown::default(),
            next_decision_at: 0.0,
            slow: SlowEffect::new(slow_factor),
            field: *field,
        }
    }

    /// Frame update at match time `now`
    pub fn update(&mut self, now: f32, dt: f32, ball: &mut Ball) {
        self.slow.tick(dt);

        match self.mode {
            NpcMode::Attacking => {
                if self.swing.tick(dt) {
                    self.perform_hit(ball);
                }
            }
            NpcMode::Positioning => {
                if now >= self.next_decision_at {
                    self.decide(ball);
                    self.next_decision_at = now + self.reaction_time;
                }
            }
        }

        self.speed = self.effective_speed();
    }

    /// Attack if the ball is within reach, otherwise re-plan movement
    pub fn decide(&mut self, ball: &Ball) {
        if self.ball_in_reach(ball) {
            self.start_attack();
        } else {
            self.plan_movement(ball);
        }
    }

    /// Aim at where the ball will be, inside our defensible half
    pub fn plan_movement(&mut self, ball: &Ball) {
        let predicted = ball.pos + ball.vel * self.anticipation;
        let line_x = self.field.centerline_x + self.defense_offset * self.side.outward_sign();
        let wall_x = self.field.wall_x(self.side);
        let (min_x, max_x) = if line_x <= wall_x {
            (line_x, wall_x)
        } else {
            (wall_x, line_x)
        };
        self.target = Vec2::new(
            predicted.x.clamp(min_x, max_x),
            predicted.y.clamp(self.field.lower_y, self.field.upper_y),
        );

        // Ball still on our half but heading back out: sprint to cut it off
        let heading_out = ball.vel.x * self.side.outward_sign() < 0.0;
        self.running = heading_out && self.field.on_side(self.side, ball.pos.x);
    }

    fn start_attack(&mut self) {
        self.mode = NpcMode::Attacking;
        self.running = false;
        self.swing.start(self.attack_buffer);
        self.speed = 0.0;
    }

    /// Swing: the ball may have moved during the buffer, so check again
    fn perform_hit(&mut self, ball: &mut Ball) {
        if self.ball_in_reach(ball) {
            ball.hit(ball.pos - self.pos, self.hit_force);
            log::debug!("{:?} NPC struck the ball", self.side);
        } else {
            log::debug!("{:?} NPC swung and missed", self.side);
        }
        self.mode = NpcMode::Positioning;
    }

    fn ball_in_reach(&self, ball: &Ball) -> bool {
        reaches(hit_point(self.pos, self.side, self.hit_reach), self.attack_range, ball)
    }

    pub fn effective_speed(&self) -> f32 {
        if self.mode == NpcMode::Attacking {
            return 0.0;
        }
        let base = self.base_speed;
        match (self.slow.is_active(), self.running) {
            (true, true) => base * self.slow.factor() * SLOWED_RUN_BONUS,
            (true, false) => base * self.slow.factor(),
            (false, true) => base * self.run_multiplier,
            (false, false) => base,
        }
    }

    /// Fixed-step seek toward the target, clamped to our half
    pub fn integrate(&mut self, dt: f32) {
        let dir = (self.target - self.pos).normalize_or_zero();
        let next = self.field.half(self.side).clamp(self.pos + dir * self.speed * dt);
        self.vel = if dt > 0.0 { (next - self.pos) / dt } else { Vec2::ZERO };
        self.pos = next;
    }

    pub fn apply_slow(&mut self, duration: f32) {
        self.slow.apply(duration);
        self.speed = self.effective_speed();
        log::info!("{:?} NPC slowed for {duration}s", self.side);
    }

    pub fn slow_remaining(&self) -> f32 {
        self.slow.remaining()
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.base_speed > 0.0 {
            self.speed / self.base_speed
        } else {
            0.0
        }
    }

    pub fn current_speed(&self) -> f32 {
        self.speed
    }

    pub fn mode(&self) -> NpcMode {
        self.mode
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn movement_state(&self) -> MovementState {
        if self.mode == NpcMode::Attacking {
            MovementState::Attacking
        } else if self.vel.length_squared() > NPC_MOVING_THRESHOLD_SQ {
            MovementState::Moving
        } else {
            MovementState::Idle
        }
    }
}
