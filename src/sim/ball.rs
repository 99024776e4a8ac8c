//! The ball
//!
//! Owns its own kinematics, the power-up type timer and the relaunch timer,
//! and reports goals to a single subscriber through an outbox.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::{Field, Side};
use super::timer::Countdown;
use crate::consts::*;
use crate::settings::BallSettings;

/// Temporary modifier carried by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallType {
    #[default]
    Normal,
    Fire,
    Ice,
}

impl BallType {
    /// Life taken from the conceding side
    pub fn damage(self) -> i32 {
        match self {
            BallType::Fire => 2,
            BallType::Normal | BallType::Ice => 1,
        }
    }

    /// Sprite scale handed to the renderer
    pub fn visual_scale(self) -> f32 {
        match self {
            BallType::Normal => 1.0,
            BallType::Fire => 1.3,
            BallType::Ice => 1.15,
        }
    }
}

/// Ball entered a goal zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalEvent {
    /// The goal zone that was entered
    pub goal: Side,
    /// Ball X at the moment of entry
    pub ball_x: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub in_play: bool,
    ball_type: BallType,
    damage: i32,
    scale: f32,
    power_up_remaining: f32,
    power_up_duration: f32,
    relaunch_speed: f32,
    relaunch_delay: f32,
    relaunch: Countdown,
    /// Kickoff spot, used as the recenter height
    rest: Vec2,
    centerline_x: f32,
    /// Ticks before paddles can bounce the ball again
    pub paddle_cooldown: u32,
    subscribed: bool,
    #[serde(skip)]
    goals: Vec<GoalEvent>,
}

impl Ball {
    /// A motionless ball at the field's rest spot
    pub fn new(field: &Field, settings: &BallSettings) -> Self {
        Self {
            pos: field.ball_rest,
            vel: Vec2::ZERO,
            radius: settings.radius,
            in_play: false,
            ball_type: BallType::Normal,
            damage: BallType::Normal.damage(),
            scale: BallType::Normal.visual_scale(),
            power_up_remaining: 0.0,
            power_up_duration: settings.power_up_duration,
            relaunch_speed: settings.relaunch_speed,
            relaunch_delay: settings.relaunch_delay,
            relaunch: Countdown::default(),
            rest: field.ball_rest,
            centerline_x: field.centerline_x,
            paddle_cooldown: 0,
            subscribed: false,
            goals: Vec::new(),
        }
    }

    pub fn ball_type(&self) -> BallType {
        self.ball_type
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn power_up_remaining(&self) -> f32 {
        self.power_up_remaining
    }

    pub fn relaunch_pending(&self) -> bool {
        self.relaunch.is_pending()
    }

    /// Serve from where the ball sits: random side, slight vertical spread
    pub fn launch(&mut self, rng: &mut impl Rng) {
        let x = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let y = rng.random_range(-BALL_LAUNCH_SPREAD..BALL_LAUNCH_SPREAD);
        self.vel = Vec2::new(x, y).normalize() * self.relaunch_speed;
        self.in_play = true;
        log::debug!("Ball launched from center with velocity {}", self.vel);
    }

    /// Bend the ball's direction by the paddle's vertical motion; speed is kept
    pub fn on_paddle_collision(&mut self, paddle_velocity_y: f32) {
        let speed = self.vel.length();
        if speed <= f32::EPSILON {
            return;
        }
        let mut bent = self.vel;
        bent.y += paddle_velocity_y * PADDLE_ENGLISH;
        let dir = bent.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.vel = dir * speed;
        }
    }

    /// Ball entered a goal zone: report it, recenter, and schedule a relaunch
    pub fn on_goal_trigger(&mut self, goal: Side) {
        let event = GoalEvent {
            goal,
            ball_x: self.pos.x,
        };
        if self.subscribed {
            self.goals.push(event);
        } else {
            log::warn!("Goal at x={} with no listener; nobody will score it", event.ball_x);
        }

        self.pos = Vec2::new(self.centerline_x, self.rest.y);
        self.vel = Vec2::ZERO;
        self.in_play = false;
        self.paddle_cooldown = 0;
        self.relaunch.start(self.relaunch_delay);
        log::info!("Goal! Ball back to the centerline, relaunching in {}s", self.relaunch_delay);
    }

    /// Switch ball type and restart the power-up timer
    pub fn set_ball_type(&mut self, ball_type: BallType) {
        self.ball_type = ball_type;
        self.damage = ball_type.damage();
        self.scale = ball_type.visual_scale();
        self.power_up_remaining = self.power_up_duration;
        log::info!("Ball is now {ball_type:?} (damage {})", self.damage);
    }

    /// Strike the ball; range checks are the striker's job
    pub fn hit(&mut self, direction: Vec2, force: f32) {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            log::debug!("Ignoring hit with no direction");
            return;
        }
        self.vel = dir * force;
        self.in_play = true;
        // A strike during the post-goal pause puts the ball back in play now
        self.relaunch.cancel();
        log::debug!("Ball hit with velocity {}", self.vel);
    }

    /// Per-frame timers: power-up expiry and the pending relaunch
    pub fn tick_timers(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.ball_type != BallType::Normal {
            self.power_up_remaining -= dt;
            if self.power_up_remaining <= 0.0 {
                self.power_up_remaining = 0.0;
                self.ball_type = BallType::Normal;
                self.damage = BallType::Normal.damage();
                self.scale = BallType::Normal.visual_scale();
                log::info!("Power-up expired, ball back to normal");
            }
        }

        if self.relaunch.tick(dt) {
            self.launch(rng);
        }
    }

    /// Straight-line motion for one fixed step
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.paddle_cooldown = self.paddle_cooldown.saturating_sub(1);
    }

    pub fn subscribe(&mut self) {
        self.subscribed = true;
    }

    /// Stop reporting goals; anything not yet drained is dropped
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.goals.clear();
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn drain_goals(&mut self) -> Vec<GoalEvent> {
        std::mem::take(&mut self.goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball() -> Ball {
        Ball::new(&Field::default(), &BallSettings::default())
    }

    #[test]
    fn test_starts_at_rest() {
        let b = ball();
        assert_eq!(b.pos, Field::default().ball_rest);
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.in_play);
        assert!(!b.relaunch_pending());
    }

    #[test]
    fn test_launch_speed_and_spread() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut b = ball();
        for _ in 0..50 {
            b.launch(&mut rng);
            assert!((b.speed() - BALL_RELAUNCH_SPEED).abs() < 1e-4);
            // |y| < 0.5 with |x| = 1 before normalizing
            assert!(b.vel.y.abs() / b.vel.x.abs() < BALL_LAUNCH_SPREAD + 1e-4);
            assert!(b.in_play);
        }
    }

    #[test]
    fn test_relaunch_twice_does_not_accumulate() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut b = ball();
        b.launch(&mut rng);
        b.launch(&mut rng);
        assert!((b.speed() - BALL_RELAUNCH_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_collision_conserves_speed() {
        let mut b = ball();
        b.vel = Vec2::new(6.0, 1.0);
        let before = b.speed();
        b.on_paddle_collision(4.0);
        assert!((b.speed() - before).abs() < 1e-4);
        assert!(b.vel.y > 1.0);
    }

    #[test]
    fn test_paddle_collision_on_still_ball_is_noop() {
        let mut b = ball();
        b.on_paddle_collision(5.0);
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn test_goal_recenters_and_schedules_relaunch() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = Field::default();
        let mut b = ball();
        b.subscribe();
        b.pos = Vec2::new(0.1, 8.0);
        b.vel = Vec2::new(-7.0, 0.0);
        b.on_goal_trigger(Side::Left);

        let goals = b.drain_goals();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].ball_x, 0.1);
        assert_eq!(b.pos, Vec2::new(field.centerline_x, field.ball_rest.y));
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.in_play);

        b.tick_timers(0.5, &mut rng);
        assert!(!b.in_play);
        b.tick_timers(0.6, &mut rng);
        assert!(b.in_play);
        assert!((b.speed() - BALL_RELAUNCH_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_unsubscribed_goal_is_dropped() {
        let mut b = ball();
        b.on_goal_trigger(Side::Right);
        assert!(b.drain_goals().is_empty());
    }

    #[test]
    fn test_fire_type_expires() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut b = ball();
        b.set_ball_type(BallType::Fire);
        assert_eq!(b.damage(), 2);
        b.tick_timers(POWER_UP_DURATION - 1.0, &mut rng);
        assert_eq!(b.ball_type(), BallType::Fire);
        b.tick_timers(1.5, &mut rng);
        assert_eq!(b.ball_type(), BallType::Normal);
        assert_eq!(b.damage(), 1);
    }

    #[test]
    fn test_set_ball_type_renews_timer() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut b = ball();
        b.set_ball_type(BallType::Ice);
        b.tick_timers(POWER_UP_DURATION - 1.0, &mut rng);
        b.set_ball_type(BallType::Ice);
        b.tick_timers(2.0, &mut rng);
        assert_eq!(b.ball_type(), BallType::Ice);
    }

    #[test]
    fn test_hit_sets_velocity() {
        let mut b = ball();
        b.hit(Vec2::new(3.0, 4.0), 10.0);
        assert!((b.vel - Vec2::new(6.0, 8.0)).length() < 1e-4);
        assert!(b.in_play);
    }

    #[test]
    fn test_hit_cancels_pending_relaunch() {
        let mut b = ball();
        b.on_goal_trigger(Side::Left);
        assert!(b.relaunch_pending());
        b.hit(Vec2::X, 5.0);
        assert!(!b.relaunch_pending());
    }
}
