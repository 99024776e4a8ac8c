//! Frostfire - a two-sided arena ball brawler
//!
//! Core modules:
//! - `sim`: Deterministic match simulation (ball, paddles, NPC, power-ups, rules)
//! - `settings`: Data-driven match tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{FieldSettings, Settings, SideControl};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the physics step of the arena)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest presentation frame we accept before clamping
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Field defaults (world units)
    pub const FIELD_LEFT_X: f32 = 0.0;
    pub const FIELD_RIGHT_X: f32 = 19.0;
    pub const FIELD_LOWER_Y: f32 = 0.0;
    pub const FIELD_UPPER_Y: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.35;
    pub const BALL_RELAUNCH_SPEED: f32 = 7.0;
    pub const BALL_RELAUNCH_DELAY: f32 = 1.0;
    /// Vertical launch component is drawn from [-SPREAD, SPREAD)
    pub const BALL_LAUNCH_SPREAD: f32 = 0.5;
    /// Fraction of the paddle's vertical velocity added on contact
    pub const PADDLE_ENGLISH: f32 = 0.5;
    /// Seconds a FIRE/ICE ball keeps its type
    pub const POWER_UP_DURATION: f32 = 10.0;
    /// Ticks before the same paddle can bounce the ball again (prevents sticking)
    pub const PADDLE_BOUNCE_COOLDOWN_TICKS: u32 = 6;

    /// Paddle defaults
    pub const PADDLE_RADIUS: f32 = 0.5;
    pub const PADDLE_SPEED: f32 = 5.0;
    pub const PADDLE_RUN_SPEED: f32 = 8.0;
    pub const HIT_RANGE: f32 = 1.5;
    pub const HIT_FORCE: f32 = 10.0;
    /// Spawn nudge applied when a human paddle starts in the wrong half
    pub const SPAWN_NUDGE: f32 = 0.1;

    /// NPC defaults
    pub const NPC_SPEED: f32 = 4.0;
    pub const NPC_RUN_MULTIPLIER: f32 = 1.5;
    pub const NPC_REACTION_TIME: f32 = 0.2;
    pub const NPC_ANTICIPATION: f32 = 0.5;
    pub const NPC_ATTACK_RANGE: f32 = 1.6;
    pub const NPC_ATTACK_BUFFER: f32 = 0.1;
    pub const NPC_DEFENSE_OFFSET: f32 = 1.0;
    /// Running while slowed moves at `base * slow_factor * SLOWED_RUN_BONUS`
    pub const SLOWED_RUN_BONUS: f32 = 1.2;
    /// Squared speed above which the NPC counts as moving for animation
    pub const NPC_MOVING_THRESHOLD_SQ: f32 = 0.1;

    /// Status effects
    pub const SLOW_FACTOR: f32 = 0.5;
    pub const SLOW_EFFECT_DURATION: f32 = 5.0;

    /// Match rules
    pub const STARTING_LIFE: i32 = 5;
    pub const VICTORY_RETURN_DELAY: f32 = 3.0;

    /// Power-ups
    pub const SPAWN_INTERVAL: f32 = 15.0;
    pub const PICKUP_RADIUS: f32 = 0.5;
}

/// Clamp a point into an axis-aligned rectangle
#[inline]
pub fn clamp_to_rect(point: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(point.x.clamp(min.x, max.x), point.y.clamp(min.y, max.y))
}

/// True if `point` lies within `radius` of `center` (inclusive)
#[inline]
pub fn within_radius(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) <= radius * radius
}
