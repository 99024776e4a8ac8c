//! Match settings and tuning
//!
//! Loaded from a JSON file next to the executable (or defaults). Every
//! section uses `#[serde(default)]` so partial files are fine.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Who drives a side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SideControl {
    #[default]
    Human,
    Npc,
}

impl SideControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            SideControl::Human => "Human",
            SideControl::Npc => "NPC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" | "player" => Some(SideControl::Human),
            "npc" | "ai" | "cpu" => Some(SideControl::Npc),
            _ => None,
        }
    }
}

/// Field geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub left_x: f32,
    pub right_x: f32,
    pub lower_y: f32,
    pub upper_y: f32,
    /// Centerline marker; midpoint of the bounds when absent
    pub centerline_x: Option<f32>,
    /// Where the ball rests at kickoff; also sets the recenter height
    pub ball_rest: Option<Vec2>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            left_x: FIELD_LEFT_X,
            right_x: FIELD_RIGHT_X,
            lower_y: FIELD_LOWER_Y,
            upper_y: FIELD_UPPER_Y,
            centerline_x: None,
            ball_rest: None,
        }
    }
}

/// Ball tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    pub relaunch_speed: f32,
    pub relaunch_delay: f32,
    pub power_up_duration: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            relaunch_speed: BALL_RELAUNCH_SPEED,
            relaunch_delay: BALL_RELAUNCH_DELAY,
            power_up_duration: POWER_UP_DURATION,
        }
    }
}

/// Human paddle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub radius: f32,
    pub speed: f32,
    pub run_speed: f32,
    /// Distance of the hit point in front of the paddle (toward the centerline)
    pub hit_reach: f32,
    pub hit_range: f32,
    pub hit_force: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            radius: PADDLE_RADIUS,
            speed: PADDLE_SPEED,
            run_speed: PADDLE_RUN_SPEED,
            hit_reach: 0.5,
            hit_range: HIT_RANGE,
            hit_force: HIT_FORCE,
        }
    }
}

/// NPC tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcSettings {
    pub radius: f32,
    pub speed: f32,
    pub run_multiplier: f32,
    /// Minimum seconds between decisions (0 = decide every frame)
    pub reaction_time: f32,
    /// How far ahead (seconds) the ball is extrapolated
    pub anticipation: f32,
    pub attack_range: f32,
    /// Delay between committing to an attack and swinging
    pub attack_buffer: f32,
    /// How far from the centerline the NPC holds its defensive line
    pub defense_offset: f32,
    pub hit_reach: f32,
    pub hit_force: f32,
}

impl Default for NpcSettings {
    fn default() -> Self {
        Self {
            radius: PADDLE_RADIUS,
            speed: NPC_SPEED,
            run_multiplier: NPC_RUN_MULTIPLIER,
            reaction_time: NPC_REACTION_TIME,
            anticipation: NPC_ANTICIPATION,
            attack_range: NPC_ATTACK_RANGE,
            attack_buffer: NPC_ATTACK_BUFFER,
            defense_offset: NPC_DEFENSE_OFFSET,
            hit_reach: 0.5,
            hit_force: HIT_FORCE,
        }
    }
}

/// Life, status effects and end-of-match flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub starting_life: i32,
    pub slow_factor: f32,
    pub slow_effect_duration: f32,
    pub victory_return_delay: f32,
    /// Show the victory banner before returning to the menu
    pub victory_text: bool,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            starting_life: STARTING_LIFE,
            slow_factor: SLOW_FACTOR,
            slow_effect_duration: SLOW_EFFECT_DURATION,
            victory_return_delay: VICTORY_RETURN_DELAY,
            victory_text: true,
        }
    }
}

/// Power-up spawner tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpSettings {
    pub spawn_interval: f32,
    pub spawn_positions: Vec<Vec2>,
    pub pickup_radius: f32,
}

impl Default for PowerUpSettings {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            spawn_positions: vec![
                Vec2::new(4.0, 2.5),
                Vec2::new(4.0, 7.5),
                Vec2::new(15.0, 2.5),
                Vec2::new(15.0, 7.5),
            ],
            pickup_radius: PICKUP_RADIUS,
        }
    }
}

/// Complete match settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub ball: BallSettings,
    pub paddle: PaddleSettings,
    pub npc: NpcSettings,
    pub rules: RuleSettings,
    pub power_ups: PowerUpSettings,
    pub left: SideControl,
    pub right: SideControl,
}

impl Default for Settings {
    /// Human on the left, NPC on the right (the classic arcade setup)
    fn default() -> Self {
        Self {
            field: FieldSettings::default(),
            ball: BallSettings::default(),
            paddle: PaddleSettings::default(),
            npc: NpcSettings::default(),
            rules: RuleSettings::default(),
            power_ups: PowerUpSettings::default(),
            left: SideControl::Human,
            right: SideControl::Npc,
        }
    }
}

impl Settings {
    pub fn versus_npc() -> Self {
        Self::default()
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys only, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::versus_npc()
                }
            },
            Err(e) => {
                log::info!("No settings at {} ({e}); using defaults", path.display());
                Self::versus_npc()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match std::fs::write(path, self.to_json()) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {e}", path.display()),
        }
    }

    /// Repair out-of-range values, logging each fix
    pub fn validated(mut self) -> Self {
        let f = &mut self.field;
        if f.left_x > f.right_x {
            log::warn!("Field left/right bounds inverted; swapping");
            std::mem::swap(&mut f.left_x, &mut f.right_x);
        }
        if f.lower_y > f.upper_y {
            log::warn!("Field lower/upper bounds inverted; swapping");
            std::mem::swap(&mut f.lower_y, &mut f.upper_y);
        }
        if let Some(c) = f.centerline_x {
            if !c.is_finite() || c <= f.left_x || c >= f.right_x {
                log::warn!("Centerline {c} outside the field; using the midpoint");
                f.centerline_x = None;
            }
        }

        let b = &mut self.ball;
        b.radius = positive("ball.radius", b.radius, BALL_RADIUS);
        b.relaunch_speed = positive("ball.relaunch_speed", b.relaunch_speed, BALL_RELAUNCH_SPEED);
        b.relaunch_delay = non_negative("ball.relaunch_delay", b.relaunch_delay, BALL_RELAUNCH_DELAY);
        b.power_up_duration =
            non_negative("ball.power_up_duration", b.power_up_duration, POWER_UP_DURATION);

        let p = &mut self.paddle;
        p.radius = positive("paddle.radius", p.radius, PADDLE_RADIUS);
        p.speed = non_negative("paddle.speed", p.speed, PADDLE_SPEED);
        p.run_speed = non_negative("paddle.run_speed", p.run_speed, PADDLE_RUN_SPEED);
        p.hit_reach = non_negative("paddle.hit_reach", p.hit_reach, 0.5);
        p.hit_range = non_negative("paddle.hit_range", p.hit_range, HIT_RANGE);
        p.hit_force = non_negative("paddle.hit_force", p.hit_force, HIT_FORCE);

        let n = &mut self.npc;
        n.radius = positive("npc.radius", n.radius, PADDLE_RADIUS);
        n.speed = non_negative("npc.speed", n.speed, NPC_SPEED);
        n.run_multiplier = non_negative("npc.run_multiplier", n.run_multiplier, NPC_RUN_MULTIPLIER);
        // Zero is legal (decide every frame); negative would make decisions run ahead of time
        n.reaction_time = non_negative("npc.reaction_time", n.reaction_time, 0.0);
        n.attack_buffer = non_negative("npc.attack_buffer", n.attack_buffer, NPC_ATTACK_BUFFER);
        n.attack_range = non_negative("npc.attack_range", n.attack_range, NPC_ATTACK_RANGE);
        n.anticipation = non_negative("npc.anticipation", n.anticipation, NPC_ANTICIPATION);
        // A negative offset would put the defensive line in the opponent's half
        n.defense_offset = non_negative("npc.defense_offset", n.defense_offset, NPC_DEFENSE_OFFSET);
        n.hit_reach = non_negative("npc.hit_reach", n.hit_reach, 0.5);
        n.hit_force = non_negative("npc.hit_force", n.hit_force, HIT_FORCE);

        let r = &mut self.rules;
        if r.starting_life <= 0 {
            log::warn!("rules.starting_life {} must be positive; using {STARTING_LIFE}", r.starting_life);
            r.starting_life = STARTING_LIFE;
        }
        // A slow has to actually slow
        if !(r.slow_factor.is_finite() && (0.0..1.0).contains(&r.slow_factor)) {
            log::warn!("rules.slow_factor = {} must be in [0, 1); using {SLOW_FACTOR}", r.slow_factor);
            r.slow_factor = SLOW_FACTOR;
        }
        r.slow_effect_duration =
            non_negative("rules.slow_effect_duration", r.slow_effect_duration, SLOW_EFFECT_DURATION);
        r.victory_return_delay =
            non_negative("rules.victory_return_delay", r.victory_return_delay, VICTORY_RETURN_DELAY);

        let u = &mut self.power_ups;
        u.spawn_interval = positive("power_ups.spawn_interval", u.spawn_interval, SPAWN_INTERVAL);
        u.pickup_radius = non_negative("power_ups.pickup_radius", u.pickup_radius, PICKUP_RADIUS);
        if u.spawn_positions.is_empty() {
            log::error!("No power-up spawn positions configured; power-ups are disabled");
        }

        self
    }
}

fn non_negative(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{name} = {value} is invalid; using {fallback}");
        fallback
    }
}

fn positive(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{name} = {value} is invalid; using {fallback}");
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::versus_npc();
        settings.rules.starting_life = 3;
        settings.field.centerline_x = Some(9.0);

        let parsed = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(parsed.rules.starting_life, 3);
        assert_eq!(parsed.field.centerline_x, Some(9.0));
        assert_eq!(parsed.right, SideControl::Npc);
        assert_eq!(parsed.power_ups.spawn_positions.len(), 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed = Settings::from_json(r#"{ "npc": { "reaction_time": 0.5 } }"#).unwrap();
        assert_eq!(parsed.npc.reaction_time, 0.5);
        assert_eq!(parsed.npc.speed, NPC_SPEED);
        assert_eq!(parsed.rules.starting_life, STARTING_LIFE);
    }

    #[test]
    fn test_partial_json_keeps_npc_opponent() {
        let parsed = Settings::from_json("{}").unwrap();
        assert_eq!(parsed.left, SideControl::Human);
        assert_eq!(parsed.right, SideControl::Npc);

        let parsed = Settings::from_json(r#"{ "rules": { "starting_life": 3 } }"#).unwrap();
        assert_eq!(parsed.rules.starting_life, 3);
        assert_eq!(parsed.right, SideControl::Npc);
    }

    #[test]
    fn test_negative_npc_tuning_is_repaired() {
        let parsed = Settings::from_json(
            r#"{
                "npc": { "defense_offset": -3.0, "anticipation": -1.0, "hit_reach": -0.5, "hit_force": -2.0 },
                "paddle": { "hit_reach": -1.0, "hit_force": -4.0 },
                "power_ups": { "pickup_radius": -0.5 }
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.npc.defense_offset, NPC_DEFENSE_OFFSET);
        assert_eq!(parsed.npc.anticipation, NPC_ANTICIPATION);
        assert_eq!(parsed.npc.hit_reach, 0.5);
        assert_eq!(parsed.npc.hit_force, HIT_FORCE);
        assert_eq!(parsed.paddle.hit_reach, 0.5);
        assert_eq!(parsed.paddle.hit_force, HIT_FORCE);
        assert_eq!(parsed.power_ups.pickup_radius, PICKUP_RADIUS);
    }

    #[test]
    fn test_slow_factor_must_slow() {
        for bad in [3.0, 1.0, -0.5, f32::NAN] {
            let mut settings = Settings::default();
            settings.rules.slow_factor = bad;
            assert_eq!(settings.validated().rules.slow_factor, SLOW_FACTOR);
        }
        let mut settings = Settings::default();
        settings.rules.slow_factor = 0.0;
        assert_eq!(settings.validated().rules.slow_factor, 0.0);
    }

    #[test]
    fn test_negative_reaction_time_degrades_to_per_frame() {
        let parsed = Settings::from_json(r#"{ "npc": { "reaction_time": -1.0 } }"#).unwrap();
        assert_eq!(parsed.npc.reaction_time, 0.0);
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let mut settings = Settings::default();
        settings.field.left_x = 20.0;
        settings.field.right_x = 0.0;
        let settings = settings.validated();
        assert_eq!(settings.field.left_x, 0.0);
        assert_eq!(settings.field.right_x, 20.0);
    }

    #[test]
    fn test_centerline_outside_field_is_dropped() {
        let mut settings = Settings::default();
        settings.field.centerline_x = Some(50.0);
        assert_eq!(settings.validated().field.centerline_x, None);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_side_control_from_str() {
        assert_eq!(SideControl::from_str("AI"), Some(SideControl::Npc));
        assert_eq!(SideControl::from_str("player"), Some(SideControl::Human));
        assert_eq!(SideControl::from_str("robot"), None);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/here/frostfire.json");
        assert_eq!(settings.right, SideControl::Npc);
    }
}
