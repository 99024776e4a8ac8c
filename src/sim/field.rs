//! Field geometry
//!
//! The field is an axis-aligned rectangle split by a vertical centerline.
//! Each side defends the half between the centerline and its outer wall.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_to_rect;
use crate::settings::FieldSettings;

/// One of the two halves of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Direction from the centerline toward this side's wall along X
    pub fn outward_sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Player number shown in the HUD
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        clamp_to_rect(point, self.min, self.max)
    }
}

/// Resolved field layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub left_x: f32,
    pub right_x: f32,
    pub lower_y: f32,
    pub upper_y: f32,
    pub centerline_x: f32,
    /// Kickoff spot; its Y is also the height the ball recenters to after a goal
    pub ball_rest: Vec2,
}

impl Field {
    pub fn from_settings(settings: &FieldSettings) -> Self {
        let midpoint = (settings.left_x + settings.right_x) / 2.0;
        let centerline_x = settings.centerline_x.unwrap_or_else(|| {
            log::warn!("No centerline marker configured; using the field midpoint {midpoint}");
            midpoint
        });
        let ball_rest = settings
            .ball_rest
            .unwrap_or_else(|| Vec2::new(centerline_x, (settings.lower_y + settings.upper_y) / 2.0));
        Self {
            left_x: settings.left_x,
            right_x: settings.right_x,
            lower_y: settings.lower_y,
            upper_y: settings.upper_y,
            centerline_x,
            ball_rest,
        }
    }

    /// The whole playing area
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: Vec2::new(self.left_x, self.lower_y),
            max: Vec2::new(self.right_x, self.upper_y),
        }
    }

    /// The half a side may move in: centerline to its wall
    pub fn half(&self, side: Side) -> Bounds {
        match side {
            Side::Left => Bounds {
                min: Vec2::new(self.left_x, self.lower_y),
                max: Vec2::new(self.centerline_x, self.upper_y),
            },
            Side::Right => Bounds {
                min: Vec2::new(self.centerline_x, self.lower_y),
                max: Vec2::new(self.right_x, self.upper_y),
            },
        }
    }

    /// X of a side's outer wall
    pub fn wall_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left_x,
            Side::Right => self.right_x,
        }
    }

    /// Which side a point is on; `None` exactly on the centerline
    pub fn side_of(&self, x: f32) -> Option<Side> {
        if x < self.centerline_x {
            Some(Side::Left)
        } else if x > self.centerline_x {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// The side that concedes a goal scored with the ball at `ball_x`
    pub fn conceding_side(&self, ball_x: f32) -> Option<Side> {
        self.side_of(ball_x)
    }

    /// Is `x` on `side`'s half (strictly past the centerline)?
    pub fn on_side(&self, side: Side, x: f32) -> bool {
        (x - self.centerline_x) * side.outward_sign() > 0.0
    }

    /// Move a spawn point into `side`'s half if it starts on the wrong one
    pub fn correct_spawn(&self, side: Side, position: Vec2, inset: f32) -> Vec2 {
        if self.on_side(side.opponent(), position.x) {
            let corrected = Vec2::new(self.centerline_x + inset * side.outward_sign(), position.y);
            log::warn!("{side:?} contestant spawned in the opponent's half; moved to {corrected}");
            corrected
        } else {
            position
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::from_settings(&FieldSettings {
            centerline_x: Some((crate::consts::FIELD_LEFT_X + crate::consts::FIELD_RIGHT_X) / 2.0),
            ..FieldSettings::default()
        })
    }
}
