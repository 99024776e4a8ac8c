//! Built-in collision stand-in
//!
//! Everything here is circles and axis-aligned lines: the ball bounces off
//! the top and bottom walls, bounces off paddles (then gets the paddle's
//! "english"), and triggers a goal when its edge crosses an outer wall.

use glam::Vec2;

use super::ball::Ball;
use super::field::{Field, Side};
use crate::consts::PADDLE_BOUNCE_COOLDOWN_TICKS;

/// Reflect a velocity about a unit surface normal
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Bounce the ball off the top and bottom walls; returns true on contact
pub fn bounce_off_walls(ball: &mut Ball, field: &Field) -> bool {
    let r = ball.radius;
    if ball.pos.y - r < field.lower_y && ball.vel.y < 0.0 {
        ball.pos.y = field.lower_y + r;
        ball.vel = reflect(ball.vel, Vec2::Y);
        true
    } else if ball.pos.y + r > field.upper_y && ball.vel.y > 0.0 {
        ball.pos.y = field.upper_y - r;
        ball.vel = reflect(ball.vel, Vec2::NEG_Y);
        true
    } else {
        false
    }
}

/// Resolve ball vs. a round paddle body; returns true if they collided
pub fn paddle_contact(ball: &mut Ball, paddle_pos: Vec2, paddle_vel: Vec2, paddle_radius: f32) -> bool {
    if ball.paddle_cooldown > 0 {
        return false;
    }
    let offset = ball.pos - paddle_pos;
    let min_dist = ball.radius + paddle_radius;
    let dist_sq = offset.length_squared();
    if dist_sq >= min_dist * min_dist {
        return false;
    }

    // Coincident centers: push along the paddle's facing axis
    let normal = offset.try_normalize().unwrap_or(Vec2::X);
    ball.pos = paddle_pos + normal * min_dist;
    if ball.vel.dot(normal) < 0.0 {
        ball.vel = reflect(ball.vel, normal);
    }
    ball.on_paddle_collision(paddle_vel.y);
    ball.paddle_cooldown = PADDLE_BOUNCE_COOLDOWN_TICKS;
    true
}

/// Goal zone the ball has entered, if any
pub fn goal_entered(ball: &Ball, field: &Field) -> Option<Side> {
    if ball.pos.x - ball.radius < field.left_x {
        Some(Side::Left)
    } else if ball.pos.x + ball.radius > field.right_x {
        Some(Side::Right)
    } else {
        None
    }
}
