//! Collision detection and response
//!
//! Walls run along the top and bottom of the field only; leaving through
//! a side edge is a scoring event, not a collision.

use glam::Vec2;

use super::state::{Ball, Booster, Paddle, Side};
use crate::consts::{MAX_BOUNCE_ANGLE_DEG, PADDLE_BOOST};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if circle intersects AABB
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        (center - closest).length_squared() <= radius * radius
    }
}

/// Reflect off the top/bottom walls. Returns true on contact.
///
/// vy is inverted and y clamped back inside; speed is preserved exactly.
pub fn wall_bounce(ball: &mut Ball, field_height: f32) -> bool {
    let r = ball.radius;
    if ball.pos.y - r <= 0.0 || ball.pos.y + r >= field_height {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.pos.y.clamp(r, field_height - r);
        true
    } else {
        false
    }
}

/// Whether `ball` overlaps `paddle` while travelling toward it
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let approaching = match paddle.side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    };
    approaching && paddle.rect().intersects_circle(ball.pos, ball.radius)
}

/// Outgoing velocity after a paddle hit
///
/// The deflection angle is proportional to where the ball met the paddle
/// (±MAX_BOUNCE_ANGLE_DEG at the edges) and the speed grows by PADDLE_BOOST.
/// A zero or non-finite incoming speed is replaced by `fallback_speed` so a
/// degenerate ball can never produce NaN.
pub fn paddle_bounce_velocity(ball_y: f32, vel: Vec2, paddle: &Paddle, fallback_speed: f32) -> Vec2 {
    let half = (paddle.height / 2.0).max(f32::EPSILON);
    let relative_y = ((paddle.y - ball_y) / half).clamp(-1.0, 1.0);
    let relative_y = if relative_y.is_finite() { relative_y } else { 0.0 };
    let angle = (relative_y * MAX_BOUNCE_ANGLE_DEG).to_radians();

    let incoming = vel.length();
    let current = if incoming.is_finite() && incoming > f32::EPSILON {
        incoming
    } else {
        fallback_speed
    };
    let speed = current * PADDLE_BOOST;

    Vec2::new(
        paddle.side.away_sign() * (speed * angle.cos()).abs(),
        -speed * angle.sin(),
    )
}

/// Resolve a ball/paddle contact. Returns true if the ball bounced.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, fallback_speed: f32) -> bool {
    if !hits_paddle(ball, paddle) {
        return false;
    }
    ball.vel = paddle_bounce_velocity(ball.pos.y, ball.vel, paddle, fallback_speed);
    true
}

/// Whether `ball` overlaps an active booster's pickup radius
pub fn touches_booster(ball: &Ball, booster: &Booster) -> bool {
    booster.active && ball.pos.distance(booster.pos) < ball.radius + booster.radius
}

/// Side edge the ball has crossed, if any
pub fn exit_side(ball: &Ball, field_width: f32) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Left)
    } else if ball.pos.x > field_width {
        Some(Side::Right)
    } else {
        None
    }
}
