//! Collision detection and bounce response
//!
//! Everything is axis-aligned: the ball is treated as its bounding box when
//! testing against walls, the paddle and blocks. The interesting part is the
//! response, which perturbs and clamps the reflected heading so rallies never
//! settle into flat or vertical loops.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Block;
use super::vector::{DOWN, LEFT, RIGHT, UP, angle_between, reflect, rotate, unit};
use crate::tuning::Tuning;

/// What the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Paddle,
    Ceiling,
    LeftWall,
    RightWall,
    Block,
}

/// Axis-aligned extent of the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn of_ball(center: Vec2, radius: f32) -> Self {
        Self {
            left: center.x - radius,
            right: center.x + radius,
            top: center.y - radius,
            bottom: center.y + radius,
        }
    }
}

/// True when either end of `[a1, a2]` lies inside the closed span `[b1, b2]`
///
/// One-sided: a span that swallows `[b1, b2]` whole does not count. The ball
/// (0.4 tall) is taller than a block (0.25), so a ball centered within about
/// 0.05..0.2 below a block's top covers it vertically and slides through the
/// block without a hit.
#[inline]
pub fn spans_overlap(a1: f32, a2: f32, b1: f32, b2: f32) -> bool {
    (a1 >= b1 && a1 <= b2) || (a2 >= b1 && a2 <= b2)
}

/// Whether the ball's box touches the block
#[inline]
pub fn ball_hits_block(ball: &Bounds, block: &Block) -> bool {
    spans_overlap(ball.top, ball.bottom, block.top(), block.bottom())
        && spans_overlap(ball.left, ball.right, block.left(), block.right())
}

/// Normal to bounce off after hitting `block`
///
/// A ball level with the block (within one radius above and below) hit a
/// side; anything else hit the top or bottom face. Side hits only register
/// when the ball's top or bottom edge is inside the block's vertical span,
/// see `spans_overlap`.
pub fn block_hit_normal(ball: &Bounds, radius: f32, block: &Block) -> Vec2 {
    let level_with_block = ball.top > block.top() - radius && ball.bottom < block.bottom() + radius;
    if level_with_block {
        if ball.left < block.left() {
            return LEFT;
        }
        if ball.right > block.right() {
            return RIGHT;
        }
    }
    if ball.top > block.top() { DOWN } else { UP }
}

/// Add a small random offset to a unit heading and renormalize
///
/// Each offset component is uniform in `[-level/2, level/2)`. With `level < 1`
/// the offset is shorter than the heading, so the sum is never zero.
pub fn distort<R: Rng + ?Sized>(direction: Vec2, level: f32, rng: &mut R) -> Vec2 {
    let mut component = || rng.random::<f32>() * level - level / 2.0;
    let distortion = Vec2::new(component(), component());
    unit(direction + distortion)
}

/// Keep the angle between `direction` and `normal` within `[min_angle, 90 - min_angle]`
///
/// Out-of-range headings snap to the nearest limit on the same side of the
/// normal. A heading exactly along the normal snaps to the positive side.
pub fn clamp_to_normal(normal: Vec2, direction: Vec2, min_angle: f32) -> Vec2 {
    let angle = angle_between(normal, direction);
    let max_angle = 90.0 - min_angle;
    if angle < 0.0 {
        if angle > -min_angle {
            return rotate(normal, -min_angle);
        }
        if angle < -max_angle {
            return rotate(normal, -max_angle);
        }
    } else {
        if angle < min_angle {
            return rotate(normal, min_angle);
        }
        if angle > max_angle {
            return rotate(normal, max_angle);
        }
    }
    direction
}

/// New heading after bouncing `direction` off a surface with `normal`
pub fn bounce<R: Rng + ?Sized>(direction: Vec2, normal: Vec2, tuning: &Tuning, rng: &mut R) -> Vec2 {
    let distorted = distort(reflect(direction, normal), tuning.distortion_level, rng);
    clamp_to_normal(normal, distorted, tuning.min_bounce_angle)
}
