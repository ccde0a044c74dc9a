//! 2D vector helpers on top of `glam::Vec2`
//!
//! Screen coordinates: x grows to the right, y grows downward.
//! Angles are in degrees, matching how bounce limits are tuned.

use glam::Vec2;

pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
pub const UP: Vec2 = Vec2::new(0.0, -1.0);
pub const DOWN: Vec2 = Vec2::new(0.0, 1.0);

/// Normalized LEFT + UP
pub const LEFT_UP: Vec2 = Vec2::new(-std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2);
/// Normalized RIGHT + UP
pub const RIGHT_UP: Vec2 = Vec2::new(std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2);

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

#[inline]
pub fn scale_by(v: Vec2, k: f32) -> Vec2 {
    v * k
}

/// Unit vector in the direction of `v`, or `None` for a zero-length (or non-finite) vector
#[inline]
pub fn try_unit(v: Vec2) -> Option<Vec2> {
    v.try_normalize()
}

/// Unit vector in the direction of `v`
///
/// # Panics
///
/// Panics on a zero-length vector. A stationary ball means the tick was fed
/// a broken state, so there is nothing sensible to continue with.
#[inline]
pub fn unit(v: Vec2) -> Vec2 {
    match try_unit(v) {
        Some(u) => u,
        None => panic!("cannot normalize zero-length vector {v:?}"),
    }
}

/// Standard reflection: v' = v - 2(v·n)n, `normal` must be unit length
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

/// Rotate by a signed angle in degrees
#[inline]
pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
}

/// Signed angle in degrees needed to rotate `a` onto `b`, in (-180, 180]
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b)).to_degrees()
}
