//! Small 2D helpers on top of `glam::Vec2`.

use glam::Vec2;

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Linear interpolation between two points; `t` is not clamped.
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Scalar linear interpolation; `t` is not clamped.
#[inline]
pub fn lerp_scalar(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Vertical tilt of the segment `from -> to` as `sin(atan2(dy, dx))`.
///
/// Zero when horizontal, ±1 when vertical. A degenerate segment yields 0.
#[inline]
pub fn tilt(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).sin().clamp(-1.0, 1.0)
}

#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

#[inline]
pub fn is_finite(p: Vec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
