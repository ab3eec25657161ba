//! Normalized control signals derived from the string geometry each tick.

use crate::geometry::{clamp01, distance, tilt};
use crate::grab::Endpoints;

/// Per-tick control signals.
///
/// - `tension`: elongation beyond rest length over `max_stretch`, in \[0, 1\]
/// - `left_stretch` / `right_stretch`: each endpoint's displacement from its
///   own anchor over `max_stretch`, in \[0, 1\]
/// - `angle`: vertical tilt of the string, in \[-1, 1\]
/// - `tension_velocity`: backward difference of tension per second
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlFrame {
    pub tension: f32,
    pub left_stretch: f32,
    pub right_stretch: f32,
    pub angle: f32,
    pub tension_velocity: f32,
    pub is_left_grabbed: bool,
    pub is_right_grabbed: bool,
}

/// Elapsed time usable for derivatives; negative or non-finite becomes 0.
#[inline]
pub fn sanitize_dt(dt_sec: f32) -> f32 {
    if dt_sec.is_finite() && dt_sec > 0.0 {
        dt_sec
    } else {
        0.0
    }
}

pub fn tension(endpoints: &Endpoints, max_stretch: f32) -> f32 {
    let rest = distance(endpoints.left.anchor, endpoints.right.anchor);
    let current = distance(endpoints.left.position, endpoints.right.position);
    normalized((current - rest).max(0.0), max_stretch)
}

/// `value / max_stretch` clamped to \[0, 1\]; a NaN ratio reads as 0.
#[inline]
fn normalized(value: f32, max_stretch: f32) -> f32 {
    let r = clamp01(value / max_stretch);
    if r.is_nan() {
        0.0
    } else {
        r
    }
}

#[inline]
pub fn tension_velocity(tension: f32, previous: f32, dt_sec: f32) -> f32 {
    let dt = sanitize_dt(dt_sec);
    if dt > 0.0 {
        (tension - previous) / dt
    } else {
        0.0
    }
}

/// Recompute every signal from the current endpoints. `previous_tension` is
/// the only value carried over from the last tick.
pub fn compute(
    endpoints: &Endpoints,
    previous_tension: f32,
    dt_sec: f32,
    max_stretch: f32,
) -> ControlFrame {
    let (l, r) = (&endpoints.left, &endpoints.right);
    let tension = tension(endpoints, max_stretch);
    ControlFrame {
        tension,
        left_stretch: normalized(distance(l.position, l.anchor), max_stretch),
        right_stretch: normalized(distance(r.position, r.anchor), max_stretch),
        angle: tilt(l.position, r.position),
        tension_velocity: tension_velocity(tension, previous_tension, dt_sec),
        is_left_grabbed: l.is_grabbed(),
        is_right_grabbed: r.is_grabbed(),
    }
}
