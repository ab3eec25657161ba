//! Mapping of control signals onto bounded audio parameters.
//!
//! Every non-pitch parameter runs its driving signal through a power curve
//! and interpolates into its configured range. Pitch combines the string's
//! horizontal position with tension. Non-finite results fall back to the
//! parameter's configured minimum so nothing invalid reaches the audio
//! backend.

use glam::Vec2;
use log::warn;

use crate::config::{MappingConfig, ParamMapping, Viewport};
use crate::constants::{
    FREQUENCY_CEILING_HZ, FREQUENCY_FLOOR_HZ, MODULATION_CEILING_HZ, PITCH_BASE_SPAN,
};
use crate::geometry::{clamp01, lerp_scalar, midpoint};
use crate::signals::ControlFrame;

/// Parameters handed to the audio backend each tick.
///
/// The continuous values are targets; consumers are expected to ramp toward
/// them over `MappingConfig::ramp_time_sec` instead of stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OutputParameterFrame {
    pub frequency: f32,
    pub volume_db: f32,
    pub filter_cutoff_hz: f32,
    pub distortion_amount: f32,
    pub reverb_wet: f32,
    pub modulation_depth_hz: f32,
    pub pluck_triggered: bool,
}

/// `clamp01(x)^exponent`. Exponent 1 is linear, above 1 favours the top of
/// the range, below 1 the bottom.
#[inline]
pub fn apply_curve(x: f32, exponent: f32) -> f32 {
    clamp01(x).powf(exponent)
}

/// Curve `signal` and interpolate it into `mapping.range`.
pub fn map_param(signal: f32, mapping: &ParamMapping) -> f32 {
    let ParamMapping { range, exponent } = *mapping;
    let value = lerp_scalar(range.min, range.max, apply_curve(signal, exponent));
    if !value.is_finite() {
        warn!(
            "mapped value not finite (signal {signal}, exponent {exponent}); using {}",
            range.min
        );
        return range.min;
    }
    let (lo, hi) = if range.min <= range.max {
        (range.min, range.max)
    } else {
        (range.max, range.min)
    };
    value.clamp(lo, hi)
}

/// Horizontal position of the string midpoint as a fraction of the viewport
/// width. NaN when the viewport has no width.
#[inline]
pub fn pitch_position(left: Vec2, right: Vec2, viewport: Viewport) -> f32 {
    if viewport.width > 0.0 {
        clamp01(midpoint(left, right).x / viewport.width)
    } else {
        f32::NAN
    }
}

/// Hybrid pitch: position spans the lower part of the range, tension adds
/// the remaining headroom on top.
pub fn map_frequency(position: f32, tension: f32, mapping: &ParamMapping) -> f32 {
    let range = mapping.range;
    let span = range.span();
    let base = range.min + clamp01(position) * span * PITCH_BASE_SPAN;
    let lift = apply_curve(tension, mapping.exponent) * span * (1.0 - PITCH_BASE_SPAN);
    let mut hz = base + lift;
    if !hz.is_finite() || hz <= 0.0 {
        warn!(
            "frequency {hz} invalid (position {position}, tension {tension}); using {}",
            range.min
        );
        hz = range.min;
    }
    if !hz.is_finite() {
        hz = FREQUENCY_FLOOR_HZ;
    }
    hz.clamp(FREQUENCY_FLOOR_HZ, FREQUENCY_CEILING_HZ)
}

/// Modulation depth follows the string's tilt, never tension.
#[inline]
pub fn map_modulation(angle: f32, mapping: &ParamMapping) -> f32 {
    map_param(angle.abs(), mapping).min(MODULATION_CEILING_HZ)
}

/// A pluck is a sharp rise in tension; a sharp release is not.
#[inline]
pub fn detect_pluck(tension_velocity: f32, threshold: f32) -> bool {
    tension_velocity.abs() > threshold && tension_velocity > 0.0
}

pub fn map_frame(
    control: &ControlFrame,
    position: f32,
    cfg: &MappingConfig,
) -> OutputParameterFrame {
    let t = control.tension;
    OutputParameterFrame {
        frequency: map_frequency(position, t, &cfg.frequency),
        volume_db: map_param(t, &cfg.volume_db),
        filter_cutoff_hz: map_param(t, &cfg.filter_cutoff_hz),
        distortion_amount: map_param(t, &cfg.distortion),
        reverb_wet: map_param(t, &cfg.reverb_wet),
        modulation_depth_hz: map_modulation(control.angle, &cfg.modulation_depth_hz),
        pluck_triggered: detect_pluck(control.tension_velocity, cfg.pluck_threshold),
    }
}
