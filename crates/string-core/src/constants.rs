//! Default tuning constants for gesture detection, string physics and
//! parameter mapping.
//!
//! All distances are in interaction-surface units (typically CSS pixels of
//! the camera view). Times are in seconds unless the name says otherwise.

// Pinch hysteresis (thumb tip to index tip)
pub const PINCH_GRAB_THRESHOLD: f32 = 50.0; // start pinching below this
pub const PINCH_RELEASE_THRESHOLD: f32 = 80.0; // stop pinching at or above this
pub const PINCH_DEBOUNCE_MS: u64 = 150; // grace period for a controlling hand

// Endpoint grab/release
pub const GRAB_RADIUS: f32 = 30.0;
pub const RELEASE_HYSTERESIS: f32 = 10.0; // extra slack before a held endpoint lets go

// Spring return
pub const EASING_FACTOR: f32 = 0.15; // fraction of the remaining gap closed per tick

// Control signals
pub const MAX_STRETCH: f32 = 100.0; // elongation mapped to full tension

// Default anchor layout as fractions of the viewport
pub const ANCHOR_LEFT_X_FRAC: f32 = 0.2;
pub const ANCHOR_RIGHT_X_FRAC: f32 = 0.8;
pub const ANCHOR_Y_FRAC: f32 = 0.5;

pub const DEFAULT_VIEWPORT_WIDTH: f32 = 640.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 480.0;

// Output safety limits, applied regardless of configuration
pub const FREQUENCY_FLOOR_HZ: f32 = 20.0;
pub const FREQUENCY_CEILING_HZ: f32 = 20_000.0;
pub const MODULATION_CEILING_HZ: f32 = 50.0;

// Share of the frequency range reachable by horizontal position alone;
// tension supplies the rest.
pub const PITCH_BASE_SPAN: f32 = 0.75;

// Consumer-side smoothing
pub const RAMP_TIME_SEC: f32 = 0.05;

// Tension velocity (per second) above which a rising edge counts as a pluck
pub const PLUCK_THRESHOLD: f32 = 3.0;

#[inline]
pub fn pinch_debounce_sec() -> f32 {
    PINCH_DEBOUNCE_MS as f32 / 1000.0
}
