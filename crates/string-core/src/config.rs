//! Session configuration.
//!
//! Everything here is supplied by the caller and read-only to the engine.
//! Defaults come from [`crate::constants`].

use glam::Vec2;

use crate::constants::*;
use crate::error::ConfigError;

/// Size of the interaction surface the tracker coordinates live in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Rest positions of the two string endpoints. Fixed for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchors {
    pub left: Vec2,
    pub right: Vec2,
}

impl Anchors {
    /// Default layout: both anchors vertically centred, inset from the edges.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let y = viewport.height * ANCHOR_Y_FRAC;
        Self {
            left: Vec2::new(viewport.width * ANCHOR_LEFT_X_FRAC, y),
            right: Vec2::new(viewport.width * ANCHOR_RIGHT_X_FRAC, y),
        }
    }

    #[inline]
    pub fn rest_length(&self) -> f32 {
        self.left.distance(self.right)
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::for_viewport(Viewport::default())
    }
}

/// Thresholds and rates for pinch detection, grabbing and spring return.
///
/// - `pinch_grab_threshold` / `pinch_release_threshold`: thumb-index distance
///   to enter / leave the pinching state
/// - `pinch_debounce_sec`: grace window before a controlling hand's dropped
///   pinch releases its endpoint
/// - `grab_radius`: how close a pinching fingertip must be to take an endpoint
/// - `release_hysteresis`: extra distance tolerated while holding
/// - `easing_factor`: fraction of the gap to the anchor closed per tick
/// - `max_stretch`: elongation that maps to full tension
#[derive(Clone, Debug, PartialEq)]
pub struct GestureConfig {
    pub pinch_grab_threshold: f32,
    pub pinch_release_threshold: f32,
    pub pinch_debounce_sec: f32,
    pub grab_radius: f32,
    pub release_hysteresis: f32,
    pub easing_factor: f32,
    pub max_stretch: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_grab_threshold: PINCH_GRAB_THRESHOLD,
            pinch_release_threshold: PINCH_RELEASE_THRESHOLD,
            pinch_debounce_sec: pinch_debounce_sec(),
            grab_radius: GRAB_RADIUS,
            release_hysteresis: RELEASE_HYSTERESIS,
            easing_factor: EASING_FACTOR,
            max_stretch: MAX_STRETCH,
        }
    }
}

impl GestureConfig {
    /// Distance beyond which a held endpoint is let go.
    #[inline]
    pub fn release_radius(&self) -> f32 {
        self.grab_radius + self.release_hysteresis
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("pinch grab threshold", self.pinch_grab_threshold)?;
        positive("pinch release threshold", self.pinch_release_threshold)?;
        if self.pinch_grab_threshold >= self.pinch_release_threshold {
            return Err(ConfigError::PinchThresholds {
                grab: self.pinch_grab_threshold,
                release: self.pinch_release_threshold,
            });
        }
        if self.pinch_debounce_sec.is_nan() || self.pinch_debounce_sec < 0.0 {
            return Err(ConfigError::Debounce(self.pinch_debounce_sec));
        }
        positive("grab radius", self.grab_radius)?;
        if self.release_hysteresis.is_nan() || self.release_hysteresis < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "release hysteresis",
                value: self.release_hysteresis,
            });
        }
        if self.easing_factor.is_nan() || self.easing_factor <= 0.0 || self.easing_factor > 1.0 {
            return Err(ConfigError::EasingFactor(self.easing_factor));
        }
        positive("max stretch", self.max_stretch)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Output range of a mapped parameter.
///
/// `min > max` is allowed and simply inverts the mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Range plus power-curve exponent for one output parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamMapping {
    pub range: ParamRange,
    pub exponent: f32,
}

impl ParamMapping {
    pub const fn new(min: f32, max: f32, exponent: f32) -> Self {
        Self {
            range: ParamRange::new(min, max),
            exponent,
        }
    }
}

/// How control signals turn into audio parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MappingConfig {
    pub frequency: ParamMapping,
    pub volume_db: ParamMapping,
    pub filter_cutoff_hz: ParamMapping,
    pub distortion: ParamMapping,
    pub reverb_wet: ParamMapping,
    pub modulation_depth_hz: ParamMapping,
    pub pluck_threshold: f32,
    pub ramp_time_sec: f32,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            frequency: ParamMapping::new(110.0, 880.0, 1.0),
            volume_db: ParamMapping::new(-30.0, -6.0, 0.6),
            filter_cutoff_hz: ParamMapping::new(400.0, 8000.0, 2.0),
            distortion: ParamMapping::new(0.0, 0.6, 2.5),
            reverb_wet: ParamMapping::new(0.1, 0.6, 1.0),
            modulation_depth_hz: ParamMapping::new(0.0, 12.0, 1.5),
            pluck_threshold: PLUCK_THRESHOLD,
            ramp_time_sec: RAMP_TIME_SEC,
        }
    }
}

/// Everything needed to start a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub viewport: Viewport,
    pub anchors: Anchors,
    pub gesture: GestureConfig,
    pub mapping: MappingConfig,
}

impl EngineConfig {
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let viewport = Viewport { width, height };
        Self {
            viewport,
            anchors: Anchors::for_viewport(viewport),
            ..Self::default()
        }
    }
}
