use thiserror::Error;

use crate::hand::HandId;

/// Why a tracker hand could not be turned into a [`crate::HandObservation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    #[error("hand {id}: missing {finger} tip")]
    MissingTip { id: HandId, finger: Finger },
    #[error("hand {id}: {finger} tip has non-finite coordinates")]
    NonFinite { id: HandId, finger: Finger },
    #[error("hand {id}: expected {expected} landmarks, got {got}")]
    LandmarkCount {
        id: HandId,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
}

impl std::fmt::Display for Finger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finger::Thumb => f.write_str("thumb"),
            Finger::Index => f.write_str("index"),
        }
    }
}

/// Gesture tuning that would make the state machines misbehave.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pinch grab threshold ({grab}) must be below release threshold ({release})")]
    PinchThresholds { grab: f32, release: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("easing factor must be in (0, 1], got {0}")]
    EasingFactor(f32),
    #[error("pinch debounce must be non-negative, got {0}")]
    Debounce(f32),
}
