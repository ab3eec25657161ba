//! Per-hand pinch detection with hysteresis and a release debounce.

use fnv::FnvHashMap;
use log::trace;

use crate::config::GestureConfig;
use crate::hand::{HandId, HandObservation};

/// Persistent pinch state for one tracked hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchRecord {
    pub is_pinching: bool,
    /// Session time (seconds) at which the pinch last dropped, cleared as
    /// soon as the raw pinch comes back.
    pub release_time: Option<f64>,
}

/// Result of pinch detection for one hand on one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinchStatus {
    /// Hysteretic pinch from the fingertip distance alone.
    pub pinching: bool,
    /// The pinch dropped less than the debounce window ago.
    pub in_grace: bool,
}

impl PinchStatus {
    /// Whether a hand that already holds an endpoint keeps holding it.
    #[inline]
    pub fn holds(&self) -> bool {
        self.pinching || self.in_grace
    }
}

/// Two-threshold pinch test.
///
/// A pinching hand stays pinched while `distance < release`; an open hand
/// only starts pinching once `distance < grab`.
#[inline]
pub fn pinch_hysteresis(distance: f32, was_pinching: bool, grab: f32, release: f32) -> bool {
    if was_pinching {
        distance < release
    } else {
        distance < grab
    }
}

#[derive(Debug, Default)]
pub struct PinchDetector {
    records: FnvHashMap<HandId, PinchRecord>,
}

impl PinchDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every observed hand by one tick. Records of hands that are no
    /// longer observed are dropped.
    pub fn update(&mut self, hands: &[HandObservation], now_sec: f64, cfg: &GestureConfig) {
        self.records.retain(|id, _| hands.iter().any(|h| h.id == *id));

        for hand in hands {
            let rec = self.records.entry(hand.id).or_default();
            let was = rec.is_pinching;
            let now = pinch_hysteresis(
                hand.pinch_distance(),
                was,
                cfg.pinch_grab_threshold,
                cfg.pinch_release_threshold,
            );
            if now {
                rec.release_time = None;
            } else if was && rec.release_time.is_none() {
                rec.release_time = Some(now_sec);
            }
            if now != was {
                trace!("hand {} pinch {} -> {}", hand.id, was, now);
            }
            rec.is_pinching = now;
        }
    }

    /// Status of `id` at session time `now_sec`. Unknown hands are open.
    pub fn status(&self, id: HandId, now_sec: f64, cfg: &GestureConfig) -> PinchStatus {
        match self.records.get(&id) {
            Some(rec) => PinchStatus {
                pinching: rec.is_pinching,
                in_grace: !rec.is_pinching
                    && rec
                        .release_time
                        .is_some_and(|t| now_sec - t < cfg.pinch_debounce_sec as f64),
            },
            None => PinchStatus::default(),
        }
    }

    pub fn record(&self, id: HandId) -> Option<&PinchRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
