use glam::Vec2;
use log::{trace, warn};
use smallvec::SmallVec;

use crate::config::EngineConfig;
use crate::grab::{update_endpoint, Endpoint, Endpoints, Side, TrackedHand, Transition};
use crate::hand::HandObservation;
use crate::mapping::{map_frame, pitch_position, OutputParameterFrame};
use crate::pinch::PinchDetector;
use crate::signals::{self, sanitize_dt, ControlFrame};
use crate::sink::ParameterSink;
use crate::spring::ease_idle;

/// Endpoint state for visualization layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StringSnapshot {
    pub left_end: Vec2,
    pub right_end: Vec2,
    pub left_grabbed: bool,
    pub right_grabbed: bool,
}

/// Everything produced by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutput {
    pub params: OutputParameterFrame,
    pub control: ControlFrame,
    pub endpoints: StringSnapshot,
    pub transitions: [Transition; 2],
}

/// Per-session gesture-to-parameter engine.
///
/// Owned by the caller's frame loop and advanced once per display frame with
/// [`StringEngine::tick`]. Within a tick the order is fixed: pinch detection
/// for all hands, left endpoint, right endpoint, spring return, control
/// signals, parameter mapping.
///
/// Typical usage:
/// - Construct with `StringEngine::new(EngineConfig::for_viewport(w, h))`
/// - Each frame, convert tracker output with `collect_observations` and call
///   `tick(&hands, dt_sec)`
/// - Forward `TickOutput::params` to a [`ParameterSink`] (or use
///   `tick_into`) and draw `TickOutput::endpoints`
#[derive(Debug)]
pub struct StringEngine {
    config: EngineConfig,
    endpoints: Endpoints,
    pinch: PinchDetector,
    previous_tension: f32,
    clock_sec: f64,
    last_control: ControlFrame,
}

impl StringEngine {
    pub fn new(config: EngineConfig) -> Self {
        if let Err(e) = config.gesture.validate() {
            warn!("gesture config is inconsistent: {e}");
        }
        let endpoints = Endpoints::at_rest(config.anchors.left, config.anchors.right);
        Self {
            config,
            endpoints,
            pinch: PinchDetector::new(),
            previous_tension: 0.0,
            clock_sec: 0.0,
            last_control: ControlFrame::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn endpoint(&self, side: Side) -> &Endpoint {
        self.endpoints.get(side)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn pinch_detector(&self) -> &PinchDetector {
        &self.pinch
    }

    pub fn last_control(&self) -> &ControlFrame {
        &self.last_control
    }

    /// Session time accumulated from sanitized tick steps.
    pub fn clock_sec(&self) -> f64 {
        self.clock_sec
    }

    pub fn snapshot(&self) -> StringSnapshot {
        StringSnapshot {
            left_end: self.endpoints.left.position,
            right_end: self.endpoints.right.position,
            left_grabbed: self.endpoints.left.is_grabbed(),
            right_grabbed: self.endpoints.right.is_grabbed(),
        }
    }

    /// Release both endpoints, put them back on their anchors and forget all
    /// per-hand state.
    pub fn reset(&mut self) {
        self.endpoints.left.reset();
        self.endpoints.right.reset();
        self.pinch.clear();
        self.previous_tension = 0.0;
        self.clock_sec = 0.0;
        self.last_control = ControlFrame::default();
    }

    /// Advance the session by one frame.
    ///
    /// `dt_sec` is the time since the previous tick; negative or non-finite
    /// values count as zero. Hands with non-finite coordinates or a repeated
    /// id are ignored for this tick.
    pub fn tick(&mut self, hands: &[HandObservation], dt_sec: f32) -> TickOutput {
        let dt = sanitize_dt(dt_sec);
        self.clock_sec += dt as f64;
        let now = self.clock_sec;
        let gesture = &self.config.gesture;

        let mut valid: SmallVec<[HandObservation; 4]> = SmallVec::new();
        for hand in hands {
            if !hand.is_finite() {
                trace!("hand {} has non-finite tips, skipped", hand.id);
            } else if valid.iter().any(|h| h.id == hand.id) {
                trace!("hand {} reported twice, keeping the first", hand.id);
            } else {
                valid.push(*hand);
            }
        }

        self.pinch.update(&valid, now, gesture);
        let tracked: SmallVec<[TrackedHand; 4]> = valid
            .iter()
            .map(|h| TrackedHand {
                id: h.id,
                pointer: h.pointer(),
                pinch: self.pinch.status(h.id, now, gesture),
            })
            .collect();

        let transitions =
            Side::ORDER.map(|side| update_endpoint(&mut self.endpoints, side, &tracked, gesture));

        ease_idle(&mut self.endpoints, gesture.easing_factor);

        let control = signals::compute(
            &self.endpoints,
            self.previous_tension,
            dt,
            gesture.max_stretch,
        );
        self.previous_tension = control.tension;
        self.last_control = control;

        let position = pitch_position(
            self.endpoints.left.position,
            self.endpoints.right.position,
            self.config.viewport,
        );
        let params = map_frame(&control, position, &self.config.mapping);
        trace!(
            "t={now:.3} tension={:.3} angle={:.3} f={:.1}Hz pluck={}",
            control.tension,
            control.angle,
            params.frequency,
            params.pluck_triggered
        );

        TickOutput {
            params,
            control,
            endpoints: self.snapshot(),
            transitions,
        }
    }

    /// [`StringEngine::tick`] and hand the parameters straight to `sink`.
    pub fn tick_into<S: ParameterSink>(
        &mut self,
        hands: &[HandObservation],
        dt_sec: f32,
        sink: &mut S,
    ) -> TickOutput {
        let out = self.tick(hands, dt_sec);
        sink.apply(&out.params, self.config.mapping.ramp_time_sec);
        out
    }
}
