//! Reference consumer: glides toward each new parameter frame the way an
//! audio backend would with `setTargetAtTime`.

use log::info;
use string_core::{OutputParameterFrame, ParameterSink};

pub struct SmoothedSink {
    pub current: OutputParameterFrame,
    dt_sec: f32,
    initialized: bool,
    pub plucks: u32,
}

impl SmoothedSink {
    pub fn new(dt_sec: f32) -> Self {
        Self {
            current: OutputParameterFrame::default(),
            dt_sec,
            initialized: false,
            plucks: 0,
        }
    }

    /// Time that will pass before the next frame arrives.
    pub fn set_dt(&mut self, dt_sec: f32) {
        self.dt_sec = dt_sec;
    }
}

impl ParameterSink for SmoothedSink {
    fn apply(&mut self, target: &OutputParameterFrame, ramp_time_sec: f32) {
        if target.pluck_triggered {
            self.plucks += 1;
            info!(
                "pluck #{} at {:.1} Hz, {:.1} dB",
                self.plucks, target.frequency, target.volume_db
            );
        }
        if !self.initialized || ramp_time_sec <= 0.0 {
            self.current = *target;
            self.initialized = true;
            return;
        }
        let alpha = 1.0 - (-self.dt_sec / ramp_time_sec).exp();
        let c = &mut self.current;
        c.frequency += (target.frequency - c.frequency) * alpha;
        c.volume_db += (target.volume_db - c.volume_db) * alpha;
        c.filter_cutoff_hz += (target.filter_cutoff_hz - c.filter_cutoff_hz) * alpha;
        c.distortion_amount += (target.distortion_amount - c.distortion_amount) * alpha;
        c.reverb_wet += (target.reverb_wet - c.reverb_wet) * alpha;
        c.modulation_depth_hz += (target.modulation_depth_hz - c.modulation_depth_hz) * alpha;
        c.pluck_triggered = target.pluck_triggered;
    }
}
