use crate::mapping::OutputParameterFrame;

/// Consumer of mapped parameters, typically an audio backend.
///
/// Implementations should glide each continuous parameter toward its new
/// target over `ramp_time_sec` (e.g. an exponential approach with that time
/// constant) and fire a one-shot on `pluck_triggered`.
pub trait ParameterSink {
    fn apply(&mut self, frame: &OutputParameterFrame, ramp_time_sec: f32);
}

impl<S: ParameterSink + ?Sized> ParameterSink for &mut S {
    fn apply(&mut self, frame: &OutputParameterFrame, ramp_time_sec: f32) {
        (**self).apply(frame, ramp_time_sec)
    }
}

/// Sink that keeps every frame, handy for recording a session.
impl ParameterSink for Vec<OutputParameterFrame> {
    fn apply(&mut self, frame: &OutputParameterFrame, _ramp_time_sec: f32) {
        self.push(*frame);
    }
}
