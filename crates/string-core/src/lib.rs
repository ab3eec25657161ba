//! Gesture-driven elastic string engine.
//!
//! Tracked hands pinch and drag the two ends of a virtual string; the
//! resulting geometry becomes tension, stretch and tilt signals, which are
//! mapped onto a bounded set of audio parameters once per frame.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grab;
pub mod hand;
pub mod mapping;
pub mod pinch;
pub mod signals;
pub mod sink;
pub mod spring;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use grab::{Endpoint, Endpoints, ReleaseReason, Side, Transition};
pub use hand::*;
pub use mapping::OutputParameterFrame;
pub use signals::ControlFrame;
pub use sink::ParameterSink;
