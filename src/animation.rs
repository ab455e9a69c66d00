//! The interpolation playback model that drives the demo:
//! a normalized time parameter stepped by a fixed tick
//! and sampled along three curves between two fixed endpoints.

pub mod interpolation;

mod animator;
pub use animator::{Animator, PlaybackCommand, Sample};
