//! Interpolation primitives: easing strategies and value blending.

pub mod easing;
pub mod functions;

pub use easing::{ease, Easing};
pub use functions::Lerp;
