//! Easing strategies for the interpolation modes of the data model.
//!
//! An easing remaps the normalized position inside a segment (the gradient,
//! in [0,1]) before values are blended. Linear segments need no remapping, so
//! [`Easing::for_mode`] returns `None` for them and callers blend directly.

use wilson_api_core::Interpolation;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Always the segment start.
    Hold,
    /// Always the segment end.
    Ahead,
    /// Segment start up to and including the midpoint, end afterwards.
    Step,
}

impl Easing {
    /// Strategy for a mode. Linear, cubic and unrecognized modes blend linearly.
    pub fn for_mode(mode: Interpolation) -> Option<Easing> {
        match mode {
            Interpolation::Hold => Some(Easing::Hold),
            Interpolation::Ahead => Some(Easing::Ahead),
            Interpolation::Step => Some(Easing::Step),
            Interpolation::Linear | Interpolation::Cubic | Interpolation::Unrecognized => None,
        }
    }

    #[inline]
    pub fn ease(self, gradient: f64) -> f64 {
        match self {
            Easing::Hold => 0.0,
            Easing::Ahead => 1.0,
            Easing::Step => {
                if gradient <= 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }
}

/// `ease(mode, g)`: the blend factor a mode produces for gradient `g`.
#[inline]
pub fn ease(mode: Interpolation, gradient: f64) -> f64 {
    match Easing::for_mode(mode) {
        Some(easing) => easing.ease(gradient),
        None => gradient,
    }
}
