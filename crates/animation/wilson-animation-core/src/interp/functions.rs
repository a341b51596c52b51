//! Value blending helpers.

use wilson_api_core::{Color, Vector};

/// Values that can be blended linearly as `a * (1 - t) + b * t`.
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Vector {
    #[inline]
    fn lerp(a: Vector, b: Vector, t: f64) -> Vector {
        a.lerp(b, t)
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(a: Color, b: Color, t: f64) -> Color {
        a.lerp(b, t as f32)
    }
}
