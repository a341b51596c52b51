//! Interpolation modes attached to graphs and paths.

use serde::{Deserialize, Serialize};

/// How values between two control points are derived.
///
/// Decoding is lenient: both the enum name and its wire number are accepted,
/// and anything unknown becomes [`Interpolation::Unrecognized`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawInterpolation", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interpolation {
    /// Linear blend between consecutive points.
    #[default]
    Linear,
    /// Hold the previous value until the next point is reached.
    Hold,
    /// Jump to the next value as soon as the segment starts.
    Ahead,
    /// Hold the previous value until the segment midpoint, then the next one.
    Step,
    /// Reserved; evaluated as linear.
    Cubic,
    Unrecognized,
}

impl Interpolation {
    pub fn from_wire(n: i64) -> Self {
        match n {
            0 => Interpolation::Linear,
            1 => Interpolation::Hold,
            2 => Interpolation::Ahead,
            3 => Interpolation::Step,
            4 => Interpolation::Cubic,
            _ => Interpolation::Unrecognized,
        }
    }

    pub fn from_name(s: &str) -> Self {
        match s {
            "LINEAR" => Interpolation::Linear,
            "HOLD" => Interpolation::Hold,
            "AHEAD" => Interpolation::Ahead,
            "STEP" => Interpolation::Step,
            "CUBIC" => Interpolation::Cubic,
            _ => Interpolation::Unrecognized,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterpolation {
    Number(i64),
    Name(String),
}

impl From<RawInterpolation> for Interpolation {
    fn from(raw: RawInterpolation) -> Self {
        match raw {
            RawInterpolation::Number(n) => Interpolation::from_wire(n),
            RawInterpolation::Name(s) => Interpolation::from_name(&s),
        }
    }
}
