//! Global color map converting scalars into colors.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// One gradient stop. A stop without a color is tolerated and reads as black.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub color: Option<Color>,
}

impl ColorStop {
    pub fn new(value: f64, color: Color) -> Self {
        Self {
            value,
            color: Some(color),
        }
    }
}

/// Stops ordered by ascending `value`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorMap {
    #[serde(default)]
    pub stops: Vec<ColorStop>,
}

impl ColorMap {
    pub fn new(stops: Vec<ColorStop>) -> Self {
        Self { stops }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
