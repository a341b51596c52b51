//! Graphs (scalar curves) and paths (3D curves).
//!
//! Points are expected in ascending time order; see [`crate::Project::validate`].

use serde::{Deserialize, Serialize};

use crate::interpolation::Interpolation;
use crate::vector::Vector;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub value: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    #[serde(default)]
    pub time: f64,
    /// Missing positions decode as the origin.
    #[serde(default)]
    pub position: Vector,
}

/// Named scalar curve, referenced by id from scalar and color properties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub points: Vec<GraphPoint>,
    #[serde(default)]
    pub interpolation: Interpolation,
}

/// Named 3D curve, referenced by id from vector properties and tubes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub points: Vec<PathPoint>,
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl Graph {
    pub fn new(id: u32, name: impl Into<String>, interpolation: Interpolation) -> Self {
        Self {
            name: name.into(),
            id,
            points: Vec::new(),
            interpolation,
        }
    }

    /// Builder helper: append a point.
    pub fn with_point(mut self, time: f64, value: f64) -> Self {
        self.points.push(GraphPoint { time, value });
        self
    }
}

impl Path {
    pub fn new(id: u32, name: impl Into<String>, interpolation: Interpolation) -> Self {
        Self {
            name: name.into(),
            id,
            points: Vec::new(),
            interpolation,
        }
    }

    /// Builder helper: append a point.
    pub fn with_point(mut self, time: f64, position: impl Into<Vector>) -> Self {
        self.points.push(PathPoint {
            time,
            position: position.into(),
        });
        self
    }
}
