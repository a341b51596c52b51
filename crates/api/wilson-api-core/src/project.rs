//! Project root: every curve, the color map and the objects consuming them.

use serde::{Deserialize, Serialize};

use crate::colormap::ColorMap;
use crate::curves::{Graph, Path};
use crate::json::ProjectError;
use crate::objects::{Label, Overlay, Tube};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Time value the animation starts from.
    #[serde(default)]
    pub start_time: f64,
    /// Time value the animation ends at.
    #[serde(default)]
    pub end_time: f64,
    /// Playback speed in time units per second.
    #[serde(default)]
    pub speed_ratio: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub meta: Option<ProjectMeta>,
    #[serde(default)]
    pub graphs: Vec<Graph>,
    #[serde(default)]
    pub paths: Vec<Path>,
    #[serde(default)]
    pub colormap: Option<ColorMap>,
    #[serde(default)]
    pub tubes: Vec<Tube>,
    #[serde(default)]
    pub overlays: Vec<Overlay>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub hidden_groups: Vec<String>,
}

impl Project {
    /// Look up a graph by id. Ids are unique per collection; the first match wins.
    pub fn graph(&self, id: u32) -> Option<&Graph> {
        self.graphs.iter().find(|g| g.id == id)
    }

    /// Look up a path by id. Ids are unique per collection; the first match wins.
    pub fn path(&self, id: u32) -> Option<&Path> {
        self.paths.iter().find(|p| p.id == id)
    }

    /// Color map stops, empty when the project has no color map.
    pub fn colormap_stops(&self) -> &[crate::ColorStop] {
        self.colormap
            .as_ref()
            .map(|c| c.stops.as_slice())
            .unwrap_or(&[])
    }

    pub fn start_time(&self) -> f64 {
        self.meta.as_ref().map(|m| m.start_time).unwrap_or(0.0)
    }

    /// Reject data the interpolators cannot evaluate meaningfully:
    /// non-finite times/values and out-of-order points or stops.
    pub fn validate(&self) -> Result<(), ProjectError> {
        for graph in &self.graphs {
            let mut last = f64::NEG_INFINITY;
            for (index, p) in graph.points.iter().enumerate() {
                if !p.time.is_finite() || !p.value.is_finite() {
                    return Err(ProjectError::NonFinite {
                        kind: "graph",
                        id: graph.id,
                        index,
                    });
                }
                if p.time < last {
                    return Err(ProjectError::UnsortedPoints {
                        kind: "graph",
                        id: graph.id,
                        index,
                    });
                }
                last = p.time;
            }
        }
        for path in &self.paths {
            let mut last = f64::NEG_INFINITY;
            for (index, p) in path.points.iter().enumerate() {
                if !p.time.is_finite() || !p.position.is_finite() {
                    return Err(ProjectError::NonFinite {
                        kind: "path",
                        id: path.id,
                        index,
                    });
                }
                if p.time < last {
                    return Err(ProjectError::UnsortedPoints {
                        kind: "path",
                        id: path.id,
                        index,
                    });
                }
                last = p.time;
            }
        }
        let mut last = f64::NEG_INFINITY;
        for (index, stop) in self.colormap_stops().iter().enumerate() {
            if !stop.value.is_finite() || stop.value < last {
                return Err(ProjectError::UnsortedStops { index });
            }
            last = stop.value;
        }
        Ok(())
    }
}
