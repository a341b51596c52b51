//! Core configuration for wilson-animation-core.

use serde::{Deserialize, Serialize};

/// Numeric tolerances and bake resolutions used by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Below this distance two merged tube keyframes count as one, and a
    /// growing tube's query time counts as sitting on a keyframe.
    pub keyframe_epsilon: f64,
    /// A growing tube queried this close to its start renders empty.
    pub growing_start_slack: f64,
    /// Length of the tangent offset appended at a growing tube's tip.
    pub tip_step: f64,
    /// Texels in a baked tube color gradient.
    pub gradient_resolution: usize,
    /// Texels in a baked color map table.
    pub colormap_resolution: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyframe_epsilon: 1e-7,
            growing_start_slack: 1e-4,
            tip_step: 1e-6,
            gradient_resolution: 2048,
            colormap_resolution: 1024,
        }
    }
}
