//! Growing tubes: polyline + per-point radius for a tube whose visible extent
//! follows playback time.
//!
//! Model:
//! - Keyframes are the merged, de-duplicated times of the path and the radius
//!   graph. Fewer than two keyframes cannot form a tube: no geometry, ever.
//! - The full point array carries two trailing copies of the last point as
//!   headroom for tangent estimation at a growing tip.
//! - Non-growing tubes are built once. Growing tubes are rebuilt per tick
//!   while their extent changes:
//!   - `t` past the end: complete tube,
//!   - `t` within the start slack: zero-radius tube over every point,
//!   - otherwise a prefix up to the first keyframe at or after `t`, ending in
//!     the exact position at `t` plus a tiny step along the local tangent so
//!     the final segment never has zero length.

use log::debug;
use serde::{Deserialize, Serialize};
use wilson_api_core::{Color, ColorProperty, Project, Tube, Vector};

use crate::colormap::lookup;
use crate::config::Config;
use crate::curve::{GraphInterpolator, PathInterpolator};
use crate::gradient::GradientTexture;

/// Polyline description handed to the renderer's tube builder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TubeGeometry {
    pub points: Vec<Vector>,
    pub radii: Vec<f64>,
    /// Normalized time per point, for sampling a baked color gradient.
    pub tex_coords: Vec<f64>,
}

impl TubeGeometry {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Result of [`GrowingTube::update`].
#[derive(Debug, PartialEq)]
pub enum TubeUpdate<'a> {
    /// Fewer than two keyframes; nothing to draw.
    NoGeometry,
    /// Geometry from an earlier tick is still current.
    Unchanged(&'a TubeGeometry),
    /// New geometry; buffers need re-uploading.
    Rebuilt(&'a TubeGeometry),
}

/// How the tube is colored.
#[derive(Clone, Debug, PartialEq)]
pub enum TubeColor {
    Static(Color),
    /// Graph baked over the tube's time span, sampled by `tex_coords`.
    Gradient(GradientTexture),
}

impl TubeColor {
    /// Graph-backed colors are baked once over `[start, end]`; every other
    /// source resolves to a fixed color.
    pub fn resolve(
        prop: Option<&ColorProperty>,
        project: &Project,
        start: f64,
        end: f64,
        cfg: &Config,
    ) -> TubeColor {
        match prop {
            None => TubeColor::Static(Color::BLACK),
            Some(ColorProperty::ConstValue(c)) => TubeColor::Static(*c),
            Some(ColorProperty::ScalarValue(v)) => {
                TubeColor::Static(lookup(project.colormap_stops(), *v))
            }
            Some(ColorProperty::GraphId(id)) => {
                match project.graph(*id).and_then(GraphInterpolator::from_graph) {
                    Some(graph) => TubeColor::Gradient(GradientTexture::bake(
                        &graph,
                        start,
                        end,
                        cfg.gradient_resolution,
                    )),
                    None => TubeColor::Static(Color::BLACK),
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Complete,
    Empty,
    Partial,
}

/// Merge two sorted-or-not time lists into one ascending axis, dropping any
/// time closer than `eps` to its sorted predecessor.
pub fn merge_keyframes(a: &[f64], b: &[f64], eps: f64) -> Vec<f64> {
    let mut all: Vec<f64> = a.iter().chain(b).copied().collect();
    all.sort_by(f64::total_cmp);
    let mut keys = Vec::with_capacity(all.len());
    for (i, &t) in all.iter().enumerate() {
        if i > 0 && (all[i - 1] - t).abs() < eps {
            continue;
        }
        keys.push(t);
    }
    keys
}

#[derive(Debug)]
pub struct GrowingTube {
    growing: bool,
    path: PathInterpolator,
    radius: GraphInterpolator,
    keys: Vec<f64>,
    /// One point per key plus two trailing copies of the last.
    points: Vec<Vector>,
    radii: Vec<f64>,
    start_time: f64,
    end_time: f64,
    keyframe_epsilon: f64,
    start_slack: f64,
    tip_step: f64,
    color: TubeColor,
    geometry: Option<TubeGeometry>,
    phase: Option<Phase>,
}

impl GrowingTube {
    pub fn new(
        path: PathInterpolator,
        radius: GraphInterpolator,
        growing: bool,
        cfg: &Config,
    ) -> Self {
        let path_times: Vec<f64> = path.times().collect();
        let radius_times: Vec<f64> = radius.times().collect();
        let keys = merge_keyframes(&path_times, &radius_times, cfg.keyframe_epsilon);

        let mut tube = Self {
            growing,
            path,
            radius,
            keys: Vec::new(),
            points: Vec::new(),
            radii: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
            keyframe_epsilon: cfg.keyframe_epsilon,
            start_slack: cfg.growing_start_slack,
            tip_step: cfg.tip_step,
            color: TubeColor::Static(Color::BLACK),
            geometry: None,
            phase: None,
        };

        if keys.len() < 2 {
            debug!("tube has {} keyframe(s); no geometry", keys.len());
            tube.keys = keys;
            return tube;
        }

        let n = keys.len();
        tube.start_time = keys[0];
        tube.end_time = keys[n - 1];
        tube.points = keys.iter().map(|&t| tube.path.interpolate(t)).collect();
        let last = tube.points[n - 1];
        tube.points.push(last);
        tube.points.push(last);
        tube.radii = keys.iter().map(|&t| tube.radius.interpolate(t)).collect();
        tube.keys = keys;
        tube
    }

    /// Build from a project tube: path by id, radius and color from its
    /// properties.
    pub fn from_tube(tube: &Tube, project: &Project, cfg: &Config) -> Self {
        let path = PathInterpolator::for_path(project, tube.path_id);
        let radius = GraphInterpolator::for_property(project, tube.radius.as_ref());
        let mut grown = Self::new(path, radius, tube.is_growing, cfg);
        if grown.has_geometry() {
            grown.color = TubeColor::resolve(
                tube.color.as_ref(),
                project,
                grown.start_time,
                grown.end_time,
                cfg,
            );
        }
        grown
    }

    pub fn has_geometry(&self) -> bool {
        self.keys.len() >= 2
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn keyframes(&self) -> &[f64] {
        &self.keys
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn color(&self) -> &TubeColor {
        &self.color
    }

    pub fn set_color(&mut self, color: TubeColor) {
        self.color = color;
    }

    /// Last geometry produced by [`GrowingTube::update`].
    pub fn geometry(&self) -> Option<&TubeGeometry> {
        self.geometry.as_ref()
    }

    /// Advance to time `t`, rebuilding only when the visible extent changes.
    pub fn update(&mut self, t: f64) -> TubeUpdate<'_> {
        if !self.has_geometry() {
            return TubeUpdate::NoGeometry;
        }
        let phase = self.phase_at(t);
        let stale = !matches!(
            (self.phase, phase),
            (Some(Phase::Complete), Phase::Complete) | (Some(Phase::Empty), Phase::Empty)
        );
        if stale || self.geometry.is_none() {
            self.geometry = self.geometry_at(t);
            self.phase = Some(phase);
            return match &self.geometry {
                Some(g) => TubeUpdate::Rebuilt(g),
                None => TubeUpdate::NoGeometry,
            };
        }
        match &self.geometry {
            Some(g) => TubeUpdate::Unchanged(g),
            None => TubeUpdate::NoGeometry,
        }
    }

    fn phase_at(&self, t: f64) -> Phase {
        if !self.growing || t > self.end_time {
            Phase::Complete
        } else if t - self.start_time <= self.start_slack {
            Phase::Empty
        } else {
            Phase::Partial
        }
    }

    /// Geometry at time `t` without touching the cache.
    pub fn geometry_at(&self, t: f64) -> Option<TubeGeometry> {
        if !self.has_geometry() {
            return None;
        }
        let n = self.keys.len();
        let geometry = match self.phase_at(t) {
            Phase::Complete => TubeGeometry {
                points: self.points[..n].to_vec(),
                radii: self.radii.clone(),
                tex_coords: self.keys.iter().map(|&k| self.tex_coord(k)).collect(),
            },
            Phase::Empty => TubeGeometry {
                points: self.points.clone(),
                radii: vec![0.0; n + 2],
                tex_coords: self.padded_tex_coords(),
            },
            Phase::Partial => self.partial_geometry(t),
        };
        Some(geometry)
    }

    fn partial_geometry(&self, t: f64) -> TubeGeometry {
        let n = self.keys.len();
        // first key at or after t; the phase guarantees 1 <= last_idx < n
        let last_idx = self.keys.partition_point(|&k| k < t).clamp(1, n - 1);
        let tip_radius = self.radius.interpolate(t);
        let radius_at = |i: usize| {
            if i < last_idx {
                self.radii[i]
            } else if i == last_idx {
                tip_radius
            } else {
                0.0
            }
        };

        if self.keys[last_idx] - t < self.keyframe_epsilon {
            // t sits on a keyframe: the precomputed points are exact
            return TubeGeometry {
                points: self.points.clone(),
                radii: (0..n + 2).map(radius_at).collect(),
                tex_coords: self.padded_tex_coords(),
            };
        }

        let tip = self.path.interpolate(t);
        let dir = self.tip_direction(last_idx);
        let tip_u = self.tex_coord(t);

        let mut points = Vec::with_capacity(n + 2);
        points.extend_from_slice(&self.points[..last_idx]);
        points.push(tip);
        points.push(tip.add(dir.scale(self.tip_step)));
        points.extend_from_slice(&self.points[last_idx..n]);

        let mut tex_coords = Vec::with_capacity(n + 2);
        tex_coords.extend(self.keys[..last_idx].iter().map(|&k| self.tex_coord(k)));
        tex_coords.push(tip_u);
        tex_coords.push(tip_u);
        tex_coords.extend(self.keys[last_idx..].iter().map(|&k| self.tex_coord(k)));

        TubeGeometry {
            points,
            radii: (0..n + 2).map(radius_at).collect(),
            tex_coords,
        }
    }

    /// Direction of the segment ending at `last_idx`, or of the closest
    /// non-degenerate segment before it, or +X.
    fn tip_direction(&self, last_idx: usize) -> Vector {
        (1..=last_idx)
            .rev()
            .map(|i| self.points[i].sub(self.points[i - 1]).normalized())
            .find(|d| *d != Vector::ZERO)
            .unwrap_or(Vector::UNIT_X)
    }

    fn tex_coord(&self, t: f64) -> f64 {
        ((t - self.start_time) / (self.end_time - self.start_time)).clamp(0.0, 1.0)
    }

    fn padded_tex_coords(&self) -> Vec<f64> {
        let mut coords: Vec<f64> = self.keys.iter().map(|&k| self.tex_coord(k)).collect();
        coords.push(1.0);
        coords.push(1.0);
        coords
    }
}

/// Geometry as JSON for hosts that ship it across a thread or process boundary.
pub fn export_geometry_json(geometry: &TubeGeometry) -> serde_json::Value {
    serde_json::to_value(geometry).unwrap_or(serde_json::Value::Null)
}
