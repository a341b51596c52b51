//! Curve interpolation over sorted control points.
//!
//! Model:
//! - Points are sorted by ascending time (validated at project load, assumed here).
//! - Queries before the first point clamp to it, queries at or after the last
//!   point clamp to that one.
//! - Inside a segment the gradient is eased per interpolation mode and the two
//!   neighbouring values are blended linearly.
//! - A query within `SNAP_EPSILON` before a point returns that point's value
//!   exactly, absorbing float noise at frame boundaries.
//! - A query exactly on a point returns that point's value in every mode,
//!   so an AHEAD curve only jumps to the next value once `t` leaves the point.

use wilson_api_core::{Graph, Interpolation, Path, Project, ScalarProperty, Vector, VectorProperty};

use crate::interp::{Easing, Lerp};

/// Snap-to-keyframe tolerance.
pub const SNAP_EPSILON: f64 = 1e-7;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControlPoint<V> {
    pub time: f64,
    pub value: V,
}

impl<V> ControlPoint<V> {
    pub fn new(time: f64, value: V) -> Self {
        Self { time, value }
    }
}

/// Evaluate `points` at `t`. Returns `None` only for an empty slice.
pub fn sample_points<V: Lerp>(
    points: &[ControlPoint<V>],
    easing: Option<Easing>,
    t: f64,
) -> Option<V> {
    let first = points.first()?;
    // first index with time > t; points are sorted so a binary search finds
    // the same index a front-to-back scan would
    let idx = points.partition_point(|p| p.time <= t);
    if idx == points.len() {
        return points.last().map(|p| p.value);
    }
    if idx == 0 {
        return Some(first.value);
    }

    let right = &points[idx];
    if right.time - t < SNAP_EPSILON {
        return Some(right.value);
    }

    let left = &points[idx - 1];
    // a query on a control point reads that point, whatever the easing
    if t == left.time {
        return Some(left.value);
    }
    let gradient = (t - left.time) / (right.time - left.time);
    let lambda = match easing {
        Some(e) => e.ease(gradient),
        None => gradient,
    };
    Some(V::lerp(left.value, right.value, lambda))
}

/// Interpolator owning a non-empty copy of one curve.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveInterpolator<V> {
    points: Vec<ControlPoint<V>>,
    mode: Interpolation,
    easing: Option<Easing>,
}

pub type GraphInterpolator = CurveInterpolator<f64>;
pub type PathInterpolator = CurveInterpolator<Vector>;

impl<V: Lerp> CurveInterpolator<V> {
    /// `None` when `points` is empty; an empty curve has no value to return.
    pub fn new(points: Vec<ControlPoint<V>>, mode: Interpolation) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            mode,
            easing: Easing::for_mode(mode),
        })
    }

    /// Single-point curve evaluating to `value` everywhere.
    pub fn constant(value: V) -> Self {
        Self {
            points: vec![ControlPoint::new(0.0, value)],
            mode: Interpolation::Linear,
            easing: None,
        }
    }

    #[inline]
    pub fn interpolate(&self, t: f64) -> V {
        match sample_points(&self.points, self.easing, t) {
            Some(v) => v,
            // unreachable: construction guarantees at least one point
            None => self.points[0].value,
        }
    }

    pub fn points(&self) -> &[ControlPoint<V>] {
        &self.points
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time)
    }

    pub fn mode(&self) -> Interpolation {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start_time(&self) -> f64 {
        self.points[0].time
    }

    pub fn end_time(&self) -> f64 {
        self.points[self.points.len() - 1].time
    }
}

impl GraphInterpolator {
    /// Interpolator over a graph's points; `None` for an empty graph.
    pub fn from_graph(graph: &Graph) -> Option<Self> {
        let points = graph
            .points
            .iter()
            .map(|p| ControlPoint::new(p.time, p.value))
            .collect();
        Self::new(points, graph.interpolation)
    }

    /// Interpolator for graph `id`, falling back to a constant zero when the
    /// graph is missing or empty.
    pub fn for_graph(project: &Project, id: u32) -> Self {
        project
            .graph(id)
            .and_then(Self::from_graph)
            .unwrap_or_else(|| Self::constant(0.0))
    }

    /// Interpolator for an optional scalar property (constants become single
    /// points, missing properties evaluate to zero).
    pub fn for_property(project: &Project, prop: Option<&ScalarProperty>) -> Self {
        match prop {
            Some(ScalarProperty::ConstValue(v)) => Self::constant(*v),
            Some(ScalarProperty::GraphId(id)) => Self::for_graph(project, *id),
            None => Self::constant(0.0),
        }
    }
}

impl PathInterpolator {
    /// Interpolator over a path's points; `None` for an empty path.
    pub fn from_path(path: &Path) -> Option<Self> {
        let points = path
            .points
            .iter()
            .map(|p| ControlPoint::new(p.time, p.position))
            .collect();
        Self::new(points, path.interpolation)
    }

    /// Interpolator for path `id`, falling back to the origin when the path is
    /// missing or empty.
    pub fn for_path(project: &Project, id: u32) -> Self {
        project
            .path(id)
            .and_then(Self::from_path)
            .unwrap_or_else(|| Self::constant(Vector::ZERO))
    }

    pub fn for_property(project: &Project, prop: Option<&VectorProperty>) -> Self {
        match prop {
            Some(VectorProperty::ConstValue(v)) => Self::constant(*v),
            Some(VectorProperty::PathId(id)) => Self::for_path(project, *id),
            None => Self::constant(Vector::ZERO),
        }
    }
}
