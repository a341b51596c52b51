//! Property resolution: turn a constant-or-reference property into either a
//! static value or an interpolator evaluated per frame.
//!
//! Dangling references (unknown id, or a curve without points) never abort
//! playback; they resolve to the type default (0, origin, opaque black).

use log::warn;
use wilson_api_core::{
    Color, ColorProperty, ColorStop, Project, ScalarProperty, Vector, VectorProperty,
};

use crate::colormap::lookup;
use crate::curve::{CurveInterpolator, GraphInterpolator, PathInterpolator};
use crate::interp::Lerp;

/// Outcome of resolving a property.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved<V> {
    Static(V),
    Animated(CurveInterpolator<V>),
}

impl<V: Lerp> Resolved<V> {
    #[inline]
    pub fn value_at(&self, t: f64) -> V {
        match self {
            Resolved::Static(v) => *v,
            Resolved::Animated(interp) => interp.interpolate(t),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Resolved::Static(_))
    }
}

pub fn resolve_scalar(prop: Option<&ScalarProperty>, project: &Project) -> Resolved<f64> {
    match prop {
        None => Resolved::Static(0.0),
        Some(ScalarProperty::ConstValue(v)) => Resolved::Static(*v),
        Some(ScalarProperty::GraphId(id)) => {
            match project.graph(*id).and_then(GraphInterpolator::from_graph) {
                Some(interp) => Resolved::Animated(interp),
                None => {
                    warn!("scalar property references missing or empty graph {id}; using 0");
                    Resolved::Static(0.0)
                }
            }
        }
    }
}

pub fn resolve_vector(prop: Option<&VectorProperty>, project: &Project) -> Resolved<Vector> {
    match prop {
        None => Resolved::Static(Vector::ZERO),
        Some(VectorProperty::ConstValue(v)) => Resolved::Static(*v),
        Some(VectorProperty::PathId(id)) => {
            match project.path(*id).and_then(PathInterpolator::from_path) {
                Some(interp) => Resolved::Animated(interp),
                None => {
                    warn!("vector property references missing or empty path {id}; using origin");
                    Resolved::Static(Vector::ZERO)
                }
            }
        }
    }
}

/// Graph values shown through the project color map.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAnimation {
    graph: GraphInterpolator,
    stops: Vec<ColorStop>,
}

impl ColorAnimation {
    pub fn new(graph: GraphInterpolator, stops: Vec<ColorStop>) -> Self {
        Self { graph, stops }
    }

    #[inline]
    pub fn value_at(&self, t: f64) -> Color {
        lookup(&self.stops, self.graph.interpolate(t))
    }

    pub fn graph(&self) -> &GraphInterpolator {
        &self.graph
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedColor {
    Static(Color),
    Animated(ColorAnimation),
}

impl ResolvedColor {
    #[inline]
    pub fn value_at(&self, t: f64) -> Color {
        match self {
            ResolvedColor::Static(c) => *c,
            ResolvedColor::Animated(anim) => anim.value_at(t),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, ResolvedColor::Static(_))
    }
}

/// Resolve a color property. Scalars bypass graph lookup and go straight
/// through the color map; a single-point graph is static as well.
pub fn resolve_color(prop: Option<&ColorProperty>, project: &Project) -> ResolvedColor {
    let stops = project.colormap_stops();
    match prop {
        None => ResolvedColor::Static(Color::BLACK),
        Some(ColorProperty::ConstValue(c)) => ResolvedColor::Static(*c),
        Some(ColorProperty::ScalarValue(v)) => ResolvedColor::Static(lookup(stops, *v)),
        Some(ColorProperty::GraphId(id)) => {
            match project.graph(*id).and_then(GraphInterpolator::from_graph) {
                None => {
                    warn!("color property references missing or empty graph {id}; using black");
                    ResolvedColor::Static(Color::BLACK)
                }
                Some(interp) if interp.len() == 1 => {
                    ResolvedColor::Static(lookup(stops, interp.points()[0].value))
                }
                Some(interp) => {
                    ResolvedColor::Animated(ColorAnimation::new(interp, stops.to_vec()))
                }
            }
        }
    }
}

/// True when a color property never changes over time.
pub fn color_is_static(prop: Option<&ColorProperty>, project: &Project) -> bool {
    match prop {
        Some(ColorProperty::GraphId(id)) => {
            project.graph(*id).map_or(true, |g| g.points.len() <= 1)
        }
        _ => true,
    }
}
