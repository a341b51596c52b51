//! Wilson Animation Core (engine-agnostic)
//!
//! Turns a parsed project into per-frame values: curve interpolation with
//! easing, color map lookup, property resolution, live text templates and
//! growing tube geometry. Nothing here touches a renderer; hosts feed a
//! playback time in and copy values out.

pub mod arena;
pub mod colormap;
pub mod config;
pub mod curve;
pub mod gradient;
pub mod interp;
pub mod resolve;
pub mod text;
pub mod tube;

// Re-exports for consumers (scene builders)
pub use arena::{ColorKey, ResourceArena, ResourceHandle};
pub use colormap::{bake_colormap, lookup, ColorRange, ColorScale};
pub use config::Config;
pub use curve::{
    sample_points, ControlPoint, CurveInterpolator, GraphInterpolator, PathInterpolator,
    SNAP_EPSILON,
};
pub use gradient::GradientTexture;
pub use interp::{ease, Easing, Lerp};
pub use resolve::{
    color_is_static, resolve_color, resolve_scalar, resolve_vector, ColorAnimation, Resolved,
    ResolvedColor,
};
pub use text::{Template, TextEngine, TextSink};
pub use tube::{
    export_geometry_json, merge_keyframes, GrowingTube, TubeColor, TubeGeometry, TubeUpdate,
};
pub use wilson_api_core::{Color, Interpolation, Project, Vector};
