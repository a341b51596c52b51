//! wilson-api-core: the decoded project data model shared by the animation
//! engine and its hosts.
//!
//! Everything here is plain data. Projects are immutable once loaded; the
//! animation core only ever borrows them.

pub mod color;
pub mod colormap;
pub mod curves;
pub mod interpolation;
pub mod json;
pub mod objects;
pub mod project;
pub mod properties;
pub mod vector;

pub use color::Color;
pub use colormap::{ColorMap, ColorStop};
pub use curves::{Graph, GraphPoint, Path, PathPoint};
pub use interpolation::Interpolation;
pub use json::{parse_project_json, ProjectError};
pub use objects::{Label, Overlay, Tube};
pub use project::{Project, ProjectMeta};
pub use properties::{ColorProperty, ScalarProperty, VectorProperty};
pub use vector::Vector;
