//! Animatable properties: a literal constant or a reference to a curve.
//!
//! The JSON form follows the protobuf JSON mapping of the wire model, i.e. a
//! single-key object naming the active source: `{"constValue": 1.5}`,
//! `{"graphId": 3}`, `{"pathId": 1}`, `{"scalarValue": 0.25}`. A property
//! whose source is unset is written as `{}` and decodes to `None`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::Color;
use crate::vector::Vector;

/// Scalar property, backed by a constant or a graph.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarProperty {
    ConstValue(f64),
    GraphId(u32),
}

/// Vector property, backed by a constant or a path.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VectorProperty {
    ConstValue(Vector),
    PathId(u32),
}

/// Color property.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorProperty {
    /// Literal RGBA color.
    ConstValue(Color),
    /// Graph whose values are mapped through the project color map.
    GraphId(u32),
    /// Fixed scalar mapped through the project color map.
    ScalarValue(f64),
}

impl ScalarProperty {
    pub fn referenced_graph(&self) -> Option<u32> {
        match self {
            ScalarProperty::GraphId(id) => Some(*id),
            ScalarProperty::ConstValue(_) => None,
        }
    }
}

impl VectorProperty {
    pub fn referenced_path(&self) -> Option<u32> {
        match self {
            VectorProperty::PathId(id) => Some(*id),
            VectorProperty::ConstValue(_) => None,
        }
    }
}

impl ColorProperty {
    pub fn referenced_graph(&self) -> Option<u32> {
        match self {
            ColorProperty::GraphId(id) => Some(*id),
            ColorProperty::ConstValue(_) | ColorProperty::ScalarValue(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireProperty<T> {
    Set(T),
    Unset(Unset),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Unset {}

/// `deserialize_with` helper for optional properties: `null`, a missing
/// field and `{}` all decode to `None`.
pub(crate) fn unset_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<WireProperty<T>>::deserialize(deserializer)? {
        Some(WireProperty::Set(value)) => Some(value),
        Some(WireProperty::Unset(_)) | None => None,
    })
}
