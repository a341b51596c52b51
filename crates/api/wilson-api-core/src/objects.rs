//! Scene objects whose properties feed the animation core.
//!
//! Only the fields the core consumes are modelled; everything else belongs to
//! the scene builder.

use serde::{Deserialize, Serialize};

use crate::properties::{unset_as_none, ColorProperty, ScalarProperty, VectorProperty};

/// Tube following a path, optionally growing with playback time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tube {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_growing: bool,
    #[serde(default)]
    pub path_id: u32,
    #[serde(default, deserialize_with = "unset_as_none")]
    pub radius: Option<ScalarProperty>,
    #[serde(default, deserialize_with = "unset_as_none")]
    pub color: Option<ColorProperty>,
}

/// Screen-space text; `text` may contain value markers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "unset_as_none")]
    pub font_size: Option<ScalarProperty>,
}

/// Text placed in 3D space; `text` may contain value markers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "unset_as_none")]
    pub position: Option<VectorProperty>,
    #[serde(default, deserialize_with = "unset_as_none")]
    pub color: Option<ColorProperty>,
    #[serde(default, deserialize_with = "unset_as_none")]
    pub font_size: Option<ScalarProperty>,
}
