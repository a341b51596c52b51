//! Shared project fixtures for tests and benches.
//!
//! Fixtures live under `fixtures/` at the workspace root and are indexed by
//! `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    projects: HashMap<String, ProjectEntry>,
}

/// Either a bare relative path or a detailed entry. Detailed entries may flag
/// a fixture as invalid, i.e. one that loading is expected to reject.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProjectEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default = "default_valid")]
        valid: bool,
    },
}

fn default_valid() -> bool {
    true
}

impl ProjectEntry {
    fn as_path(&self) -> &str {
        match self {
            ProjectEntry::Path(path) => path,
            ProjectEntry::Detailed { path, .. } => path,
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            ProjectEntry::Path(_) => true,
            ProjectEntry::Detailed { valid, .. } => *valid,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod projects {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.projects.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Names of fixtures that are expected to load cleanly.
    pub fn valid_keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST
            .projects
            .iter()
            .filter(|(_, entry)| entry.is_valid())
            .map(|(name, _)| name.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.projects, "project", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.projects, "project", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.projects, "project", name)?;
        Ok(resolve_path(entry.as_path()))
    }

    pub fn is_valid(name: &str) -> Result<bool> {
        lookup(&MANIFEST.projects, "project", name).map(ProjectEntry::is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_lists_projects() {
        let keys = projects::keys();
        assert!(keys.contains(&"scenarios".to_string()));
        assert!(!projects::valid_keys().contains(&"unsorted-stops".to_string()));
        assert!(projects::path("scenarios").unwrap().exists());
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = projects::json("missing").unwrap_err();
        assert_eq!(err.to_string(), "unknown project fixture 'missing'");
    }
}
