//! JSON loading for projects.

use thiserror::Error;

use crate::project::Project;

/// Errors produced while loading a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{kind} {id}: point {index} has a non-finite time or value")]
    NonFinite {
        kind: &'static str,
        id: u32,
        index: usize,
    },
    #[error("{kind} {id}: point {index} is earlier than its predecessor")]
    UnsortedPoints {
        kind: &'static str,
        id: u32,
        index: usize,
    },
    #[error("colormap stop {index} is out of order or non-finite")]
    UnsortedStops { index: usize },
}

/// Parse a project from its JSON encoding and validate point ordering.
pub fn parse_project_json(s: &str) -> Result<Project, ProjectError> {
    let project: Project = serde_json::from_str(s)?;
    project.validate()?;
    Ok(project)
}
