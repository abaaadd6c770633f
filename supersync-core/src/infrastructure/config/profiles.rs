// supersync-core/src/infrastructure/config/profiles.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::domain::profile::{ProfileDocument, ProjectProfile};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::template::JinjaRenderer;

pub const PROFILES_FILE_NAME: &str = "profiles.yml";

/// Reads, renders (`env_var()`) and parses a dbt profiles file.
#[instrument]
pub fn load_profiles(path: &Path) -> Result<ProfileDocument, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ProfilesNotFound(
            path.display().to_string(),
        ));
    }
    info!(path = ?path, "Loading dbt profiles");

    // The handle is dropped as soon as the content is read
    let raw = fs::read_to_string(path)?;
    let rendered = JinjaRenderer::new().render(&raw)?;

    let projects: BTreeMap<String, ProjectProfile> = if rendered.trim().is_empty() {
        BTreeMap::new()
    } else {
        // Anchors are common in profiles.yml (`prod: {<<: *dev, host: ...}`)
        let mut value: serde_yaml::Value = serde_yaml::from_str(&rendered)?;
        value.apply_merge()?;
        serde_yaml::from_value(value)?
    };
    debug!(projects = projects.len(), "Profiles parsed");

    Ok(ProfileDocument::new(path, projects))
}

/// Where to look for profiles.yml when the caller gave no explicit path.
///
/// Order: explicit path, `SUPERSYNC_PROFILES`, `$DBT_PROFILES_DIR/profiles.yml`,
/// `$HOME/.dbt/profiles.yml`.
pub fn resolve_profiles_path(explicit: Option<PathBuf>) -> Result<PathBuf, InfrastructureError> {
    resolve_profiles_path_with(explicit, |key| std::env::var(key).ok())
}

fn resolve_profiles_path_with<F>(
    explicit: Option<PathBuf>,
    lookup: F,
) -> Result<PathBuf, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = lookup("SUPERSYNC_PROFILES") {
        return Ok(PathBuf::from(path));
    }
    if let Some(dir) = lookup("DBT_PROFILES_DIR") {
        return Ok(PathBuf::from(dir).join(PROFILES_FILE_NAME));
    }
    if let Some(home) = lookup("HOME") {
        return Ok(PathBuf::from(home).join(".dbt").join(PROFILES_FILE_NAME));
    }
    Err(InfrastructureError::ProfilesNotFound(
        "no --profiles given and neither DBT_PROFILES_DIR nor HOME is set".to_string(),
    ))
}
