// src/domain/profile/mod.rs

// In-memory view of a dbt `profiles.yml`:
//
// my_project:
//   target: dev
//   outputs:
//     dev: { type: postgres, host: ..., ... }

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::error::DomainError;

/// One named output block (a "target") with its connection parameters.
///
/// Only `type` is interpreted here; everything else is kept as raw YAML and
/// read by the URI builder of the matching connection type.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProfileOutput {
    #[serde(rename = "type", default)]
    pub connection_type: String,

    #[serde(flatten)]
    pub params: BTreeMap<String, serde_yaml::Value>,
}

impl ProfileOutput {
    /// Scalar parameter rendered as a string (`port: 5432` gives `"5432"`).
    pub fn get(&self, key: &str) -> Option<String> {
        match self.params.get(key)? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Same as [`get`](Self::get) but missing keys are an error.
    pub fn require(&self, key: &str) -> Result<String, DomainError> {
        self.get(key).ok_or_else(|| DomainError::MissingParameter {
            connection_type: self.connection_type.clone(),
            parameter: key.to_string(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProjectProfile {
    /// Default target of the project (unused by the sync, kept for `uri`).
    #[serde(default)]
    pub target: Option<String>,

    // `default` lets dbt's global `config:` block parse as an empty project
    #[serde(default)]
    pub outputs: BTreeMap<String, ProfileOutput>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileDocument {
    /// File the document was read from, used in error messages.
    pub path: PathBuf,
    pub projects: BTreeMap<String, ProjectProfile>,
}

impl ProfileDocument {
    pub fn new(path: impl Into<PathBuf>, projects: BTreeMap<String, ProjectProfile>) -> Self {
        Self {
            path: path.into(),
            projects,
        }
    }

    pub fn project(&self, project_name: &str) -> Result<&ProjectProfile, DomainError> {
        self.projects
            .get(project_name)
            .ok_or_else(|| DomainError::ProjectNotFound {
                project: project_name.to_string(),
                path: self.path.display().to_string(),
            })
    }

    /// Resolves `project_name.outputs.target_name`.
    pub fn output(
        &self,
        project_name: &str,
        target_name: &str,
    ) -> Result<&ProfileOutput, DomainError> {
        self.project(project_name)?
            .outputs
            .get(target_name)
            .ok_or_else(|| DomainError::TargetNotFound {
                target: target_name.to_string(),
                path: self.path.display().to_string(),
            })
    }
}

/// Name under which a project/target pair is registered remotely.
pub fn database_name(project_name: &str, target_name: &str) -> String {
    format!("{}_{}", project_name, target_name)
}
