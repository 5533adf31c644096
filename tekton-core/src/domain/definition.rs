//! Definition domain types
//!
//! A definition points the pipeline at a Git repository holding its Tekton
//! YAML resources.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Tool;

/// Pipeline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub id: Uuid,
    pub href: Option<String>,
    pub source: DefinitionSource,
}

/// Where the Tekton resources of a definition are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSource {
    /// Source kind, only `git` is offered by the service
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: DefinitionSourceProperties,
}

/// Repository coordinates of a definition source
///
/// Exactly one of `branch` or `tag` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSourceProperties {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Directory inside the repository holding the YAML files
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
}

impl DefinitionSource {
    /// Git source tracking a branch
    pub fn git_branch(
        url: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            source_type: "git".to_string(),
            properties: DefinitionSourceProperties {
                url: url.into(),
                branch: Some(branch.into()),
                tag: None,
                path: path.into(),
                tool: None,
            },
        }
    }

    /// Git source pinned to a tag
    pub fn git_tag(
        url: impl Into<String>,
        tag: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            source_type: "git".to_string(),
            properties: DefinitionSourceProperties {
                url: url.into(),
                branch: None,
                tag: Some(tag.into()),
                path: path.into(),
                tool: None,
            },
        }
    }
}

/// Definitions of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionsCollection {
    #[serde(default)]
    pub definitions: Vec<Definition>,
}
