//! Input and output shapes for `ProjectService`.
//!
//! Inputs are validated here before any authorization or storage work is
//! done. Outputs expose only the fields meant for callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_contracts::{UserId, WardenError, WardenResult};

use crate::config::PaginationConfig;
use crate::entity::{Owner, Project};

fn require_non_blank(field: &str, value: &str) -> WardenResult<()> {
    if value.trim().is_empty() {
        return Err(WardenError::ValidationFailed {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Fields required to create a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub desc: String,
}

impl CreateProjectInput {
    pub fn validate(&self) -> WardenResult<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("desc", &self.desc)
    }
}

/// A partial update. Absent fields keep their stored value; present fields
/// must not be blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl UpdateProjectInput {
    pub fn validate(&self) -> WardenResult<()> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(desc) = &self.desc {
            require_non_blank("desc", desc)?;
        }
        Ok(())
    }

    /// Return `project` with the present fields overwritten.
    pub fn apply(self, project: Project) -> Project {
        Project {
            name: self.name.unwrap_or(project.name),
            desc: self.desc.unwrap_or(project.desc),
            ..project
        }
    }
}

/// Public view of a project's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerOutput {
    pub id: UserId,
    pub name: String,
    pub username: String,
}

impl From<&Owner> for OwnerOutput {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id,
            name: owner.name.clone(),
            username: owner.username.clone(),
        }
    }
}

/// Public view of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOutput {
    pub id: u64,
    pub name: String,
    pub desc: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: OwnerOutput,
}

impl From<&Project> for ProjectOutput {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            desc: project.desc.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
            owner: OwnerOutput::from(&project.owner),
        }
    }
}

/// One page of projects plus the total number stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPage {
    pub projects: Vec<ProjectOutput>,
    pub count: usize,
}

/// Requested window into the project list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl PaginationParams {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Resolve to a concrete `(limit, offset)`.
    ///
    /// A missing limit falls back to `config.default_limit`; any limit is
    /// clamped to `config.max_limit`. An explicit limit of zero is rejected.
    pub fn resolve(&self, config: &PaginationConfig) -> WardenResult<(usize, usize)> {
        let limit = match self.limit {
            Some(0) => {
                return Err(WardenError::ValidationFailed {
                    field: "limit".to_string(),
                    reason: "must be at least 1".to_string(),
                })
            }
            Some(limit) => limit.min(config.max_limit),
            None => config.default_limit,
        };
        Ok((limit as usize, self.offset.unwrap_or(0) as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Owner {
        Owner {
            id: UserId(1),
            username: "testuser".to_string(),
            name: "Test User".to_string(),
        }
    }

    #[test]
    fn create_input_requires_both_fields() {
        let ok = CreateProjectInput {
            name: "Test".to_string(),
            desc: "Hello, world!".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank_name = CreateProjectInput {
            name: "   ".to_string(),
            desc: "Hello".to_string(),
        };
        match blank_name.validate() {
            Err(WardenError::ValidationFailed { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected ValidationFailed, got {:?}", other),
        }

        match CreateProjectInput::default().validate() {
            Err(WardenError::ValidationFailed { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn update_input_allows_absent_fields() {
        assert!(UpdateProjectInput::default().validate().is_ok());

        let blank_desc = UpdateProjectInput {
            name: None,
            desc: Some(String::new()),
        };
        assert!(matches!(
            blank_desc.validate(),
            Err(WardenError::ValidationFailed { ref field, .. }) if field == "desc"
        ));
    }

    #[test]
    fn update_apply_keeps_absent_fields() {
        let project = Project::draft("Old name", "Old desc", owner());
        let updated = UpdateProjectInput {
            name: Some("New Title".to_string()),
            desc: None,
        }
        .apply(project.clone());

        assert_eq!(updated.name, "New Title");
        assert_eq!(updated.desc, "Old desc");
        assert_eq!(updated.owner, project.owner);
    }

    #[test]
    fn project_output_uses_camel_case_timestamps() {
        let output = ProjectOutput::from(&Project::draft("Test", "Hello", owner()));
        let json = serde_json::to_value(&output).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["owner"]["username"], "testuser");
        assert_eq!(json["owner"]["id"], 1);
    }

    #[test]
    fn pagination_defaults_and_clamps() {
        let config = PaginationConfig {
            default_limit: 10,
            max_limit: 50,
        };

        assert_eq!(PaginationParams::default().resolve(&config).unwrap(), (10, 0));
        assert_eq!(PaginationParams::new(500, 20).resolve(&config).unwrap(), (50, 20));
        assert!(matches!(
            PaginationParams::new(0, 0).resolve(&config),
            Err(WardenError::ValidationFailed { .. })
        ));
    }
}
