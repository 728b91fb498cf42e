//! Scenario 2: Project lifecycle
//!
//! Drives `ProjectService` through a realistic sequence with the seeded
//! accounts:
//!
//! 1. alice creates a project
//! 2. bob lists projects and reads alice's project
//! 3. alice renames her project
//! 4. bob tries to rename it → AuthorizationDenied, nothing saved
//! 5. bob tries to delete it → AuthorizationDenied
//! 6. root (admin) deletes it
//! 7. alice reads it → ResourceNotFound

use std::sync::Arc;

use warden_contracts::{RequestContext, WardenError, WardenResult};

use crate::acl::ProjectAclService;
use crate::config::ServiceConfig;
use crate::dto::{CreateProjectInput, PaginationParams, UpdateProjectInput};
use crate::seed::{self, ALICE, BOB, ROOT};
use crate::service::{is_denied, ProjectService};
use crate::store::InMemoryProjectRepository;

fn ctx_for(id: u64, url: &str) -> WardenResult<RequestContext> {
    let actor = seed::actor(id).ok_or_else(|| WardenError::ResourceNotFound {
        resource: "user".to_string(),
        id: id.to_string(),
    })?;
    Ok(RequestContext::new(actor, url))
}

/// Fail the scenario if `result` is not an authorization denial.
fn expect_denied<T>(step: &str, result: WardenResult<T>) -> WardenResult<()> {
    match result {
        Err(e) if is_denied(&e) => {
            println!("  {:<34} DENIED ({})", step, e);
            Ok(())
        }
        Err(e) => Err(e),
        Ok(_) => Err(WardenError::Misconfiguration {
            reason: format!("{} was allowed but should have been denied", step),
        }),
    }
}

/// Run Scenario 2 with the given configuration.
pub fn run_with_config(config: &ServiceConfig) -> WardenResult<()> {
    println!("=== Scenario 2: Project lifecycle ===");
    println!();

    let service = ProjectService::new(
        Box::new(InMemoryProjectRepository::new()),
        Box::new(seed::directory()),
        Arc::new(ProjectAclService::new()),
        config.pagination.clone(),
    );

    let created = service.create_project(
        &ctx_for(ALICE, "/project")?,
        CreateProjectInput {
            name: "Roadmap".to_string(),
            desc: "Q3 planning".to_string(),
        },
    )?;
    println!(
        "  {:<34} OK (project {} owned by {})",
        "alice creates project", created.id, created.owner.username
    );

    let page = service.get_projects(&ctx_for(BOB, "/project")?, PaginationParams::default())?;
    println!("  {:<34} OK ({} of {} project(s))", "bob lists projects", page.projects.len(), page.count);

    let read = service.get_project_by_id(&ctx_for(BOB, "/project/:id")?, created.id)?;
    println!("  {:<34} OK (\"{}\")", "bob reads alice's project", read.name);

    let renamed = service.update_project(
        &ctx_for(ALICE, "/project/:id")?,
        created.id,
        UpdateProjectInput {
            name: Some("Roadmap 2.0".to_string()),
            desc: None,
        },
    )?;
    println!("  {:<34} OK (\"{}\")", "alice renames her project", renamed.name);

    expect_denied(
        "bob renames alice's project",
        service.update_project(
            &ctx_for(BOB, "/project/:id")?,
            created.id,
            UpdateProjectInput {
                name: Some("Bob's now".to_string()),
                desc: None,
            },
        ),
    )?;

    expect_denied(
        "bob deletes alice's project",
        service.delete_project(&ctx_for(BOB, "/project/:id")?, created.id),
    )?;

    service.delete_project(&ctx_for(ROOT, "/project/:id")?, created.id)?;
    println!("  {:<34} OK", "root deletes alice's project");

    match service.get_project_by_id(&ctx_for(ALICE, "/project/:id")?, created.id) {
        Err(WardenError::ResourceNotFound { .. }) => {
            println!("  {:<34} NOT FOUND (expected)", "alice reads deleted project");
        }
        Err(e) => return Err(e),
        Ok(_) => {
            return Err(WardenError::Misconfiguration {
                reason: "deleted project is still readable".to_string(),
            })
        }
    }
    println!();

    println!("  Scenario 2 complete.");
    println!();
    Ok(())
}

/// Run Scenario 2 with default configuration.
pub fn run_scenario() -> WardenResult<()> {
    run_with_config(&ServiceConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_scenario_succeeds() {
        if let Err(e) = run_scenario() {
            panic!("lifecycle scenario failed: {e}");
        }
    }

    #[test]
    fn unknown_seed_actor_is_not_found() {
        assert!(matches!(ctx_for(99, "/"), Err(WardenError::ResourceNotFound { .. })));
    }
}
