//! Scenario 1: Ownership decisions
//!
//! Evaluates the project registry directly for five (actor, action, resource)
//! triples covering the owner grant, a non-owner denial, the admin wildcard,
//! a resource-less create, and an actor with no roles.

use chrono::Utc;

use warden_contracts::{Action, Actor, Role, UserId, WardenError, WardenResult};

use crate::acl::ProjectAclService;
use crate::entity::{Owner, Project};

/// One decision to check.
pub struct Case {
    pub label: &'static str,
    pub actor: Actor,
    pub action: Action,
    pub owner: Option<u64>,
    pub expected: bool,
}

fn project_owned_by(id: u64) -> Project {
    let now = Utc::now();
    Project {
        id: 1,
        name: "Test".to_string(),
        desc: "Hello, world!".to_string(),
        owner: Owner {
            id: UserId(id),
            username: format!("owner-{id}"),
            name: "Owner".to_string(),
        },
        created_at: now,
        updated_at: now,
    }
}

/// The five reference decisions.
pub fn cases() -> Vec<Case> {
    vec![
        Case {
            label: "owner updates own project",
            actor: Actor::new(1, "alice", [Role::User]),
            action: Action::Update,
            owner: Some(1),
            expected: true,
        },
        Case {
            label: "user updates someone else's project",
            actor: Actor::new(2, "bob", [Role::User]),
            action: Action::Update,
            owner: Some(1),
            expected: false,
        },
        Case {
            label: "admin deletes someone else's project",
            actor: Actor::new(2, "root", [Role::Admin]),
            action: Action::Delete,
            owner: Some(1),
            expected: true,
        },
        Case {
            label: "user creates with no resource",
            actor: Actor::new(1, "alice", [Role::User]),
            action: Action::Create,
            owner: None,
            expected: true,
        },
        Case {
            label: "actor without roles reads own project",
            actor: Actor::new(1, "nobody", []),
            action: Action::Read,
            owner: Some(1),
            expected: false,
        },
    ]
}

/// Evaluate `case` against `acl`.
pub fn evaluate(acl: &ProjectAclService, case: &Case) -> bool {
    let project = case.owner.map(project_owned_by);
    acl.for_actor(&case.actor).can_do_action(case.action, project.as_ref())
}

/// Run Scenario 1: Ownership decisions.
pub fn run_scenario() -> WardenResult<()> {
    println!("=== Scenario 1: Ownership decisions ===");
    println!();

    let acl = ProjectAclService::new();
    let mut mismatches = Vec::new();

    for (i, case) in cases().iter().enumerate() {
        let allowed = evaluate(&acl, case);
        let roles: Vec<&str> = case.actor.roles.iter().map(|r| r.as_str()).collect();
        let owner = case
            .owner
            .map(|id| format!("owner {}", id))
            .unwrap_or_else(|| "no resource".to_string());

        println!("  Case {}: {}", i + 1, case.label);
        println!(
            "    actor {} {:?} → {} ({})",
            case.actor.id, roles, case.action, owner
        );
        println!(
            "    decision: {}{}",
            if allowed { "ALLOW" } else { "DENY" },
            if allowed == case.expected { "" } else { "  (UNEXPECTED)" }
        );

        if allowed != case.expected {
            mismatches.push(case.label);
        }
    }
    println!();

    if !mismatches.is_empty() {
        return Err(WardenError::Misconfiguration {
            reason: format!("project policy diverged on: {}", mismatches.join(", ")),
        });
    }

    println!("  Scenario 1 complete.");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_case_matches_expectation() {
        let acl = ProjectAclService::new();
        for case in cases() {
            assert_eq!(evaluate(&acl, &case), case.expected, "case: {}", case.label);
        }
    }

    #[test]
    fn run_scenario_succeeds() {
        assert!(run_scenario().is_ok());
    }
}
