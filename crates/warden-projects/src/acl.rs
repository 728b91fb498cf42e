//! Access policy for projects.
//!
//! | role  | actions                | condition            |
//! |-------|------------------------|----------------------|
//! | ADMIN | manage                 | none                 |
//! | USER  | create, list, read     | none                 |
//! | USER  | update, delete         | actor owns project   |

use tracing::info;

use warden_acl::{is_owner, AclQuery, AclService};
use warden_contracts::{Action, Actor, Role};

use crate::entity::Project;

/// True when `actor` owns `project`.
pub fn is_project_owner(project: &Project, actor: &Actor) -> bool {
    is_owner(project, actor)
}

/// The project registry. Build once at startup and share behind an `Arc`.
#[derive(Debug)]
pub struct ProjectAclService {
    acl: AclService<Project>,
}

impl ProjectAclService {
    pub fn new() -> Self {
        let mut acl = AclService::<Project>::new("project");
        acl.can_do(Role::Admin, [Action::Manage]);
        acl.can_do(Role::User, [Action::Create, Action::List, Action::Read]);
        acl.can_do_when(Role::User, [Action::Update, Action::Delete], is_project_owner);

        info!(rules = acl.rule_count(), "project acl initialized");
        Self { acl }
    }

    pub fn for_actor<'a>(&'a self, actor: &'a Actor) -> AclQuery<'a, Project> {
        self.acl.for_actor(actor)
    }
}

impl Default for ProjectAclService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use warden_contracts::{Action, Actor, Role, UserId};

    use super::*;
    use crate::entity::Owner;

    fn project_owned_by(id: u64) -> Project {
        Project {
            id: 1,
            name: "Old name".to_string(),
            desc: "Old desc".to_string(),
            owner: Owner {
                id: UserId(id),
                username: format!("owner-{id}"),
                name: "Owner".to_string(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_predicate_compares_ids() {
        let project = project_owned_by(1);
        assert!(is_project_owner(&project, &Actor::new(1, "a", [])));
        assert!(!is_project_owner(&project, &Actor::new(2, "b", [])));
    }

    #[test]
    fn user_matrix_matches_policy_table() {
        let acl = ProjectAclService::new();
        let owner = Actor::new(1, "owner", [Role::User]);
        let stranger = Actor::new(2, "stranger", [Role::User]);
        let project = project_owned_by(1);

        for (action, owner_allowed, stranger_allowed) in [
            (Action::Create, true, true),
            (Action::List, true, true),
            (Action::Read, true, true),
            (Action::Update, true, false),
            (Action::Delete, true, false),
            (Action::Manage, false, false),
        ] {
            assert_eq!(
                acl.for_actor(&owner).can_do_action(action, Some(&project)),
                owner_allowed,
                "owner / {action}"
            );
            assert_eq!(
                acl.for_actor(&stranger).can_do_action(action, Some(&project)),
                stranger_allowed,
                "stranger / {action}"
            );
        }
    }

    #[test]
    fn admin_manages_foreign_projects() {
        let acl = ProjectAclService::new();
        let admin = Actor::new(2, "root", [Role::Admin]);
        let project = project_owned_by(1);

        for action in Action::ALL {
            assert!(acl.for_actor(&admin).can_do_action(action, Some(&project)));
        }
    }
}
