//! The project service: validation, authorization, then storage.
//!
//! Every operation follows the same order:
//!
//!   validate input → fetch (if the action targets an instance) → authorize → mutate
//!
//! Nothing is written unless the registry allowed the action, and a project
//! fetched only to run an ownership check is never returned on denial.

use std::sync::Arc;

use tracing::{info, warn};

use warden_contracts::{Action, RequestContext, WardenError, WardenResult};

use crate::acl::ProjectAclService;
use crate::config::PaginationConfig;
use crate::dto::{CreateProjectInput, PaginationParams, ProjectOutput, ProjectPage, UpdateProjectInput};
use crate::entity::Project;
use crate::store::{ProjectRepository, UserDirectory};

/// CRUD operations on projects, guarded by `ProjectAclService`.
pub struct ProjectService {
    repository: Box<dyn ProjectRepository>,
    users: Box<dyn UserDirectory>,
    acl: Arc<ProjectAclService>,
    pagination: PaginationConfig,
}

impl ProjectService {
    pub fn new(
        repository: Box<dyn ProjectRepository>,
        users: Box<dyn UserDirectory>,
        acl: Arc<ProjectAclService>,
        pagination: PaginationConfig,
    ) -> Self {
        Self { repository, users, acl, pagination }
    }

    fn authorize(&self, ctx: &RequestContext, action: Action, project: Option<&Project>) -> WardenResult<()> {
        self.acl
            .for_actor(&ctx.actor)
            .authorize(action, project)
            .inspect_err(|e| {
                warn!(
                    request_id = %ctx.request_id,
                    url = %ctx.url,
                    project_id = project.map(|p| p.id),
                    error = %e,
                    "project access denied"
                );
            })
    }

    /// Create a project owned by the calling actor.
    ///
    /// Creation is checked without a resource: only unconditional grants can
    /// allow it.
    pub fn create_project(&self, ctx: &RequestContext, input: CreateProjectInput) -> WardenResult<ProjectOutput> {
        info!(request_id = %ctx.request_id, actor_id = %ctx.actor.id, "create_project called");
        input.validate()?;

        let owner = self.users.get_user_by_id(ctx, ctx.actor.id)?;
        self.authorize(ctx, Action::Create, None)?;

        let saved = self.repository.save(Project::draft(input.name, input.desc, owner))?;
        info!(request_id = %ctx.request_id, project_id = saved.id, "project created");
        Ok(ProjectOutput::from(&saved))
    }

    /// List projects in id order.
    pub fn get_projects(&self, ctx: &RequestContext, pagination: PaginationParams) -> WardenResult<ProjectPage> {
        info!(request_id = %ctx.request_id, actor_id = %ctx.actor.id, "get_projects called");
        let (limit, offset) = pagination.resolve(&self.pagination)?;

        self.authorize(ctx, Action::List, None)?;

        let (projects, count) = self.repository.find_and_count(limit, offset)?;
        Ok(ProjectPage {
            projects: projects.iter().map(ProjectOutput::from).collect(),
            count,
        })
    }

    /// Fetch one project. A missing project surfaces as `ResourceNotFound`
    /// before any authorization takes place.
    pub fn get_project_by_id(&self, ctx: &RequestContext, id: u64) -> WardenResult<ProjectOutput> {
        info!(request_id = %ctx.request_id, actor_id = %ctx.actor.id, project_id = id, "get_project_by_id called");
        let project = self.repository.get_by_id(id)?;

        self.authorize(ctx, Action::Read, Some(&project))?;
        Ok(ProjectOutput::from(&project))
    }

    /// Apply a partial update. Only the owner (or an admin) may update.
    pub fn update_project(
        &self,
        ctx: &RequestContext,
        id: u64,
        input: UpdateProjectInput,
    ) -> WardenResult<ProjectOutput> {
        info!(request_id = %ctx.request_id, actor_id = %ctx.actor.id, project_id = id, "update_project called");
        input.validate()?;
        let project = self.repository.get_by_id(id)?;

        self.authorize(ctx, Action::Update, Some(&project))?;

        let saved = self.repository.save(input.apply(project))?;
        info!(request_id = %ctx.request_id, project_id = saved.id, "project updated");
        Ok(ProjectOutput::from(&saved))
    }

    /// Delete a project. Only the owner (or an admin) may delete.
    pub fn delete_project(&self, ctx: &RequestContext, id: u64) -> WardenResult<()> {
        info!(request_id = %ctx.request_id, actor_id = %ctx.actor.id, project_id = id, "delete_project called");
        let project = self.repository.get_by_id(id)?;

        self.authorize(ctx, Action::Delete, Some(&project))?;

        self.repository.remove(&project)?;
        info!(request_id = %ctx.request_id, project_id = id, "project deleted");
        Ok(())
    }
}

impl std::fmt::Debug for ProjectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectService")
            .field("acl", &self.acl)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

/// True if `err` is an authorization denial.
pub fn is_denied(err: &WardenError) -> bool {
    matches!(err, WardenError::AuthorizationDenied { .. })
}

#[cfg(test)]
mod tests {
    use warden_contracts::{Actor, Role, UserId};

    use super::*;
    use crate::entity::Owner;
    use crate::store::{InMemoryProjectRepository, InMemoryUserDirectory};

    // ── Helpers ──────────────────────────────────────────────────────────────

    struct Fixture {
        service: ProjectService,
        repo: Arc<InMemoryProjectRepository>,
    }

    fn owner(id: u64, username: &str) -> Owner {
        Owner {
            id: UserId(id),
            username: username.to_string(),
            name: username.to_uppercase(),
        }
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let users = InMemoryUserDirectory::new([owner(1, "testuser"), owner(2, "other"), owner(3, "root")]);
        let service = ProjectService::new(
            Box::new(Arc::clone(&repo)),
            Box::new(users),
            Arc::new(ProjectAclService::new()),
            PaginationConfig::default(),
        );
        Fixture { service, repo }
    }

    fn ctx(id: u64, roles: &[Role]) -> RequestContext {
        RequestContext::new(Actor::new(id, format!("user{id}"), roles.iter().copied()), "/project")
    }

    fn input(name: &str, desc: &str) -> CreateProjectInput {
        CreateProjectInput {
            name: name.to_string(),
            desc: desc.to_string(),
        }
    }

    fn seed(f: &Fixture, owner_id: u64) -> ProjectOutput {
        f.service
            .create_project(&ctx(owner_id, &[Role::User]), input("Old name", "Old desc"))
            .unwrap()
    }

    // ── create ───────────────────────────────────────────────────────────────

    #[test]
    fn create_sets_owner_from_actor() {
        let f = fixture();
        let output = f
            .service
            .create_project(&ctx(1, &[Role::User]), input("Test", "Hello, world!"))
            .unwrap();

        assert_eq!(output.id, 1);
        assert_eq!(output.name, "Test");
        assert_eq!(output.desc, "Hello, world!");
        assert_eq!(output.owner.id, UserId(1));
        assert_eq!(output.owner.username, "testuser");
        assert_eq!(f.repo.len().unwrap(), 1);
    }

    #[test]
    fn create_rejects_invalid_input_before_storage() {
        let f = fixture();
        let result = f.service.create_project(&ctx(1, &[Role::User]), input("", "desc"));

        assert!(matches!(result, Err(WardenError::ValidationFailed { .. })));
        assert!(f.repo.is_empty().unwrap());
    }

    #[test]
    fn create_denied_for_roleless_actor() {
        let f = fixture();
        let err = f.service.create_project(&ctx(1, &[]), input("Test", "desc")).unwrap_err();

        assert!(is_denied(&err));
        assert!(f.repo.is_empty().unwrap());
    }

    #[test]
    fn create_for_unknown_user_is_not_found() {
        let f = fixture();
        let result = f.service.create_project(&ctx(42, &[Role::User]), input("Test", "desc"));
        assert!(matches!(result, Err(WardenError::ResourceNotFound { .. })));
    }

    // ── list ─────────────────────────────────────────────────────────────────

    #[test]
    fn list_returns_page_and_total() {
        let f = fixture();
        for _ in 0..3 {
            seed(&f, 1);
        }

        let page = f
            .service
            .get_projects(&ctx(2, &[Role::User]), PaginationParams::new(2, 0))
            .unwrap();
        assert_eq!(page.projects.len(), 2);
        assert_eq!(page.count, 3);
    }

    #[test]
    fn list_empty_store() {
        let f = fixture();
        let page = f
            .service
            .get_projects(&ctx(1, &[Role::User]), PaginationParams::default())
            .unwrap();
        assert!(page.projects.is_empty());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn list_denied_without_role() {
        let f = fixture();
        let err = f.service.get_projects(&ctx(1, &[]), PaginationParams::default()).unwrap_err();
        assert!(is_denied(&err));
    }

    // ── get ──────────────────────────────────────────────────────────────────

    #[test]
    fn get_by_id_any_user_can_read() {
        let f = fixture();
        let created = seed(&f, 1);

        let fetched = f.service.get_project_by_id(&ctx(2, &[Role::User]), created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_missing_is_not_found() {
        let f = fixture();
        let result = f.service.get_project_by_id(&ctx(1, &[Role::User]), 1);
        assert!(matches!(result, Err(WardenError::ResourceNotFound { .. })));
    }

    // ── update ───────────────────────────────────────────────────────────────

    #[test]
    fn owner_update_saves_new_fields() {
        let f = fixture();
        let created = seed(&f, 1);

        let updated = f
            .service
            .update_project(
                &ctx(1, &[Role::User]),
                created.id,
                UpdateProjectInput {
                    name: Some("New Title".to_string()),
                    desc: Some("New Post".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "New Title");
        assert_eq!(updated.desc, "New Post");
        assert_eq!(updated.owner.id, UserId(1));
        assert_eq!(f.repo.get_by_id(created.id).unwrap().name, "New Title");
    }

    #[test]
    fn non_owner_update_is_denied_and_not_saved() {
        let f = fixture();
        let created = seed(&f, 1);

        let err = f
            .service
            .update_project(
                &ctx(2, &[Role::User]),
                created.id,
                UpdateProjectInput {
                    name: Some("Hijacked".to_string()),
                    desc: None,
                },
            )
            .unwrap_err();

        assert!(is_denied(&err));
        let stored = f.repo.get_by_id(created.id).unwrap();
        assert_eq!(stored.name, "Old name");
        assert_eq!(stored.updated_at, created.updated_at);
    }

    #[test]
    fn admin_may_update_foreign_project() {
        let f = fixture();
        let created = seed(&f, 1);

        let updated = f
            .service
            .update_project(
                &ctx(3, &[Role::Admin]),
                created.id,
                UpdateProjectInput {
                    name: None,
                    desc: Some("moderated".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.desc, "moderated");
        assert_eq!(updated.name, "Old name");
    }

    // ── delete ───────────────────────────────────────────────────────────────

    #[test]
    fn owner_delete_removes_project() {
        let f = fixture();
        let created = seed(&f, 1);

        f.service.delete_project(&ctx(1, &[Role::User]), created.id).unwrap();
        assert!(f.repo.is_empty().unwrap());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let f = fixture();
        let result = f.service.delete_project(&ctx(1, &[Role::User]), 5);
        assert!(matches!(result, Err(WardenError::ResourceNotFound { .. })));
    }

    #[test]
    fn non_owner_delete_is_denied() {
        let f = fixture();
        let created = seed(&f, 1);

        let err = f.service.delete_project(&ctx(2, &[Role::User]), created.id).unwrap_err();
        assert!(is_denied(&err));
        assert_eq!(f.repo.len().unwrap(), 1);
    }

    #[test]
    fn admin_delete_removes_foreign_project() {
        let f = fixture();
        let created = seed(&f, 1);

        f.service.delete_project(&ctx(2, &[Role::Admin]), created.id).unwrap();
        assert!(f.repo.is_empty().unwrap());
    }
}
