//! Storage seams for the project service.
//!
//! `ProjectRepository` and `UserDirectory` are the persistence
//! collaborators the service talks to. The in-memory implementations keep
//! everything in process and are what the scenarios and tests run against.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use warden_contracts::{RequestContext, UserId, WardenError, WardenResult};

use crate::entity::{Owner, Project};

/// Project persistence.
pub trait ProjectRepository: Send + Sync {
    /// Insert (when `project.id == 0`) or overwrite a project and return the
    /// stored value. Inserts are assigned the next id.
    fn save(&self, project: Project) -> WardenResult<Project>;

    /// Fetch one project, or `WardenError::ResourceNotFound`.
    fn get_by_id(&self, id: u64) -> WardenResult<Project>;

    /// Return up to `limit` projects after skipping `offset`, ordered by id,
    /// together with the total number stored.
    fn find_and_count(&self, limit: usize, offset: usize) -> WardenResult<(Vec<Project>, usize)>;

    /// Delete a stored project.
    fn remove(&self, project: &Project) -> WardenResult<()>;
}

/// Lookup of user accounts by id.
pub trait UserDirectory: Send + Sync {
    fn get_user_by_id(&self, ctx: &RequestContext, id: UserId) -> WardenResult<Owner>;
}

impl<R: ProjectRepository + ?Sized> ProjectRepository for Arc<R> {
    fn save(&self, project: Project) -> WardenResult<Project> {
        (**self).save(project)
    }

    fn get_by_id(&self, id: u64) -> WardenResult<Project> {
        (**self).get_by_id(id)
    }

    fn find_and_count(&self, limit: usize, offset: usize) -> WardenResult<(Vec<Project>, usize)> {
        (**self).find_and_count(limit, offset)
    }

    fn remove(&self, project: &Project) -> WardenResult<()> {
        (**self).remove(project)
    }
}

fn not_found(id: u64) -> WardenError {
    WardenError::ResourceNotFound {
        resource: "project".to_string(),
        id: id.to_string(),
    }
}

// ── In-memory repository ──────────────────────────────────────────────────────

struct RepositoryState {
    projects: BTreeMap<u64, Project>,
    next_id: u64,
}

/// A `ProjectRepository` backed by a `BTreeMap` behind a `Mutex`.
pub struct InMemoryProjectRepository {
    state: Mutex<RepositoryState>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RepositoryState {
                projects: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> WardenResult<MutexGuard<'_, RepositoryState>> {
        self.state.lock().map_err(|e| WardenError::StoreError {
            reason: format!("project store lock poisoned: {}", e),
        })
    }

    /// Number of stored projects.
    pub fn len(&self) -> WardenResult<usize> {
        Ok(self.lock()?.projects.len())
    }

    pub fn is_empty(&self) -> WardenResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn save(&self, mut project: Project) -> WardenResult<Project> {
        let mut state = self.lock()?;
        let now = Utc::now();

        if project.id == 0 {
            project.id = state.next_id;
            state.next_id += 1;
            project.created_at = now;
        } else if !state.projects.contains_key(&project.id) {
            return Err(not_found(project.id));
        }
        project.updated_at = now;

        debug!(project_id = project.id, "project saved");
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    fn get_by_id(&self, id: u64) -> WardenResult<Project> {
        self.lock()?.projects.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    fn find_and_count(&self, limit: usize, offset: usize) -> WardenResult<(Vec<Project>, usize)> {
        let state = self.lock()?;
        let page = state.projects.values().skip(offset).take(limit).cloned().collect();
        Ok((page, state.projects.len()))
    }

    fn remove(&self, project: &Project) -> WardenResult<()> {
        let mut state = self.lock()?;
        match state.projects.remove(&project.id) {
            Some(_) => {
                debug!(project_id = project.id, "project removed");
                Ok(())
            }
            None => Err(not_found(project.id)),
        }
    }
}

// ── In-memory user directory ──────────────────────────────────────────────────

/// A fixed set of user accounts. Read-only after construction.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<UserId, Owner>,
}

impl InMemoryUserDirectory {
    pub fn new(users: impl IntoIterator<Item = Owner>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get_user_by_id(&self, ctx: &RequestContext, id: UserId) -> WardenResult<Owner> {
        debug!(request_id = %ctx.request_id, user_id = %id, "looking up user");
        self.users.get(&id).cloned().ok_or_else(|| WardenError::ResourceNotFound {
            resource: "user".to_string(),
            id: id.to_string(),
        })
    }
}
