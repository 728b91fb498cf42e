//! The project entity and its owner reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_acl::Owned;
use warden_contracts::UserId;

/// A user account as referenced from the projects it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: UserId,
    pub username: String,
    pub name: String,
}

/// A stored project.
///
/// `id` is `0` until the repository assigns one on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub desc: String,
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// A not-yet-saved project owned by `owner`.
    pub fn draft(name: impl Into<String>, desc: impl Into<String>, owner: Owner) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            desc: desc.into(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Project {
    fn owner_id(&self) -> UserId {
        self.owner.id
    }
}
