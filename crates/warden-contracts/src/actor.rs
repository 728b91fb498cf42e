//! Authenticated identities and the roles they hold.
//!
//! An `Actor` is produced by the authentication layer (JWT claims in a web
//! deployment) and is immutable for the lifetime of a request. Ownership
//! predicates compare `Actor::id` against a resource's owner reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WardenError;

/// Stable numeric identifier of a user account.
///
/// The same identifier space is used for actors and for resource owners, so
/// an ownership check is a plain equality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named group used for coarse-grained grants.
///
/// Serialized in upper case (`"ADMIN"`, `"USER"`), matching the role claims
/// issued by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Every role known to the system.
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = WardenError;

    /// Parse a role claim, ignoring ASCII case. Unknown names are rejected so
    /// that a typo in a claim surfaces as an error rather than a silent deny.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WardenError::UnknownRole { name: s.to_string() })
    }
}

/// The authenticated identity performing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Account identifier, compared against resource owner references.
    pub id: UserId,
    /// Login name. Informational only; never used for decisions.
    pub username: String,
    /// Every role the actor holds. May be empty.
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Actor {
    pub fn new(id: u64, username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id: UserId(id),
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Return true if the actor holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
