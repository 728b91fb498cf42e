//! Fixed user accounts used by the scenarios and the demo CLI.
//!
//! All accounts are fictional.

use warden_contracts::{Actor, Role, UserId};

use crate::entity::Owner;
use crate::store::InMemoryUserDirectory;

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const ROOT: u64 = 3;

/// The seeded accounts with the roles their tokens carry.
pub fn accounts() -> Vec<(Owner, Vec<Role>)> {
    vec![
        (owner(ALICE, "alice", "Alice Liddell"), vec![Role::User]),
        (owner(BOB, "bob", "Bob Builder"), vec![Role::User]),
        (owner(ROOT, "root", "Site Administrator"), vec![Role::Admin]),
    ]
}

fn owner(id: u64, username: &str, name: &str) -> Owner {
    Owner {
        id: UserId(id),
        username: username.to_string(),
        name: name.to_string(),
    }
}

/// A directory holding every seeded account.
pub fn directory() -> InMemoryUserDirectory {
    InMemoryUserDirectory::new(accounts().into_iter().map(|(o, _)| o))
}

/// The authenticated actor for a seeded account, or `None` for an unknown id.
pub fn actor(id: u64) -> Option<Actor> {
    accounts()
        .into_iter()
        .find(|(o, _)| o.id == UserId(id))
        .map(|(o, roles)| Actor {
            id: o.id,
            username: o.username,
            roles,
        })
}
