//! Ownership predicates.

use warden_contracts::{Actor, UserId};

/// A resource that records which user owns it.
pub trait Owned {
    /// The owner reference compared against `Actor::id`.
    fn owner_id(&self) -> UserId;
}

/// True when `actor` is the owner of `resource`.
///
/// Usable directly as a registry predicate:
/// `acl.can_do_when(Role::User, [Action::Update], is_owner)`.
pub fn is_owner<T: Owned>(resource: &T, actor: &Actor) -> bool {
    resource.owner_id() == actor.id
}
