//! # warden-acl
//!
//! A deny-by-default authorization registry combining role grants with
//! ownership predicates.
//!
//! ## Overview
//!
//! Each protected resource type owns an [`AclService`] holding its rule
//! table. A rule grants a set of [`Action`](warden_contracts::Action)s to a
//! [`Role`](warden_contracts::Role), optionally guarded by a predicate over
//! `(resource, actor)`. Rules are OR-ed: any rule for any of the actor's roles
//! can allow, and nothing allows by default.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use warden_acl::{is_owner, AclService};
//! use warden_contracts::{Action, Role};
//!
//! let mut acl = AclService::<Project>::new("project");
//! acl.can_do(Role::Admin, [Action::Manage]);
//! acl.can_do(Role::User, [Action::Create, Action::List, Action::Read]);
//! acl.can_do_when(Role::User, [Action::Update, Action::Delete], is_owner);
//!
//! let allowed = acl.for_actor(&actor).can_do_action(Action::Update, Some(&project));
//! ```

pub mod engine;
pub mod ownership;
pub mod rule;

pub use engine::{AclQuery, AclService};
pub use ownership::{is_owner, Owned};
pub use rule::{Predicate, Rule};

// ── Tests ─────────────────────────────────────────────────────────────────────
