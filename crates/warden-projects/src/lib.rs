//! # warden-projects
//!
//! The project resource guarded by the warden authorization registry.
//!
//! Projects are owned by the user who created them. Any user may create,
//! list, and read projects; only the owner may update or delete one; admins
//! may do anything. See [`acl`] for the policy table and [`service`] for
//! how it is enforced.
//!
//! Storage is behind the [`store::ProjectRepository`] and
//! [`store::UserDirectory`] traits, with in-memory implementations used by
//! the [`scenarios`] and tests.

pub mod acl;
pub mod config;
pub mod dto;
pub mod entity;
pub mod scenarios;
pub mod seed;
pub mod service;
pub mod store;

pub use acl::{is_project_owner, ProjectAclService};
pub use config::ServiceConfig;
pub use entity::{Owner, Project};
pub use service::ProjectService;
