//! # warden-contracts
//!
//! Shared types and error contracts for the warden authorization engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only identities, permission tags, and error types.

pub mod action;
pub mod actor;
pub mod context;
pub mod error;

pub use action::Action;
pub use actor::{Actor, Role, UserId};
pub use context::RequestContext;
pub use error::{WardenError, WardenResult};
