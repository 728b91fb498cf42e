//! Error types shared by the warden crates.
//!
//! Authorization evaluation itself never fails: a denial is a `false`
//! decision. These variants cover what callers build on top of a decision
//! (denial surfaced to a user), collaborator failures, and startup-time
//! misconfiguration.

use thiserror::Error;

/// The unified error type for warden.
#[derive(Debug, Error)]
pub enum WardenError {
    /// The policy registry returned a deny decision for the requested action.
    ///
    /// Surfaced to end users as an authorization failure and never retried.
    #[error("actor '{actor_id}' is not authorized to {action} this resource")]
    AuthorizationDenied { actor_id: String, action: String },

    /// A collaborator could not find the requested record.
    #[error("{resource} '{id}' not found")]
    ResourceNotFound { resource: String, id: String },

    /// A registry was built with an invalid rule.
    ///
    /// This is a programming error and is raised during startup only.
    #[error("acl misconfiguration: {reason}")]
    Misconfiguration { reason: String },

    /// Caller input failed validation before reaching the registry.
    #[error("validation failed for '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// A role claim did not name a known role.
    #[error("unknown role '{name}'")]
    UnknownRole { name: String },

    /// An action name did not name a known action.
    #[error("unknown action '{name}'")]
    UnknownAction { name: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A storage collaborator failed for reasons unrelated to the request.
    #[error("store error: {reason}")]
    StoreError { reason: String },
}

/// Convenience alias used throughout the warden crates.
pub type WardenResult<T> = Result<T, WardenError>;
