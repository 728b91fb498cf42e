//! Per-request context handed from the request layer to resource services.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::Actor;

/// Everything a service call knows about the request that triggered it.
///
/// Built once per request by the hosting application after authentication.
/// `request_id` is attached to every log event emitted while serving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Correlation identifier for log events.
    pub request_id: Uuid,
    /// The path that was requested, for logging only.
    pub url: String,
    /// The authenticated caller.
    pub actor: Actor,
}

impl RequestContext {
    /// Build a context with a fresh request id.
    pub fn new(actor: Actor, url: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            url: url.into(),
            actor,
        }
    }
}
