//! The registry and its actor-bound query view.
//!
//! `AclService<T>` owns the rule table for one resource type. It is built
//! once at startup and shared read-only afterwards; `for_actor` then hands
//! out a cheap `AclQuery` per request.
//!
//! Evaluation algorithm:
//!
//! 1. For each role the actor holds, fetch that role's rules (a role with no
//!    rules contributes nothing).
//! 2. A rule applies when its action set contains the requested action or
//!    `Manage`. An applicable unconditional rule allows immediately. An
//!    applicable conditional rule allows if its predicate returns true for the
//!    supplied resource; a false predicate does not veto later rules.
//! 3. If no rule allowed the action → deny.
//!
//! When no resource is supplied, conditional rules cannot allow. Create and
//! List checks are therefore role-only, while per-instance checks can also
//! consult ownership.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use warden_contracts::{Action, Actor, Role, WardenError, WardenResult};

use crate::rule::Rule;

/// The rule table for one protected resource type.
///
/// Resource registries hold one of these by composition and declare their
/// policy in their constructor:
///
/// ```rust,ignore
/// let mut acl = AclService::<Project>::new("project");
/// acl.can_do(Role::Admin, [Action::Manage]);
/// acl.can_do(Role::User, [Action::Create, Action::List, Action::Read]);
/// acl.can_do_when(Role::User, [Action::Update, Action::Delete], is_project_owner);
/// ```
///
/// Registration takes `&mut self`, so once the service is shared behind an
/// `Arc` no further rules can be added and reads need no locking.
pub struct AclService<T> {
    resource: &'static str,
    rules: HashMap<Role, Vec<Rule<T>>>,
}

impl<T> AclService<T> {
    /// Create an empty registry. `resource` names the protected type in logs.
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            rules: HashMap::new(),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Grant `actions` to `role` unconditionally.
    ///
    /// # Panics
    ///
    /// Panics if `actions` is empty or the same unconditional grant was already
    /// registered for `role`. Registration happens at startup, so a bad rule
    /// table stops the process before it serves traffic.
    pub fn can_do(&mut self, role: Role, actions: impl IntoIterator<Item = Action>) {
        self.register_or_panic(role, Rule::new(actions));
    }

    /// Grant `actions` to `role` when `predicate` holds for the resource.
    ///
    /// # Panics
    ///
    /// Panics if `actions` is empty.
    pub fn can_do_when<F>(&mut self, role: Role, actions: impl IntoIterator<Item = Action>, predicate: F)
    where
        F: Fn(&T, &Actor) -> bool + Send + Sync + 'static,
    {
        self.register_or_panic(role, Rule::when(actions, predicate));
    }

    /// Append `rule` to `role`'s rule list.
    ///
    /// Returns `WardenError::Misconfiguration` if the rule has no actions, or if
    /// it is unconditional and an identical unconditional grant already exists
    /// for `role`.
    pub fn try_add_rule(&mut self, role: Role, rule: Rule<T>) -> WardenResult<()> {
        if rule.actions().is_empty() {
            return Err(WardenError::Misconfiguration {
                reason: format!("empty action set registered for role {} on {}", role, self.resource),
            });
        }

        let existing = self.rules.entry(role).or_default();
        if !rule.is_conditional()
            && existing
                .iter()
                .any(|r| !r.is_conditional() && r.actions() == rule.actions())
        {
            return Err(WardenError::Misconfiguration {
                reason: format!(
                    "duplicate grant {:?} registered for role {} on {}",
                    rule.actions(),
                    role,
                    self.resource
                ),
            });
        }

        debug!(
            resource = self.resource,
            role = %role,
            actions = ?rule.actions(),
            conditional = rule.is_conditional(),
            "acl rule registered"
        );
        existing.push(rule);
        Ok(())
    }

    fn register_or_panic(&mut self, role: Role, rule: Rule<T>) {
        if let Err(e) = self.try_add_rule(role, rule) {
            panic!("{}", e);
        }
    }

    /// The rules registered for `role`, in registration order.
    pub fn rules_for(&self, role: Role) -> &[Rule<T>] {
        self.rules.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of rules across all roles.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Bind the registry to `actor` for one request.
    pub fn for_actor<'a>(&'a self, actor: &'a Actor) -> AclQuery<'a, T> {
        AclQuery { service: self, actor }
    }
}

impl<T> fmt::Debug for AclService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AclService")
            .field("resource", &self.resource)
            .field("rules", &self.rules)
            .finish()
    }
}

/// A request-scoped view of a registry bound to one actor.
///
/// Holds only references; create one per request and drop it afterwards.
pub struct AclQuery<'a, T> {
    service: &'a AclService<T>,
    actor: &'a Actor,
}

impl<'a, T> AclQuery<'a, T> {
    pub fn actor(&self) -> &Actor {
        self.actor
    }

    /// Decide whether the bound actor may perform `action` on `resource`.
    ///
    /// Pass `None` when no resource instance exists yet (Create, List).
    /// Never fails; a denial is `false`.
    pub fn can_do_action(&self, action: Action, resource: Option<&T>) -> bool {
        let granted_by = self.actor.roles.iter().copied().find(|role| {
            self.service
                .rules_for(*role)
                .iter()
                .any(|rule| rule.grants(action, resource, self.actor))
        });

        debug!(
            resource = self.service.resource,
            actor_id = %self.actor.id,
            action = %action,
            with_instance = resource.is_some(),
            granted_by = ?granted_by,
            allowed = granted_by.is_some(),
            "acl decision"
        );

        granted_by.is_some()
    }

    /// Like `can_do_action`, but maps a denial to
    /// `WardenError::AuthorizationDenied` for callers that propagate with `?`.
    pub fn authorize(&self, action: Action, resource: Option<&T>) -> WardenResult<()> {
        if self.can_do_action(action, resource) {
            Ok(())
        } else {
            Err(WardenError::AuthorizationDenied {
                actor_id: self.actor.id.to_string(),
                action: action.to_string(),
            })
        }
    }
}
