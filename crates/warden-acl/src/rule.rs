//! Rule types for the per-resource registry.
//!
//! A `Rule` grants a set of actions to whichever role it is registered
//! under. Without a predicate the grant is unconditional. With a predicate the
//! grant only applies when the predicate returns true for the concrete
//! resource and actor being checked.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use warden_contracts::{Action, Actor};

/// A fine-grained condition over `(resource, actor)`.
///
/// Predicates must be total and free of side effects: the registry calls
/// them during evaluation and does not catch panics or retry. A predicate that
/// reads a field the resource may lack is a caller contract violation.
pub type Predicate<T> = Arc<dyn Fn(&T, &Actor) -> bool + Send + Sync>;

/// One grant in a registry: a set of actions plus an optional predicate.
pub struct Rule<T> {
    actions: BTreeSet<Action>,
    predicate: Option<Predicate<T>>,
}

impl<T> Rule<T> {
    /// An unconditional grant of `actions`.
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            predicate: None,
        }
    }

    /// A grant of `actions` that only applies when `predicate` holds.
    pub fn when<F>(actions: impl IntoIterator<Item = Action>, predicate: F) -> Self
    where
        F: Fn(&T, &Actor) -> bool + Send + Sync + 'static,
    {
        Self {
            actions: actions.into_iter().collect(),
            predicate: Some(Arc::new(predicate)),
        }
    }

    pub fn actions(&self) -> &BTreeSet<Action> {
        &self.actions
    }

    pub fn is_conditional(&self) -> bool {
        self.predicate.is_some()
    }

    /// Return true if the action set names `action` or the `Manage` wildcard.
    ///
    /// `Manage` is matched by literal membership only.
    pub fn covers(&self, action: Action) -> bool {
        self.actions.contains(&action) || self.actions.contains(&Action::Manage)
    }

    /// Return true if this rule allows `actor` to perform `action`.
    ///
    /// A conditional rule can never allow when `resource` is `None`: there is
    /// nothing to run the predicate against.
    pub fn grants(&self, action: Action, resource: Option<&T>, actor: &Actor) -> bool {
        if !self.covers(action) {
            return false;
        }
        match (&self.predicate, resource) {
            (None, _) => true,
            (Some(predicate), Some(resource)) => (**predicate)(resource, actor),
            (Some(_), None) => false,
        }
    }
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("actions", &self.actions)
            .field("conditional", &self.is_conditional())
            .finish()
    }
}
