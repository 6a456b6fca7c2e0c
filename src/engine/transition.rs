//! Transitions and the signals that drive the run loop.

use crate::core::Guard;
use crate::pushdown::{NoStack, Stack};
use serde::{Deserialize, Serialize};

/// What a state action asks the run loop to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Search the state's transitions.
    Continue,
    /// Stop and accept the input.
    Accept,
    /// Reject the input. Backtracking runs treat this as a request to try an
    /// alternative path.
    Reject(String),
}

/// Terminal result of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Accepted,
    Rejected(String),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection reason, if the run was rejected.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Guarded edge from one state to another.
///
/// Created by [`TransitionBuilder`](crate::builder::TransitionBuilder); the
/// target name is resolved to a state index when the blueprint is built.
pub struct Transition<C, K = NoStack> {
    pub(crate) target: String,
    pub(crate) to: usize,
    pub(crate) guard: Option<Guard<C, K>>,
    pub(crate) pop: Option<K>,
    pub(crate) push: Option<K>,
    pub(crate) label: Option<String>,
}

impl<C, K> Transition<C, K> {
    /// Name of the target state.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Symbol that must be on top of the stack for this transition to fire.
    pub fn pop(&self) -> Option<&K> {
        self.pop.as_ref()
    }

    /// Symbol pushed when this transition fires.
    pub fn push(&self) -> Option<&K> {
        self.push.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<C, K: std::fmt::Debug> std::fmt::Debug for Transition<C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .field("pop", &self.pop)
            .field("push", &self.push)
            .field("label", &self.label)
            .finish()
    }
}

impl<C, K: PartialEq> Transition<C, K> {
    /// Whether the transition may fire for the live instance.
    ///
    /// The stack requirement is checked first; the guard only runs when the
    /// stack admits the transition.
    pub fn is_eligible(&self, context: &C, stack: &Stack<K>) -> bool {
        stack.admits(self.pop.as_ref())
            && self
                .guard
                .as_ref()
                .is_none_or(|g| g.check(context, stack.as_slice()))
    }
}
