//! Builder for constructing transitions.

use crate::core::Guard;
use crate::engine::Transition;
use crate::pushdown::NoStack;

/// Builder for a transition with a fluent API.
///
/// The target is resolved when the enclosing blueprint is built; naming an
/// undeclared state is reported then.
pub struct TransitionBuilder<C, K = NoStack> {
    target: String,
    guard: Option<Guard<C, K>>,
    pop: Option<K>,
    push: Option<K>,
    label: Option<String>,
}

impl<C, K> TransitionBuilder<C, K> {
    /// Start a transition into `target`. Unguarded until a guard is added.
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            guard: None,
            pop: None,
            push: None,
            label: None,
        }
    }

    /// Set the guard.
    pub fn guard(mut self, guard: Guard<C, K>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard over the context using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add a guard that also reads the symbol stack.
    pub fn when_stack<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C, &[K]) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::with_stack(predicate));
        self
    }

    /// Require `symbol` on top of the stack; it is popped when the transition
    /// fires.
    pub fn pops(mut self, symbol: K) -> Self {
        self.pop = Some(symbol);
        self
    }

    /// Push `symbol` when the transition fires, after any pop.
    pub fn pushes(mut self, symbol: K) -> Self {
        self.push = Some(symbol);
        self
    }

    /// Display label used in machine descriptions.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub(crate) fn build(self) -> Transition<C, K> {
        Transition {
            target: self.target,
            to: usize::MAX,
            guard: self.guard,
            pop: self.pop,
            push: self.push,
            label: self.label,
        }
    }
}
