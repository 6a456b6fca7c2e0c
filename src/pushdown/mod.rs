//! Pushdown extension: transitions coupled to a private symbol stack.
//!
//! A transition may require a symbol on top of the stack (`pop`) and may push
//! a symbol when it fires (`push`). A transition whose required symbol is not
//! on top is simply ineligible, exactly like a failed guard; underflow is never
//! an error.
//!
//! Plain machines use [`NoStack`] as their symbol type. It has no values, so a
//! plain blueprint cannot declare stack effects at all.
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::{BlueprintBuilder, StateBuilder, TransitionBuilder};
//! use statecraft::core::{Stream, Tape};
//! use statecraft::pushdown::PushdownMachine;
//!
//! let blueprint = BlueprintBuilder::<Tape<char>, char>::new()
//!     .initial("scan")
//!     .state(
//!         StateBuilder::new("scan")
//!             .accepting()
//!             .transition(
//!                 TransitionBuilder::to("open")
//!                     .when(|t: &Tape<char>| t.current() == Some(&'('))
//!                     .pushes('('),
//!             )
//!             .transition(
//!                 TransitionBuilder::to("close")
//!                     .when(|t: &Tape<char>| t.current() == Some(&')'))
//!                     .pops('('),
//!             ),
//!     )
//!     .state(StateBuilder::new("open").effect(|t: &mut Tape<char>| {
//!         let _ = t.advance();
//!     }).transition(TransitionBuilder::to("scan")))
//!     .state(StateBuilder::new("close").effect(|t: &mut Tape<char>| {
//!         let _ = t.advance();
//!     }).transition(TransitionBuilder::to("scan")))
//!     .build()
//!     .unwrap();
//!
//! assert!(PushdownMachine::new(&blueprint, Tape::from("(())")).run().is_accepted());
//! assert!(!PushdownMachine::new(&blueprint, Tape::from("(()")).run().is_accepted());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Bounds required of stack symbols.
pub trait Symbol: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Symbol for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Symbol type of machines without a stack. Uninhabited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoStack {}

/// A machine over a blueprint with stack effects.
///
/// Pushdown runs use the same run loop as plain machines; the stack discipline
/// is carried by the blueprint's transitions.
pub type PushdownMachine<'b, C, K> = crate::engine::Machine<'b, C, K>;

/// Last-in-first-out symbol store owned by one machine instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Stack<K> {
    items: Vec<K>,
}

impl<K> Default for Stack<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Stack<K> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn top(&self) -> Option<&K> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Contents ordered bottom first.
    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    pub fn push(&mut self, symbol: K) {
        self.items.push(symbol);
    }

    pub fn pop(&mut self) -> Option<K> {
        self.items.pop()
    }
}

impl<K: PartialEq> Stack<K> {
    /// Whether a transition with the given pop requirement may fire.
    pub fn admits(&self, required: Option<&K>) -> bool {
        match required {
            None => true,
            Some(symbol) => self.top() == Some(symbol),
        }
    }
}

impl<K: Clone + PartialEq> Stack<K> {
    /// Apply the stack effects of a firing transition.
    ///
    /// The caller has already checked [`Stack::admits`]; the required symbol
    /// is removed exactly once before `push` is applied.
    pub(crate) fn apply(&mut self, pop: Option<&K>, push: Option<&K>) {
        if pop.is_some() {
            self.items.pop();
        }
        if let Some(symbol) = push {
            self.items.push(symbol.clone());
        }
    }

    /// Reverse the effects of one fired transition: drop what it pushed,
    /// then put back what it popped.
    pub(crate) fn undo(&mut self, popped: Option<K>, pushed: bool) {
        if pushed {
            self.items.pop();
        }
        if let Some(symbol) = popped {
            self.items.push(symbol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_without_requirement_admits_anything() {
        let stack: Stack<char> = Stack::new();
        assert!(stack.admits(None));
    }

    #[test]
    fn underflow_makes_pop_ineligible() {
        let stack: Stack<char> = Stack::new();
        assert!(!stack.admits(Some(&'(')));
    }

    #[test]
    fn pop_requires_matching_top() {
        let mut stack = Stack::new();
        stack.push('(');
        stack.push('[');

        assert!(stack.admits(Some(&'[')));
        assert!(!stack.admits(Some(&'(')));
    }

    #[test]
    fn apply_pops_once_then_pushes() {
        let mut stack = Stack::new();
        stack.push('a');
        stack.push('b');

        stack.apply(Some(&'b'), Some(&'c'));

        assert_eq!(stack.as_slice(), &['a', 'c']);
    }

    #[test]
    fn apply_without_effects_leaves_stack() {
        let mut stack = Stack::new();
        stack.push(1u8);

        stack.apply(None, None);

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.top(), Some(&1));
    }

    #[test]
    fn undo_reverses_apply() {
        let mut stack = Stack::new();
        stack.push('a');
        stack.push('b');

        stack.apply(Some(&'b'), Some(&'c'));
        stack.undo(Some('b'), true);
        assert_eq!(stack.as_slice(), &['a', 'b']);

        stack.apply(Some(&'b'), None);
        stack.undo(Some('b'), false);
        assert_eq!(stack.as_slice(), &['a', 'b']);

        stack.apply(None, Some(&'z'));
        stack.undo(None, true);
        assert_eq!(stack.as_slice(), &['a', 'b']);
    }
}
