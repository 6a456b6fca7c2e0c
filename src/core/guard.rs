//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions over the live machine instance that decide
//! whether a transition is eligible. They run during transition search and
//! must not have side effects; side effects belong in state actions.

use crate::pushdown::NoStack;

type Predicate<C, K> = Box<dyn Fn(&C, &[K]) -> bool + Send + Sync>;

/// Predicate that determines if a transition is eligible.
///
/// A guard sees the instance context and, for pushdown machines, the current
/// symbol stack (bottom first). Plain machines use [`Guard::new`], which
/// ignores the stack.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Guard, Stream, Tape};
///
/// let sees_p: Guard<Tape<char>> = Guard::new(|tape: &Tape<char>| tape.current() == Some(&'p'));
///
/// assert!(sees_p.check(&Tape::from("pq"), &[]));
/// assert!(!sees_p.check(&Tape::from("qp"), &[]));
/// ```
pub struct Guard<C, K = NoStack> {
    predicate: Predicate<C, K>,
}

impl<C, K> Guard<C, K> {
    /// Create a guard from a predicate over the context alone.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(move |context, _stack| predicate(context)),
        }
    }

    /// Create a guard that also inspects the symbol stack.
    ///
    /// The stack slice is ordered bottom first, so `stack.last()` is the top.
    ///
    /// ```rust
    /// use statecraft::core::{Guard, Tape};
    ///
    /// let nested: Guard<Tape<char>, char> =
    ///     Guard::with_stack(|_tape: &Tape<char>, stack: &[char]| stack.len() > 1);
    ///
    /// assert!(nested.check(&Tape::from(""), &['(', '[']));
    /// assert!(!nested.check(&Tape::from(""), &['(']));
    /// ```
    pub fn with_stack<F>(predicate: F) -> Self
    where
        F: Fn(&C, &[K]) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against the live instance.
    pub fn check(&self, context: &C, stack: &[K]) -> bool {
        (self.predicate)(context, stack)
    }
}

impl<C, K> std::fmt::Debug for Guard<C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard")
    }
}
