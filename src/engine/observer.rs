//! Run observers.

use crate::core::StateTransition;

/// Lifecycle hooks for a run.
///
/// Every method defaults to doing nothing, so an observer implements only
/// the moments it cares about. Observers see the context but cannot change
/// it or the outcome.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{BlueprintBuilder, StateBuilder, TransitionBuilder};
/// use statecraft::core::{StateTransition, Tape};
/// use statecraft::engine::{Machine, Observer};
///
/// #[derive(Default)]
/// struct Moves(Vec<String>);
///
/// impl<C> Observer<C> for Moves {
///     fn on_transition(&mut self, transition: &StateTransition, _context: &C) {
///         self.0.push(format!("{} -> {}", transition.from, transition.to));
///     }
/// }
///
/// let blueprint = BlueprintBuilder::<Tape<char>>::new()
///     .initial("a")
///     .state(StateBuilder::new("a").transition(TransitionBuilder::to("b")))
///     .state(StateBuilder::new("b").accepting())
///     .build()
///     .unwrap();
///
/// let mut moves = Moves::default();
/// let report = Machine::new(&blueprint, Tape::from(""))
///     .with_observer(&mut moves)
///     .run();
///
/// assert!(report.is_accepted());
/// assert_eq!(moves.0, vec!["a -> b"]);
/// ```
pub trait Observer<C> {
    /// A state was entered, before its action runs.
    fn on_enter(&mut self, _state: &str, _context: &C) {}

    /// A state is being left through a fired transition.
    fn on_exit(&mut self, _state: &str, _context: &C) {}

    /// A transition fired. Called after the exit of its source state.
    fn on_transition(&mut self, _transition: &StateTransition, _context: &C) {}

    /// The run accepted in `state`.
    fn on_accept(&mut self, _state: &str, _context: &C) {}

    /// The run rejected in `state`.
    fn on_reject(&mut self, _state: &str, _reason: &str, _context: &C) {}

    /// A backtracking run returned to `state` to try another transition.
    fn on_backtrack(&mut self, _state: &str, _context: &C) {}

    /// A backtracking run ran out of alternatives. Followed by
    /// [`Observer::on_reject`].
    fn on_exhausted(&mut self, _reason: &str, _context: &C) {}
}

impl<C, O: Observer<C> + ?Sized> Observer<C> for &mut O {
    fn on_enter(&mut self, state: &str, context: &C) {
        (**self).on_enter(state, context);
    }

    fn on_exit(&mut self, state: &str, context: &C) {
        (**self).on_exit(state, context);
    }

    fn on_transition(&mut self, transition: &StateTransition, context: &C) {
        (**self).on_transition(transition, context);
    }

    fn on_accept(&mut self, state: &str, context: &C) {
        (**self).on_accept(state, context);
    }

    fn on_reject(&mut self, state: &str, reason: &str, context: &C) {
        (**self).on_reject(state, reason, context);
    }

    fn on_backtrack(&mut self, state: &str, context: &C) {
        (**self).on_backtrack(state, context);
    }

    fn on_exhausted(&mut self, reason: &str, context: &C) {
        (**self).on_exhausted(reason, context);
    }
}
