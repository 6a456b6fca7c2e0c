//! Builder API for ergonomic blueprint construction.
//!
//! States and transitions are declared with fluent builders and validated
//! together when [`BlueprintBuilder::build`] is called, so a blueprint that
//! builds never references an undeclared state.

pub mod error;
pub mod machine;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::BlueprintBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;

use crate::core::Stream;

/// Create a transition guarded on the current input symbol.
///
/// # Example
///
/// ```
/// use statecraft::builder::{on_symbol, BlueprintBuilder, StateBuilder};
/// use statecraft::core::{Stream, Tape};
/// use statecraft::engine::Machine;
///
/// let blueprint = BlueprintBuilder::<Tape<char>>::new()
///     .initial("start")
///     .state(StateBuilder::new("start").transition(on_symbol("x", 'x')))
///     .state(
///         StateBuilder::new("x")
///             .accepting()
///             .effect(|t: &mut Tape<char>| {
///                 let _ = t.advance();
///             }),
///     )
///     .build()
///     .unwrap();
///
/// assert!(Machine::new(&blueprint, Tape::from("x")).run().is_accepted());
/// assert!(!Machine::new(&blueprint, Tape::from("y")).run().is_accepted());
/// ```
pub fn on_symbol<C, K>(target: impl Into<String>, symbol: C::Symbol) -> TransitionBuilder<C, K>
where
    C: Stream,
    C::Symbol: PartialEq + Send + Sync + 'static,
{
    TransitionBuilder::to(target).when(move |context: &C| context.current() == Some(&symbol))
}

/// Create a transition that is only eligible once the input is exhausted.
pub fn at_end<C, K>(target: impl Into<String>) -> TransitionBuilder<C, K>
where
    C: Stream,
{
    TransitionBuilder::to(target).when(|context: &C| context.is_exhausted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tape;
    use crate::engine::Transition;
    use crate::pushdown::Stack;

    #[test]
    fn on_symbol_matches_current_symbol() {
        let transition: Transition<Tape<char>> = on_symbol("next", 'a').build();
        let stack = Stack::new();

        assert!(transition.is_eligible(&Tape::from("ab"), &stack));
        assert!(!transition.is_eligible(&Tape::from("ba"), &stack));
        assert!(!transition.is_eligible(&Tape::from(""), &stack));
    }

    #[test]
    fn at_end_waits_for_exhaustion() {
        let transition: Transition<Tape<char>> = at_end("done").build();
        let stack = Stack::new();

        assert!(transition.is_eligible(&Tape::from(""), &stack));
        assert!(!transition.is_eligible(&Tape::from("a"), &stack));
    }
}
