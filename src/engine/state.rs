//! State records held by a blueprint.

use crate::engine::transition::{Flow, Outcome, Transition};
use crate::pushdown::NoStack;

/// Action run each time a state is entered. It sees the symbol stack,
/// bottom first, but cannot change it.
pub type Action<C, K = NoStack> = Box<dyn Fn(&mut C, &[K]) -> Flow + Send + Sync>;

/// Decides the outcome when no transition of a state is eligible.
pub type NoTransitionHandler<C, K> = Box<dyn Fn(&mut C, &Impasse<'_, K>) -> Outcome + Send + Sync>;

/// What a no-transition handler knows about the stuck instance.
#[derive(Debug, Clone, Copy)]
pub struct Impasse<'a, K> {
    /// Name of the current state.
    pub state: &'a str,
    /// Whether the current state is accepting.
    pub accepting: bool,
    /// Symbol stack, bottom first. Always empty for plain machines.
    pub stack: &'a [K],
}

/// A named state: entry action, ordered transitions, accepting flag.
///
/// States are schema. They are created by
/// [`StateBuilder`](crate::builder::StateBuilder), never change after the
/// blueprint is built, and are shared by every instance.
pub struct StateDef<C, K = NoStack> {
    pub(crate) name: String,
    pub(crate) accepting: bool,
    pub(crate) action: Option<Action<C, K>>,
    pub(crate) on_no_transition: Option<NoTransitionHandler<C, K>>,
    pub(crate) transitions: Vec<Transition<C, K>>,
}

impl<C, K> StateDef<C, K> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Outgoing transitions in evaluation order.
    pub fn transitions(&self) -> &[Transition<C, K>] {
        &self.transitions
    }

    pub(crate) fn run_action(&self, context: &mut C, stack: &[K]) -> Flow {
        match &self.action {
            Some(action) => action(context, stack),
            None => Flow::Continue,
        }
    }
}

impl<C, K: std::fmt::Debug> std::fmt::Debug for StateDef<C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDef")
            .field("name", &self.name)
            .field("accepting", &self.accepting)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
