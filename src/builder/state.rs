//! Builder for constructing states.

use crate::builder::transition::TransitionBuilder;
use crate::engine::{Action, Flow, Impasse, NoTransitionHandler, Outcome, StateDef};
use crate::pushdown::NoStack;

/// Builder for a state: name, entry action, accepting flag, and ordered
/// transitions.
pub struct StateBuilder<C, K = NoStack> {
    name: String,
    accepting: bool,
    action: Option<Action<C, K>>,
    on_no_transition: Option<NoTransitionHandler<C, K>>,
    transitions: Vec<TransitionBuilder<C, K>>,
}

impl<C, K> StateBuilder<C, K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accepting: false,
            action: None,
            on_no_transition: None,
            transitions: Vec::new(),
        }
    }

    /// Mark the state as accepting.
    pub fn accepting(mut self) -> Self {
        self.accepting = true;
        self
    }

    /// Set the entry action. Its [`Flow`] can end the run.
    pub fn action<F>(self, action: F) -> Self
    where
        F: Fn(&mut C) -> Flow + Send + Sync + 'static,
    {
        self.action_stack(move |context: &mut C, _stack: &[K]| action(context))
    }

    /// Set an entry action that also reads the symbol stack, bottom first.
    pub fn action_stack<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut C, &[K]) -> Flow + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Set an entry action that always continues to transition search.
    pub fn effect<F>(self, effect: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.action(move |context: &mut C| {
            effect(context);
            Flow::Continue
        })
    }

    /// Decide the outcome for this state when none of its transitions is
    /// eligible, instead of the blueprint policy.
    pub fn on_no_transition<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut C, &Impasse<'_, K>) -> Outcome + Send + Sync + 'static,
    {
        self.on_no_transition = Some(Box::new(handler));
        self
    }

    /// Append a transition. Transitions are tried in the order added.
    pub fn transition(mut self, transition: TransitionBuilder<C, K>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Append several transitions at once.
    pub fn transitions(mut self, transitions: Vec<TransitionBuilder<C, K>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn build(self) -> StateDef<C, K> {
        StateDef {
            name: self.name,
            accepting: self.accepting,
            action: self.action,
            on_no_transition: self.on_no_transition,
            transitions: self
                .transitions
                .into_iter()
                .map(TransitionBuilder::build)
                .collect(),
        }
    }
}
