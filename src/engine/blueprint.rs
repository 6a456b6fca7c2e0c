//! Validated, immutable state/transition registry.

use crate::core::Context;
use crate::engine::state::{Impasse, NoTransitionHandler, StateDef};
use crate::engine::transition::Outcome;
use crate::graph::{Graph, GraphError, Vertices};
use crate::pushdown::NoStack;
use std::collections::HashMap;

/// How a blueprint resolves the "no eligible transition" decision for states
/// that do not declare their own handler.
pub enum NoTransitionPolicy<C, K = NoStack> {
    /// Accept when the state is accepting, the context reports its input
    /// exhausted, and the stack is empty. Reject otherwise.
    AcceptAtEnd,
    /// Always reject.
    Reject,
    /// Delegate to a handler.
    Custom(NoTransitionHandler<C, K>),
}

impl<C, K> Default for NoTransitionPolicy<C, K> {
    fn default() -> Self {
        Self::AcceptAtEnd
    }
}

impl<C, K> std::fmt::Debug for NoTransitionPolicy<C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AcceptAtEnd => f.write_str("AcceptAtEnd"),
            Self::Reject => f.write_str("Reject"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Machine type: every state and transition, validated once at build time.
///
/// A blueprint is read-only and can be shared by any number of concurrent
/// instances. Every transition target names a declared state and the initial
/// state exists; see [`BlueprintBuilder`](crate::builder::BlueprintBuilder).
pub struct Blueprint<C, K = NoStack> {
    pub(crate) name: String,
    pub(crate) states: Vec<StateDef<C, K>>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) initial: usize,
    pub(crate) policy: NoTransitionPolicy<C, K>,
}

impl<C, K> Blueprint<C, K> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial(&self) -> &StateDef<C, K> {
        &self.states[self.initial]
    }

    /// States in declaration order.
    pub fn states(&self) -> &[StateDef<C, K>] {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&StateDef<C, K>> {
        self.index.get(name).map(|&i| &self.states[i])
    }

    pub fn policy(&self) -> &NoTransitionPolicy<C, K> {
        &self.policy
    }

    pub(crate) fn state_at(&self, index: usize) -> &StateDef<C, K> {
        &self.states[index]
    }
}

impl<C: Context, K> Blueprint<C, K> {
    /// Resolve an impasse in `state`: the state's own handler wins, then the
    /// blueprint policy.
    pub(crate) fn decide(&self, state: usize, context: &mut C, stack: &[K]) -> Outcome {
        let def = &self.states[state];
        let impasse = Impasse {
            state: &def.name,
            accepting: def.accepting,
            stack,
        };

        if let Some(handler) = &def.on_no_transition {
            return handler(context, &impasse);
        }

        match &self.policy {
            NoTransitionPolicy::Reject => {
                Outcome::Rejected(format!("no transition from state '{}'", def.name))
            }
            NoTransitionPolicy::Custom(handler) => handler(context, &impasse),
            NoTransitionPolicy::AcceptAtEnd => {
                if !def.accepting {
                    Outcome::Rejected(format!("no transition from state '{}'", def.name))
                } else if !context.at_end() {
                    Outcome::Rejected(format!("unexpected input in state '{}'", def.name))
                } else if !stack.is_empty() {
                    Outcome::Rejected(format!(
                        "{} unmatched symbol(s) on the stack in state '{}'",
                        stack.len(),
                        def.name
                    ))
                } else {
                    Outcome::Accepted
                }
            }
        }
    }
}

impl<C, K> std::fmt::Debug for Blueprint<C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blueprint")
            .field("name", &self.name)
            .field("states", &self.states.len())
            .field("initial", &self.states[self.initial].name)
            .field("policy", &self.policy)
            .finish()
    }
}

/// The state diagram: state names as vertices, one edge per distinct target.
impl<C, K> Graph for Blueprint<C, K> {
    type Vertex = String;

    fn vertices(&self) -> Vertices<'_, String> {
        Box::new(self.states.iter().map(|s| s.name.clone()))
    }

    fn successors(&self, vertex: &String) -> Result<Vertices<'_, String>, GraphError> {
        let state = self.state(vertex).ok_or_else(|| GraphError::not_found(vertex))?;

        let mut targets: Vec<String> = Vec::with_capacity(state.transitions.len());
        for transition in &state.transitions {
            if !targets.contains(&transition.target) {
                targets.push(transition.target.clone());
            }
        }
        Ok(Box::new(targets.into_iter()))
    }

    fn vertex_count(&self) -> Option<usize> {
        Some(self.states.len())
    }

    fn contains(&self, vertex: &String) -> bool {
        self.index.contains_key(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BlueprintBuilder, StateBuilder, TransitionBuilder};
    use crate::core::Tape;
    use crate::graph::GraphWrapper;

    fn blueprint() -> Blueprint<Tape<char>> {
        BlueprintBuilder::new()
            .name("loop")
            .initial("a")
            .state(
                StateBuilder::new("a")
                    .transition(TransitionBuilder::to("b").when(|_t: &Tape<char>| false))
                    .transition(TransitionBuilder::to("b"))
                    .transition(TransitionBuilder::to("c")),
            )
            .state(StateBuilder::new("b").transition(TransitionBuilder::to("a")))
            .state(StateBuilder::new("c").accepting())
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_by_name() {
        let bp = blueprint();
        assert_eq!(bp.name(), "loop");
        assert_eq!(bp.initial().name(), "a");
        assert!(bp.state("c").unwrap().is_accepting());
        assert!(bp.state("zzz").is_none());
    }

    #[test]
    fn successors_are_distinct_targets_in_order() {
        let bp = blueprint();
        let succ: Vec<String> = bp.successors(&"a".to_string()).unwrap().collect();
        assert_eq!(succ, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn unknown_state_is_not_found() {
        let bp = blueprint();
        assert!(matches!(
            bp.successors(&"nope".to_string()),
            Err(GraphError::NotFound { .. })
        ));
    }

    #[test]
    fn wrapper_derives_predecessors_of_states() {
        let bp = blueprint();
        let wrapper = GraphWrapper::new(&bp);

        let preds: Vec<String> = wrapper.predecessors(&"a".to_string()).unwrap().collect();
        assert_eq!(preds, vec!["b".to_string()]);
        assert_eq!(wrapper.in_degree(&"c".to_string()).unwrap(), 1);
    }

    #[test]
    fn accept_at_end_requires_accepting_exhausted_and_empty_stack() {
        let bp = blueprint();
        let c = bp.index["c"];
        let a = bp.index["a"];

        let mut done = Tape::from("");
        assert_eq!(bp.decide(c, &mut done, &[]), Outcome::Accepted);

        let mut pending = Tape::from("x");
        assert_eq!(
            bp.decide(c, &mut pending, &[]),
            Outcome::Rejected("unexpected input in state 'c'".to_string())
        );

        assert_eq!(
            bp.decide(a, &mut done, &[]),
            Outcome::Rejected("no transition from state 'a'".to_string())
        );
    }

    #[test]
    fn custom_policy_is_consulted() {
        let bp: Blueprint<Tape<char>> = BlueprintBuilder::new()
            .initial("only")
            .state(StateBuilder::new("only"))
            .on_no_transition(|_t: &mut Tape<char>, impasse: &Impasse<'_, NoStack>| {
                Outcome::Rejected(format!("stuck in {}", impasse.state))
            })
            .build()
            .unwrap();

        let mut tape = Tape::from("");
        assert_eq!(
            bp.decide(0, &mut tape, &[]),
            Outcome::Rejected("stuck in only".to_string())
        );
    }

    #[test]
    fn state_handler_overrides_policy() {
        let bp: Blueprint<Tape<char>> = BlueprintBuilder::new()
            .initial("only")
            .state(
                StateBuilder::new("only")
                    .on_no_transition(|_t: &mut Tape<char>, _i: &Impasse<'_, NoStack>| {
                        Outcome::Accepted
                    }),
            )
            .policy(NoTransitionPolicy::Reject)
            .build()
            .unwrap();

        let mut tape = Tape::from("leftover");
        assert_eq!(bp.decide(0, &mut tape, &[]), Outcome::Accepted);
    }
}
