//! Builder for constructing blueprints.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::engine::{Blueprint, Impasse, NoTransitionPolicy, Outcome, StateDef};
use crate::pushdown::NoStack;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing blueprints with a fluent API.
///
/// Declaring a state name twice replaces the earlier declaration in place, so
/// each name maps to exactly one state.
pub struct BlueprintBuilder<C, K = NoStack> {
    name: Option<String>,
    initial: Option<String>,
    states: Vec<StateBuilder<C, K>>,
    policy: NoTransitionPolicy<C, K>,
}

impl<C, K> BlueprintBuilder<C, K> {
    pub fn new() -> Self {
        Self {
            name: None,
            initial: None,
            states: Vec::new(),
            policy: NoTransitionPolicy::default(),
        }
    }

    /// Name shown in logs and descriptions. Defaults to `"machine"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Declare a state.
    pub fn state(mut self, state: StateBuilder<C, K>) -> Self {
        self.states.push(state);
        self
    }

    /// Declare multiple states at once.
    pub fn states(mut self, states: Vec<StateBuilder<C, K>>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn policy(mut self, policy: NoTransitionPolicy<C, K>) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for a [`NoTransitionPolicy::Custom`] handler.
    pub fn on_no_transition<F>(self, handler: F) -> Self
    where
        F: Fn(&mut C, &Impasse<'_, K>) -> Outcome + Send + Sync + 'static,
    {
        self.policy(NoTransitionPolicy::Custom(Box::new(handler)))
    }

    /// Validate and freeze the blueprint.
    ///
    /// All faults are collected before failing: a missing or unknown initial
    /// state and every transition whose target is not declared.
    pub fn build(self) -> Result<Blueprint<C, K>, BuildError> {
        let mut states: Vec<StateDef<C, K>> = Vec::with_capacity(self.states.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for builder in self.states {
            let state = builder.build();
            match index.get(&state.name) {
                Some(&position) => states[position] = state,
                None => {
                    index.insert(state.name.clone(), states.len());
                    states.push(state);
                }
            }
        }

        if let Validation::Failure(errors) = validate(self.initial.as_deref(), &states, &index) {
            return Err(BuildError::from_faults(errors.iter().cloned().collect()));
        }

        let initial = self
            .initial
            .as_deref()
            .and_then(|name| index.get(name).copied())
            .ok_or(BuildError::MissingInitialState)?;

        for state in &mut states {
            for transition in &mut state.transitions {
                let Some(&to) = index.get(&transition.target) else {
                    return Err(BuildError::UndeclaredTarget {
                        from: state.name.clone(),
                        to: transition.target.clone(),
                    });
                };
                transition.to = to;
            }
        }

        Ok(Blueprint {
            name: self.name.unwrap_or_else(|| "machine".to_string()),
            states,
            index,
            initial,
            policy: self.policy,
        })
    }
}

impl<C, K> Default for BlueprintBuilder<C, K> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate<C, K>(
    initial: Option<&str>,
    states: &[StateDef<C, K>],
    index: &HashMap<String, usize>,
) -> Validation<(), NonEmptyVec<BuildError>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

    let initial_check = match initial {
        None => Validation::fail(BuildError::MissingInitialState),
        Some(name) if !index.contains_key(name) => {
            Validation::fail(BuildError::UnknownInitialState(name.to_string()))
        }
        Some(_) => Validation::success(()),
    };
    checks.push(initial_check);

    for state in states {
        for transition in &state.transitions {
            let check = if index.contains_key(&transition.target) {
                Validation::success(())
            } else {
                Validation::fail(BuildError::UndeclaredTarget {
                    from: state.name.clone(),
                    to: transition.target.clone(),
                })
            };
            checks.push(check);
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransitionBuilder;
    use crate::core::Tape;
    use crate::engine::{Flow, Machine};

    type Text = Tape<char>;

    #[test]
    fn builder_requires_initial_state() {
        let result = BlueprintBuilder::<Text>::new()
            .state(StateBuilder::new("a"))
            .build();

        assert_eq!(result.unwrap_err(), BuildError::MissingInitialState);
    }

    #[test]
    fn unknown_initial_state_is_reported() {
        let result = BlueprintBuilder::<Text>::new()
            .initial("ghost")
            .state(StateBuilder::new("a"))
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::UnknownInitialState("ghost".to_string())
        );
    }

    #[test]
    fn undeclared_target_is_reported() {
        let result = BlueprintBuilder::<Text>::new()
            .initial("a")
            .state(StateBuilder::new("a").transition(TransitionBuilder::to("b")))
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::UndeclaredTarget {
                from: "a".to_string(),
                to: "b".to_string(),
            }
        );
    }

    #[test]
    fn all_faults_are_accumulated() {
        let result = BlueprintBuilder::<Text>::new()
            .state(
                StateBuilder::new("a")
                    .transition(TransitionBuilder::to("x"))
                    .transition(TransitionBuilder::to("a")),
            )
            .state(StateBuilder::new("b").transition(TransitionBuilder::to("y")))
            .build();

        let error = result.unwrap_err();
        assert_eq!(
            error.faults(),
            vec![
                &BuildError::MissingInitialState,
                &BuildError::UndeclaredTarget {
                    from: "a".to_string(),
                    to: "x".to_string(),
                },
                &BuildError::UndeclaredTarget {
                    from: "b".to_string(),
                    to: "y".to_string(),
                },
            ]
        );
    }

    #[test]
    fn transitions_are_resolved_to_state_indices() {
        let bp = BlueprintBuilder::<Text>::new()
            .initial("a")
            .state(StateBuilder::new("a").transition(TransitionBuilder::to("b")))
            .state(StateBuilder::new("b").transition(TransitionBuilder::to("a")))
            .build()
            .unwrap();

        assert_eq!(bp.name(), "machine");
        assert_eq!(bp.states()[0].transitions()[0].to, 1);
        assert_eq!(bp.states()[1].transitions()[0].to, 0);
    }

    #[test]
    fn redeclared_state_replaces_earlier_in_place() {
        let bp = BlueprintBuilder::<Text>::new()
            .initial("a")
            .state(StateBuilder::new("a").action(|_t: &mut Text| Flow::Reject("old".to_string())))
            .state(StateBuilder::new("b").accepting())
            .state(
                StateBuilder::new("a")
                    .accepting()
                    .transition(TransitionBuilder::to("b")),
            )
            .build()
            .unwrap();

        let names: Vec<&str> = bp.states().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(bp.state("a").unwrap().is_accepting());

        let report = Machine::new(&bp, Tape::from("")).run();
        assert!(report.is_accepted());
        assert_eq!(report.history().get_path(), vec!["a", "b"]);
    }

    #[test]
    fn redeclaration_can_fix_a_dangling_target() {
        let result = BlueprintBuilder::<Text>::new()
            .initial("a")
            .state(StateBuilder::new("a").transition(TransitionBuilder::to("gone")))
            .state(StateBuilder::new("a"))
            .build();

        assert!(result.is_ok());
    }
}
