//! Machine instance and the run loop.

use crate::core::{Context, StateHistory, StateTransition};
use crate::engine::blueprint::Blueprint;
use crate::engine::config::RunConfig;
use crate::engine::observer::Observer;
use crate::engine::report::RunReport;
use crate::engine::transition::{Flow, Outcome};
use crate::pushdown::{NoStack, Stack, Symbol};
use chrono::Utc;
use tracing::{debug, debug_span, trace, warn};
use uuid::Uuid;

/// One run of a blueprint over a context.
///
/// The instance owns its context (and through it the input stream), the
/// current state, its private symbol stack, and the history of visited states.
/// It is consumed by [`Machine::run`]; outcomes are final.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{BlueprintBuilder, StateBuilder, TransitionBuilder};
/// use statecraft::core::{Stream, Tape};
/// use statecraft::engine::Machine;
///
/// let blueprint = BlueprintBuilder::<Tape<char>>::new()
///     .initial("a")
///     .state(
///         StateBuilder::new("a")
///             .accepting()
///             .effect(|t: &mut Tape<char>| {
///                 while t.current() == Some(&'a') {
///                     let _ = t.advance();
///                 }
///             }),
///     )
///     .build()
///     .unwrap();
///
/// let report = Machine::new(&blueprint, Tape::from("aaa")).run();
/// assert!(report.is_accepted());
/// assert_eq!(report.history().get_path(), vec!["a"]);
/// ```
pub struct Machine<'b, C, K = NoStack> {
    pub(crate) blueprint: &'b Blueprint<C, K>,
    pub(crate) context: C,
    pub(crate) current: usize,
    pub(crate) stack: Stack<K>,
    pub(crate) history: StateHistory,
    pub(crate) config: RunConfig,
    pub(crate) steps: usize,
    pub(crate) run_id: Uuid,
    pub(crate) observer: Option<Box<dyn Observer<C> + 'b>>,
}

impl<'b, C, K> Machine<'b, C, K> {
    /// Bind a fresh instance to `context`, positioned at the initial state
    /// with an empty stack.
    pub fn new(blueprint: &'b Blueprint<C, K>, context: C) -> Self {
        Self {
            blueprint,
            context,
            current: blueprint.initial,
            stack: Stack::new(),
            history: StateHistory::new(blueprint.initial().name()),
            config: RunConfig::default(),
            steps: 0,
            run_id: Uuid::new_v4(),
            observer: None,
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach an observer for this run. Pass `&mut observer` to read what it
    /// collected after the run.
    pub fn with_observer(mut self, observer: impl Observer<C> + 'b) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn blueprint(&self) -> &'b Blueprint<C, K> {
        self.blueprint
    }

    pub fn current_state(&self) -> &str {
        self.blueprint.state_at(self.current).name()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Symbol stack, bottom first. Always empty for plain machines.
    pub fn stack(&self) -> &[K] {
        self.stack.as_slice()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub(crate) fn notify(&mut self, event: impl FnOnce(&mut (dyn Observer<C> + 'b), &C)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            event(observer, &self.context);
        }
    }
}

impl<'b, C: Context, K: Symbol> Machine<'b, C, K> {
    /// Drive the machine to a terminal outcome.
    ///
    /// Each iteration runs the current state's action, then fires the first
    /// eligible transition. When none is eligible the decision goes to the
    /// state's handler or the blueprint's
    /// [`NoTransitionPolicy`](crate::engine::NoTransitionPolicy).
    pub fn run(mut self) -> RunReport<C> {
        let span = self.span();
        let _entered = span.enter();

        let outcome = loop {
            if let Some(outcome) = self.enter() {
                break outcome;
            }
            let Some(index) = self.select(0) else {
                break self.impasse();
            };
            if let Some(outcome) = self.step_limit_exceeded() {
                break outcome;
            }
            self.fire(index);
        };

        self.finish(outcome, 0)
    }

    pub(crate) fn span(&self) -> tracing::Span {
        debug_span!("run", run_id = %self.run_id, machine = %self.blueprint.name)
    }

    /// Run the current state's action.
    pub(crate) fn enter(&mut self) -> Option<Outcome> {
        let blueprint = self.blueprint;
        let state = blueprint.state_at(self.current);
        debug!(state = %state.name, depth = self.stack.len(), "entering state");
        self.notify(|observer, context| observer.on_enter(&state.name, context));

        match state.run_action(&mut self.context, self.stack.as_slice()) {
            Flow::Continue => None,
            Flow::Accept => Some(Outcome::Accepted),
            Flow::Reject(reason) => Some(Outcome::Rejected(reason)),
        }
    }

    /// Index of the first eligible transition at or after `from`.
    pub(crate) fn select(&self, from: usize) -> Option<usize> {
        let state = self.blueprint.state_at(self.current);

        state
            .transitions
            .iter()
            .enumerate()
            .skip(from)
            .find(|(index, transition)| {
                let eligible = transition.is_eligible(&self.context, &self.stack);
                if !eligible {
                    trace!(state = %state.name, index, target = %transition.target, "ineligible");
                }
                eligible
            })
            .map(|(index, _)| index)
    }

    /// Fire transition `index` of the current state.
    pub(crate) fn fire(&mut self, index: usize) {
        let blueprint = self.blueprint;
        let source = blueprint.state_at(self.current);
        let transition = &source.transitions[index];
        self.notify(|observer, context| observer.on_exit(&source.name, context));

        self.stack
            .apply(transition.pop.as_ref(), transition.push.as_ref());
        debug!(
            from = %source.name,
            to = %transition.target,
            index,
            depth = self.stack.len(),
            "transition fired"
        );

        let record = StateTransition {
            from: source.name.clone(),
            to: transition.target.clone(),
            index,
            timestamp: Utc::now(),
        };
        self.notify(|observer, context| observer.on_transition(&record, context));
        self.history.push(record);
        self.current = transition.to;
        self.steps += 1;
    }

    pub(crate) fn impasse(&mut self) -> Outcome {
        let blueprint = self.blueprint;
        let outcome = blueprint.decide(self.current, &mut self.context, self.stack.as_slice());
        debug!(state = %blueprint.state_at(self.current).name, ?outcome, "no eligible transition");
        outcome
    }

    pub(crate) fn step_limit_exceeded(&self) -> Option<Outcome> {
        let limit = self.config.step_limit?;
        if self.steps < limit {
            return None;
        }
        warn!(limit, state = %self.current_state(), "step limit reached");
        Some(Outcome::Rejected(format!(
            "step limit of {limit} transitions exceeded"
        )))
    }

    pub(crate) fn finish(mut self, outcome: Outcome, backtracks: usize) -> RunReport<C> {
        debug!(?outcome, steps = self.steps, backtracks, "run finished");
        let state = self.history.last_state().to_string();
        match &outcome {
            Outcome::Accepted => self.notify(|observer, context| observer.on_accept(&state, context)),
            Outcome::Rejected(reason) => {
                self.notify(|observer, context| observer.on_reject(&state, reason, context))
            }
        }
        RunReport {
            run_id: self.run_id,
            outcome,
            history: self.history,
            context: self.context,
            steps: self.steps,
            backtracks,
        }
    }
}
