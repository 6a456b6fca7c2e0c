//! Results handed back to callers when a run concludes.

use crate::core::StateHistory;
use crate::engine::transition::Outcome;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport<C> {
    pub(crate) run_id: Uuid,
    pub(crate) outcome: Outcome,
    pub(crate) history: StateHistory,
    pub(crate) context: C,
    pub(crate) steps: usize,
    pub(crate) backtracks: usize,
}

impl<C> RunReport<C> {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    /// Path from the initial state to the state the run ended in.
    ///
    /// For a backtracking run that exhausted its alternatives, this is the
    /// last path explored before giving up.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Transitions fired, including those later undone by backtracking.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Alternatives taken after a rejection. Always zero for plain runs.
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            outcome: self.outcome.clone(),
            path: self
                .history
                .get_path()
                .into_iter()
                .map(str::to_string)
                .collect(),
            steps: self.steps,
            backtracks: self.backtracks,
        }
    }
}

/// Serializable projection of a [`RunReport`], without the context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub outcome: Outcome,
    pub path: Vec<String>,
    pub steps: usize,
    pub backtracks: usize,
}
