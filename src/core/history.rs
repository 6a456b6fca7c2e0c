//! State transition history tracking.
//!
//! Records the sequence of states a run visited. Backtracking runs truncate
//! the history when they resume from a checkpoint, so an accepted run
//! describes only the live path from the initial state. An exhausted run keeps
//! the last path it explored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "p".to_string(),
///     to: "q".to_string(),
///     index: 1,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.index, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: String,
    /// The state being entered
    pub to: String,
    /// Position of the fired transition in the source state's declaration order
    pub index: usize,
    /// When the transition fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of the states visited by a run.
///
/// `record` is pure and returns a new history; the run loop uses the
/// crate-internal in-place variants.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new("start");
/// let history = history.record(StateTransition {
///     from: "start".to_string(),
///     to: "middle".to_string(),
///     index: 0,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["start", "middle"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    start: String,
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a history that begins in `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The original history is left unchanged.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self {
            start: self.start.clone(),
            transitions,
        }
    }

    pub(crate) fn push(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.transitions.truncate(len);
    }

    /// The state the run started in.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The state the recorded path ends in.
    pub fn last_state(&self) -> &str {
        self.transitions
            .last()
            .map_or(self.start.as_str(), |t| t.to.as_str())
    }

    /// Get the path of states traversed.
    ///
    /// Always begins with the start state, followed by the target of each
    /// transition in order.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        path.push(self.start.as_str());
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if no transition has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in the order they fired.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// Number of transitions recorded.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// True if no transition has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
