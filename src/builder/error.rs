//! Configuration faults detected when a blueprint is built.

use thiserror::Error;

/// Errors that can occur when building a blueprint.
///
/// Validation collects every fault before failing; when more than one is
/// found they are returned together as [`BuildError::Multiple`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Initial state '{0}' is not declared")]
    UnknownInitialState(String),

    #[error("Transition from '{from}' targets undeclared state '{to}'")]
    UndeclaredTarget { from: String, to: String },

    #[error("{} configuration faults: {}", .0.len(), summarize(.0))]
    Multiple(Vec<BuildError>),
}

impl BuildError {
    pub(crate) fn from_faults(mut faults: Vec<BuildError>) -> Self {
        if faults.len() == 1 {
            faults.remove(0)
        } else {
            BuildError::Multiple(faults)
        }
    }

    /// Every individual fault, flattening [`BuildError::Multiple`].
    pub fn faults(&self) -> Vec<&BuildError> {
        match self {
            BuildError::Multiple(faults) => faults.iter().flat_map(|f| f.faults()).collect(),
            single => vec![single],
        }
    }
}

fn summarize(faults: &[BuildError]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
