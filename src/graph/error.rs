use std::fmt::Debug;
use thiserror::Error;

/// Errors raised by graph queries and mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex {vertex} is not in the graph")]
    NotFound { vertex: String },

    #[error("No edge from {from} to {to}")]
    MissingEdge { from: String, to: String },
}

impl GraphError {
    pub fn not_found<V: Debug>(vertex: &V) -> Self {
        GraphError::NotFound {
            vertex: format!("{vertex:?}"),
        }
    }

    pub fn missing_edge<V: Debug>(from: &V, to: &V) -> Self {
        GraphError::MissingEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}
