//! Core building blocks shared by every machine variant.
//!
//! - Guard predicates for transition eligibility
//! - History of visited states
//! - Stream and context capabilities consumed by the run loop
//!
//! Nothing in this module drives a machine; see [`crate::engine`] for the run
//! loop.

mod guard;
mod history;
mod stream;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use stream::{Context, Seekable, Stream, StreamError, Tape};
