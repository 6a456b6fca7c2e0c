//! Statecraft: declarative state machines over input streams
//!
//! A machine type is declared once as a [`Blueprint`]: named states, each with
//! an optional entry action and an ordered list of guarded transitions. Runs
//! bind the blueprint to a context that owns the input and drive it to an
//! explicit accept or reject.
//!
//! # Core Concepts
//!
//! - **Blueprint**: Immutable, validated table of states and transitions
//! - **Machine**: One run over a context, with its own history and stack
//! - **Guards**: Side-effect free predicates that make transitions eligible
//! - **Backtracking**: Depth-first search over transition choices via [`Backtracker`]
//! - **Pushdown**: Transitions that pop and push symbols on a private stack
//! - **Graphs**: The [`Graph`] capability, implemented by blueprints themselves
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::{BlueprintBuilder, StateBuilder, TransitionBuilder};
//! use statecraft::core::{Stream, Tape};
//! use statecraft::engine::Machine;
//!
//! // p*q*
//! let blueprint = BlueprintBuilder::<Tape<char>>::new()
//!     .name("pq")
//!     .initial("p")
//!     .state(
//!         StateBuilder::new("p")
//!             .accepting()
//!             .effect(|t: &mut Tape<char>| {
//!                 while t.current() == Some(&'p') {
//!                     let _ = t.advance();
//!                 }
//!             })
//!             .transition(TransitionBuilder::to("q").when(|t: &Tape<char>| t.current() == Some(&'q'))),
//!     )
//!     .state(StateBuilder::new("q").accepting().effect(|t: &mut Tape<char>| {
//!         while t.current() == Some(&'q') {
//!             let _ = t.advance();
//!         }
//!     }))
//!     .build()
//!     .unwrap();
//!
//! assert!(Machine::new(&blueprint, Tape::from("pppqq")).run().is_accepted());
//! assert!(!Machine::new(&blueprint, Tape::from("qp")).run().is_accepted());
//! ```

pub mod backtrack;
pub mod builder;
pub mod core;
pub mod engine;
pub mod graph;
pub mod pushdown;

// Re-export commonly used types
pub use crate::backtrack::{Backtracker, Rewind};
pub use crate::builder::{BlueprintBuilder, BuildError, StateBuilder, TransitionBuilder};
pub use crate::core::{Context, Guard, StateHistory, StateTransition, Stream, Tape};
pub use crate::engine::{Blueprint, Flow, Machine, NoTransitionPolicy, Observer, Outcome, RunConfig, RunReport};
pub use crate::graph::{Graph, GraphMut, GraphWrapper};
pub use crate::pushdown::{NoStack, PushdownMachine, Stack};
