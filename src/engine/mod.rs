//! The state machine engine.
//!
//! A [`Blueprint`] is the machine type: an immutable, validated table of
//! states and their ordered, guarded transitions. A [`Machine`] is one run of
//! a blueprint over a context that owns the input.
//!
//! # Run loop
//!
//! 1. Run the current state's action.
//! 2. Evaluate the state's transitions in declaration order; the first
//!    eligible one is selected.
//! 3. If none is eligible, the state's handler or the blueprint's
//!    [`NoTransitionPolicy`] decides the outcome.
//! 4. Otherwise fire the transition and repeat from 1.
//!
//! The loop ends only on an explicit Accept or Reject, or when a configured
//! step limit is exceeded.

mod blueprint;
mod config;
mod describe;
mod machine;
mod observer;
mod report;
mod state;
mod transition;

pub use blueprint::{Blueprint, NoTransitionPolicy};
pub use config::RunConfig;
pub use describe::{EdgeDescription, MachineDescription, StateDescription};
pub use machine::Machine;
pub use observer::Observer;
pub use report::{RunReport, RunSummary};
pub use state::{Action, Impasse, NoTransitionHandler, StateDef};
pub use transition::{Flow, Outcome, Transition};
