//! Core data model of the synthesized automaton.
//!
//! This module contains the pure building blocks every circuit is made of:
//! - Signals and registers, addressed by opaque handles
//! - Guards over signal-equality tests
//! - States with entry actions and prioritised transitions
//! - Immutable execution history
//!
//! Nothing here allocates handles; that is the job of
//! [`SynthContext`](crate::builder::SynthContext).

mod guard;
mod history;
mod signal;
mod state;

pub use guard::{Clause, Guard, Test};
pub use history::{ExecutionHistory, StepRecord};
pub use signal::{Register, SignalId, SignalInfo, SignalValues};
pub use state::{Action, StateId, StateNode, Transition};
