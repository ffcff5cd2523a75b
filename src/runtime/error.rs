//! Errors raised while interpreting a program.

use crate::core::SignalId;
use thiserror::Error;

/// Errors that can occur while stepping a machine.
#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("No transition available from state '{state}'")]
    DeadEnd { state: String },

    #[error("Step limit ({limit}) exceeded before reaching the exit state")]
    StepLimit { limit: usize },

    #[error("Signal {id} is not part of this program")]
    UnknownSignal { id: SignalId },

    #[error("Constant signal '{name}' cannot be set")]
    ConstantWrite { name: String },

    #[error("Value {value} does not fit in {width} bits")]
    ValueTooWide { value: u64, width: usize },
}
