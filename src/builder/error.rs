//! Errors raised while synthesizing circuits.

use crate::core::{SignalId, StateId};
use crate::validate::Violation;
use thiserror::Error;

/// Errors that can occur when building circuits and programs.
///
/// All of them are fatal: a context that reported one should be discarded.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Signal name '{name}' is already in use")]
    SignalCollision { name: String },

    #[error("Signal {id} does not belong to this context")]
    UnknownSignal { id: SignalId },

    #[error("State {id} does not belong to this context")]
    UnknownState { id: StateId },

    #[error("Register '{name}' must have at least one bit")]
    ZeroWidth { name: String },

    #[error("{op} operands differ in width ({left} vs {right})")]
    WidthMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },

    #[error("{op} operands must not share signals")]
    OperandAlias { op: &'static str },

    #[error("Constant signal '{name}' cannot be written")]
    ConstantWrite { name: String },

    #[error("State '{state}' already has a default transition")]
    DuplicateDefault { state: String },

    #[error("Literal {value} does not fit in {width} bits")]
    LiteralOverflow { value: u64, width: usize },

    #[error("Cannot sequence an empty list of fragments")]
    EmptySequence,

    #[error("Synthesized graph failed validation with {} violation(s)", .violations.len())]
    Invalid { violations: Vec<Violation> },
}
