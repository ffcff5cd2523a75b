//! Structural defects found in a synthesized graph.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single defect reported by [`check_program`](crate::validate::check_program).
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    #[error("State '{state}' has no outgoing transition but is not the program exit")]
    DeadEnd { state: String },

    #[error("State '{state}' has no default transition and its guards do not cover every input")]
    NotExhaustive { state: String },

    #[error("State '{state}' is unreachable from the program entry")]
    Unreachable { state: String },

    #[error("Transition {priority} of state '{state}' can never fire past earlier guards")]
    Shadowed { state: String, priority: usize },
}

impl Violation {
    /// Label of the offending state.
    pub fn state(&self) -> &str {
        match self {
            Self::DeadEnd { state }
            | Self::NotExhaustive { state }
            | Self::Unreachable { state }
            | Self::Shadowed { state, .. } => state,
        }
    }
}
