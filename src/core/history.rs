//! Execution history tracking.
//!
//! Provides immutable tracking of the states an interpreter visits,
//! one record per step.

use super::state::StateId;
use serde::{Deserialize, Serialize};

/// Record of a single step.
///
/// # Example
///
/// ```rust
/// use gatesynth::core::{ExecutionHistory, StepRecord};
/// # use gatesynth::builder::SynthContext;
/// # let mut ctx = SynthContext::new();
/// # let from = ctx.create_state("from");
/// # let to = ctx.create_state("to");
///
/// let history = ExecutionHistory::new().record(StepRecord { from, to, step: 1 });
/// assert_eq!(history.get_path(), vec![from, to]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The state control left
    pub from: StateId,
    /// The state control entered
    pub to: StateId,
    /// One-based step counter of the interpreter
    pub step: usize,
}

/// Ordered history of steps.
///
/// History is immutable - `record` returns a new history with the step
/// added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionHistory {
    steps: Vec<StepRecord>,
}

impl ExecutionHistory {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, returning a new history.
    pub fn record(&self, step: StepRecord) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// States traversed: the first source, then the target of each step.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(first.from);
        }
        path.extend(self.steps.iter().map(|s| s.to));
        path
    }

    /// Number of times `state` was entered.
    pub fn visits(&self, state: StateId) -> usize {
        self.steps.iter().filter(|s| s.to == state).count()
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
