//! Sub-graphs returned by circuit constructors.

use crate::core::StateId;
use serde::{Deserialize, Serialize};

/// Entry, exit and flattened state list of a synthesized sub-graph.
///
/// `states` lists every state the fragment allocated, nested fragments
/// included, in allocation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub entry: StateId,
    pub exit: StateId,
    pub states: Vec<StateId>,
}

impl Fragment {
    /// Fragment made of a single state that is both entry and exit.
    pub fn single(state: StateId) -> Self {
        Self {
            entry: state,
            exit: state,
            states: vec![state],
        }
    }
}

/// Anything that was synthesized into a fragment.
///
/// Every component implements this so callers can sequence them without
/// caring which operation produced the sub-graph.
pub trait Circuit {
    fn fragment(&self) -> &Fragment;

    fn entry(&self) -> StateId {
        self.fragment().entry
    }

    fn exit(&self) -> StateId {
        self.fragment().exit
    }

    fn states(&self) -> &[StateId] {
        &self.fragment().states
    }
}

impl Circuit for Fragment {
    fn fragment(&self) -> &Fragment {
        self
    }
}
