//! Graph vertices, entry actions and guarded transitions.

use super::guard::Guard;
use super::signal::{SignalId, SignalValues};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a state owned by a synthesis context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(pub(crate) u32);

impl StateId {
    /// Position of this state in its context's state table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Action executed when control enters a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Set `signal` to a literal constant.
    Drive { signal: SignalId, value: bool },

    /// Set `dst` to the current value of `src`.
    Copy { src: SignalId, dst: SignalId },
}

impl Action {
    /// Signal written by this action.
    pub fn target(&self) -> SignalId {
        match self {
            Self::Drive { signal, .. } => *signal,
            Self::Copy { dst, .. } => *dst,
        }
    }
}

/// Guarded edge between two states.
///
/// Priority is the declaration order among the source state's guarded
/// transitions; lower fires first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub source: StateId,
    pub target: StateId,
    pub guard: Guard,
    pub priority: usize,
}

/// Vertex of the generated automaton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    label: String,
    actions: Vec<Action>,
    transitions: Vec<Transition>,
    default: Option<StateId>,
}

impl StateNode {
    pub(crate) fn new(label: String) -> Self {
        Self {
            label,
            actions: Vec::new(),
            transitions: Vec::new(),
            default: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Entry actions in execution order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Guarded transitions in priority order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Target of the unconditional transition, if any.
    pub fn default_target(&self) -> Option<StateId> {
        self.default
    }

    /// True when no edge leaves this state.
    pub fn is_dead_end(&self) -> bool {
        self.transitions.is_empty() && self.default.is_none()
    }

    /// Every state this one can move to, guarded targets first.
    pub fn successors(&self) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .iter()
            .map(|t| t.target)
            .chain(self.default)
    }

    /// Pick the next state: first satisfied guard wins, then the default.
    pub fn next<V: SignalValues + ?Sized>(&self, values: &V) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.guard.check(values))
            .map(|t| t.target)
            .or(self.default)
    }

    pub(crate) fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn push_transition(&mut self, source: StateId, target: StateId, guard: Guard) {
        let priority = self.transitions.len();
        self.transitions.push(Transition {
            source,
            target,
            guard,
            priority,
        });
    }

    pub(crate) fn set_default(&mut self, target: StateId) -> bool {
        if self.default.is_some() {
            return false;
        }
        self.default = Some(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SignalId = SignalId(0);
    const B: SignalId = SignalId(1);

    fn node_with_edges() -> StateNode {
        let mut node = StateNode::new("branch".to_string());
        node.push_transition(StateId(0), StateId(1), Guard::when(A, true));
        node.push_transition(StateId(0), StateId(2), Guard::when(B, true));
        node.set_default(StateId(3));
        node
    }

    #[test]
    fn first_matching_guard_wins() {
        let node = node_with_edges();

        assert_eq!(node.next(&vec![true, true]), Some(StateId(1)));
        assert_eq!(node.next(&vec![false, true]), Some(StateId(2)));
    }

    #[test]
    fn default_fires_when_no_guard_matches() {
        let node = node_with_edges();

        assert_eq!(node.next(&vec![false, false]), Some(StateId(3)));
    }

    #[test]
    fn priorities_follow_declaration_order() {
        let node = node_with_edges();
        let priorities: Vec<usize> = node.transitions().iter().map(|t| t.priority).collect();

        assert_eq!(priorities, vec![0, 1]);
    }

    #[test]
    fn second_default_is_rejected() {
        let mut node = StateNode::new("s".to_string());

        assert!(node.set_default(StateId(1)));
        assert!(!node.set_default(StateId(2)));
        assert_eq!(node.default_target(), Some(StateId(1)));
    }

    #[test]
    fn bare_state_is_dead_end() {
        let node = StateNode::new("exit".to_string());

        assert!(node.is_dead_end());
        assert_eq!(node.next(&vec![true]), None);
    }

    #[test]
    fn action_target_names_written_signal() {
        let drive = Action::Drive {
            signal: A,
            value: true,
        };
        let copy = Action::Copy { src: A, dst: B };

        assert_eq!(drive.target(), A);
        assert_eq!(copy.target(), B);
    }
}
