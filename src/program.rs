//! Frozen, immutable state graph produced by synthesis.

use crate::core::{SignalId, SignalInfo, StateId, StateNode};
use serde::{Deserialize, Serialize};

/// The generated automaton: signal table, state table, entry and exit.
///
/// Only signal values change after a program is frozen, and those live in
/// the interpreter, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    signals: Vec<SignalInfo>,
    states: Vec<StateNode>,
    entry: StateId,
    exit: StateId,
}

impl Program {
    pub(crate) fn new(
        signals: Vec<SignalInfo>,
        states: Vec<StateNode>,
        entry: StateId,
        exit: StateId,
    ) -> Self {
        Self {
            signals,
            states,
            entry,
            exit,
        }
    }

    pub fn entry(&self) -> StateId {
        self.entry
    }

    pub fn exit(&self) -> StateId {
        self.exit
    }

    pub fn signals(&self) -> &[SignalInfo] {
        &self.signals
    }

    pub fn states(&self) -> &[StateNode] {
        &self.states
    }

    pub fn signal(&self, id: SignalId) -> Option<&SignalInfo> {
        self.signals.get(id.index())
    }

    pub fn state(&self, id: StateId) -> Option<&StateNode> {
        self.states.get(id.index())
    }

    pub fn signal_by_name(&self, name: &str) -> Option<SignalId> {
        self.signals
            .iter()
            .position(|info| info.name == name)
            .map(|index| SignalId(index as u32))
    }

    /// Handles of every state, in allocation order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> {
        (0..self.states.len() as u32).map(StateId)
    }

    /// JSON rendering for the external exporter.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{Circuit, SynthContext};
    use crate::circuit::HalfAdder;

    #[test]
    fn half_adder_program_exposes_its_graph() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_signal("a").unwrap();
        let b = ctx.create_signal("b").unwrap();
        let ha = HalfAdder::build(&mut ctx, a, b).unwrap();

        let program = ctx.finish(ha.fragment()).unwrap();

        assert_eq!(program.states().len(), 4);
        assert_eq!(program.entry(), ha.entry());
        assert_eq!(program.exit(), ha.exit());
        assert_eq!(program.signal_by_name("a"), Some(a));
        assert_eq!(program.state_ids().count(), 4);
    }

    #[test]
    fn json_export_names_states_and_signals() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_signal("a").unwrap();
        let b = ctx.create_signal("b").unwrap();
        let ha = HalfAdder::build(&mut ctx, a, b).unwrap();
        let program = ctx.finish(ha.fragment()).unwrap();

        let json = program.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["states"].as_array().unwrap().len(), 4);
        assert_eq!(value["signals"][0]["name"], "a");
        assert!(json.contains("sum_calc"));
    }
}
