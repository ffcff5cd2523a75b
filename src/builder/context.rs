//! Synthesis context: the single owner of every signal and state.

use crate::builder::error::BuildError;
use crate::builder::fragment::{Circuit, Fragment};
use crate::config::SynthConfig;
use crate::core::{Action, Guard, Register, SignalId, SignalInfo, StateId, StateNode};
use crate::program::Program;
use crate::validate;
use std::collections::HashMap;
use stillwater::validation::Validation;
use tracing::{debug, warn};

/// Explicitly passed synthesis context.
///
/// Owns the signal table and the state table. Handles are issued by
/// monotonic allocators, and intermediate signals are named under a fresh
/// scope per component instance, so sibling circuits never alias by accident.
///
/// # Example
///
/// ```rust
/// use gatesynth::builder::{Circuit, SynthContext};
/// use gatesynth::circuit::Add;
///
/// let mut ctx = SynthContext::new();
/// let a = ctx.create_register("A", 4).unwrap();
/// let b = ctx.create_register("B", 4).unwrap();
/// let add = Add::build(&mut ctx, &a, &b).unwrap();
///
/// let program = ctx.finish(add.fragment()).unwrap();
/// assert_eq!(program.entry(), add.entry());
/// ```
pub struct SynthContext {
    config: SynthConfig,
    signals: Vec<SignalInfo>,
    names: HashMap<String, SignalId>,
    states: Vec<StateNode>,
    next_scope: usize,
    zero: Option<SignalId>,
    constants: HashMap<(u64, usize), Register>,
    wide_ones: HashMap<usize, Register>,
}

impl SynthContext {
    pub fn new() -> Self {
        Self::with_config(SynthConfig::default())
    }

    pub fn with_config(config: SynthConfig) -> Self {
        Self {
            config,
            signals: Vec::new(),
            names: HashMap::new(),
            states: Vec::new(),
            next_scope: 0,
            zero: None,
            constants: HashMap::new(),
            wide_ones: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Create a signal with a caller-chosen name. Defaults to false.
    pub fn create_signal(&mut self, name: impl Into<String>) -> Result<SignalId, BuildError> {
        self.insert_signal(name.into(), false, false)
    }

    /// Create a register of `width` bits named `name[0]`..`name[width-1]`.
    pub fn create_register(
        &mut self,
        name: impl Into<String>,
        width: usize,
    ) -> Result<Register, BuildError> {
        let name = name.into();
        if width == 0 {
            return Err(BuildError::ZeroWidth { name });
        }
        let bits = (0..width)
            .map(|i| self.create_signal(format!("{name}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Register::new(name, bits))
    }

    /// Create a register of the configured default width.
    pub fn register(&mut self, name: impl Into<String>) -> Result<Register, BuildError> {
        let width = self.config.register_width;
        self.create_register(name, width)
    }

    /// Reserve a unique name prefix for one component instance.
    pub fn scope(&mut self, kind: &str) -> String {
        let scope = format!("{kind}{}", self.next_scope);
        self.next_scope += 1;
        scope
    }

    /// Create an internal signal named `scope.role`.
    pub fn fresh_signal(&mut self, scope: &str, role: &str) -> Result<SignalId, BuildError> {
        self.create_signal(format!("{scope}.{role}"))
    }

    /// Create an internal register named `scope.role`.
    pub fn fresh_register(
        &mut self,
        scope: &str,
        role: &str,
        width: usize,
    ) -> Result<Register, BuildError> {
        self.create_register(format!("{scope}.{role}"), width)
    }

    /// Shared constant-false signal, created on first use.
    pub fn zero(&mut self) -> Result<SignalId, BuildError> {
        if let Some(zero) = self.zero {
            return Ok(zero);
        }
        let zero = self.insert_signal("const.zero".to_string(), false, true)?;
        self.zero = Some(zero);
        Ok(zero)
    }

    /// Shared constant register holding `value`, created once per
    /// (value, width) pair.
    pub fn constant_register(&mut self, value: u64, width: usize) -> Result<Register, BuildError> {
        if let Some(register) = self.constants.get(&(value, width)) {
            return Ok(register.clone());
        }
        let name = format!("const.{value:#x}.w{width}");
        if width == 0 {
            return Err(BuildError::ZeroWidth { name });
        }
        check_literal(value, width)?;
        let register = self.insert_constant(name, width, |i| bit_of(value, i))?;
        self.constants.insert((value, width), register.clone());
        Ok(register)
    }

    /// Constant register holding binary 1.
    pub fn one(&mut self, width: usize) -> Result<Register, BuildError> {
        self.constant_register(1, width)
    }

    /// Constant register with every bit set, the two's complement of 1.
    pub fn minus_one(&mut self, width: usize) -> Result<Register, BuildError> {
        if width <= 64 {
            return self.constant_register(u64::MAX >> (64 - width.max(1)), width);
        }
        if let Some(register) = self.wide_ones.get(&width) {
            return Ok(register.clone());
        }
        let register = self.insert_constant(format!("const.ones.w{width}"), width, |_| true)?;
        self.wide_ones.insert(width, register.clone());
        Ok(register)
    }

    pub fn create_state(&mut self, label: impl Into<String>) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(StateNode::new(label.into()));
        id
    }

    /// Attach an action driving `signal` to `value` on entry to `state`.
    pub fn attach_drive(
        &mut self,
        state: StateId,
        signal: SignalId,
        value: bool,
    ) -> Result<(), BuildError> {
        self.check_writable(signal)?;
        self.node_mut(state)?
            .push_action(Action::Drive { signal, value });
        Ok(())
    }

    /// Attach an action copying `src` into `dst` on entry to `state`.
    pub fn attach_copy(
        &mut self,
        state: StateId,
        src: SignalId,
        dst: SignalId,
    ) -> Result<(), BuildError> {
        self.info(src)?;
        self.check_writable(dst)?;
        self.node_mut(state)?.push_action(Action::Copy { src, dst });
        Ok(())
    }

    /// Set the default transition of `src`. A state has at most one.
    pub fn add_unconditional_edge(&mut self, src: StateId, dst: StateId) -> Result<(), BuildError> {
        self.node(dst)?;
        let node = self.node_mut(src)?;
        if !node.set_default(dst) {
            return Err(BuildError::DuplicateDefault {
                state: node.label().to_string(),
            });
        }
        Ok(())
    }

    /// Append a guarded transition; earlier edges take priority.
    pub fn add_guarded_edge(
        &mut self,
        src: StateId,
        dst: StateId,
        guard: Guard,
    ) -> Result<(), BuildError> {
        self.node(dst)?;
        for signal in guard.signals() {
            self.info(signal)?;
        }
        self.node_mut(src)?.push_transition(src, dst, guard);
        Ok(())
    }

    /// Link `first.exit` to `second.entry` and return the combined fragment.
    pub fn chain(
        &mut self,
        first: &impl Circuit,
        second: &impl Circuit,
    ) -> Result<Fragment, BuildError> {
        self.add_unconditional_edge(first.exit(), second.entry())?;
        let mut states = first.states().to_vec();
        states.extend_from_slice(second.states());
        Ok(Fragment {
            entry: first.entry(),
            exit: second.exit(),
            states,
        })
    }

    /// Chain fragments in order.
    pub fn sequence(&mut self, fragments: &[&Fragment]) -> Result<Fragment, BuildError> {
        let (first, rest) = fragments.split_first().ok_or(BuildError::EmptySequence)?;
        rest.iter()
            .try_fold((*first).clone(), |acc, next| self.chain(&acc, *next))
    }

    pub fn signal(&self, id: SignalId) -> Option<&SignalInfo> {
        self.signals.get(id.index())
    }

    pub fn signal_by_name(&self, name: &str) -> Option<SignalId> {
        self.names.get(name).copied()
    }

    pub fn state(&self, id: StateId) -> Option<&StateNode> {
        self.states.get(id.index())
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Freeze the graph into a program whose entry and exit are those of
    /// `top`. Validation runs unless disabled in the configuration.
    pub fn finish(self, top: &impl Circuit) -> Result<Program, BuildError> {
        self.node(top.entry())?;
        self.node(top.exit())?;
        let validate_on_finish = self.config.validate_on_finish;
        let program = Program::new(self.signals, self.states, top.entry(), top.exit());

        if validate_on_finish {
            if let Validation::Failure(violations) = validate::check_program(&program) {
                let violations: Vec<_> = violations.iter().cloned().collect();
                warn!(count = violations.len(), "synthesized graph failed validation");
                return Err(BuildError::Invalid { violations });
            }
        }

        debug!(
            signals = program.signals().len(),
            states = program.states().len(),
            "program frozen"
        );
        Ok(program)
    }

    fn insert_constant(
        &mut self,
        name: String,
        width: usize,
        bit: impl Fn(usize) -> bool,
    ) -> Result<Register, BuildError> {
        let bits = (0..width)
            .map(|i| self.insert_signal(format!("{name}[{i}]"), bit(i), true))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Register::new(name, bits))
    }

    fn insert_signal(
        &mut self,
        name: String,
        initial: bool,
        constant: bool,
    ) -> Result<SignalId, BuildError> {
        if self.names.contains_key(&name) {
            return Err(BuildError::SignalCollision { name });
        }
        let id = SignalId(self.signals.len() as u32);
        self.names.insert(name.clone(), id);
        self.signals.push(SignalInfo {
            name,
            initial,
            constant,
        });
        Ok(id)
    }

    fn info(&self, id: SignalId) -> Result<&SignalInfo, BuildError> {
        self.signals
            .get(id.index())
            .ok_or(BuildError::UnknownSignal { id })
    }

    fn check_writable(&self, id: SignalId) -> Result<(), BuildError> {
        let info = self.info(id)?;
        if info.constant {
            return Err(BuildError::ConstantWrite {
                name: info.name.clone(),
            });
        }
        Ok(())
    }

    fn node(&self, id: StateId) -> Result<&StateNode, BuildError> {
        self.states
            .get(id.index())
            .ok_or(BuildError::UnknownState { id })
    }

    fn node_mut(&mut self, id: StateId) -> Result<&mut StateNode, BuildError> {
        self.states
            .get_mut(id.index())
            .ok_or(BuildError::UnknownState { id })
    }
}

impl Default for SynthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of bit `index` of `value`; bits past 63 read as zero.
pub(crate) fn bit_of(value: u64, index: usize) -> bool {
    index < 64 && (value >> index) & 1 == 1
}

/// Reject literals that need more than `width` bits.
pub(crate) fn check_literal(value: u64, width: usize) -> Result<(), BuildError> {
    if width < 64 && value >> width != 0 {
        return Err(BuildError::LiteralOverflow { value, width });
    }
    Ok(())
}
