//! Step-driven interpreter for synthesized programs.

use crate::config::MachineConfig;
use crate::core::{Action, ExecutionHistory, Register, SignalId, StateId, StepRecord};
use crate::program::Program;
use crate::runtime::error::RuntimeError;
use tracing::trace;

/// Result of executing a single step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Moved to a new state and fired its actions
    Transitioned(StateId),

    /// Already at the program's exit state
    Halted,
}

/// Single-threaded interpreter: one active state, signal values in a flat
/// table indexed by [`SignalId`].
///
/// A fresh machine sits at the entry state without having entered it, so
/// inputs can be set first. The first `step` (or `run`) enters the entry
/// state, firing its actions, before evaluating transitions.
pub struct Machine<'p> {
    program: &'p Program,
    config: MachineConfig,
    values: Vec<bool>,
    current: StateId,
    started: bool,
    history: ExecutionHistory,
    steps: usize,
}

impl<'p> Machine<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self::with_config(program, MachineConfig::default())
    }

    pub fn with_config(program: &'p Program, config: MachineConfig) -> Self {
        let values = program.signals().iter().map(|info| info.initial).collect();
        Self {
            program,
            config,
            values,
            current: program.entry(),
            started: false,
            history: ExecutionHistory::new(),
            steps: 0,
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// True once control has reached the program's exit state
    pub fn is_halted(&self) -> bool {
        self.started && self.current == self.program.exit()
    }

    /// Get execution history (pure)
    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    /// Current value of `signal`; unknown handles read as false.
    pub fn signal(&self, signal: SignalId) -> bool {
        self.values.get(signal.index()).copied().unwrap_or(false)
    }

    /// Set an input signal. Constants keep their synthesized value.
    pub fn set_signal(&mut self, signal: SignalId, value: bool) -> Result<(), RuntimeError> {
        let info = self
            .program
            .signal(signal)
            .ok_or(RuntimeError::UnknownSignal { id: signal })?;
        if info.constant {
            return Err(RuntimeError::ConstantWrite {
                name: info.name.clone(),
            });
        }
        self.values[signal.index()] = value;
        Ok(())
    }

    /// Write an unsigned value into a register, LSB at bit 0.
    pub fn set_register(&mut self, register: &Register, value: u64) -> Result<(), RuntimeError> {
        let width = register.width();
        if width < 64 && value >> width != 0 {
            return Err(RuntimeError::ValueTooWide { value, width });
        }
        for (i, &bit) in register.bits().iter().enumerate() {
            self.set_signal(bit, i < 64 && (value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Read a register as an unsigned value; bits past 63 are ignored.
    pub fn read_register(&self, register: &Register) -> u64 {
        register
            .bits()
            .iter()
            .take(64)
            .enumerate()
            .fold(0, |acc, (i, &bit)| acc | (u64::from(self.signal(bit)) << i))
    }

    /// Execute one step: enter the entry state if needed, then follow the
    /// first satisfied guard, or the default transition.
    pub fn step(&mut self) -> Result<StepResult, RuntimeError> {
        if !self.started {
            self.started = true;
            self.enter(self.current);
        }
        if self.current == self.program.exit() {
            return Ok(StepResult::Halted);
        }

        let program = self.program;
        let node = program
            .state(self.current)
            .ok_or_else(|| RuntimeError::DeadEnd {
                state: self.current.to_string(),
            })?;
        let next = node
            .next(&self.values)
            .ok_or_else(|| RuntimeError::DeadEnd {
                state: node.label().to_string(),
            })?;

        self.steps += 1;
        trace!(step = self.steps, from = node.label(), to = %next, "transition");
        self.history = self.history.record(StepRecord {
            from: self.current,
            to: next,
            step: self.steps,
        });
        self.current = next;
        self.enter(next);
        Ok(StepResult::Transitioned(next))
    }

    /// Step until the exit state is reached; returns the number of
    /// transitions taken by this call.
    pub fn run(&mut self) -> Result<usize, RuntimeError> {
        let mut taken = 0;
        loop {
            if taken == self.config.max_steps {
                if self.step()? == StepResult::Halted {
                    return Ok(taken);
                }
                return Err(RuntimeError::StepLimit {
                    limit: self.config.max_steps,
                });
            }
            match self.step()? {
                StepResult::Halted => return Ok(taken),
                StepResult::Transitioned(_) => taken += 1,
            }
        }
    }

    /// Return control to the entry state. Signal values are kept; entry
    /// actions fire again on the next step.
    pub fn restart(&mut self) {
        self.current = self.program.entry();
        self.started = false;
        self.history = ExecutionHistory::new();
        self.steps = 0;
    }

    fn enter(&mut self, state: StateId) {
        let program = self.program;
        let Some(node) = program.state(state) else {
            return;
        };
        for action in node.actions() {
            match *action {
                Action::Drive { signal, value } => self.write(signal, value),
                Action::Copy { src, dst } => {
                    let value = self.signal(src);
                    self.write(dst, value);
                }
            }
        }
    }

    fn write(&mut self, signal: SignalId, value: bool) {
        if let Some(slot) = self.values.get_mut(signal.index()) {
            *slot = value;
        }
    }
}
