//! Signals and registers: the circuit's units of state.
//!
//! A signal is a named boolean cell. Components never hold the cell itself,
//! only an opaque [`SignalId`] issued by the synthesis context. A register is
//! an ordered vector of such handles with bit 0 as the least significant bit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Opaque handle to a signal owned by a synthesis context.
///
/// Handles are issued by a monotonic allocator, so two handles compare equal
/// only when they name the same wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignalId(pub(crate) u32);

impl SignalId {
    /// Position of this signal in its context's signal table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Metadata recorded for every allocated signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    /// Unique name, used for diagnostics and lookups.
    pub name: String,
    /// Value the signal holds before any action runs.
    pub initial: bool,
    /// Constants may be read by any circuit but never written.
    pub constant: bool,
}

/// Read access to the current value of signals.
///
/// Guards are evaluated against any implementor, which lets the interpreter
/// and the validator's truth tables share the same evaluation code.
pub trait SignalValues {
    /// Current value of `signal`.
    fn value(&self, signal: SignalId) -> bool;
}

impl SignalValues for [bool] {
    fn value(&self, signal: SignalId) -> bool {
        self.get(signal.index()).copied().unwrap_or(false)
    }
}

impl SignalValues for Vec<bool> {
    fn value(&self, signal: SignalId) -> bool {
        self.as_slice().value(signal)
    }
}

/// Fixed-width ordered vector of signals, bit 0 = LSB.
///
/// # Example
///
/// ```rust
/// use gatesynth::builder::SynthContext;
///
/// let mut ctx = SynthContext::new();
/// let a = ctx.create_register("A", 4).unwrap();
///
/// assert_eq!(a.width(), 4);
/// assert_eq!(a.name(), "A");
/// assert_ne!(a[0], a[3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    name: String,
    bits: Vec<SignalId>,
}

impl Register {
    pub(crate) fn new(name: String, bits: Vec<SignalId>) -> Self {
        Self { name, bits }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bits, fixed at construction.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Signal at bit position `index`, if in range.
    pub fn bit(&self, index: usize) -> Option<SignalId> {
        self.bits.get(index).copied()
    }

    /// All bit signals, LSB first.
    pub fn bits(&self) -> &[SignalId] {
        &self.bits
    }

    /// True when the two registers share at least one signal.
    pub fn overlaps(&self, other: &Register) -> bool {
        self.bits.iter().any(|bit| other.bits.contains(bit))
    }
}

impl Index<usize> for Register {
    type Output = SignalId;

    fn index(&self, index: usize) -> &SignalId {
        &self.bits[index]
    }
}
