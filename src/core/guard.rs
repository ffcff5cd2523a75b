//! Guard predicates for controlling state transitions.
//!
//! A guard is a disjunction of conjunctive clauses over atomic tests of the
//! form `signal == value`. Guards are pure data: they can be evaluated,
//! inspected by the validator, and serialized with the rest of a program.

use super::signal::{SignalId, SignalValues};
use serde::{Deserialize, Serialize};

/// Atomic test `signal == value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Test {
    pub signal: SignalId,
    pub value: bool,
}

impl Test {
    pub fn new(signal: SignalId, value: bool) -> Self {
        Self { signal, value }
    }

    pub fn holds<V: SignalValues + ?Sized>(&self, values: &V) -> bool {
        values.value(self.signal) == self.value
    }
}

/// Conjunction of tests. An empty clause always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    tests: Vec<Test>,
}

impl Clause {
    pub fn new(tests: Vec<Test>) -> Self {
        Self { tests }
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn holds<V: SignalValues + ?Sized>(&self, values: &V) -> bool {
        self.tests.iter().all(|test| test.holds(values))
    }
}

/// Disjunction of clauses gating a transition.
///
/// An empty guard is always true; it is the guard of a default transition.
///
/// # Example
///
/// ```rust
/// use gatesynth::builder::SynthContext;
/// use gatesynth::guard;
///
/// let mut ctx = SynthContext::new();
/// let a = ctx.create_signal("a").unwrap();
/// let b = ctx.create_signal("b").unwrap();
///
/// // (a && !b) || (!a && b)
/// let differ = guard!([a => true, b => false], [a => false, b => true]);
///
/// assert!(differ.check(&vec![true, false]));
/// assert!(differ.check(&vec![false, true]));
/// assert!(!differ.check(&vec![true, true]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guard {
    clauses: Vec<Clause>,
}

impl Guard {
    /// Guard that always holds.
    pub fn always() -> Self {
        Self::default()
    }

    /// Single test `signal == value`.
    pub fn when(signal: SignalId, value: bool) -> Self {
        Self::all(vec![Test::new(signal, value)])
    }

    /// Single conjunctive clause.
    pub fn all(tests: Vec<Test>) -> Self {
        Self {
            clauses: vec![Clause::new(tests)],
        }
    }

    /// Disjunction of the given clauses.
    pub fn any(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Extend the disjunction with the clauses of `other`.
    pub fn or(mut self, other: Guard) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_always(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Every signal the guard reads, sorted and deduplicated.
    pub fn signals(&self) -> Vec<SignalId> {
        let mut signals: Vec<SignalId> = self
            .clauses
            .iter()
            .flat_map(|clause| clause.tests.iter().map(|test| test.signal))
            .collect();
        signals.sort();
        signals.dedup();
        signals
    }

    /// Evaluate the guard against current signal values.
    pub fn check<V: SignalValues + ?Sized>(&self, values: &V) -> bool {
        self.clauses.is_empty() || self.clauses.iter().any(|clause| clause.holds(values))
    }
}
