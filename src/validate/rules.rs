//! Validation rules for synthesized graphs, accumulated with `Validation`.

use crate::core::{SignalId, SignalValues, StateId, StateNode};
use crate::program::Program;
use crate::validate::violations::Violation;
use std::collections::VecDeque;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Guards reading more signals than this are not enumerated; exhaustiveness
/// is then assumed false and shadowing is not reported.
pub const MAX_TABLE_SIGNALS: usize = 12;

type Check = Validation<(), NonEmptyVec<Violation>>;

/// Check every state of `program`, accumulating ALL violations.
///
/// - Non-exit states must have an edge out
/// - Guards without a default must cover every input
/// - Every state must be reachable from the entry
/// - Every guarded transition must be able to fire
pub fn check_program(program: &Program) -> Check {
    let reachable = reachable_states(program);
    let mut checks: Vec<Check> = Vec::new();

    for (index, node) in program.states().iter().enumerate() {
        let id = StateId(index as u32);
        if !reachable[index] {
            checks.push(Validation::fail(Violation::Unreachable {
                state: node.label().to_string(),
            }));
        }
        if id == program.exit() {
            continue;
        }
        if node.is_dead_end() {
            checks.push(Validation::fail(Violation::DeadEnd {
                state: node.label().to_string(),
            }));
            continue;
        }
        if node.default_target().is_none() && !is_exhaustive(node) {
            checks.push(Validation::fail(Violation::NotExhaustive {
                state: node.label().to_string(),
            }));
        }
        for priority in shadowed_transitions(node) {
            checks.push(Validation::fail(Violation::Shadowed {
                state: node.label().to_string(),
                priority,
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Breadth-first walk from the entry over guarded and default edges.
pub fn reachable_states(program: &Program) -> Vec<bool> {
    let mut seen = vec![false; program.states().len()];
    let mut queue = VecDeque::from([program.entry()]);

    while let Some(id) = queue.pop_front() {
        let Some(slot) = seen.get_mut(id.index()) else {
            continue;
        };
        if *slot {
            continue;
        }
        *slot = true;
        if let Some(node) = program.state(id) {
            queue.extend(node.successors());
        }
    }
    seen
}

/// One row of a truth table over `signals`; unlisted signals read false.
struct Assignment<'a> {
    signals: &'a [SignalId],
    mask: u64,
}

impl SignalValues for Assignment<'_> {
    fn value(&self, signal: SignalId) -> bool {
        self.signals
            .binary_search(&signal)
            .map(|pos| (self.mask >> pos) & 1 == 1)
            .unwrap_or(false)
    }
}

fn rows(signals: &[SignalId]) -> impl Iterator<Item = Assignment<'_>> {
    (0..1u64 << signals.len()).map(move |mask| Assignment { signals, mask })
}

fn guard_signals(node: &StateNode, upto: usize) -> Vec<SignalId> {
    let mut signals: Vec<SignalId> = node.transitions()[..upto]
        .iter()
        .flat_map(|t| t.guard.signals())
        .collect();
    signals.sort();
    signals.dedup();
    signals
}

/// True when some guarded transition fires for every input.
fn is_exhaustive(node: &StateNode) -> bool {
    let transitions = node.transitions();
    let signals = guard_signals(node, transitions.len());
    if signals.len() > MAX_TABLE_SIGNALS {
        return false;
    }
    let exhaustive = rows(&signals).all(|row| transitions.iter().any(|t| t.guard.check(&row)));
    exhaustive
}

/// Priorities of guarded transitions that no input can select.
fn shadowed_transitions(node: &StateNode) -> Vec<usize> {
    let transitions = node.transitions();
    let mut shadowed = Vec::new();

    for (k, transition) in transitions.iter().enumerate() {
        let signals = guard_signals(node, k + 1);
        if signals.len() > MAX_TABLE_SIGNALS {
            continue;
        }
        let fires = rows(&signals).any(|row| {
            transition.guard.check(&row)
                && !transitions[..k].iter().any(|t| t.guard.check(&row))
        });
        if !fires {
            shadowed.push(transition.priority);
        }
    }
    shadowed
}
