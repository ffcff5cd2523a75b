//! Full adder: two half adders in series plus a carry-OR stage.

use crate::builder::{BuildError, Circuit, Fragment, SynthContext};
use crate::circuit::HalfAdder;
use crate::core::SignalId;
use crate::guard;
use tracing::debug;

/// `HA1(a, b) -> (s1, c1)`, then `HA2(s1, carry_in) -> (s2, c2)`.
///
/// `sum` is copied from `s2` on the full adder's exit. `carry` is a separate
/// signal, driven false on entry and true only by `carry_calc`, which is
/// reached from HA2's exit when `c1 || c2`.
#[derive(Clone, Debug)]
pub struct FullAdder {
    pub sum: SignalId,
    pub carry: SignalId,
    fragment: Fragment,
}

impl FullAdder {
    /// `carry_in` is the previous ripple stage's carry-out, or a zero
    /// constant for the least significant stage.
    pub fn build(
        ctx: &mut SynthContext,
        a: SignalId,
        b: SignalId,
        carry_in: SignalId,
    ) -> Result<Self, BuildError> {
        let scope = ctx.scope("fa");
        let sum = ctx.fresh_signal(&scope, "sum")?;
        let carry = ctx.fresh_signal(&scope, "carry")?;

        let entry = ctx.create_state(format!("{scope}.entry"));
        ctx.attach_drive(entry, carry, false)?;

        let first = HalfAdder::build(ctx, a, b)?;
        let second = HalfAdder::build(ctx, first.sum, carry_in)?;

        let carry_calc = ctx.create_state(format!("{scope}.carry_calc"));
        let exit = ctx.create_state(format!("{scope}.exit"));

        ctx.add_unconditional_edge(entry, first.entry())?;
        ctx.add_unconditional_edge(first.exit(), second.entry())?;
        ctx.add_guarded_edge(
            second.exit(),
            carry_calc,
            guard!([first.carry => true], [second.carry => true]),
        )?;
        ctx.add_unconditional_edge(second.exit(), exit)?;

        ctx.attach_drive(carry_calc, carry, true)?;
        ctx.add_unconditional_edge(carry_calc, exit)?;

        ctx.attach_copy(exit, second.sum, sum)?;

        let mut states = vec![entry];
        states.extend_from_slice(first.states());
        states.extend_from_slice(second.states());
        states.extend([carry_calc, exit]);

        debug!(%scope, states = states.len(), "synthesized full adder");
        Ok(Self {
            sum,
            carry,
            fragment: Fragment {
                entry,
                exit,
                states,
            },
        })
    }
}

impl Circuit for FullAdder {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}
