//! Half adder: SUM = A xor B, CARRY = A and B.

use crate::builder::{BuildError, Circuit, Fragment, SynthContext};
use crate::core::SignalId;
use crate::guard;
use tracing::debug;

/// Four-state half adder `{entry, sum_calc, carry_calc, exit}`.
///
/// Entry drives both outputs false, so re-entering the circuit always starts
/// from a clean slate. Guards are tried in order; the 0+0 case falls through
/// the default edge straight to exit.
///
/// ```text
///           A & !B ──┐
///          !A &  B ──┼──> sum_calc ───┐
/// entry ──  A &  B ──────> carry_calc ┼──> exit
///           default ──────────────────┘
/// ```
///
/// When both inputs are the same signal the sum is always false, so the
/// `sum_calc` state is left out and entry only branches on `A`.
#[derive(Clone, Debug)]
pub struct HalfAdder {
    pub sum: SignalId,
    pub carry: SignalId,
    fragment: Fragment,
}

impl HalfAdder {
    pub fn build(ctx: &mut SynthContext, a: SignalId, b: SignalId) -> Result<Self, BuildError> {
        let scope = ctx.scope("ha");
        let sum = ctx.fresh_signal(&scope, "sum")?;
        let carry = ctx.fresh_signal(&scope, "carry")?;

        if a == b {
            return Self::build_doubled(ctx, scope, a, sum, carry);
        }

        let entry = ctx.create_state(format!("{scope}.entry"));
        let sum_calc = ctx.create_state(format!("{scope}.sum_calc"));
        let carry_calc = ctx.create_state(format!("{scope}.carry_calc"));
        let exit = ctx.create_state(format!("{scope}.exit"));

        ctx.attach_drive(entry, sum, false)?;
        ctx.attach_drive(entry, carry, false)?;
        ctx.add_guarded_edge(entry, sum_calc, guard!([a => true, b => false]))?;
        ctx.add_guarded_edge(entry, sum_calc, guard!([a => false, b => true]))?;
        ctx.add_guarded_edge(entry, carry_calc, guard!([a => true, b => true]))?;
        ctx.add_unconditional_edge(entry, exit)?;

        ctx.attach_drive(sum_calc, sum, true)?;
        ctx.add_unconditional_edge(sum_calc, exit)?;

        ctx.attach_drive(carry_calc, carry, true)?;
        ctx.add_unconditional_edge(carry_calc, exit)?;

        debug!(%scope, "synthesized half adder");
        Ok(Self {
            sum,
            carry,
            fragment: Fragment {
                entry,
                exit,
                states: vec![entry, sum_calc, carry_calc, exit],
            },
        })
    }

    fn build_doubled(
        ctx: &mut SynthContext,
        scope: String,
        a: SignalId,
        sum: SignalId,
        carry: SignalId,
    ) -> Result<Self, BuildError> {
        let entry = ctx.create_state(format!("{scope}.entry"));
        let carry_calc = ctx.create_state(format!("{scope}.carry_calc"));
        let exit = ctx.create_state(format!("{scope}.exit"));

        ctx.attach_drive(entry, sum, false)?;
        ctx.attach_drive(entry, carry, false)?;
        ctx.add_guarded_edge(entry, carry_calc, guard!([a => true]))?;
        ctx.add_unconditional_edge(entry, exit)?;

        ctx.attach_drive(carry_calc, carry, true)?;
        ctx.add_unconditional_edge(carry_calc, exit)?;

        debug!(%scope, "synthesized half adder over a single input");
        Ok(Self {
            sum,
            carry,
            fragment: Fragment {
                entry,
                exit,
                states: vec![entry, carry_calc, exit],
            },
        })
    }
}

impl Circuit for HalfAdder {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}
