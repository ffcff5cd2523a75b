//! Bitwise inversion and two's-complement negation.

use crate::builder::{BuildError, Circuit, Fragment, SynthContext};
use crate::circuit::{Add, Mov};
use crate::core::Register;
use crate::guard;
use tracing::debug;

/// In-place bitwise inversion, `a[i] := !a[i]`.
///
/// Actions can only drive constants or copy signals, so each bit gets a
/// small branch: a test state picks between a clear state and a set state.
#[derive(Clone, Debug)]
pub struct Flip {
    fragment: Fragment,
}

impl Flip {
    pub fn build(ctx: &mut SynthContext, a: &Register) -> Result<Self, BuildError> {
        let scope = ctx.scope("flip");
        let entry = ctx.create_state(format!("{scope}.entry"));
        let mut states = vec![entry];
        let mut branches = Vec::with_capacity(a.width());

        for (i, &bit) in a.bits().iter().enumerate() {
            let test = ctx.create_state(format!("{scope}.test{i}"));
            let clear = ctx.create_state(format!("{scope}.clear{i}"));
            let set = ctx.create_state(format!("{scope}.set{i}"));
            ctx.add_guarded_edge(test, clear, guard!([bit => true]))?;
            ctx.add_unconditional_edge(test, set)?;
            ctx.attach_drive(clear, bit, false)?;
            ctx.attach_drive(set, bit, true)?;
            states.extend([test, clear, set]);
            branches.push((test, clear, set));
        }

        let exit = ctx.create_state(format!("{scope}.exit"));
        states.push(exit);

        let mut prev = vec![entry];
        for (test, clear, set) in branches {
            for from in prev {
                ctx.add_unconditional_edge(from, test)?;
            }
            prev = vec![clear, set];
        }
        for from in prev {
            ctx.add_unconditional_edge(from, exit)?;
        }

        debug!(%scope, width = a.width(), "synthesized bitwise flip");
        Ok(Self {
            fragment: Fragment {
                entry,
                exit,
                states,
            },
        })
    }
}

impl Circuit for Flip {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

/// Two's-complement negation in place: `a := !a + 1`.
///
/// Pipeline `FLIP(a) -> ADD(a, ONE) -> MOV(sum, a)`, where ONE is the
/// context's shared constant register.
#[derive(Clone, Debug)]
pub struct Complement {
    /// The negated register, the operand itself.
    pub value: Register,
    /// Transient sum of the inner adder.
    pub sum: Register,
    fragment: Fragment,
}

impl Complement {
    pub fn build(ctx: &mut SynthContext, a: &Register) -> Result<Self, BuildError> {
        let one = ctx.one(a.width())?;
        let flip = Flip::build(ctx, a)?;
        let add = Add::build(ctx, a, &one)?;
        let mov = Mov::build(ctx, &add.sum, a)?;

        let fragment = ctx.sequence(&[flip.fragment(), add.fragment(), mov.fragment()])?;
        debug!(width = a.width(), states = fragment.states.len(), "synthesized complement");
        Ok(Self {
            value: a.clone(),
            sum: add.sum,
            fragment,
        })
    }
}

impl Circuit for Complement {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}
