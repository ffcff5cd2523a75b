//! Register arithmetic composed from COMPLEMENT, ADD and MOV.
//!
//! Every operation here writes its result back into the mutated operand
//! with an explicit MOV; the inner adder's sum register is transient.

use crate::builder::{BuildError, Circuit, Fragment, SynthContext};
use crate::circuit::{Add, Complement, Mov};
use crate::core::{Register, SignalId};
use tracing::debug;

/// `b := a - b (mod 2^N)`.
///
/// `COMPLEMENT(b) -> ADD(a, b) -> MOV(sum, b)`. The operands must not share
/// signals, since `b` is negated in place before `a` is read.
#[derive(Clone, Debug)]
pub struct Sub {
    /// Register holding the difference, the `b` operand.
    pub difference: Register,
    fragment: Fragment,
}

impl Sub {
    pub fn build(ctx: &mut SynthContext, a: &Register, b: &Register) -> Result<Self, BuildError> {
        if a.width() != b.width() {
            return Err(BuildError::WidthMismatch {
                op: "SUB",
                left: a.width(),
                right: b.width(),
            });
        }
        if a.overlaps(b) {
            return Err(BuildError::OperandAlias { op: "SUB" });
        }

        let negate = Complement::build(ctx, b)?;
        let add = Add::build(ctx, a, b)?;
        let write_back = Mov::build(ctx, &add.sum, b)?;

        let fragment =
            ctx.sequence(&[negate.fragment(), add.fragment(), write_back.fragment()])?;
        debug!(a = a.name(), b = b.name(), "synthesized subtraction");
        Ok(Self {
            difference: b.clone(),
            fragment,
        })
    }
}

impl Circuit for Sub {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

/// `a := a + 1 (mod 2^N)`.
#[derive(Clone, Debug)]
pub struct Inc {
    pub value: Register,
    /// Set when the increment wrapped past `2^N - 1`.
    pub overflow: SignalId,
    fragment: Fragment,
}

impl Inc {
    pub fn build(ctx: &mut SynthContext, a: &Register) -> Result<Self, BuildError> {
        let one = ctx.one(a.width())?;
        let add = Add::build(ctx, a, &one)?;
        let write_back = Mov::build(ctx, &add.sum, a)?;

        let fragment = ctx.chain(&add, &write_back)?;
        debug!(a = a.name(), "synthesized increment");
        Ok(Self {
            value: a.clone(),
            overflow: add.carry,
            fragment,
        })
    }
}

impl Circuit for Inc {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

/// `a := a - 1 (mod 2^N)`.
///
/// Adds the all-ones constant, which is the two's complement of one, so
/// no shared constant is ever negated in place.
#[derive(Clone, Debug)]
pub struct Dec {
    pub value: Register,
    /// Clear when the decrement wrapped below zero.
    pub no_borrow: SignalId,
    fragment: Fragment,
}

impl Dec {
    pub fn build(ctx: &mut SynthContext, a: &Register) -> Result<Self, BuildError> {
        let minus_one = ctx.minus_one(a.width())?;
        let add = Add::build(ctx, a, &minus_one)?;
        let write_back = Mov::build(ctx, &add.sum, a)?;

        let fragment = ctx.chain(&add, &write_back)?;
        debug!(a = a.name(), "synthesized decrement");
        Ok(Self {
            value: a.clone(),
            no_borrow: add.carry,
            fragment,
        })
    }
}

impl Circuit for Dec {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}
