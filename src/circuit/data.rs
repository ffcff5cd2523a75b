//! Pure data movement: register move and constant load.

use crate::builder::context::{bit_of, check_literal};
use crate::builder::{BuildError, Circuit, Fragment, SynthContext};
use crate::core::{Register, SignalId};
use tracing::debug;

/// `dst := src`, one state with a copy action per bit.
///
/// All copies fire on entry to the single state, so no step ever observes a
/// partially copied register.
#[derive(Clone, Debug)]
pub struct Mov {
    fragment: Fragment,
}

impl Mov {
    pub fn build(
        ctx: &mut SynthContext,
        src: &Register,
        dst: &Register,
    ) -> Result<Self, BuildError> {
        if src.width() != dst.width() {
            return Err(BuildError::WidthMismatch {
                op: "MOV",
                left: src.width(),
                right: dst.width(),
            });
        }
        // copies fire in order, so a shifted overlap would read bits it already wrote
        if src.bits() != dst.bits() && src.overlaps(dst) {
            return Err(BuildError::OperandAlias { op: "MOV" });
        }
        let scope = ctx.scope("mov");
        let state = ctx.create_state(format!("{scope}.copy"));
        for (&from, &to) in src.bits().iter().zip(dst.bits()) {
            ctx.attach_copy(state, from, to)?;
        }

        debug!(%scope, src = src.name(), dst = dst.name(), "synthesized move");
        Ok(Self {
            fragment: Fragment::single(state),
        })
    }
}

impl Circuit for Mov {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

/// Constant load, one state of drive actions.
#[derive(Clone, Debug)]
pub struct Ld {
    fragment: Fragment,
}

impl Ld {
    /// `signal := value`.
    pub fn signal(
        ctx: &mut SynthContext,
        signal: SignalId,
        value: bool,
    ) -> Result<Self, BuildError> {
        let scope = ctx.scope("ld");
        let state = ctx.create_state(format!("{scope}.drive"));
        ctx.attach_drive(state, signal, value)?;
        Ok(Self {
            fragment: Fragment::single(state),
        })
    }

    /// `register := value`; the literal must fit in the register.
    pub fn register(
        ctx: &mut SynthContext,
        register: &Register,
        value: u64,
    ) -> Result<Self, BuildError> {
        check_literal(value, register.width())?;
        let scope = ctx.scope("ld");
        let state = ctx.create_state(format!("{scope}.drive"));
        for (i, &bit) in register.bits().iter().enumerate() {
            ctx.attach_drive(state, bit, bit_of(value, i))?;
        }

        debug!(%scope, register = register.name(), value, "synthesized load");
        Ok(Self {
            fragment: Fragment::single(state),
        })
    }
}

impl Circuit for Ld {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}
