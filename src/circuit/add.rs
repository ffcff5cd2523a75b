//! N-bit ripple-carry adder.

use crate::builder::{BuildError, Circuit, Fragment, SynthContext};
use crate::circuit::FullAdder;
use crate::core::{Register, SignalId};
use crate::guard;
use tracing::debug;

/// Ripple-carry chain of full adders, `sum = (a + b + carry_in) mod 2^N`.
///
/// Stages are linked exit to entry strictly LSB to MSB, so stage `j + 1`
/// only starts once stage `j` has driven its carry. Each stage's sum is
/// copied into `sum[j]` on that stage's exit. `carry` is driven false on
/// entry and true only when the most significant stage carries.
///
/// # Example
///
/// ```rust
/// use gatesynth::builder::{Circuit, SynthContext};
/// use gatesynth::circuit::Add;
/// use gatesynth::runtime::Machine;
///
/// let mut ctx = SynthContext::new();
/// let a = ctx.create_register("A", 4).unwrap();
/// let b = ctx.create_register("B", 4).unwrap();
/// let add = Add::build(&mut ctx, &a, &b).unwrap();
/// let program = ctx.finish(add.fragment()).unwrap();
///
/// let mut machine = Machine::new(&program);
/// machine.set_register(&a, 0b0110).unwrap();
/// machine.set_register(&b, 0b0101).unwrap();
/// machine.run().unwrap();
///
/// assert_eq!(machine.read_register(&add.sum), 0b1011);
/// assert!(!machine.signal(add.carry));
/// ```
#[derive(Clone, Debug)]
pub struct Add {
    pub sum: Register,
    pub carry: SignalId,
    stages: Vec<FullAdder>,
    fragment: Fragment,
}

impl Add {
    /// Add with the context's zero constant as carry-in.
    pub fn build(ctx: &mut SynthContext, a: &Register, b: &Register) -> Result<Self, BuildError> {
        Self::build_with_carry(ctx, a, b, None)
    }

    /// Add with an explicit carry-in signal; `None` uses the zero constant.
    pub fn build_with_carry(
        ctx: &mut SynthContext,
        a: &Register,
        b: &Register,
        carry_in: Option<SignalId>,
    ) -> Result<Self, BuildError> {
        if a.width() != b.width() {
            return Err(BuildError::WidthMismatch {
                op: "ADD",
                left: a.width(),
                right: b.width(),
            });
        }
        let width = a.width();
        let carry_in = match carry_in {
            Some(signal) => signal,
            None => ctx.zero()?,
        };

        let scope = ctx.scope("add");
        let sum = ctx.fresh_register(&scope, "sum", width)?;
        let carry = ctx.fresh_signal(&scope, "carry")?;

        let entry = ctx.create_state(format!("{scope}.entry"));
        ctx.attach_drive(entry, carry, false)?;

        let mut states = vec![entry];
        let mut stages: Vec<FullAdder> = Vec::with_capacity(width);
        let mut prev_exit = entry;
        let mut ripple = carry_in;
        for j in 0..width {
            let stage = FullAdder::build(ctx, a[j], b[j], ripple)?;
            ctx.attach_copy(stage.exit(), stage.sum, sum[j])?;
            ctx.add_unconditional_edge(prev_exit, stage.entry())?;
            states.extend_from_slice(stage.states());
            prev_exit = stage.exit();
            ripple = stage.carry;
            stages.push(stage);
        }

        let carry_set = ctx.create_state(format!("{scope}.carry_set"));
        let exit = ctx.create_state(format!("{scope}.exit"));
        ctx.add_guarded_edge(prev_exit, carry_set, guard!([ripple => true]))?;
        ctx.add_unconditional_edge(prev_exit, exit)?;
        ctx.attach_drive(carry_set, carry, true)?;
        ctx.add_unconditional_edge(carry_set, exit)?;
        states.extend([carry_set, exit]);

        debug!(%scope, width, states = states.len(), "synthesized ripple-carry adder");
        Ok(Self {
            sum,
            carry,
            stages,
            fragment: Fragment {
                entry,
                exit,
                states,
            },
        })
    }

    /// Full adder stages, LSB first.
    pub fn stages(&self) -> &[FullAdder] {
        &self.stages
    }

    pub fn width(&self) -> usize {
        self.sum.width()
    }
}

impl Circuit for Add {
    fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Machine;

    fn run_add(width: usize, x: u64, y: u64) -> (u64, bool) {
        let mut ctx = SynthContext::new();
        let a = ctx.create_register("A", width).unwrap();
        let b = ctx.create_register("B", width).unwrap();
        let add = Add::build(&mut ctx, &a, &b).unwrap();
        let program = ctx.finish(add.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, x).unwrap();
        machine.set_register(&b, y).unwrap();
        machine.run().unwrap();
        (machine.read_register(&add.sum), machine.signal(add.carry))
    }

    #[test]
    fn six_plus_five_has_no_carry() {
        assert_eq!(run_add(4, 0b0110, 0b0101), (0b1011, false));
    }

    #[test]
    fn twelve_plus_five_wraps_with_carry() {
        assert_eq!(run_add(4, 0b1100, 0b0101), (0b0001, true));
    }

    #[test]
    fn exhaustive_four_bit() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_register("A", 4).unwrap();
        let b = ctx.create_register("B", 4).unwrap();
        let add = Add::build(&mut ctx, &a, &b).unwrap();
        let program = ctx.finish(add.fragment()).unwrap();

        for x in 0..16u64 {
            for y in 0..16u64 {
                let mut machine = Machine::new(&program);
                machine.set_register(&a, x).unwrap();
                machine.set_register(&b, y).unwrap();
                machine.run().unwrap();

                assert_eq!(machine.read_register(&add.sum), (x + y) % 16, "{x} + {y}");
                assert_eq!(machine.signal(add.carry), x + y >= 16, "carry of {x} + {y}");
            }
        }
    }

    #[test]
    fn explicit_carry_in_is_added() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_register("A", 4).unwrap();
        let b = ctx.create_register("B", 4).unwrap();
        let cin = ctx.create_signal("cin").unwrap();
        let add = Add::build_with_carry(&mut ctx, &a, &b, Some(cin)).unwrap();
        let program = ctx.finish(add.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, 7).unwrap();
        machine.set_register(&b, 8).unwrap();
        machine.set_signal(cin, true).unwrap();
        machine.run().unwrap();

        assert_eq!(machine.read_register(&add.sum), 0);
        assert!(machine.signal(add.carry));
    }

    #[test]
    fn carry_stages_chain_lsb_to_msb() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_register("A", 3).unwrap();
        let b = ctx.create_register("B", 3).unwrap();
        let add = Add::build(&mut ctx, &a, &b).unwrap();

        for pair in add.stages().windows(2) {
            let next_entry = pair[1].entry();
            assert_eq!(
                ctx.state(pair[0].exit()).unwrap().default_target(),
                Some(next_entry)
            );
        }
        assert_eq!(add.width(), 3);
    }

    #[test]
    fn top_carry_resets_between_runs() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_register("A", 4).unwrap();
        let b = ctx.create_register("B", 4).unwrap();
        let add = Add::build(&mut ctx, &a, &b).unwrap();
        let program = ctx.finish(add.fragment()).unwrap();
        let mut machine = Machine::new(&program);

        machine.set_register(&a, 15).unwrap();
        machine.set_register(&b, 1).unwrap();
        machine.run().unwrap();
        assert!(machine.signal(add.carry));

        machine.set_register(&a, 1).unwrap();
        machine.restart();
        machine.run().unwrap();

        assert_eq!(machine.read_register(&add.sum), 2);
        assert!(!machine.signal(add.carry));
    }

    #[test]
    fn adding_a_register_to_itself_doubles_it() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_register("A", 4).unwrap();
        let add = Add::build(&mut ctx, &a, &a).unwrap();
        let program = ctx.finish(add.fragment()).unwrap();

        for x in 0..16u64 {
            let mut machine = Machine::new(&program);
            machine.set_register(&a, x).unwrap();
            machine.run().unwrap();

            assert_eq!(machine.read_register(&add.sum), (2 * x) % 16, "{x} + {x}");
            assert_eq!(machine.signal(add.carry), x >= 8, "carry of {x} + {x}");
        }
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let mut ctx = SynthContext::new();
        let a = ctx.create_register("A", 4).unwrap();
        let b = ctx.create_register("B", 8).unwrap();

        assert!(matches!(
            Add::build(&mut ctx, &a, &b),
            Err(BuildError::WidthMismatch {
                op: "ADD",
                left: 4,
                right: 8
            })
        ));
    }
}
