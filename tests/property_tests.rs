//! Property-based tests for the synthesized arithmetic circuits.
//!
//! These tests use proptest to verify that the generated state graphs
//! compute the same results as native integer arithmetic.

use gatesynth::builder::{Circuit, SynthContext};
use gatesynth::circuit::{Add, Complement, Dec, FullAdder, Inc, Mov, Sub};
use gatesynth::core::Guard;
use gatesynth::runtime::Machine;
use gatesynth::validate::check_program;
use proptest::prelude::*;

const WIDTH: usize = 8;
const MODULUS: u64 = 1 << WIDTH;

prop_compose! {
    fn arbitrary_byte()(value in 0..MODULUS) -> u64 {
        value
    }
}

proptest! {
    #[test]
    fn add_matches_wrapping_sum(x in arbitrary_byte(), y in arbitrary_byte()) {
        let mut ctx = SynthContext::new();
        let a = ctx.register("A").unwrap();
        let b = ctx.register("B").unwrap();
        let add = Add::build(&mut ctx, &a, &b).unwrap();
        let program = ctx.finish(add.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, x).unwrap();
        machine.set_register(&b, y).unwrap();
        machine.run().unwrap();

        prop_assert_eq!(machine.read_register(&add.sum), (x + y) % MODULUS);
        prop_assert_eq!(machine.signal(add.carry), x + y >= MODULUS);
        prop_assert_eq!(machine.read_register(&a), x);
        prop_assert_eq!(machine.read_register(&b), y);
    }

    #[test]
    fn complement_negates(x in arbitrary_byte()) {
        let mut ctx = SynthContext::new();
        let a = ctx.register("A").unwrap();
        let comp = Complement::build(&mut ctx, &a).unwrap();
        let program = ctx.finish(comp.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, x).unwrap();
        machine.run().unwrap();

        prop_assert_eq!(machine.read_register(&a), (MODULUS - x) % MODULUS);
    }

    #[test]
    fn sub_writes_back_difference(x in arbitrary_byte(), y in arbitrary_byte()) {
        let mut ctx = SynthContext::new();
        let a = ctx.register("A").unwrap();
        let b = ctx.register("B").unwrap();
        let sub = Sub::build(&mut ctx, &a, &b).unwrap();
        let program = ctx.finish(sub.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, x).unwrap();
        machine.set_register(&b, y).unwrap();
        machine.run().unwrap();

        prop_assert_eq!(machine.read_register(&b), (x + MODULUS - y) % MODULUS);
        prop_assert_eq!(machine.read_register(&a), x);
    }

    #[test]
    fn inc_then_dec_restores_value(x in arbitrary_byte()) {
        let mut ctx = SynthContext::new();
        let a = ctx.register("A").unwrap();
        let inc = Inc::build(&mut ctx, &a).unwrap();
        let dec = Dec::build(&mut ctx, &a).unwrap();
        let top = ctx.chain(&inc, &dec).unwrap();
        let program = ctx.finish(&top).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, x).unwrap();
        machine.run().unwrap();

        prop_assert_eq!(machine.read_register(&a), x);
    }

    #[test]
    fn mov_copies_without_touching_source(x in arbitrary_byte(), y in arbitrary_byte()) {
        let mut ctx = SynthContext::new();
        let a = ctx.register("A").unwrap();
        let b = ctx.register("B").unwrap();
        let mov = Mov::build(&mut ctx, &a, &b).unwrap();
        let program = ctx.finish(mov.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, x).unwrap();
        machine.set_register(&b, y).unwrap();
        let steps = machine.run().unwrap();

        prop_assert_eq!(steps, 0);
        prop_assert_eq!(machine.read_register(&a), x);
        prop_assert_eq!(machine.read_register(&b), x);
    }

    #[test]
    fn full_adder_matches_majority(x in any::<bool>(), y in any::<bool>(), z in any::<bool>()) {
        let mut ctx = SynthContext::new();
        let a = ctx.create_signal("a").unwrap();
        let b = ctx.create_signal("b").unwrap();
        let c = ctx.create_signal("c").unwrap();
        let fa = FullAdder::build(&mut ctx, a, b, c).unwrap();
        let program = ctx.finish(fa.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_signal(a, x).unwrap();
        machine.set_signal(b, y).unwrap();
        machine.set_signal(c, z).unwrap();
        machine.run().unwrap();

        prop_assert_eq!(machine.signal(fa.sum), x ^ y ^ z);
        prop_assert_eq!(machine.signal(fa.carry), (x as u8 + y as u8 + z as u8) >= 2);
    }

    #[test]
    fn history_path_starts_at_entry_and_ends_at_exit(x in arbitrary_byte(), y in arbitrary_byte()) {
        let mut ctx = SynthContext::new();
        let a = ctx.register("A").unwrap();
        let b = ctx.register("B").unwrap();
        let add = Add::build(&mut ctx, &a, &b).unwrap();
        let program = ctx.finish(add.fragment()).unwrap();

        let mut machine = Machine::new(&program);
        machine.set_register(&a, x).unwrap();
        machine.set_register(&b, y).unwrap();
        let steps = machine.run().unwrap();

        let path = machine.history().get_path();
        prop_assert_eq!(path.len(), steps + 1);
        prop_assert_eq!(path[0], add.entry());
        prop_assert_eq!(*path.last().unwrap(), add.exit());
        for stage in add.stages() {
            prop_assert_eq!(machine.history().visits(stage.entry()), 1);
        }
    }

    #[test]
    fn guard_is_deterministic(bits in prop::collection::vec(any::<bool>(), 3)) {
        let mut ctx = SynthContext::new();
        let a = ctx.create_signal("a").unwrap();
        let c = ctx.create_signal("b").unwrap();
        let guard = Guard::when(a, true).or(Guard::when(c, false));

        prop_assert_eq!(guard.check(&bits), guard.check(&bits));
        prop_assert_eq!(guard.check(&bits), bits[0] || !bits[1]);
    }
}

#[test]
fn every_operation_synthesizes_a_valid_graph() {
    let mut ctx = SynthContext::new();
    let a = ctx.register("A").unwrap();
    let b = ctx.register("B").unwrap();

    let add = Add::build(&mut ctx, &a, &b).unwrap();
    let sub = Sub::build(&mut ctx, &a, &b).unwrap();
    let inc = Inc::build(&mut ctx, &a).unwrap();
    let dec = Dec::build(&mut ctx, &b).unwrap();
    let comp = Complement::build(&mut ctx, &a).unwrap();
    let mov = Mov::build(&mut ctx, &a, &b).unwrap();
    let top = ctx
        .sequence(&[
            add.fragment(),
            sub.fragment(),
            inc.fragment(),
            dec.fragment(),
            comp.fragment(),
            mov.fragment(),
        ])
        .unwrap();
    let program = ctx.finish(&top).unwrap();

    assert!(check_program(&program).is_success());
    assert_eq!(program.states().len(), top.states.len());
}

#[test]
fn composed_program_matches_native_arithmetic() {
    // b := a - b; a := a + 1; b := b - 1; a := -a
    let mut ctx = SynthContext::new();
    let a = ctx.register("A").unwrap();
    let b = ctx.register("B").unwrap();
    let sub = Sub::build(&mut ctx, &a, &b).unwrap();
    let inc = Inc::build(&mut ctx, &a).unwrap();
    let dec = Dec::build(&mut ctx, &b).unwrap();
    let neg = Complement::build(&mut ctx, &a).unwrap();
    let top = ctx
        .sequence(&[sub.fragment(), inc.fragment(), dec.fragment(), neg.fragment()])
        .unwrap();
    let program = ctx.finish(&top).unwrap();

    let mut machine = Machine::new(&program);
    machine.set_register(&a, 200).unwrap();
    machine.set_register(&b, 58).unwrap();
    machine.run().unwrap();

    assert_eq!(machine.read_register(&b), 141);
    assert_eq!(machine.read_register(&a), 55);
}
