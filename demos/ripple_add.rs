//! Ripple-Carry Adder
//!
//! This example synthesizes an 8-bit ADD into a guarded state graph and
//! runs it on the reference interpreter.
//!
//! Key concepts:
//! - Registers as vectors of boolean signals
//! - Full adder stages chained from LSB to MSB
//! - Execution history of the visited states
//! - JSON dump of the frozen program
//!
//! Run with: cargo run --example ripple_add

use gatesynth::builder::{Circuit, SynthContext};
use gatesynth::circuit::{Add, Ld};
use gatesynth::runtime::Machine;

fn main() {
    println!("=== Ripple-Carry Adder ===\n");

    let mut ctx = SynthContext::new();
    let a = ctx.register("A").unwrap();
    let b = ctx.register("B").unwrap();

    let load_a = Ld::register(&mut ctx, &a, 200).unwrap();
    let load_b = Ld::register(&mut ctx, &b, 77).unwrap();
    let add = Add::build(&mut ctx, &a, &b).unwrap();
    let top = ctx
        .sequence(&[load_a.fragment(), load_b.fragment(), add.fragment()])
        .unwrap();

    println!("Synthesized {} full adder stages", add.stages().len());
    println!("Signals: {}", ctx.signal_count());
    println!("States:  {}\n", ctx.state_count());

    let program = ctx.finish(&top).unwrap();
    let mut machine = Machine::new(&program);
    let steps = machine.run().unwrap();

    println!("200 + 77 (mod 256)");
    println!("  sum   = {}", machine.read_register(&add.sum));
    println!("  carry = {}", machine.signal(add.carry));
    println!("  steps = {}\n", steps);

    println!("Path through the graph:");
    for state in machine.history().get_path() {
        if let Some(node) = program.state(state) {
            println!("  {state} {}", node.label());
        }
    }

    println!("\nProgram JSON is {} bytes", program.to_json().unwrap().len());
}
