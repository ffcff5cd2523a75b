//! Gatesynth: register arithmetic compiled into guarded state graphs
//!
//! Gatesynth turns operations such as ADD, SUB, INC, DEC, two's complement,
//! MOV and LD into an automaton of states and prioritised, guarded
//! transitions over named boolean signals. Each operation is a circuit
//! block that allocates its own sub-graph, wires carry and data signals
//! between nested blocks, and exposes its result signals for composition.
//!
//! # Core Concepts
//!
//! - **Signal / Register**: boolean cells and fixed-width vectors of them
//! - **State / Guard**: vertices with atomic entry actions, and OR-of-AND
//!   conditions on their outgoing edges
//! - **SynthContext**: the one owner of every signal and state
//! - **Program**: the frozen, validated graph, run by [`runtime::Machine`]
//!
//! # Example
//!
//! ```rust
//! use gatesynth::builder::{Circuit, SynthContext};
//! use gatesynth::circuit::{Ld, Sub};
//! use gatesynth::runtime::Machine;
//!
//! let mut ctx = SynthContext::new();
//! let a = ctx.create_register("A", 8).unwrap();
//! let b = ctx.create_register("B", 8).unwrap();
//!
//! let load_a = Ld::register(&mut ctx, &a, 100).unwrap();
//! let load_b = Ld::register(&mut ctx, &b, 58).unwrap();
//! let sub = Sub::build(&mut ctx, &a, &b).unwrap();
//! let top = ctx
//!     .sequence(&[load_a.fragment(), load_b.fragment(), sub.fragment()])
//!     .unwrap();
//! let program = ctx.finish(&top).unwrap();
//!
//! let mut machine = Machine::new(&program);
//! machine.run().unwrap();
//! assert_eq!(machine.read_register(&b), 42);
//! ```

pub mod builder;
pub mod circuit;
pub mod config;
pub mod core;
pub mod program;
pub mod runtime;
pub mod validate;

// Re-export commonly used types
pub use builder::{BuildError, Circuit, Fragment, SynthContext};
pub use crate::core::{Guard, Register, SignalId, StateId};
pub use program::Program;
