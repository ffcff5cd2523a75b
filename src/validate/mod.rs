//! Validation of synthesized graphs.
//!
//! Uses Stillwater's `Validation` type to report ALL structural defects of a
//! program in a single pass instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use gatesynth::builder::{Circuit, SynthContext};
//! use gatesynth::circuit::FullAdder;
//! use gatesynth::validate::check_program;
//!
//! let mut ctx = SynthContext::new();
//! let a = ctx.create_signal("a").unwrap();
//! let b = ctx.create_signal("b").unwrap();
//! let c = ctx.create_signal("c").unwrap();
//! let fa = FullAdder::build(&mut ctx, a, b, c).unwrap();
//! let program = ctx.finish(fa.fragment()).unwrap();
//!
//! assert!(check_program(&program).is_success());
//! ```

pub mod rules;
pub mod violations;

pub use rules::{check_program, reachable_states, MAX_TABLE_SIGNALS};
pub use violations::Violation;
