//! Circuit-building blocks.
//!
//! Each component's `build` allocates its own sub-graph in the context,
//! wires the operand signals it was handed, and returns its result signals
//! together with a [`Fragment`](crate::builder::Fragment):
//!
//! - [`HalfAdder`] and [`FullAdder`]: gate-level adders
//! - [`Add`]: N-bit ripple-carry adder
//! - [`Flip`] and [`Complement`]: inversion and two's-complement negation
//! - [`Sub`], [`Inc`], [`Dec`]: arithmetic with explicit write-back
//! - [`Mov`] and [`Ld`]: data movement and constant load

mod add;
mod arith;
mod complement;
mod data;
mod full_adder;
mod half_adder;

pub use add::Add;
pub use arith::{Dec, Inc, Sub};
pub use complement::{Complement, Flip};
pub use data::{Ld, Mov};
pub use full_adder::FullAdder;
pub use half_adder::HalfAdder;
