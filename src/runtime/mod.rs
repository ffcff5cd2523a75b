//! Reference interpreter for synthesized programs.
//!
//! Production execution belongs to an external substrate; this module
//! implements the same semantics so graphs can be exercised and tested:
//!
//! - A state's actions fire once, in order, on entry
//! - Guarded transitions are tried in declaration order, first match wins
//! - Otherwise the default transition fires; with neither, the state is a
//!   dead end

mod error;
mod machine;

pub use error::RuntimeError;
pub use machine::{Machine, StepResult};
