//! Synthesis API: the context that allocates signals and states, the
//! fragments circuits return, and the guard macro.
//!
//! Every circuit constructor takes `&mut SynthContext` explicitly; there is
//! no global signal namespace.

pub mod context;
pub mod error;
pub mod fragment;
pub mod macros;

pub use context::SynthContext;
pub use error::BuildError;
pub use fragment::{Circuit, Fragment};
