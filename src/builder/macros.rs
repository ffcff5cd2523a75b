//! Macros for ergonomic guard construction.

/// Build a [`Guard`](crate::core::Guard) from bracketed clauses.
///
/// Each bracket is a conjunction of `signal => value` tests; brackets are
/// joined by OR. `guard!()` is the always-true guard.
///
/// # Example
///
/// ```
/// use gatesynth::builder::SynthContext;
/// use gatesynth::guard;
///
/// let mut ctx = SynthContext::new();
/// let a = ctx.create_signal("a").unwrap();
/// let b = ctx.create_signal("b").unwrap();
///
/// let both = guard!([a => true, b => true]);
/// let either = guard!([a => true], [b => true]);
///
/// assert_eq!(both.clauses().len(), 1);
/// assert_eq!(either.clauses().len(), 2);
/// assert!(guard!().is_always());
/// ```
#[macro_export]
macro_rules! guard {
    () => {
        $crate::core::Guard::always()
    };
    ($([$($signal:expr => $value:expr),* $(,)?]),+ $(,)?) => {
        $crate::core::Guard::any(vec![
            $($crate::core::Clause::new(vec![
                $($crate::core::Test::new($signal, $value)),*
            ])),+
        ])
    };
}
