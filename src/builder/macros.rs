//! Macros for ergonomic automaton construction.

/// Build a [`WeightTable`](crate::core::WeightTable) from `command: weight`
/// pairs, in declaration order.
///
/// Commands may be written as identifiers or string literals. Weights are
/// any numeric expression and are converted to `f64`.
///
/// # Example
///
/// ```
/// use stochastic_fsm::weights;
///
/// let table = weights! {
///     c2: 1,
///     c3: 0.5,
///     "flush-cache" => 2,
/// };
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.get("flush-cache"), Some(2.0));
/// assert_eq!(table.total(), 3.5);
/// ```
///
/// Identifiers take `:` and literals take `=>`. Any other separator is
/// rejected:
///
/// ```compile_fail
/// use stochastic_fsm::weights;
///
/// let table = weights! { c2 + 1 };
/// ```
///
/// ```compile_fail
/// use stochastic_fsm::weights;
///
/// let table = weights! { c2 => 1 };
/// ```
#[macro_export]
macro_rules! weights {
    (@munch [$($out:tt)*]) => {
        $crate::core::WeightTable::new() $($out)*
    };
    (@munch [$($out:tt)*] $command:ident : $weight:expr $(, $($rest:tt)*)?) => {
        $crate::weights!(
            @munch [$($out)* .with(stringify!($command), ($weight) as f64)]
            $($($rest)*)?
        )
    };
    (@munch [$($out:tt)*] $command:literal => $weight:expr $(, $($rest:tt)*)?) => {
        $crate::weights!(
            @munch [$($out)* .with($command, ($weight) as f64)]
            $($($rest)*)?
        )
    };
    (@munch [$($out:tt)*] $($rest:tt)*) => {
        compile_error!("expected `command: weight` or `\"command\" => weight`")
    };
    ($($entries:tt)*) => {
        $crate::weights!(@munch [] $($entries)*)
    };
}
