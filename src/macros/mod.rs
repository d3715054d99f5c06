//! Shorthand macros for pipelines.
//!
//! - [`macro@crate::fault`] - Builds a message-only [`Fault`](crate::Fault) with
//!   `format!` syntax.
//! - [`macro@crate::first_val`] - Tries several flow-producing expressions in
//!   order and keeps the first `Val`, without boxing each provider by hand.
//!
//! # Examples
//!
//! ```
//! use flow_rail::{err, fault, first_val, val};
//!
//! let port = 8080;
//! let failure = fault!("port {port} already bound");
//! assert_eq!(failure.message(), "port 8080 already bound");
//!
//! let picked = first_val!(err::<u16>("env unset"), val(port));
//! assert_eq!(picked.unwrap_val(), 8080);
//! ```

/// Builds a message-only [`Fault`](crate::Fault) using `format!` syntax.
///
/// The fault's kind is [`FaultMessage`](crate::FaultMessage), so handlers
/// installed with `Handler::of::<FaultMessage>()` catch it.
///
/// # Examples
///
/// ```
/// use flow_rail::{fault, val, FaultMessage, Handler};
///
/// let flow = val(3)
///     .with_handler(Handler::of::<FaultMessage>())
///     .map(|n| if *n > 2 { Err(fault!("{n} exceeds the limit")) } else { Ok(*n) })?;
///
/// assert_eq!(flow.unwrap_err(), "3 exceeds the limit");
/// # Ok::<(), flow_rail::Fault>(())
/// ```
#[macro_export]
macro_rules! fault {
    ($($arg:tt)*) => {
        $crate::Fault::msg(format!($($arg)*))
    };
}

/// Evaluates flow expressions lazily and in order, returning the first `Val`.
///
/// Each expression is wrapped in a closure, so later ones are only evaluated
/// when the earlier ones produced `Err`.
///
/// # Syntax
///
/// - `first_val!(a, b, ...)` - Falls back to the last expression's `Err` flow.
/// - `first_val!(fallback = msg; a, b, ...)` - Falls back to `Err(msg)`.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use flow_rail::{err, first_val};
///
/// let probed = Cell::new(0);
/// let probe = |answer: Option<u8>| {
///     probed.set(probed.get() + 1);
///     flow_rail::val_or(answer, "no answer")
/// };
///
/// let found = first_val!(probe(None), probe(Some(7)), probe(Some(9)));
/// assert_eq!(found.unwrap_val(), 7);
/// assert_eq!(probed.get(), 2);
///
/// let missing = first_val!(fallback = "all mirrors down"; err::<u8>("a"), err::<u8>("b"));
/// assert_eq!(missing.unwrap_err(), "all mirrors down");
///
/// let last = first_val!(err::<u8>("a"), err::<u8>("b"));
/// assert_eq!(last.unwrap_err(), "b");
/// ```
#[macro_export]
macro_rules! first_val {
    (fallback = $fallback:expr; $($provider:expr),+ $(,)?) => {
        $crate::first_val_or(
            [$($crate::flow::provider(|| $provider)),+],
            $fallback,
        )
    };
    ($($provider:expr),+ $(,)?) => {
        $crate::first_val_or_last_err([$($crate::flow::provider(|| $provider)),+])
    };
}
