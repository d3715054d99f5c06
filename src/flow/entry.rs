//! Pipeline entry points on a fresh context.
//!
//! # Examples
//!
//! ```
//! use flow_rail::{boxed_or, err, val, val_or};
//!
//! assert!(val("ready").is_val());
//! assert!(err::<u8>("not ready").is_err());
//! assert_eq!(val_or(None::<u8>, "missing").unwrap_err(), "missing");
//! assert_eq!(boxed_or(Some(1.5f32), "missing").unwrap_val().into_inner(), 1.5);
//! ```
use crate::context::FlowContext;
use crate::flow::Flow;
use crate::traits::Payload;
use crate::types::ValueBox;

/// Starts a `Val` flow on a fresh context.
#[inline]
pub fn val<T: Payload>(payload: T) -> Flow<T> {
    Flow::val_on(payload, FlowContext::new())
}

/// Starts an `Err` flow on a fresh context.
#[inline]
pub fn err<T>(message: impl Into<String>) -> Flow<T> {
    Flow::err_on(message.into(), FlowContext::new())
}

/// `Val` for `Some`, `Err(error)` for `None`.
#[inline]
pub fn val_or<T: Payload>(payload: Option<T>, error: impl Into<String>) -> Flow<T> {
    match payload {
        Some(payload) => val(payload),
        None => err(error),
    }
}

/// Starts a `Val` flow carrying `value` in a [`ValueBox`].
#[inline]
pub fn boxed<T>(value: T) -> Flow<ValueBox<T>> {
    val(ValueBox::new(value))
}

/// [`boxed`] for `Some`, `Err(error)` for `None`.
#[inline]
pub fn boxed_or<T>(value: Option<T>, error: impl Into<String>) -> Flow<ValueBox<T>> {
    val_or(value.map(ValueBox::new), error)
}
