//! Conversions from everyday std values into flows.
//!
//! # Examples
//!
//! ```
//! use flow_rail::traits::{IntoFlow, ResultFlowExt, ValueBoxExt};
//!
//! let found = Some(3u32).flow_or("no such user");
//! assert_eq!(found.unwrap_val(), 3);
//!
//! let missing = None::<u32>.flow_or("no such user");
//! assert_eq!(missing.unwrap_err(), "no such user");
//!
//! let parsed = "12".parse::<u8>().into_flow();
//! assert_eq!(parsed.unwrap_val(), 12);
//!
//! let boxed = [1, 2, 3].value_box();
//! assert_eq!(boxed.len(), 3);
//! ```
use core::fmt::Display;

use crate::flow::Flow;
use crate::traits::Payload;
use crate::types::{Unit, ValueBox};
use crate::FlowContext;

/// Values that either carry a payload or explain why they don't.
pub trait IntoFlow {
    /// Payload of the produced flow.
    type Payload;

    /// Converts into a flow on a fresh context, using `error` as the Err message
    /// when there is no payload.
    fn flow_or<S: Into<String>>(self, error: S) -> Flow<Self::Payload>;
}

impl<T: Payload> IntoFlow for Option<T> {
    type Payload = T;

    #[inline]
    fn flow_or<S: Into<String>>(self, error: S) -> Flow<T> {
        crate::flow::val_or(self, error)
    }
}

impl IntoFlow for bool {
    type Payload = Unit;

    /// `true` becomes `Val(Unit)`, `false` becomes `Err(error)`.
    #[inline]
    fn flow_or<S: Into<String>>(self, error: S) -> Flow<Unit> {
        let context = FlowContext::new();
        if self {
            Flow::val(Unit, &context)
        } else {
            Flow::err(error, &context)
        }
    }
}

/// Converts a `Result` into a flow, rendering the error with `Display`.
pub trait ResultFlowExt<T> {
    /// `Ok(v)` becomes `Val(v)`, `Err(e)` becomes `Err(e.to_string())`, both on a
    /// fresh context.
    fn into_flow(self) -> Flow<T>;

    /// Like [`into_flow`](ResultFlowExt::into_flow), but on an existing context.
    fn into_flow_in(self, context: &FlowContext) -> Flow<T>;
}

impl<T: Payload, E: Display> ResultFlowExt<T> for Result<T, E> {
    #[inline]
    fn into_flow(self) -> Flow<T> {
        self.into_flow_in(&FlowContext::new())
    }

    fn into_flow_in(self, context: &FlowContext) -> Flow<T> {
        match self {
            Ok(value) => Flow::val(value, context),
            Err(error) => Flow::err(error.to_string(), context),
        }
    }
}

/// Wraps any value in a [`ValueBox`].
pub trait ValueBoxExt: Sized {
    /// Shorthand for `ValueBox::new(self)`.
    #[inline]
    fn value_box(self) -> ValueBox<Self> {
        ValueBox::new(self)
    }
}

impl<T> ValueBoxExt for T {}
