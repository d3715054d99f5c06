//! The tagged result threaded through a pipeline.
//!
//! A [`Flow<T>`] is either `Val(T)` or `Err(String)`, always bound to a
//! [`FlowContext`]. Combinators consume a flow and produce the next one:
//!
//! - [`fundamental`]: the two primitives every other operator is built from,
//!   transform-merge ([`Flow::map_concat`]) and bind-merge ([`Flow::bind_concat`]).
//! - [`derived`]: `map`, `map_or`, `map_dispose`, `bind`, `bind_err`, `check`,
//!   `side_effect` and their variants.
//! - [`first`]: pick the first successful flow among several providers.
//! - [`entry`]: free functions that start a pipeline on a fresh context.
//!
//! Combinators that run a fallible closure return `Result<Flow<_>, Fault>`. A
//! fault raised by the closure becomes an `Err` flow when the context's handler
//! stack matches it; otherwise it comes back as `Err(fault)` and `?` aborts the
//! pipeline at that step. The aborted flow is consumed, so resources it owned are
//! released through a [`FlowContext`] clone kept beforehand
//! ([`FlowContext::release`]).
//!
//! # Examples
//!
//! ```
//! use flow_rail::{val, Fault, Handler};
//!
//! fn parse_port(raw: &str) -> Result<String, Fault> {
//!     let flow = val(raw.to_string())
//!         .with_handler(Handler::on(|e: &std::num::ParseIntError| format!("not a port: {e}")))
//!         .map(|s| Ok(s.trim().parse::<u16>()?))?
//!         .check(|port| *port >= 1024, |port| format!("port {port} is privileged"))
//!         .map(|port| Ok(format!("0.0.0.0:{port}")))?
//!         .pop_handler();
//!
//!     flow.release();
//!     Ok(flow.into_result().unwrap_or_else(|message| message))
//! }
//!
//! assert_eq!(parse_port(" 8080 ").unwrap(), "0.0.0.0:8080");
//! assert_eq!(parse_port("80").unwrap(), "port 80 is privileged");
//! assert_eq!(parse_port("http").unwrap(), "not a port: invalid digit found in string");
//! ```
use core::fmt;
use std::error::Error;

use crate::context::{FlowContext, Handler};
use crate::traits::Payload;
use crate::types::Fault;

pub mod derived;
pub mod entry;
pub mod first;
pub mod fundamental;

pub use entry::*;
pub use first::*;

enum FlowState<T> {
    Val(T),
    Err(String),
}

/// Either a payload or an error message, bound to a [`FlowContext`].
#[must_use]
pub struct Flow<T> {
    state: FlowState<T>,
    context: FlowContext,
}

impl<T> Flow<T> {
    /// Starts a `Val` flow on `context`, taking ownership of every resource the
    /// payload reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::{Flow, FlowContext};
    ///
    /// let ctx = FlowContext::new();
    /// let flow = Flow::val(42, &ctx);
    /// assert!(flow.context().ptr_eq(&ctx));
    /// assert_eq!(flow.unwrap_val(), 42);
    /// ```
    #[inline]
    pub fn val(payload: T, context: &FlowContext) -> Self
    where
        T: Payload,
    {
        Self::val_on(payload, context.clone())
    }

    /// Starts an `Err` flow on `context`.
    #[inline]
    pub fn err(message: impl Into<String>, context: &FlowContext) -> Self {
        Self::err_on(message.into(), context.clone())
    }

    pub(crate) fn val_on(payload: T, context: FlowContext) -> Self
    where
        T: Payload,
    {
        context.register_payload(&payload);
        Self { state: FlowState::Val(payload), context }
    }

    #[inline]
    pub(crate) fn err_on(message: String, context: FlowContext) -> Self {
        Self { state: FlowState::Err(message), context }
    }

    /// Converts `fault` into an `Err` flow on `context`, or hands it back when no
    /// handler on `context` matches. In that case `context` is dropped here, and
    /// its resources stay with whichever clones of it the caller kept.
    #[inline]
    pub(crate) fn from_fault(fault: Fault, context: FlowContext) -> Result<Self, Fault> {
        let message = context.catch(fault)?;
        Ok(Self::err_on(message, context))
    }

    /// Returns `true` for a `Val` flow.
    #[inline]
    pub fn is_val(&self) -> bool {
        matches!(self.state, FlowState::Val(_))
    }

    /// Returns `true` for an `Err` flow.
    #[inline]
    pub fn is_err(&self) -> bool {
        !self.is_val()
    }

    /// The payload, if this is a `Val` flow.
    #[inline]
    pub fn as_val(&self) -> Option<&T> {
        match &self.state {
            FlowState::Val(value) => Some(value),
            FlowState::Err(_) => None,
        }
    }

    /// The error message, if this is an `Err` flow.
    #[inline]
    pub fn as_err(&self) -> Option<&str> {
        match &self.state {
            FlowState::Val(_) => None,
            FlowState::Err(message) => Some(message),
        }
    }

    /// The context this flow is bound to.
    #[inline]
    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    /// Consumes the flow into a plain `Result`.
    ///
    /// Resources stay registered on the context; call [`release`](Flow::release)
    /// first if the pipeline is done with them.
    #[inline]
    pub fn into_result(self) -> Result<T, String> {
        match self.state {
            FlowState::Val(value) => Ok(value),
            FlowState::Err(message) => Err(message),
        }
    }

    /// Returns the payload.
    ///
    /// # Panics
    ///
    /// Panics if this is an `Err` flow: the value is absent.
    #[track_caller]
    pub fn unwrap_val(self) -> T {
        match self.state {
            FlowState::Val(value) => value,
            FlowState::Err(message) => {
                panic!("absent value: called `Flow::unwrap_val()` on an `Err` flow: {message}")
            }
        }
    }

    /// Returns the error message.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Val` flow: the message is absent.
    #[track_caller]
    pub fn unwrap_err(self) -> String {
        match self.state {
            FlowState::Val(_) => panic!("absent value: called `Flow::unwrap_err()` on a `Val` flow"),
            FlowState::Err(message) => message,
        }
    }

    /// Releases every resource the context owns; see [`FlowContext::release`].
    ///
    /// Each resource is released at most once, so calling `release` again is a
    /// no-op. Returns the number of resources released.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use flow_rail::{val, Fault, Resource, traits::Release};
    ///
    /// struct Handle(Cell<u32>);
    ///
    /// impl Release for Handle {
    ///     fn release(&self) -> Result<(), Fault> {
    ///         self.0.set(self.0.get() + 1);
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let handle = Resource::new(Handle(Cell::new(0)));
    /// let flow = val(handle.clone()).map(|h| Ok(h.0.get()))?;
    ///
    /// assert_eq!(flow.release(), 1);
    /// assert_eq!(flow.release(), 0);
    /// assert_eq!(handle.0.get(), 1);
    /// # Ok::<(), Fault>(())
    /// ```
    #[inline]
    pub fn release(&self) -> usize {
        self.context.release()
    }

    /// Installs `handler` on the context and returns the flow unchanged.
    #[inline]
    pub fn with_handler(self, handler: Handler) -> Self {
        self.context.push(handler);
        self
    }

    /// Installs a handler for faults of kind `E`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::ParseIntError;
    /// use flow_rail::{val, Fault};
    ///
    /// let flow = val("x1")
    ///     .handle(|e: &ParseIntError| format!("parse: {e}"))
    ///     .map(|s| Ok(s.parse::<i64>()?))?;
    ///
    /// assert_eq!(flow.unwrap_err(), "parse: invalid digit found in string");
    /// # Ok::<(), Fault>(())
    /// ```
    #[inline]
    pub fn handle<E, F>(self, format: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> String + 'static,
    {
        self.with_handler(Handler::on(format))
    }

    /// Installs a wildcard handler that converts every fault.
    #[inline]
    pub fn handle_all(self) -> Self {
        self.with_handler(Handler::any())
    }

    /// Removes the most recently installed handler.
    ///
    /// # Panics
    ///
    /// Panics if the context has no handler.
    #[track_caller]
    pub fn pop_handler(self) -> Self {
        self.context.pop();
        self
    }

    /// Replaces this flow by an `Err` flow on the same context.
    #[inline]
    pub fn fail(self, message: impl Into<String>) -> Self {
        Self::err_on(message.into(), self.context)
    }

    /// Calls `logger` with the message of an `Err` flow. Returns whether it did.
    pub fn log_err_if_any<L>(&self, logger: L) -> bool
    where
        L: FnOnce(&str),
    {
        match &self.state {
            FlowState::Err(message) => {
                logger(message);
                true
            }
            FlowState::Val(_) => false,
        }
    }

    /// Runs `inspect` against the context and returns the flow unchanged.
    #[inline]
    pub fn inspect_context<F>(self, inspect: F) -> Self
    where
        F: FnOnce(&FlowContext),
    {
        inspect(&self.context);
        self
    }
}

impl<T: Clone> Clone for Flow<T> {
    /// Clones the payload; the clone shares the same context.
    fn clone(&self) -> Self {
        let state = match &self.state {
            FlowState::Val(value) => FlowState::Val(value.clone()),
            FlowState::Err(message) => FlowState::Err(message.clone()),
        };
        Self { state, context: self.context.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for Flow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            FlowState::Val(value) => f.debug_tuple("Val").field(value).finish(),
            FlowState::Err(message) => f.debug_tuple("Err").field(message).finish(),
        }
    }
}
