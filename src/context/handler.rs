//! Fault handlers and the stack that scopes them.
//!
//! A [`Handler`] decides whether a [`Fault`] should be converted into an `Err`
//! flow and, if so, which message the flow carries. Handlers live on a
//! [`HandlerStack`]; the most recently pushed handler that matches a fault is the
//! one that formats it, which lets a pipeline segment temporarily override the
//! formatting installed by an outer segment.
//!
//! # Examples
//!
//! ```
//! use std::num::ParseIntError;
//! use flow_rail::{Fault, Handler, HandlerStack};
//!
//! let mut stack = HandlerStack::new();
//! stack.push(Handler::on(|e: &ParseIntError| format!("bad number: {e}")));
//!
//! let fault = Fault::from("x".parse::<i32>().unwrap_err());
//! assert!(stack.should_catch(&fault));
//! assert_eq!(stack.to_message(&fault), "bad number: invalid digit found in string");
//!
//! let unrelated = Fault::msg("out of paper");
//! assert!(!stack.should_catch(&unrelated));
//! ```
use core::fmt;
use std::error::Error;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::types::Fault;

type MatchFn = dyn Fn(&Fault) -> bool;
type FormatFn = dyn Fn(&Fault) -> String;

/// SmallVec-backed storage for handlers, top of the stack last.
pub type HandlerVec = SmallVec<[Handler; 2]>;

/// A (fault predicate, message formatter) pair.
///
/// Handlers are immutable and cheap to clone, so one handler can be installed on
/// many contexts.
#[derive(Clone)]
pub struct Handler {
    matches: Rc<MatchFn>,
    format: Rc<FormatFn>,
}

impl Handler {
    /// Builds a handler from an arbitrary predicate and formatter.
    ///
    /// The formatter is only called for faults the predicate accepted.
    pub fn new<P, F>(predicate: P, format: F) -> Self
    where
        P: Fn(&Fault) -> bool + 'static,
        F: Fn(&Fault) -> String + 'static,
    {
        Self { matches: Rc::new(predicate), format: Rc::new(format) }
    }

    /// Catches faults of kind `E` and formats them with `format`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::{Fault, Handler};
    ///
    /// #[derive(Debug)]
    /// struct Timeout(u64);
    ///
    /// impl std::fmt::Display for Timeout {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "timed out after {}ms", self.0)
    ///     }
    /// }
    ///
    /// impl std::error::Error for Timeout {}
    ///
    /// let handler = Handler::on(|t: &Timeout| format!("slow upstream ({}ms)", t.0));
    /// let fault = Fault::new(Timeout(250));
    /// assert!(handler.matches(&fault));
    /// assert_eq!(handler.format(&fault), "slow upstream (250ms)");
    /// ```
    pub fn on<E, F>(format: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> String + 'static,
    {
        Self::new(
            |fault| fault.is::<E>(),
            move |fault| match fault.downcast_ref::<E>() {
                Some(error) => format(error),
                None => fault.message(),
            },
        )
    }

    /// Catches faults of kind `E`, keeping their own message.
    #[inline]
    pub fn of<E>() -> Self
    where
        E: Error + 'static,
    {
        Self::new(|fault| fault.is::<E>(), Fault::message)
    }

    /// Catches every fault, keeping its own message.
    #[inline]
    pub fn any() -> Self {
        Self::new(|_| true, Fault::message)
    }

    /// Catches every fault and formats it with `format`.
    #[inline]
    pub fn any_with<F>(format: F) -> Self
    where
        F: Fn(&Fault) -> String + 'static,
    {
        Self::new(|_| true, format)
    }

    /// Catches faults accepted by `predicate`, keeping their own message.
    #[inline]
    pub fn when<P>(predicate: P) -> Self
    where
        P: Fn(&Fault) -> bool + 'static,
    {
        Self::new(predicate, Fault::message)
    }

    /// Returns `true` if this handler catches `fault`.
    #[inline]
    pub fn matches(&self, fault: &Fault) -> bool {
        (self.matches)(fault)
    }

    /// Formats a fault this handler matched.
    #[inline]
    pub fn format(&self, fault: &Fault) -> String {
        (self.format)(fault)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.matches) as *const ())
    }
}

/// LIFO stack of handlers.
///
/// Lookups scan from the most recently pushed handler down, so a newer handler
/// for a fault kind shadows an older one until it is popped.
#[derive(Clone, Debug, Default)]
pub struct HandlerStack {
    handlers: HandlerVec,
}

impl HandlerStack {
    /// Creates an empty stack.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `handler` on top of the stack.
    #[inline]
    pub fn push(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    /// Removes and returns the top handler.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty. Unbalanced pops are a programming error, not
    /// a pipeline failure.
    #[track_caller]
    pub fn pop(&mut self) -> Handler {
        match self.handlers.pop() {
            Some(handler) => handler,
            None => panic!("pop on an empty handler stack"),
        }
    }

    /// Removes and returns the top handler, if any.
    #[inline]
    pub fn try_pop(&mut self) -> Option<Handler> {
        self.handlers.pop()
    }

    /// Removes every handler.
    #[inline]
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Number of handlers on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is installed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates from the top of the stack down.
    pub fn iter(&self) -> impl Iterator<Item = &Handler> + '_ {
        self.handlers.iter().rev()
    }

    /// The nearest handler that matches `fault`.
    pub fn find(&self, fault: &Fault) -> Option<&Handler> {
        self.iter().find(|handler| handler.matches(fault))
    }

    /// Returns `true` if any handler matches `fault`.
    #[inline]
    pub fn should_catch(&self, fault: &Fault) -> bool {
        self.find(fault).is_some()
    }

    /// Message for `fault` from the nearest matching handler, or the fault's own
    /// message when nothing matches.
    pub fn to_message(&self, fault: &Fault) -> String {
        match self.find(fault) {
            Some(handler) => handler.format(fault),
            None => fault.message(),
        }
    }
}
