//! Pipeline-scoped mutable state shared by flows.
//!
//! A [`FlowContext`] pairs a [`HandlerStack`] (which faults become `Err` flows,
//! and with which message) with a [`ResourceRegistry`] (which resources the
//! pipeline currently owns). It is a cheap handle: cloning it shares the same
//! state, which is how consecutive flows of one pipeline see each other's
//! handlers and resources.
//!
//! Contexts are neither `Send` nor `Sync`. Pipelines running on
//! different threads each build their own.
//!
//! # Examples
//!
//! ```
//! use flow_rail::{Fault, FlowContext, Handler};
//!
//! let ctx = FlowContext::new();
//! ctx.push(Handler::any_with(|f| format!("step failed: {f}")));
//!
//! let fault = Fault::msg("boom");
//! assert!(ctx.should_catch(&fault));
//! assert_eq!(ctx.to_message(&fault), "step failed: boom");
//!
//! ctx.pop();
//! assert!(!ctx.should_catch(&fault));
//! ```
use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::traits::Payload;
use crate::types::{Fault, ResourceRef, ResourceVec};

pub mod handler;
pub mod registry;

pub use handler::{Handler, HandlerStack, HandlerVec};
pub use registry::ResourceRegistry;

/// Which context survives a bind junction.
///
/// When a binder returns an inner flow, the resources of both the outer and the
/// inner context end up in exactly one of them; the other one is emptied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The outer flow's context survives and absorbs the inner one.
    #[default]
    Retain,
    /// The inner flow's context survives and absorbs the outer one.
    Transfer,
}

#[derive(Default)]
struct ContextState {
    handlers: HandlerStack,
    resources: ResourceRegistry,
}

/// Shared handle over a handler stack and a resource registry.
#[derive(Clone, Default)]
pub struct FlowContext {
    state: Rc<RefCell<ContextState>>,
}

impl FlowContext {
    /// Creates an empty context.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with `handler` already installed.
    pub fn with_handler(handler: Handler) -> Self {
        let context = Self::new();
        context.push(handler);
        context
    }

    /// Returns `true` if both handles share the same state.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Installs `handler` on top of the handler stack.
    #[inline]
    pub fn push(&self, handler: Handler) {
        self.state.borrow_mut().handlers.push(handler);
    }

    /// Removes and returns the top handler.
    ///
    /// # Panics
    ///
    /// Panics if no handler is installed.
    #[track_caller]
    pub fn pop(&self) -> Handler {
        self.state.borrow_mut().handlers.pop()
    }

    /// Removes and returns the top handler, if any.
    #[inline]
    pub fn try_pop(&self) -> Option<Handler> {
        self.state.borrow_mut().handlers.try_pop()
    }

    /// Removes every handler.
    #[inline]
    pub fn clear_handlers(&self) {
        self.state.borrow_mut().handlers.clear();
    }

    /// Number of installed handlers.
    #[inline]
    pub fn handler_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }

    /// Copy of the handler stack.
    ///
    /// Handlers are evaluated on a copy so their closures run without the
    /// context borrowed.
    #[inline]
    pub fn handlers(&self) -> HandlerStack {
        self.state.borrow().handlers.clone()
    }

    /// Returns `true` if any installed handler matches `fault`.
    #[inline]
    pub fn should_catch(&self, fault: &Fault) -> bool {
        self.handlers().should_catch(fault)
    }

    /// Message for `fault` from the nearest matching handler, or the fault's own
    /// message when nothing matches.
    #[inline]
    pub fn to_message(&self, fault: &Fault) -> String {
        self.handlers().to_message(fault)
    }

    /// Converts `fault` into an Err message, or hands it back when no handler
    /// matches.
    pub(crate) fn catch(&self, fault: Fault) -> Result<String, Fault> {
        let handlers = self.handlers();
        match handlers.find(&fault) {
            Some(handler) => {
                let message = handler.format(&fault);
                debug!(fault = %fault, message = %message, "fault converted to err");
                Ok(message)
            }
            None => {
                trace!(fault = %fault, "no handler matched fault");
                Err(fault)
            }
        }
    }

    /// Takes ownership of `resource`. Returns `true` if it was not owned yet.
    #[inline]
    pub fn register(&self, resource: ResourceRef) -> bool {
        self.state.borrow_mut().resources.register(resource)
    }

    /// Takes ownership of every resource `payload` reports.
    pub(crate) fn register_payload<T: Payload + ?Sized>(&self, payload: &T) {
        let found = payload.resources();
        if found.is_empty() {
            return;
        }
        let mut state = self.state.borrow_mut();
        for resource in found {
            state.resources.register(resource);
        }
    }

    /// Gives up ownership of `resource` without releasing it.
    #[inline]
    pub fn release_one(&self, resource: &ResourceRef) -> bool {
        self.state.borrow_mut().resources.remove(resource)
    }

    /// Copy of the currently owned resources, in registration order.
    #[inline]
    pub fn snapshot(&self) -> ResourceVec {
        self.state.borrow().resources.snapshot()
    }

    /// Returns `true` if this context owns `resource`.
    #[inline]
    pub fn owns(&self, resource: &ResourceRef) -> bool {
        self.state.borrow().resources.contains(resource)
    }

    /// Number of owned resources.
    #[inline]
    pub fn resource_count(&self) -> usize {
        self.state.borrow().resources.len()
    }

    /// Releases every resource this context owns, in registration order.
    ///
    /// Successfully released resources leave the registry, so a second call is a
    /// no-op for them. A resource whose release fails is logged and stays
    /// registered; the rest are still released. Returns the number released.
    ///
    /// Keep a clone of the context to clean up after a pipeline that a fault
    /// aborted, since the escaping [`Fault`] does not carry the flow.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use flow_rail::{Fault, Flow, FlowContext, Resource, traits::Release};
    ///
    /// struct Lock(Cell<bool>);
    ///
    /// impl Release for Lock {
    ///     fn release(&self) -> Result<(), Fault> {
    ///         self.0.set(false);
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let ctx = FlowContext::new();
    /// let lock = Resource::new(Lock(Cell::new(true)));
    /// let aborted = Flow::val(lock.clone(), &ctx).map(|_| Err::<u8, _>(Fault::msg("boom")));
    ///
    /// assert!(aborted.is_err());
    /// assert_eq!(ctx.release(), 1);
    /// assert!(!lock.0.get());
    /// ```
    pub fn release(&self) -> usize {
        let mut released = 0;
        for resource in self.snapshot() {
            match resource.release() {
                Ok(()) => {
                    self.release_one(&resource);
                    released += 1;
                }
                Err(fault) => {
                    warn!(resource = ?resource, fault = %fault, "failed to release resource");
                }
            }
        }
        released
    }

    /// Moves every resource owned by `other` into `self` and empties `other`.
    ///
    /// Returns the number of resources moved. Absorbing a context into itself
    /// moves nothing.
    pub fn absorb(&self, other: &FlowContext) -> usize {
        if self.ptr_eq(other) {
            return 0;
        }
        let moved = other.state.borrow_mut().resources.drain();
        let count = moved.len();
        let mut state = self.state.borrow_mut();
        for resource in moved {
            state.resources.register(resource);
        }
        count
    }
}

impl fmt::Debug for FlowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FlowContext")
            .field("handlers", &state.handlers.len())
            .field("resources", &state.resources)
            .finish()
    }
}
