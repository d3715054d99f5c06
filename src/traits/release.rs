//! The releasable-resource capability.
//!
//! Types that hold something which must be given back exactly once (a
//! connection, a lock, a temporary allocation in some external system) implement
//! [`Release`] and travel through flows wrapped in a
//! [`Resource`](crate::Resource). The owning
//! [`FlowContext`](crate::FlowContext) calls `release` at the end of the
//! pipeline, or earlier through [`Flow::map_dispose`](crate::Flow::map_dispose).
//!
//! # Examples
//!
//! ```
//! use std::cell::Cell;
//! use flow_rail::{val, Fault, Resource, traits::Release};
//!
//! struct Lease {
//!     returned: Cell<bool>,
//! }
//!
//! impl Release for Lease {
//!     fn release(&self) -> Result<(), Fault> {
//!         self.returned.set(true);
//!         Ok(())
//!     }
//! }
//!
//! let lease = Resource::new(Lease { returned: Cell::new(false) });
//! let flow = val(lease.clone());
//! assert_eq!(flow.release(), 1);
//! assert!(lease.returned.get());
//! ```

use crate::types::Fault;

/// A resource that must be released exactly once.
///
/// `release` takes `&self` because resources are shared between the payload and
/// the context registry; implementors track their own state with interior
/// mutability.
///
/// A failing `release` is reported through the returned [`Fault`]. During the
/// final [`Flow::release`](crate::Flow::release) such faults are logged and
/// swallowed; during `map_dispose` they are subject to the handler stack like any
/// other fault.
pub trait Release {
    /// Gives the resource back.
    fn release(&self) -> Result<(), Fault>;
}

impl<R: Release + ?Sized> Release for Box<R> {
    #[inline]
    fn release(&self) -> Result<(), Fault> {
        (**self).release()
    }
}
