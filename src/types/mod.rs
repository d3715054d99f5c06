//! Value types carried through a flow.
//!
//! - [`Fault`]: an unexpected failure raised by a pipeline closure.
//! - [`Resource`] / [`ResourceRef`]: identity-carrying handles for releasable
//!   resources.
//! - [`ValueBox`] / [`Unit`]: payload wrappers for plain values.
//!
//! # Examples
//!
//! ```
//! use flow_rail::{Fault, ValueBox};
//!
//! let fault = Fault::msg("disk full");
//! assert_eq!(fault.message(), "disk full");
//!
//! let boxed = ValueBox::new(7u8);
//! assert_eq!(*boxed.get(), 7);
//! ```
use smallvec::SmallVec;

pub mod fault;
pub mod resource;
pub mod value_box;

pub use fault::*;
pub use resource::*;
pub use value_box::*;

/// SmallVec-backed collection used for registry snapshots.
///
/// Pipelines rarely own more than a handful of resources at once, so up to 4
/// entries stay inline.
pub type ResourceVec = SmallVec<[ResourceRef; 4]>;
