//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use flow_rail::prelude::*;
//!
//! let flow = Some(3u8).flow_or("empty").map(|n| Ok(n + 1))?;
//! assert_eq!(flow.unwrap_val(), 4);
//! # Ok::<(), Fault>(())
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`fault!`], [`first_val!`]
//! - **Entry points**: [`val`], [`err`], [`val_or`], [`boxed`], [`boxed_or`]
//! - **Types**: [`Flow`], [`FlowContext`], [`Handler`], [`Ownership`], [`Fault`],
//!   [`Resource`], [`ValueBox`], [`Unit`]
//! - **Traits**: [`Payload`], [`Release`], [`IntoFlow`], [`ResultFlowExt`], [`ValueBoxExt`]

// Macros
pub use crate::{fault, first_val};

// Entry points
pub use crate::flow::{boxed, boxed_or, err, first_val_or, first_val_or_last_err, val, val_or};

// Core types
pub use crate::context::{FlowContext, Handler, Ownership};
pub use crate::flow::Flow;
pub use crate::types::{Fault, Resource, ResourceRef, Unit, ValueBox};

// Traits
pub use crate::traits::{IntoFlow, Payload, Release, ResultFlowExt, ValueBoxExt};
