//! Capabilities a flow relies on.
//!
//! - [`Release`]: a resource that must be given back exactly once.
//! - [`Payload`]: a value that may populate a flow and reports the resources it
//!   owns.
//! - [`IntoFlow`], [`ResultFlowExt`], [`ValueBoxExt`]: conversions from std
//!   values into flows and boxed payloads.
//!
//! # Examples
//!
//! ```
//! use flow_rail::traits::{IntoFlow, Payload};
//!
//! struct Reading(f64);
//! impl Payload for Reading {}
//!
//! let flow = Some(Reading(21.5)).flow_or("sensor silent");
//! assert!(flow.is_val());
//! ```

pub mod into_flow;
pub mod payload;
pub mod release;

pub use into_flow::{IntoFlow, ResultFlowExt, ValueBoxExt};
pub use payload::Payload;
pub use release::Release;
