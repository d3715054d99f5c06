//! Railway-oriented pipelines with scoped fault handling and owned resources.
//!
//! A pipeline is a chain of [`Flow`] values. Each flow is either `Val(payload)`
//! or `Err(message)` and is bound to a [`FlowContext`] that carries two pieces of
//! shared state:
//!
//! - a LIFO stack of [`Handler`]s deciding which [`Fault`]s raised by pipeline
//!   closures become `Err` flows, and with which message;
//! - a registry of [`Resource`]s the pipeline owns and must release at the end.
//!
//! Once a flow is `Err`, every later step passes it through untouched.
//!
//! # Examples
//!
//! ## A short pipeline
//!
//! ```
//! use flow_rail::{val, Handler};
//!
//! let flow = val("21".to_string())
//!     .with_handler(Handler::any_with(|f| format!("bad input: {f}")))
//!     .map(|s| Ok(s.parse::<u32>()?))?
//!     .map(|n| Ok(n * 2))?
//!     .check(|n| *n < 100, |n| format!("{n} is too large"));
//!
//! assert_eq!(flow.unwrap_val(), 42);
//! # Ok::<(), flow_rail::Fault>(())
//! ```
//!
//! ## Faults nobody handles
//!
//! ```
//! use flow_rail::{val, Fault};
//!
//! let outcome = val(0u32).map(|_| Err::<u32, _>(Fault::msg("device offline")));
//! assert_eq!(outcome.unwrap_err().message(), "device offline");
//! ```
//!
//! ## Owning resources
//!
//! ```
//! use std::cell::Cell;
//! use flow_rail::{val, Fault, Resource, traits::Release};
//!
//! struct Lease(Cell<bool>);
//!
//! impl Release for Lease {
//!     fn release(&self) -> Result<(), Fault> {
//!         self.0.set(true);
//!         Ok(())
//!     }
//! }
//!
//! let lease = Resource::new(Lease(Cell::new(false)));
//! let flow = val(lease.clone()).map(|_| Ok("leased".to_string()))?;
//!
//! assert_eq!(flow.context().resource_count(), 1);
//! flow.release();
//! assert!(lease.0.get());
//! # Ok::<(), Fault>(())
//! ```

/// Handler stacks, resource registries and the shared flow context
pub mod context;
/// The `Flow` type and its combinators
pub mod flow;
/// Running a pipeline per item of a collection
pub mod iter;
/// Shorthand macros for faults and provider chains
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Capabilities of payloads and resources, and conversions into flows
pub mod traits;
/// Faults, resource handles and payload wrappers
pub mod types;

pub use context::*;
pub use flow::*;
pub use types::*;
