//! Choosing the first successful flow among alternatives.
//!
//! # Examples
//!
//! ```
//! use flow_rail::{err, first_val_or, first_val_or_last_err, flow::provider, val};
//!
//! let from_cache = || err::<String>("cache miss");
//! let from_disk = || val("cfg from disk".to_string());
//!
//! let found = first_val_or_last_err([provider(from_cache), provider(from_disk)]);
//! assert_eq!(found.unwrap_val(), "cfg from disk");
//!
//! let none = first_val_or([from_cache], "no config source");
//! assert_eq!(none.unwrap_err(), "no config source");
//! ```
use crate::context::FlowContext;
use crate::flow::{Flow, FlowState};

/// Message of the `Err` flow produced when there is no provider and no fallback.
pub const NO_PROVIDERS: &str = "no flow provider was given";

/// Boxes a provider so providers of different closure types fit one collection.
///
/// Used by [`first_val!`](crate::first_val).
#[inline]
pub fn provider<'a, T, P>(provider: P) -> Box<dyn FnOnce() -> Flow<T> + 'a>
where
    P: FnOnce() -> Flow<T> + 'a,
{
    Box::new(provider)
}

/// Evaluates `providers` in order and returns the first `Val` flow.
///
/// Providers after the first `Val` are not called. The returned flow's context
/// takes over the resources of the providers that failed before it. If none
/// yields a value, the result is `Err(fallback)` on the last provider's context,
/// which has absorbed the resources of every earlier failed provider.
#[inline]
pub fn first_val_or<T, I, P>(providers: I, fallback: impl Into<String>) -> Flow<T>
where
    I: IntoIterator<Item = P>,
    P: FnOnce() -> Flow<T>,
{
    first_val(providers, Some(fallback.into()))
}

/// Evaluates `providers` in order and returns the first `Val` flow, or the last
/// provider's `Err` flow if none yields a value.
///
/// Resources owned by earlier failed providers move into that last context.
#[inline]
pub fn first_val_or_last_err<T, I, P>(providers: I) -> Flow<T>
where
    I: IntoIterator<Item = P>,
    P: FnOnce() -> Flow<T>,
{
    first_val(providers, None)
}

fn first_val<T, I, P>(providers: I, fallback: Option<String>) -> Flow<T>
where
    I: IntoIterator<Item = P>,
    P: FnOnce() -> Flow<T>,
{
    let mut last = None;
    for provider in providers {
        let flow = provider();
        if flow.is_val() {
            if let Some((_, previous)) = last {
                flow.context.absorb(&previous);
            }
            return flow;
        }
        let Flow { state, context } = flow;
        if let FlowState::Err(message) = state {
            if let Some((_, previous)) = last.take() {
                context.absorb(&previous);
            }
            last = Some((message, context));
        }
    }

    // Err lands on the last provider's context, which by now owns the resources
    // of every failed provider.
    match (last, fallback) {
        (Some((_, context)), Some(fallback)) => Flow::err_on(fallback, context),
        (Some((message, context)), None) => Flow::err_on(message, context),
        (None, fallback) => Flow::err_on(
            fallback.unwrap_or_else(|| NO_PROVIDERS.to_string()),
            FlowContext::new(),
        ),
    }
}
