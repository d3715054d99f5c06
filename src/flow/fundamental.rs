//! Transform-merge and bind-merge, the primitives behind every other combinator.
use tracing::trace;

use crate::context::{FlowContext, Ownership};
use crate::flow::{Flow, FlowState};
use crate::traits::Payload;
use crate::types::Fault;

impl<T> Flow<T> {
    /// Transform-merge.
    ///
    /// On an `Err` flow, returns it unchanged without calling anything. On a
    /// `Val` flow, calls `transform` with the payload, takes ownership of the
    /// resources the transformed value reports, and builds the next payload with
    /// `combine(payload, transformed)` on the same context.
    ///
    /// A fault from `transform` becomes an `Err` flow on the same context if a
    /// handler matches it, and is returned as `Err(fault)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::val;
    ///
    /// let flow = val(6).map_concat(|x| Ok(x * 7), |x, product| (x, product))?;
    /// assert_eq!(flow.unwrap_val(), (6, 42));
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    pub fn map_concat<U, R, F, C>(self, transform: F, combine: C) -> Result<Flow<R>, Fault>
    where
        U: Payload,
        R: Payload,
        F: FnOnce(&T) -> Result<U, Fault>,
        C: FnOnce(T, U) -> R,
    {
        let Flow { state, context } = self;
        let value = match state {
            FlowState::Val(value) => value,
            FlowState::Err(message) => return Ok(Flow::err_on(message, context)),
        };

        match transform(&value) {
            Ok(transformed) => {
                context.register_payload(&transformed);
                Ok(Flow::val_on(combine(value, transformed), context))
            }
            Err(fault) => Flow::from_fault(fault, context),
        }
    }

    /// Bind-merge.
    ///
    /// On an `Err` flow, returns it unchanged without calling anything. On a
    /// `Val` flow, calls `binder` with the payload and the context to get an
    /// inner flow. One of the two contexts survives, chosen by `ownership`; every
    /// resource of the other one moves into it and the other registry is left
    /// empty. An inner `Val` yields `combine(payload, inner)` on the surviving
    /// context, an inner `Err` yields its message on the surviving context.
    ///
    /// Faults from `binder` are matched against the handlers of this flow's
    /// context, not the inner one.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::{val, Flow, Ownership};
    ///
    /// let flow = val(2).bind_concat(
    ///     |x, ctx| Ok(Flow::val(format!("#{x}"), ctx)),
    ///     |x, label| (x, label),
    ///     Ownership::Retain,
    /// )?;
    /// assert_eq!(flow.unwrap_val(), (2, "#2".to_string()));
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    pub fn bind_concat<U, R, F, C>(
        self,
        binder: F,
        combine: C,
        ownership: Ownership,
    ) -> Result<Flow<R>, Fault>
    where
        R: Payload,
        F: FnOnce(&T, &FlowContext) -> Result<Flow<U>, Fault>,
        C: FnOnce(T, U) -> R,
    {
        let Flow { state, context } = self;
        let value = match state {
            FlowState::Val(value) => value,
            FlowState::Err(message) => return Ok(Flow::err_on(message, context)),
        };

        let inner = match binder(&value, &context) {
            Ok(inner) => inner,
            Err(fault) => return Flow::from_fault(fault, context),
        };

        let Flow { state: inner_state, context: inner_context } = inner;
        let (survivor, loser) = match ownership {
            Ownership::Retain => (context, inner_context),
            Ownership::Transfer => (inner_context, context),
        };

        let moved = survivor.absorb(&loser);
        if moved > 0 {
            trace!(moved, ?ownership, "resources moved at bind junction");
        }

        match inner_state {
            FlowState::Val(inner_value) => Ok(Flow::val_on(combine(value, inner_value), survivor)),
            FlowState::Err(message) => Ok(Flow::err_on(message, survivor)),
        }
    }
}
