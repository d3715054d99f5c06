//! Operators derived from transform-merge and bind-merge.
//!
//! Every operator here leaves an `Err` flow untouched and never calls its
//! closures on it.
use tracing::trace;

use crate::context::{FlowContext, Ownership};
use crate::flow::{Flow, FlowState};
use crate::traits::Payload;
use crate::types::{Fault, ResourceRef, ResourceVec};

impl<T> Flow<T> {
    /// Replaces the payload with `f(&payload)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::val;
    ///
    /// let doubled = val(42).map(|x| Ok(x * 2))?;
    /// assert_eq!(doubled.unwrap_val(), 84);
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Result<Flow<U>, Fault>
    where
        U: Payload,
        F: FnOnce(&T) -> Result<U, Fault>,
    {
        self.map_concat(f, |_, mapped| mapped)
    }

    /// Like [`map`](Flow::map), but `f` may decline with `None`, which turns the
    /// flow into `Err(fallback)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::val;
    ///
    /// let half = |x: &u32| Ok((x % 2 == 0).then(|| x / 2));
    ///
    /// assert_eq!(val(8u32).map_or(half, "odd")?.unwrap_val(), 4);
    /// assert_eq!(val(3u32).map_or(half, "odd")?.unwrap_err(), "odd");
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    pub fn map_or<U, F>(self, f: F, fallback: impl Into<String>) -> Result<Flow<U>, Fault>
    where
        U: Payload,
        F: FnOnce(&T) -> Result<Option<U>, Fault>,
    {
        let Flow { state, context } = self;
        let value = match state {
            FlowState::Val(value) => value,
            FlowState::Err(message) => return Ok(Flow::err_on(message, context)),
        };

        match f(&value) {
            Ok(Some(mapped)) => Ok(Flow::val_on(mapped, context)),
            Ok(None) => Ok(Flow::err_on(fallback.into(), context)),
            Err(fault) => Flow::from_fault(fault, context),
        }
    }

    /// Maps the payload, then releases every resource the payload itself
    /// reports and drops them from the registry.
    ///
    /// Use this to retire a resource as soon as the pipeline is done with it; the
    /// final [`release`](Flow::release) will not touch it again.
    pub fn map_dispose<U, F>(self, f: F) -> Result<Flow<U>, Fault>
    where
        T: Payload,
        U: Payload,
        F: FnOnce(&T) -> Result<U, Fault>,
    {
        self.map_releasing(f, |value: &T| value.resources())
    }

    /// Maps the payload, then releases the resource chosen by `selector` and drops
    /// it from the registry.
    ///
    /// A failing release is a fault like any other: it becomes an `Err` flow if a
    /// handler matches and is returned otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use flow_rail::{val, Fault, Resource, traits::Release};
    ///
    /// struct Cursor(Cell<bool>);
    ///
    /// impl Release for Cursor {
    ///     fn release(&self) -> Result<(), Fault> {
    ///         self.0.set(true);
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let cursor = Resource::new(Cursor(Cell::new(false)));
    /// let flow = val((cursor.clone(), 10))
    ///     .map_dispose_by(|(_, rows)| Ok(*rows), |(c, _)| c.handle())?;
    ///
    /// assert!(cursor.0.get());
    /// assert_eq!(flow.release(), 0);
    /// assert_eq!(flow.unwrap_val(), 10);
    /// # Ok::<(), Fault>(())
    /// ```
    pub fn map_dispose_by<U, F, S>(self, f: F, selector: S) -> Result<Flow<U>, Fault>
    where
        U: Payload,
        F: FnOnce(&T) -> Result<U, Fault>,
        S: FnOnce(&T) -> ResourceRef,
    {
        self.map_releasing(f, |value| {
            let mut selected = ResourceVec::new();
            selected.push(selector(value));
            selected
        })
    }

    fn map_releasing<U, F, S>(self, f: F, select: S) -> Result<Flow<U>, Fault>
    where
        U: Payload,
        F: FnOnce(&T) -> Result<U, Fault>,
        S: FnOnce(&T) -> ResourceVec,
    {
        let Flow { state, context } = self;
        let value = match state {
            FlowState::Val(value) => value,
            FlowState::Err(message) => return Ok(Flow::err_on(message, context)),
        };

        let mapped = match f(&value) {
            Ok(mapped) => mapped,
            Err(fault) => return Flow::from_fault(fault, context),
        };
        context.register_payload(&mapped);

        for resource in select(&value) {
            if let Err(fault) = resource.release() {
                return Flow::from_fault(fault, context);
            }
            context.release_one(&resource);
            trace!(resource = ?resource, "resource released before end of pipeline");
        }

        Ok(Flow { state: FlowState::Val(mapped), context })
    }

    /// Replaces the payload with the payload of the flow `binder` returns.
    ///
    /// The inner flow's resources move into this flow's context.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::{err, val};
    ///
    /// let ok = val(42).bind(|x| Ok(val(x.to_string())))?;
    /// assert_eq!(ok.unwrap_val(), "42");
    ///
    /// let failed = val(42).bind(|_| Ok(err::<String>("divide by zero")))?;
    /// assert_eq!(failed.unwrap_err(), "divide by zero");
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    #[inline]
    pub fn bind<U, F>(self, binder: F) -> Result<Flow<U>, Fault>
    where
        U: Payload,
        F: FnOnce(&T) -> Result<Flow<U>, Fault>,
    {
        self.bind_concat(|value, _| binder(value), |_, inner| inner, Ownership::Retain)
    }

    /// Like [`bind`](Flow::bind), with the binder receiving the context and the
    /// surviving context chosen by `ownership`.
    #[inline]
    pub fn bind_with<U, F>(self, ownership: Ownership, binder: F) -> Result<Flow<U>, Fault>
    where
        U: Payload,
        F: FnOnce(&T, &FlowContext) -> Result<Flow<U>, Fault>,
    {
        self.bind_concat(binder, |_, inner| inner, ownership)
    }

    /// Runs a binder for its outcome only: an inner `Err` fails this flow, an
    /// inner `Val` keeps this flow's payload.
    #[inline]
    pub fn bind_err<U, F>(self, binder: F) -> Result<Flow<T>, Fault>
    where
        T: Payload,
        F: FnOnce(&T) -> Result<Flow<U>, Fault>,
    {
        self.bind_concat(|value, _| binder(value), |value, _| value, Ownership::Retain)
    }

    /// Like [`bind_err`](Flow::bind_err), with the binder receiving the context and
    /// the surviving context chosen by `ownership`.
    #[inline]
    pub fn bind_err_with<U, F>(self, ownership: Ownership, binder: F) -> Result<Flow<T>, Fault>
    where
        T: Payload,
        F: FnOnce(&T, &FlowContext) -> Result<Flow<U>, Fault>,
    {
        self.bind_concat(binder, |value, _| value, ownership)
    }

    /// [`bind_err`](Flow::bind_err), but only when `condition` holds for the
    /// payload; otherwise the flow passes through unchanged.
    ///
    /// A fault from `condition` is handled like a fault from `binder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::{err, val, Unit};
    ///
    /// let large = |amount: &u32| Ok(*amount > 100);
    /// let audit = |amount: &u32| Ok(err::<Unit>(format!("{amount} needs approval")));
    ///
    /// assert_eq!(val(50u32).bind_err_if(large, audit)?.unwrap_val(), 50);
    /// assert_eq!(
    ///     val(500u32).bind_err_if(large, audit)?.unwrap_err(),
    ///     "500 needs approval"
    /// );
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    pub fn bind_err_if<U, P, F>(self, condition: P, binder: F) -> Result<Flow<T>, Fault>
    where
        T: Payload,
        P: FnOnce(&T) -> Result<bool, Fault>,
        F: FnOnce(&T) -> Result<Flow<U>, Fault>,
    {
        let proceed = match &self.state {
            FlowState::Val(value) => condition(value),
            FlowState::Err(_) => Ok(false),
        };
        match proceed {
            Ok(true) => self.bind_err(binder),
            Ok(false) => Ok(self),
            Err(fault) => Flow::from_fault(fault, self.context),
        }
    }

    /// Fails the flow with `error(&payload)` unless `predicate` holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::val;
    ///
    /// let flow = val(-3).check(|x| *x >= 0, |x| format!("{x} is negative"));
    /// assert_eq!(flow.unwrap_err(), "-3 is negative");
    /// ```
    #[inline]
    pub fn check<P, E>(self, predicate: P, error: E) -> Flow<T>
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> String,
    {
        self.check_if(|_| true, predicate, error)
    }

    /// [`check`](Flow::check), applied only when `gate` holds for the payload.
    pub fn check_if<G, P, E>(self, gate: G, predicate: P, error: E) -> Flow<T>
    where
        G: FnOnce(&T) -> bool,
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> String,
    {
        let failure = match &self.state {
            FlowState::Val(value) => (gate(value) && !predicate(value)).then(|| error(value)),
            FlowState::Err(_) => None,
        };
        match failure {
            Some(message) => Flow::err_on(message, self.context),
            None => self,
        }
    }

    /// [`check`](Flow::check) with a predicate and message builder that may
    /// raise faults.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::ParseIntError;
    /// use flow_rail::val;
    ///
    /// let flow = val("12x")
    ///     .handle(|e: &ParseIntError| format!("unreadable limit: {e}"))
    ///     .try_check(|raw| Ok(raw.parse::<u32>()? < 100), |raw| Ok(format!("{raw} too big")))?;
    ///
    /// assert_eq!(flow.unwrap_err(), "unreadable limit: invalid digit found in string");
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    #[inline]
    pub fn try_check<P, E>(self, predicate: P, error: E) -> Result<Flow<T>, Fault>
    where
        P: FnOnce(&T) -> Result<bool, Fault>,
        E: FnOnce(&T) -> Result<String, Fault>,
    {
        self.try_check_if(|_| Ok(true), predicate, error)
    }

    /// [`check_if`](Flow::check_if) with closures that may raise faults.
    ///
    /// A fault from `gate`, `predicate` or `error` becomes an `Err` flow if a
    /// handler matches it and is returned otherwise.
    pub fn try_check_if<G, P, E>(self, gate: G, predicate: P, error: E) -> Result<Flow<T>, Fault>
    where
        G: FnOnce(&T) -> Result<bool, Fault>,
        P: FnOnce(&T) -> Result<bool, Fault>,
        E: FnOnce(&T) -> Result<String, Fault>,
    {
        let failure = match &self.state {
            FlowState::Val(value) => failure_message(value, gate, predicate, error),
            FlowState::Err(_) => Ok(None),
        };
        match failure {
            Ok(Some(message)) => Ok(Flow::err_on(message, self.context)),
            Ok(None) => Ok(self),
            Err(fault) => Flow::from_fault(fault, self.context),
        }
    }

    /// Runs `action` for its effect; the payload is unchanged unless the action
    /// raises a fault that a handler converts.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use flow_rail::val;
    ///
    /// let seen = RefCell::new(Vec::new());
    /// let flow = val(7).side_effect(|x| {
    ///     seen.borrow_mut().push(*x);
    ///     Ok(())
    /// })?;
    ///
    /// assert_eq!(*seen.borrow(), vec![7]);
    /// assert_eq!(flow.unwrap_val(), 7);
    /// # Ok::<(), flow_rail::Fault>(())
    /// ```
    #[inline]
    pub fn side_effect<A>(self, action: A) -> Result<Flow<T>, Fault>
    where
        A: FnOnce(&T) -> Result<(), Fault>,
    {
        self.side_effect_if(|_| Ok(true), action)
    }

    /// [`side_effect`](Flow::side_effect), run only when `condition` holds.
    ///
    /// A fault from `condition` is handled like a fault from `action`.
    pub fn side_effect_if<P, A>(self, condition: P, action: A) -> Result<Flow<T>, Fault>
    where
        P: FnOnce(&T) -> Result<bool, Fault>,
        A: FnOnce(&T) -> Result<(), Fault>,
    {
        let outcome = match &self.state {
            FlowState::Val(value) => {
                condition(value).and_then(|run| if run { action(value) } else { Ok(()) })
            }
            FlowState::Err(_) => Ok(()),
        };
        self.after_effect(outcome)
    }

    /// [`side_effect`](Flow::side_effect) with the action also receiving the
    /// context.
    pub fn side_effect_with<A>(self, action: A) -> Result<Flow<T>, Fault>
    where
        A: FnOnce(&T, &FlowContext) -> Result<(), Fault>,
    {
        let outcome = match &self.state {
            FlowState::Val(value) => action(value, &self.context),
            FlowState::Err(_) => Ok(()),
        };
        self.after_effect(outcome)
    }

    fn after_effect(self, outcome: Result<(), Fault>) -> Result<Flow<T>, Fault> {
        match outcome {
            Ok(()) => Ok(self),
            Err(fault) => Flow::from_fault(fault, self.context),
        }
    }
}

fn failure_message<T, G, P, E>(
    value: &T,
    gate: G,
    predicate: P,
    error: E,
) -> Result<Option<String>, Fault>
where
    G: FnOnce(&T) -> Result<bool, Fault>,
    P: FnOnce(&T) -> Result<bool, Fault>,
    E: FnOnce(&T) -> Result<String, Fault>,
{
    if gate(value)? && !predicate(value)? {
        error(value).map(Some)
    } else {
        Ok(None)
    }
}
