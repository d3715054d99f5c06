//! Unexpected failures raised inside pipeline steps.
//!
//! A [`Fault`] is distinct from the semantic `Err` state of a
//! [`Flow`](crate::Flow): it is what a caller-supplied closure returns when
//! something went wrong that the pipeline did not model. Whether a fault becomes
//! an `Err` flow or escapes to the caller is decided by the handler stack of the
//! flow's [`FlowContext`](crate::FlowContext).
//!
//! The *kind* of a fault is the concrete error type it wraps, so handlers match
//! on it with a downcast rather than by inspecting messages.
//!
//! # Examples
//!
//! ```
//! use flow_rail::Fault;
//!
//! fn parse(input: &str) -> Result<i32, Fault> {
//!     Ok(input.parse::<i32>()?)
//! }
//!
//! let fault = parse("forty-two").unwrap_err();
//! assert!(fault.is::<std::num::ParseIntError>());
//! ```
use core::fmt;
use std::error::Error;

/// Boxed error type carried by faults.
pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// An unexpected failure raised by a pipeline closure.
///
/// Any `E: Error + Send + Sync + 'static` converts into a `Fault`, so `?` works
/// inside closures that return `Result<_, Fault>`. `Fault` does not implement
/// [`Error`] itself; use [`Fault::as_error`] or [`Fault::into_inner`] to get at
/// the wrapped error.
pub struct Fault {
    inner: BoxedError,
}

impl Fault {
    /// Wraps a concrete error.
    #[inline]
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self { inner: Box::new(error) }
    }

    /// Builds an ad hoc fault of kind [`FaultMessage`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flow_rail::{Fault, FaultMessage};
    ///
    /// let fault = Fault::msg("sensor offline");
    /// assert!(fault.is::<FaultMessage>());
    /// assert_eq!(fault.to_string(), "sensor offline");
    /// ```
    #[inline]
    pub fn msg<S: Into<String>>(message: S) -> Self {
        Self::new(FaultMessage(message.into()))
    }

    /// Wraps an already boxed error without boxing it again.
    #[inline]
    pub fn from_boxed(inner: BoxedError) -> Self {
        Self { inner }
    }

    /// Returns `true` if the wrapped error is of type `E`.
    #[inline]
    pub fn is<E>(&self) -> bool
    where
        E: Error + 'static,
    {
        self.inner.is::<E>()
    }

    /// Returns the wrapped error if it is of type `E`.
    #[inline]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Recovers the wrapped error by value, or gives the fault back on mismatch.
    pub fn downcast<E>(self) -> Result<E, Self>
    where
        E: Error + 'static,
    {
        match self.inner.downcast::<E>() {
            Ok(error) => Ok(*error),
            Err(inner) => Err(Self { inner }),
        }
    }

    /// The wrapped error as a trait object.
    #[inline]
    pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Unwraps the boxed error.
    #[inline]
    pub fn into_inner(self) -> BoxedError {
        self.inner
    }

    /// The default message of this fault: the wrapped error's `Display`.
    #[inline]
    pub fn message(&self) -> String {
        self.inner.to_string()
    }
}

impl<E> From<E> for Fault
where
    E: Error + Send + Sync + 'static,
{
    #[inline]
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fault").field(&self.inner).finish()
    }
}

/// The fault kind produced by [`Fault::msg`] and the [`fault!`](crate::fault) macro.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaultMessage(pub String);

impl FaultMessage {
    /// The message text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaultMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for FaultMessage {}
