//! Payload wrappers for values that carry no resources of their own.
//!
//! [`ValueBox`] lets any value travel through a [`Flow`](crate::Flow), including
//! foreign types that cannot implement [`Payload`](crate::traits::Payload)
//! directly. [`Unit`] is the sentinel payload for steps that only signal success.
//!
//! # Examples
//!
//! ```
//! use flow_rail::{boxed, ValueBox};
//!
//! let flow = boxed(std::time::Duration::from_secs(3))
//!     .map(|d| Ok(ValueBox::new(d.as_secs())))
//!     .unwrap();
//!
//! assert_eq!(flow.unwrap_val().into_inner(), 3);
//! ```
use core::ops::{Deref, DerefMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wraps a plain value so it can populate a flow.
///
/// A boxed value never exposes resources: whatever it wraps is owned by the
/// flow payload, not by the flow context.
///
/// # Examples
///
/// ```
/// use flow_rail::ValueBox;
///
/// let boxed = ValueBox::new(21);
/// assert_eq!(*boxed * 2, 42);
/// ```
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ValueBox<T>(T);

impl<T> ValueBox<T> {
    /// Wraps `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns a reference to the wrapped value.
    #[inline]
    pub const fn get(&self) -> &T {
        &self.0
    }

    /// Unwraps the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Applies `f` to the wrapped value, keeping it boxed.
    #[inline]
    pub fn map<U, F>(self, f: F) -> ValueBox<U>
    where
        F: FnOnce(T) -> U,
    {
        ValueBox(f(self.0))
    }
}

impl<T> Deref for ValueBox<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for ValueBox<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for ValueBox<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: core::fmt::Display> core::fmt::Display for ValueBox<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// The "no meaningful payload" sentinel.
///
/// `Unit` is zero-sized, so every instance is the same value.
///
/// # Examples
///
/// ```
/// use flow_rail::{traits::IntoFlow, Unit};
///
/// let flow = (2 + 2 == 4).flow_or("arithmetic is broken");
/// assert_eq!(flow.unwrap_val(), Unit);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unit;

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("()")
    }
}
