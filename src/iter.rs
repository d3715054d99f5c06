//! Applying an action to every element of a collection.
//!
//! [`for_each`] runs on the calling thread. With the `parallel` feature,
//! [`par_for_each`] spreads the work over rayon's global pool; each element may
//! run its own pipeline there, but every such pipeline needs its own
//! [`FlowContext`](crate::FlowContext), since contexts cannot cross threads.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use flow_rail::{iter, val};
//!
//! let doubled = RefCell::new(Vec::new());
//! iter::for_each([1, 2, 3], |n| {
//!     if let Ok(flow) = val(n).map(|x| Ok(x * 2)) {
//!         doubled.borrow_mut().extend(flow.into_result());
//!     }
//! });
//! assert_eq!(*doubled.borrow(), vec![2, 4, 6]);
//! ```

/// Calls `action` on each element of `items`, in order, on the calling thread.
#[inline]
pub fn for_each<I, A>(items: I, action: A)
where
    I: IntoIterator,
    A: FnMut(I::Item),
{
    items.into_iter().for_each(action);
}

/// Calls `action` on each element of `items` across rayon's worker threads.
///
/// Completion order is unspecified; the call returns once every element has
/// been processed.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use flow_rail::{iter, val};
///
/// let total = AtomicU64::new(0);
/// iter::par_for_each(vec![1u64, 2, 3, 4], |n| {
///     let flow = val(n).check(|x| *x % 2 == 0, |x| format!("{x} is odd"));
///     if let Ok(even) = flow.into_result() {
///         total.fetch_add(even, Ordering::Relaxed);
///     }
/// });
/// assert_eq!(total.load(Ordering::Relaxed), 6);
/// ```
#[cfg(feature = "parallel")]
pub fn par_for_each<I, A>(items: I, action: A)
where
    I: rayon::iter::IntoParallelIterator,
    A: Fn(I::Item) + Send + Sync,
{
    use rayon::iter::ParallelIterator;

    items.into_par_iter().for_each(action);
}
