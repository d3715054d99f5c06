//! Values that can populate a flow.
//!
//! Every payload reports the releasable resources it holds so the flow context
//! can take ownership of them when the payload enters the pipeline. Most types
//! hold none and implement [`Payload`] with an empty body:
//!
//! ```
//! use flow_rail::{traits::Payload, val};
//!
//! struct Invoice {
//!     total_cents: u64,
//! }
//!
//! impl Payload for Invoice {}
//!
//! let flow = val(Invoice { total_cents: 1250 });
//! assert_eq!(flow.context().resource_count(), 0);
//! ```
//!
//! Types that own resources forward them:
//!
//! ```
//! use std::cell::Cell;
//! use flow_rail::{traits::{Payload, Release}, val, Fault, Resource, ResourceRef};
//!
//! struct Conn(Cell<bool>);
//!
//! impl Release for Conn {
//!     fn release(&self) -> Result<(), Fault> {
//!         self.0.set(false);
//!         Ok(())
//!     }
//! }
//!
//! struct Session {
//!     primary: Resource<Conn>,
//!     replica: Resource<Conn>,
//! }
//!
//! impl Payload for Session {
//!     fn visit_resources(&self, visit: &mut dyn FnMut(ResourceRef)) {
//!         self.primary.visit_resources(visit);
//!         self.replica.visit_resources(visit);
//!     }
//! }
//!
//! let session = Session {
//!     primary: Resource::new(Conn(Cell::new(true))),
//!     replica: Resource::new(Conn(Cell::new(true))),
//! };
//! let flow = val(session);
//! assert_eq!(flow.context().resource_count(), 2);
//! ```

use crate::types::{Resource, ResourceRef, ResourceVec, Unit, ValueBox};
use crate::traits::Release;

/// A value that may travel through a [`Flow`](crate::Flow).
pub trait Payload {
    /// Calls `visit` once for every releasable resource this value owns.
    ///
    /// The default reports nothing.
    #[inline]
    fn visit_resources(&self, visit: &mut dyn FnMut(ResourceRef)) {
        let _ = visit;
    }

    /// Collects the resources reported by [`visit_resources`](Payload::visit_resources).
    fn resources(&self) -> ResourceVec {
        let mut found = ResourceVec::new();
        self.visit_resources(&mut |resource| found.push(resource));
        found
    }
}

impl<R: Release + 'static> Payload for Resource<R> {
    #[inline]
    fn visit_resources(&self, visit: &mut dyn FnMut(ResourceRef)) {
        visit(self.handle());
    }
}

impl<T> Payload for ValueBox<T> {}

impl Payload for Unit {}

macro_rules! impl_plain_payload {
    ($($ty:ty),* $(,)?) => {
        $(impl Payload for $ty {})*
    };
}

impl_plain_payload!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &str,
    core::time::Duration,
);

impl<T: Payload + ?Sized> Payload for Box<T> {
    #[inline]
    fn visit_resources(&self, visit: &mut dyn FnMut(ResourceRef)) {
        (**self).visit_resources(visit);
    }
}

impl<T: Payload> Payload for Option<T> {
    #[inline]
    fn visit_resources(&self, visit: &mut dyn FnMut(ResourceRef)) {
        if let Some(value) = self {
            value.visit_resources(visit);
        }
    }
}

impl<T: Payload> Payload for Vec<T> {
    fn visit_resources(&self, visit: &mut dyn FnMut(ResourceRef)) {
        for value in self {
            value.visit_resources(visit);
        }
    }
}

macro_rules! impl_tuple_payload {
    ($($name:ident),+) => {
        impl<$($name: Payload),+> Payload for ($($name,)+) {
            #[allow(non_snake_case)]
            fn visit_resources(&self, visit: &mut dyn FnMut(ResourceRef)) {
                let ($($name,)+) = self;
                $($name.visit_resources(visit);)+
            }
        }
    };
}

impl_tuple_payload!(A);
impl_tuple_payload!(A, B);
impl_tuple_payload!(A, B, C);
impl_tuple_payload!(A, B, C, D);
