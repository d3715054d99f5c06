//! Identity-carrying handles for releasable resources.
//!
//! A [`Resource`] is a shared handle to a value implementing
//! [`Release`]. Clones of one handle share the same allocation and therefore the
//! same identity, which is what a [`FlowContext`](crate::FlowContext) registry
//! keys on. Two separately created resources are always distinct registry
//! entries, even if their contents compare equal.
//!
//! [`ResourceRef`] is the type-erased form stored in registries.
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Deref;
use std::rc::Rc;

use crate::traits::Release;
use crate::types::Fault;

/// Shared handle to a releasable resource.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use flow_rail::{Fault, Resource, traits::Release};
///
/// #[derive(Default)]
/// struct Socket {
///     closed: Cell<bool>,
/// }
///
/// impl Release for Socket {
///     fn release(&self) -> Result<(), Fault> {
///         self.closed.set(true);
///         Ok(())
///     }
/// }
///
/// let socket = Resource::new(Socket::default());
/// let alias = socket.clone();
/// assert!(socket.ptr_eq(&alias));
/// assert_eq!(socket.handle(), alias.handle());
/// ```
pub struct Resource<R: Release + 'static> {
    inner: Rc<R>,
}

impl<R: Release + 'static> Resource<R> {
    /// Takes ownership of `resource` and gives it an identity.
    #[inline]
    pub fn new(resource: R) -> Self {
        Self { inner: Rc::new(resource) }
    }

    /// Type-erased handle sharing this resource's identity.
    #[inline]
    pub fn handle(&self) -> ResourceRef {
        let erased: Rc<dyn Release> = self.inner.clone();
        ResourceRef { inner: erased }
    }

    /// Returns `true` if both handles point at the same resource.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<R: Release + 'static> Clone for Resource<R> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<R: Release + 'static> Deref for Resource<R> {
    type Target = R;

    #[inline]
    fn deref(&self) -> &R {
        &self.inner
    }
}

impl<R: Release + fmt::Debug + 'static> fmt::Debug for Resource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("id", &self.handle().id())
            .field("value", &*self.inner)
            .finish()
    }
}

/// Type-erased resource handle compared by identity.
#[derive(Clone)]
pub struct ResourceRef {
    inner: Rc<dyn Release>,
}

impl ResourceRef {
    /// Address of the shared allocation, stable for the resource's lifetime.
    #[inline]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    /// Releases the underlying resource.
    #[inline]
    pub fn release(&self) -> Result<(), Fault> {
        self.inner.release()
    }
}

impl PartialEq for ResourceRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ResourceRef {}

impl Hash for ResourceRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceRef({:#x})", self.id())
    }
}
