//! The set of releasable resources a context owns.
use crate::types::{ResourceRef, ResourceVec};

/// Identity-keyed set of resources, kept in registration order.
///
/// Registering a resource that is already present is a no-op. The registry
/// never calls [`release`](crate::traits::Release::release) itself; that is the
/// job of [`Flow::release`](crate::Flow::release) and
/// [`Flow::map_dispose`](crate::Flow::map_dispose).
#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    entries: ResourceVec,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `resource` unless it is already registered. Returns `true` if added.
    pub fn register(&mut self, resource: ResourceRef) -> bool {
        if self.contains(&resource) {
            return false;
        }
        self.entries.push(resource);
        true
    }

    /// Forgets `resource` without releasing it. Returns `true` if it was present.
    pub fn remove(&mut self, resource: &ResourceRef) -> bool {
        match self.entries.iter().position(|entry| entry == resource) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `resource` is registered.
    #[inline]
    pub fn contains(&self, resource: &ResourceRef) -> bool {
        self.entries.iter().any(|entry| entry == resource)
    }

    /// Copy of the current members.
    #[inline]
    pub fn snapshot(&self) -> ResourceVec {
        self.entries.clone()
    }

    /// Removes and returns every member.
    #[inline]
    pub fn drain(&mut self) -> ResourceVec {
        core::mem::take(&mut self.entries)
    }

    /// Number of registered resources.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
