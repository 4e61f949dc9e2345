//! Dynamically bound service handles.
//!
//! The platform publishes at most one implementation of a collaborator into a
//! [`ServiceSlot`]. A consumer opens a [`ServiceTracker`] on the slot when it
//! starts and closes it when it stops. While open, the tracker always sees the
//! implementation currently published, which may change or disappear.

use std::sync::{Arc, PoisonError, RwLock};

/// A shared, swappable holder for one live service implementation.
///
/// Cloning a slot yields another handle to the same holder.
///
/// # Example
///
/// ```
/// use adaptive_media_interface::ServiceSlot;
/// use std::sync::Arc;
///
/// let slot: ServiceSlot<str> = ServiceSlot::empty("greeting");
/// assert!(slot.current().is_none());
///
/// slot.publish(Arc::from("hello"));
/// assert_eq!(slot.current().as_deref(), Some("hello"));
/// ```
pub struct ServiceSlot<T: ?Sized> {
    name: &'static str,
    current: Arc<RwLock<Option<Arc<T>>>>,
}

impl<T: ?Sized> ServiceSlot<T> {
    /// Create a slot with nothing published.
    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a slot with an implementation already published.
    pub fn with_service(name: &'static str, service: Arc<T>) -> Self {
        Self {
            name,
            current: Arc::new(RwLock::new(Some(service))),
        }
    }

    /// Name of the service kind held by this slot.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Publish an implementation, replacing any previous one.
    #[tracing::instrument(skip(self, service), fields(slot = self.name))]
    pub fn publish(&self, service: Arc<T>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if current.is_some() {
            tracing::warn!("Service already published, replacing previous implementation");
        } else {
            tracing::debug!("Publishing service");
        }
        *current = Some(service);
    }

    /// Withdraw the published implementation.
    #[tracing::instrument(skip(self), fields(slot = self.name))]
    pub fn withdraw(&self) -> Option<Arc<T>> {
        tracing::debug!("Withdrawing service");
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// The implementation published right now, if any.
    pub fn current(&self) -> Option<Arc<T>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Open a tracker following this slot.
    pub fn track(&self) -> ServiceTracker<T> {
        tracing::debug!(service = self.name, "Opening service tracker");
        ServiceTracker { slot: self.clone() }
    }
}

impl<T: ?Sized> Clone for ServiceSlot<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            current: Arc::clone(&self.current),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for ServiceSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSlot")
            .field("name", &self.name)
            .field("published", &self.current().is_some())
            .finish()
    }
}

/// An open view of a [`ServiceSlot`].
///
/// Dropping the tracker closes it.
pub struct ServiceTracker<T: ?Sized> {
    slot: ServiceSlot<T>,
}

impl<T: ?Sized> ServiceTracker<T> {
    /// The implementation currently published in the tracked slot.
    pub fn service(&self) -> Option<Arc<T>> {
        self.slot.current()
    }

    /// Name of the tracked service kind.
    pub fn name(&self) -> &'static str {
        self.slot.name
    }
}

impl<T: ?Sized> Drop for ServiceTracker<T> {
    fn drop(&mut self) {
        tracing::debug!(service = self.slot.name, "Closing service tracker");
    }
}

impl<T: ?Sized> std::fmt::Debug for ServiceTracker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceTracker")
            .field("slot", &self.slot)
            .finish()
    }
}
