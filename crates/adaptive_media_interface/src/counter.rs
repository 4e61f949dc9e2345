//! Expected-variant counters and their registry.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Estimates how many variants should exist for a company.
///
/// Counters are independent; the registry adds their estimates together.
#[async_trait]
pub trait ImageCounter: Send + Sync {
    /// Number of variants expected per configuration for this company.
    async fn count_expected_images(&self, company_id: i64) -> u64;
}

/// Live, keyed collection of [`ImageCounter`]s.
///
/// Owned by the platform and shared with the registry by cloning; counters
/// may be registered or unregistered at any time.
///
/// # Example
///
/// ```
/// use adaptive_media_interface::{CounterRegistry, ImageCounter};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Fixed(u64);
///
/// #[async_trait]
/// impl ImageCounter for Fixed {
///     async fn count_expected_images(&self, _company_id: i64) -> u64 {
///         self.0
///     }
/// }
///
/// let registry = CounterRegistry::new();
/// registry.register("document-library", Arc::new(Fixed(3)));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CounterRegistry {
    counters: Arc<RwLock<BTreeMap<String, Arc<dyn ImageCounter>>>>,
}

impl CounterRegistry {
    /// Create a new empty counter registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter under a key.
    ///
    /// If a counter with the same key already exists, it is replaced and a
    /// warning logged. Returns the replaced counter.
    #[tracing::instrument(skip(self, counter))]
    pub fn register(
        &self,
        key: impl Into<String> + std::fmt::Debug,
        counter: Arc<dyn ImageCounter>,
    ) -> Option<Arc<dyn ImageCounter>> {
        let key = key.into();
        let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);

        if counters.contains_key(&key) {
            tracing::warn!(key = %key, "Counter already registered, overwriting previous registration");
        } else {
            tracing::debug!(key = %key, "Registering counter");
        }

        counters.insert(key, counter)
    }

    /// Remove the counter registered under a key.
    #[tracing::instrument(skip(self))]
    pub fn unregister(&self, key: &str) -> Option<Arc<dyn ImageCounter>> {
        let removed = self
            .counters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        if removed.is_some() {
            tracing::debug!("Unregistered counter");
        }
        removed
    }

    /// Copy of the registrations present right now.
    ///
    /// The lock is released before this returns, so callers may await on the
    /// counters without blocking registration.
    pub fn snapshot(&self) -> Vec<(String, Arc<dyn ImageCounter>)> {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(key, counter)| (key.clone(), Arc::clone(counter)))
            .collect()
    }

    /// Keys of every registered counter.
    pub fn keys(&self) -> Vec<String> {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Get number of registered counters.
    pub fn len(&self) -> usize {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CounterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
