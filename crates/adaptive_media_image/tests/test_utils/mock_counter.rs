//! Counter reporting a fixed number per company.

use adaptive_media_interface::ImageCounter;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counter that always reports the same expected count.
#[derive(Debug, Default)]
pub struct FixedCounter {
    count: u64,
    calls: Arc<AtomicUsize>,
}

impl FixedCounter {
    /// Create a counter reporting `count` for every company.
    pub fn new(count: u64) -> Self {
        Self {
            count,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the counter has been asked.
    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageCounter for FixedCounter {
    async fn count_expected_images(&self, _company_id: i64) -> u64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.count
    }
}
