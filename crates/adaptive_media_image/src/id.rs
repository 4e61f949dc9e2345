//! Process-local identifier generation.

use adaptive_media_error::AdaptiveMediaResult;
use adaptive_media_interface::IdGenerator;
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out increasing identifiers from an atomic counter.
///
/// Identifiers are unique within the process only; use a database-backed
/// generator when records outlive it.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicI64,
}

impl SequentialIdGenerator {
    /// Start counting at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `first`.
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdGenerator for SequentialIdGenerator {
    async fn next_id(&self) -> AdaptiveMediaResult<i64> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst))
    }
}
