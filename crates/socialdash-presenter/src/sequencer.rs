//! Monotonic request tokens for discarding superseded batches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing tokens. A batch is applied only if its token is still
/// the latest when it completes.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token, superseding every earlier one.
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently issued token, `0` before the first.
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_current(&self, token: u64) -> bool {
        self.latest() == token
    }
}
