//! Nonces for private requests.
//!
//! Every private request carries a `nonce` form field that must be strictly
//! greater than the previous one used with the same API key.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Source of strictly increasing nonces.
pub trait NonceProvider: Send + Sync {
    fn next_nonce(&self) -> u64;
}

impl<T: NonceProvider + ?Sized> NonceProvider for Arc<T> {
    fn next_nonce(&self) -> u64 {
        (**self).next_nonce()
    }
}

/// Microseconds since the Unix epoch, bumped by one when two calls land in
/// the same microsecond.
#[derive(Debug, Default)]
pub struct IncreasingNonce {
    last: AtomicU64,
}

impl IncreasingNonce {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_micros() -> u64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000).max(0) as u64
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::now_micros();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}
