//! `X-Nonce` values for signed requests.
//!
//! Globitex expects the nonce to be a Unix timestamp in milliseconds. The
//! server only checks that it parses as an integer, but it is part of the
//! signed message, so two requests should never share one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of `X-Nonce` values.
pub trait NonceProvider: Send + Sync {
    /// The nonce for the next request.
    fn next_nonce(&self) -> u64;
}

/// Wall-clock milliseconds, bumped past the last value handed out.
///
/// Requests issued within the same millisecond, or after the clock steps
/// back, get `last + 1` instead.
#[derive(Debug, Default)]
pub struct MillisecondNonce {
    last: AtomicU64,
}

impl MillisecondNonce {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NonceProvider for MillisecondNonce {
    fn next_nonce(&self) -> u64 {
        let now = unix_millis();
        let bump = |last: u64| now.max(last + 1);
        // The closure always yields a value, so both arms carry the previous nonce.
        let previous = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(bump(last)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        bump(previous)
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
