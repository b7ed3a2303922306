//! Minimum spacing between outbound requests of one client.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Default gap enforced between two request starts.
pub(crate) const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Longest interval honoured. Larger values are clamped so the next deadline
/// stays representable as an `Instant`.
const MAX_INTERVAL: Duration = Duration::from_secs(86400 * 365 * 30);

/// Gate that lets one request start per `interval`.
///
/// The first request passes immediately. Waiters are serialised by the inner
/// mutex, so concurrent callers on one client still observe the floor.
#[derive(Debug)]
pub(crate) struct RateLimiter {
    interval: Duration,
    next_allowed: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval: interval.min(MAX_INTERVAL),
            next_allowed: Mutex::new(None),
        }
    }

    /// Wait until a request may start, then reserve the next slot.
    pub(crate) async fn acquire(&self) {
        let mut next_allowed = self.next_allowed.lock().await;
        if let Some(deadline) = *next_allowed {
            let wait = deadline.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                tracing::trace!(
                    wait_ms = wait.as_millis() as u64,
                    "rate limiter delaying request"
                );
                sleep_until(deadline).await;
            }
        }
        *next_allowed = Instant::now().checked_add(self.interval);
    }
}
