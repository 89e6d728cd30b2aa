use std::future;
use std::time::Duration;

use tokio::time::{self, Instant};

/// Default quiet period before typed search input is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds the latest value until no new one arrives for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Resolves with the pending value once its quiet period has elapsed.
    /// Never resolves while nothing is pending.
    pub async fn fire(&mut self) -> T {
        let Some((_, deadline)) = &self.pending else {
            return future::pending().await;
        };
        time::sleep_until(*deadline).await;

        match self.pending.take() {
            Some((value, _)) => value,
            None => future::pending().await,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
