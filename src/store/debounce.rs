//! Cancellable single-shot debounce timer
//!
//! Arming schedules an action after a fixed delay; arming again first
//! cancels the pending timer, so a burst of arms runs the action once,
//! after the last arm. There is no maximum-wait ceiling: a continuous
//! stream of arms defers the action indefinitely.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A single-shot timer with arm/cancel semantics
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(CancellationToken, JoinHandle<()>)>,
}

impl Debouncer {
    /// Create a debouncer with a fixed delay window
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// The configured delay window
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` after the delay, cancelling any pending schedule
    pub fn arm<F, Fut>(&mut self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let fired = token.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = fired.cancelled() => {}
                _ = tokio::time::sleep(delay) => action().await,
            }
        });
        self.pending = Some((token, handle));
    }

    /// Cancel the pending timer without firing
    pub fn cancel(&mut self) {
        if let Some((token, _)) = self.pending.take() {
            token.cancel();
        }
    }

    /// Whether a timer is currently scheduled and unfired
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|(_, handle)| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
