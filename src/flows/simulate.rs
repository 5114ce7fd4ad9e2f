//! Validate-then-delay actions standing in for network calls.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, warn};

use crate::error::ValidationError;

/// A fixed-delay stand-in for a request to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedAction {
    delay: Duration,
}

impl SimulatedAction {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Run `validate`; when it passes, resolve `produce` after the delay.
    ///
    /// Nothing is spawned when validation fails.
    pub fn start<T, V, F>(&self, validate: V, produce: F) -> Result<Pending<T>, ValidationError>
    where
        V: FnOnce() -> Result<(), ValidationError>,
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        validate()?;
        Ok(self.spawn(produce))
    }

    /// Resolve `produce` after the delay, unless cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T, F>(&self, produce: F) -> Pending<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let token = CancellationToken::new();
        let (tx, rx) = oneshot::channel();
        let delay = self.delay;
        let cancelled = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    debug!("Simulated action cancelled before completion");
                }
                value = async move {
                    tokio::time::sleep(delay).await;
                    produce.await
                } => {
                    // The receiver is gone when nobody is waiting any more.
                    let _ = tx.send(value);
                }
            }
        });

        Pending { token, rx }
    }
}

/// Handle to an in-flight simulated action.
#[derive(Debug)]
pub struct Pending<T> {
    token: CancellationToken,
    rx: oneshot::Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    /// Cancel the action; its result will never be delivered.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A guard that cancels the action when dropped.
    pub fn guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// Wait for the result. `None` when the action was cancelled.
    pub async fn outcome(self) -> Option<T> {
        let Self { token, rx } = self;
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            value = rx => value.ok().filter(|_| !token.is_cancelled()),
        }
    }

    /// Deliver the result into `tx` as an action built by `wrap`.
    pub fn forward<A, W>(self, tx: mpsc::UnboundedSender<A>, wrap: W)
    where
        A: Send + 'static,
        W: FnOnce(T) -> A + Send + 'static,
    {
        tokio::spawn(async move {
            if let Some(value) = self.outcome().await
                && tx.send(wrap(value)).is_err()
            {
                warn!("Action channel closed before simulated result was delivered");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test(start_paused = true)]
    async fn test_resolves_after_delay() {
        let action = SimulatedAction::from_millis(1500);
        let started = Instant::now();

        let pending = action.spawn(async { 42 });
        assert_eq!(pending.outcome().await, Some(42));
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_result() {
        let action = SimulatedAction::from_millis(1500);
        let pending = action.spawn(async { "late" });
        pending.cancel();
        assert!(pending.is_cancelled());
        assert_eq!(pending.outcome().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_guard_cancels() {
        let action = SimulatedAction::from_millis(500);
        let pending = action.spawn(async { 1 });
        let guard = pending.guard();
        drop(guard);
        assert_eq!(pending.outcome().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_guard_does_not_cancel() {
        let action = SimulatedAction::from_millis(500);
        let pending = action.spawn(async { 7 });
        let _token = pending.guard().disarm();
        assert_eq!(pending.outcome().await, Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_validation_spawns_nothing() {
        let action = SimulatedAction::from_millis(500);
        let result = action.start(|| Err(ValidationError::MissingAmount), async { 1 });
        let err = assert_err!(result);
        assert_eq!(err, ValidationError::MissingAmount);

        let pending = assert_ok!(action.start(|| Ok(()), async { 2 }));
        assert_eq!(pending.outcome().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_forward_wraps_into_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        SimulatedAction::from_millis(100)
            .spawn(async { 5 })
            .forward(tx, |v| v * 10);
        assert_eq!(rx.recv().await, Some(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_forward_after_cancel_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel::<i32>();
        let pending = SimulatedAction::from_millis(100).spawn(async { 5 });
        let guard = pending.guard();
        pending.forward(tx, |v| v);
        drop(guard);
        // Sender is dropped once the forwarding task gives up.
        assert_eq!(rx.recv().await, None);
    }
}
