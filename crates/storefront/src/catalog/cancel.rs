//! Single-owner cancellation token for in-flight catalog fetches.
//!
//! The feed owns exactly one [`CancelHandle`] at a time; submitting a new
//! query replaces the handle and signals the old one, aborting whatever
//! stage (debounce or fetch) the superseded request was in. Dropping the
//! handle without signalling also cancels - a token can never outlive its
//! owner into a wait that nobody can end.

use tokio::sync::watch;

/// Owner side of a cancellation pair. Replaced (and signalled) on every
/// new request.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation to the paired token.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Waiter side of a cancellation pair, held by the request task.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until cancellation is signalled.
    ///
    /// Resolves immediately if already cancelled, and also when the
    /// owning handle is dropped without an explicit signal.
    pub async fn cancelled(mut self) {
        // wait_for errors only when the sender is gone, which counts
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Create a connected handle/token pair.
#[must_use]
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_wakes_waiter() {
        let (handle, token) = cancel_pair();
        assert!(!token.is_cancelled());

        let waiter = tokio::spawn(token.clone().cancelled());
        handle.cancel();
        waiter.await.expect("waiter task");
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_already_cancelled_resolves_immediately() {
        let (handle, token) = cancel_pair();
        handle.cancel();
        token.cancelled().await;
    }

    #[tokio::test]
    async fn test_dropping_handle_cancels() {
        let (handle, token) = cancel_pair();
        drop(handle);
        token.cancelled().await;
    }
}
