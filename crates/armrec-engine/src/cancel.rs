//! Host cancellation.
//!
//! The host holds a [`CancelHandle`]; the engine races every suspension
//! point (LRO sleeps, settle sleeps) against the paired [`CancelToken`].
//! Already-issued ARM mutations are never reversed on cancellation.

use tokio::sync::watch;

/// Sender half, kept by the host.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiver half, consulted by the engine at suspension points.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
    // Keeps the channel of a detached token open for its lifetime.
    _keep: Option<std::sync::Arc<watch::Sender<bool>>>,
}

impl CancelToken {
    /// A token that never fires.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            _keep: Some(std::sync::Arc::new(tx)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves when the host cancels. If the handle is dropped without
    /// cancelling, this pends forever.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Create a linked handle/token pair.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx, _keep: None })
}
