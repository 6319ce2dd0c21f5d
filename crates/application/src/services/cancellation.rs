//! Cooperative cancellation for in-flight route requests

use std::sync::Arc;

use tokio::sync::watch;

/// A cloneable flag that wakes every waiter once set
///
/// All clones share one state; cancelling any clone cancels them all.
/// Cancellation is permanent.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create a token that is not yet cancelled
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Cancel the token, waking all waiters
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    /// Whether the token has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolve once the token is cancelled
    pub async fn cancelled(&self) {
        let mut receiver = self.state.subscribe();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            // unreachable while `self` holds the sender
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
