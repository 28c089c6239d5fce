use std::sync::Arc;

use tokio::sync::watch;

/// Most-recent-outcome error cell shared by the reconciler and the session
///
/// Holds at most one message: every operation's outcome overwrites it
/// (success clears, failure sets). Readers watch it for passive display.
#[derive(Clone)]
pub struct ErrorState {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl ErrorState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Overwrite the cell with a failure description
    pub fn record(&self, message: impl Into<String>) {
        self.tx.send_replace(Some(message.into()));
    }

    /// Clear the cell after a successful operation
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Watch the current error message
    pub fn watch(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    /// The current error message, if any
    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }
}

impl Default for ErrorState {
    fn default() -> Self {
        Self::new()
    }
}
