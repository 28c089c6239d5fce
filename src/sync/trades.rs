use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::models::TradeEvent;
use crate::remote::CommandGateway;
use crate::sync::error::ErrorState;

/// On-demand cache of the full trade history
///
/// The remote log is the sole source of truth for ordering and completeness:
/// every refresh replaces the whole list, never merges. Not kept fresh by
/// push events; refreshed at session start and on explicit request.
pub struct TradeLogCache {
    gateway: Arc<dyn CommandGateway>,
    trades_tx: watch::Sender<Vec<TradeEvent>>,
    error: ErrorState,
}

impl TradeLogCache {
    pub fn new(gateway: Arc<dyn CommandGateway>, error: ErrorState) -> Self {
        let (trades_tx, _) = watch::channel(Vec::new());
        Self {
            gateway,
            trades_tx,
            error,
        }
    }

    /// Watch the cached history
    pub fn watch(&self) -> watch::Receiver<Vec<TradeEvent>> {
        self.trades_tx.subscribe()
    }

    /// The cached history
    pub fn current(&self) -> Vec<TradeEvent> {
        self.trades_tx.borrow().clone()
    }

    /// Re-fetch the full history and replace the cache
    ///
    /// On failure the previous list stays intact and the error cell records
    /// the failure.
    pub async fn refresh(&self) {
        match self.gateway.trade_history().await {
            Ok(history) => {
                self.trades_tx.send_replace(history);
                self.error.clear();
            }
            Err(e) => {
                warn!("Trade history refresh failed: {:#}", e);
                self.error
                    .record(format!("Trade history refresh failed: {:#}", e));
            }
        }
    }
}
