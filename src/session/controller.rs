use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use super::config::SessionConfig;
use crate::models::{RecorderConfig, RecordingStatus, TradeEvent};
use crate::remote::{topics, CommandGateway, EventChannel, RecorderEvent};
use crate::sync::{ErrorState, StatusReconciler, TradeLogCache};

/// A live client session against the remote recorder
///
/// Owns the status reconciler, the trade log cache, the shared error cell,
/// and every background task (one poll loop, one listener per event topic).
/// Dropping or shutting down the session aborts all of them together, so no
/// dangling task keeps mutating state after the owner is gone.
pub struct RecorderSession {
    session_id: String,
    gateway: Arc<dyn CommandGateway>,
    reconciler: Arc<StatusReconciler>,
    trades: TradeLogCache,
    error: ErrorState,
    tasks: Vec<JoinHandle<()>>,
}

impl RecorderSession {
    /// Open a session: load the initial trade history, subscribe to the push
    /// topics, and start the polling loop
    ///
    /// A failed history load or a failed subscription is logged/recorded but
    /// not fatal; polling covers the fields a lost listener would have fed.
    pub async fn start(
        gateway: Arc<dyn CommandGateway>,
        events: Arc<dyn EventChannel>,
        config: SessionConfig,
    ) -> Result<Self> {
        info!("Starting recorder session: {}", config.session_id);

        let error = ErrorState::new();
        let reconciler = Arc::new(StatusReconciler::new(Arc::clone(&gateway), error.clone()));
        let trades = TradeLogCache::new(Arc::clone(&gateway), error.clone());

        // Eager history load before any user interaction
        trades.refresh().await;

        let mut tasks = Vec::new();

        for topic in topics::ALL {
            match events.subscribe(topic).await {
                Ok(mut rx) => {
                    let reconciler = Arc::clone(&reconciler);
                    tasks.push(tokio::spawn(async move {
                        while let Some(payload) = rx.recv().await {
                            if let Some(event) = RecorderEvent::decode(topic, &payload) {
                                reconciler.apply_event(event);
                            }
                        }
                    }));
                }
                Err(e) => {
                    // This listener is lost for the session; the poll loop
                    // still refreshes the field it would have fed.
                    error!("Failed to subscribe to {}: {:#}", topic, e);
                }
            }
        }

        let poll_reconciler = Arc::clone(&reconciler);
        let poll_interval = config.poll_interval;
        tasks.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                poll_reconciler.refresh_from_poll().await;
            }
        }));

        info!("Recorder session started: {}", config.session_id);

        Ok(Self {
            session_id: config.session_id,
            gateway,
            reconciler,
            trades,
            error,
            tasks,
        })
    }

    /// Watch the recording-status snapshot
    pub fn status(&self) -> watch::Receiver<RecordingStatus> {
        self.reconciler.watch()
    }

    /// The current recording-status snapshot
    pub fn current_status(&self) -> RecordingStatus {
        self.reconciler.current()
    }

    /// Watch the cached trade history
    pub fn trade_history(&self) -> watch::Receiver<Vec<TradeEvent>> {
        self.trades.watch()
    }

    /// Watch the most recent operation error
    pub fn last_error(&self) -> watch::Receiver<Option<String>> {
        self.error.watch()
    }

    /// Start monitoring/recording on the remote
    pub async fn start_monitoring(&self) -> Result<String> {
        self.run_command("start_monitoring", self.gateway.start_monitoring())
            .await
    }

    /// Stop monitoring/recording on the remote
    pub async fn stop_monitoring(&self) -> Result<String> {
        self.run_command("stop_monitoring", self.gateway.stop_monitoring())
            .await
    }

    /// Capture a screenshot on the remote; returns the artifact path
    pub async fn capture_screenshot(&self) -> Result<String> {
        self.run_command("capture_screenshot", self.gateway.capture_screenshot())
            .await
    }

    /// Force an out-of-band status reconciliation
    pub async fn refresh_status(&self) {
        self.reconciler.refresh_from_poll().await;
    }

    /// Re-fetch the trade history on user request
    pub async fn refresh_trades(&self) {
        self.trades.refresh().await;
    }

    /// Enumerate capturable window titles
    ///
    /// Auxiliary query: failures go to the caller, not the error cell.
    pub async fn list_windows(&self) -> Result<Vec<String>> {
        self.gateway.list_windows().await
    }

    /// Fetch the remote recorder's capture configuration
    pub async fn recorder_config(&self) -> Result<RecorderConfig> {
        self.gateway.recorder_config().await
    }

    /// Replace the remote recorder's capture configuration
    pub async fn update_recorder_config(&self, config: RecorderConfig) -> Result<()> {
        self.gateway.update_recorder_config(config).await
    }

    /// Tear the session down, aborting the poll loop and every listener
    pub fn shutdown(mut self) {
        info!("Shutting down recorder session: {}", self.session_id);
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Issue one command, then force a reconciliation so readers see the new
    /// state without waiting for the next poll tick
    ///
    /// Commands run concurrently and are not serialized here; conflict
    /// handling (e.g. stop while not recording) is the remote's job and
    /// comes back as a failure.
    async fn run_command<T>(
        &self,
        name: &str,
        command: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match command.await {
            Ok(value) => {
                info!("Command {} succeeded", name);
                self.reconciler.refresh_from_poll().await;
                self.error.clear();
                Ok(value)
            }
            Err(e) => {
                error!("Command {} failed: {:#}", name, e);
                self.error.record(format!("Command {} failed: {:#}", name, e));
                Err(e)
            }
        }
    }
}

impl Drop for RecorderSession {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
