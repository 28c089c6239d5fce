use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::models::RecordingStatus;
use crate::remote::{CommandGateway, RecorderEvent};
use crate::sync::error::ErrorState;

/// Owner of the authoritative `RecordingStatus` snapshot
///
/// Merges two racing sources of truth: periodic polls (wholesale replacement,
/// the ground truth) and push events (partial field merges, the low-latency
/// path). Updates are applied in arrival order; a slow poll response may
/// overwrite a newer push-driven field, bounded by the poll interval.
pub struct StatusReconciler {
    gateway: Arc<dyn CommandGateway>,
    status_tx: watch::Sender<RecordingStatus>,
    error: ErrorState,
}

impl StatusReconciler {
    pub fn new(gateway: Arc<dyn CommandGateway>, error: ErrorState) -> Self {
        let (status_tx, _) = watch::channel(RecordingStatus::default());
        Self {
            gateway,
            status_tx,
            error,
        }
    }

    /// Watch the current snapshot
    pub fn watch(&self) -> watch::Receiver<RecordingStatus> {
        self.status_tx.subscribe()
    }

    /// The current snapshot
    pub fn current(&self) -> RecordingStatus {
        self.status_tx.borrow().clone()
    }

    /// Query the remote status and commit it as the new snapshot
    ///
    /// On success the poll result replaces the snapshot wholesale and clears
    /// the error cell. On failure the previous snapshot stays (stale but
    /// valid) and the error cell records the failure. Never propagates, so
    /// the polling loop cannot be killed by a failed tick.
    pub async fn refresh_from_poll(&self) {
        match self.gateway.recording_status().await {
            Ok(status) => {
                self.status_tx.send_replace(status);
                self.error.clear();
            }
            Err(e) => {
                warn!("Status poll failed: {:#}", e);
                self.error.record(format!("Status poll failed: {:#}", e));
            }
        }
    }

    /// Merge one push event into the snapshot
    ///
    /// Each event touches only its own fields, committed as one indivisible
    /// update. `RecordingStopped` clears the duration in the same update so
    /// no reader ever sees a stopped recording that still carries one.
    pub fn apply_event(&self, event: RecorderEvent) {
        match event {
            RecorderEvent::HtsDetected(detected) => {
                self.status_tx.send_modify(|status| {
                    status.hts_detected = detected;
                });
            }
            RecorderEvent::RecordingStarted => {
                self.status_tx.send_modify(|status| {
                    status.is_recording = true;
                });
            }
            RecorderEvent::RecordingStopped => {
                self.status_tx.send_modify(|status| {
                    status.is_recording = false;
                    status.recording_duration = None;
                });
            }
            RecorderEvent::RecordingDuration(duration) => {
                self.status_tx.send_modify(|status| {
                    status.recording_duration = duration;
                });
            }
        }
    }
}
