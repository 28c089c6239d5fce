use anyhow::Result;

use crate::models::{RecorderConfig, RecordingStatus, TradeEvent};

/// Command boundary to the remote recorder service
///
/// Each method maps to one remote command. Failures carry the remote's
/// error description; callers decide whether to surface them through the
/// shared error cell or directly.
#[async_trait::async_trait]
pub trait CommandGateway: Send + Sync {
    /// Query the recorder's current status
    async fn recording_status(&self) -> Result<RecordingStatus>;

    /// Start monitoring/recording; returns the remote's result message
    async fn start_monitoring(&self) -> Result<String>;

    /// Stop monitoring/recording; returns the remote's result message
    async fn stop_monitoring(&self) -> Result<String>;

    /// Capture a screenshot; returns the stored artifact's path
    async fn capture_screenshot(&self) -> Result<String>;

    /// Fetch the full trade history, oldest first
    async fn trade_history(&self) -> Result<Vec<TradeEvent>>;

    /// Enumerate capturable window titles
    async fn list_windows(&self) -> Result<Vec<String>>;

    /// Fetch the recorder's capture configuration
    async fn recorder_config(&self) -> Result<RecorderConfig>;

    /// Replace the recorder's capture configuration
    async fn update_recorder_config(&self, config: RecorderConfig) -> Result<()>;
}
