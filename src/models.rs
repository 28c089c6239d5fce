use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the remote recorder's state at one instant
///
/// Owned by the status reconciler and replaced atomically on every update;
/// readers only ever observe complete snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingStatus {
    /// Whether a recording is currently running
    pub is_recording: bool,

    /// Whether an HTS window/process is currently detected
    pub hts_detected: bool,

    /// Name of the detected HTS, when known (detection may be active
    /// with an unknown name)
    pub hts_name: Option<String>,

    /// Elapsed recording time in seconds, present only while recording
    pub recording_duration: Option<u64>,
}

/// Direction of a detected trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    Unknown,
}

/// A single trade captured by the remote recorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Buy/sell/unknown classification
    pub action: TradeAction,

    /// When the trade was detected
    pub timestamp: DateTime<Utc>,

    /// Path of the screenshot taken at detection time
    pub screenshot_path: String,

    /// Title of the window the trade was detected in
    pub window_title: String,
}

/// HTS detection settings on the remote recorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtsConfig {
    /// Process names that count as an HTS
    pub process_names: Vec<String>,

    /// Window-title fragments that count as an HTS
    pub window_titles: Vec<String>,

    /// Detection poll interval on the host, in milliseconds
    pub check_interval_ms: u64,
}

/// Capture settings on the remote recorder, fetched and updated as a whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecorderConfig {
    pub hts: HtsConfig,
    pub output_dir: String,
    pub fps: u32,
    pub enable_ocr: bool,
}
