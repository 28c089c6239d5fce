use anyhow::Result;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

/// Push-event topics published by the remote recorder
pub mod topics {
    pub const HTS_DETECTED: &str = "hts-detected";
    pub const RECORDING_STARTED: &str = "recording-started";
    pub const RECORDING_STOPPED: &str = "recording-stopped";
    pub const RECORDING_DURATION: &str = "recording-duration";

    /// Every topic a session subscribes to
    pub const ALL: [&str; 4] = [
        HTS_DETECTED,
        RECORDING_STARTED,
        RECORDING_STOPPED,
        RECORDING_DURATION,
    ];
}

/// A validated push event from the remote recorder
///
/// Raw payloads are opaque JSON at the channel boundary; this is the tagged
/// union they are checked against before they may touch the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderEvent {
    /// HTS detection flag changed
    HtsDetected(bool),
    /// A recording started (duration arrives separately)
    RecordingStarted,
    /// A recording stopped; duration becomes meaningless
    RecordingStopped,
    /// Elapsed recording seconds; `None` clears the field
    RecordingDuration(Option<u64>),
}

impl RecorderEvent {
    /// Decode a raw payload for a topic into a known event
    ///
    /// Unknown topics and malformed payloads are logged and dropped rather
    /// than trusted.
    pub fn decode(topic: &str, payload: &Value) -> Option<Self> {
        match topic {
            topics::HTS_DETECTED => match payload.as_bool() {
                Some(detected) => Some(Self::HtsDetected(detected)),
                None => {
                    warn!("malformed payload on {}: {}", topic, payload);
                    None
                }
            },
            topics::RECORDING_STARTED => Some(Self::RecordingStarted),
            topics::RECORDING_STOPPED => Some(Self::RecordingStopped),
            topics::RECORDING_DURATION => {
                if payload.is_null() {
                    Some(Self::RecordingDuration(None))
                } else {
                    match payload.as_u64() {
                        Some(secs) => Some(Self::RecordingDuration(Some(secs))),
                        None => {
                            warn!("malformed payload on {}: {}", topic, payload);
                            None
                        }
                    }
                }
            }
            other => {
                warn!("ignoring event on unrecognized topic: {}", other);
                None
            }
        }
    }
}

/// Push-subscription boundary to the remote recorder service
///
/// Subscribing yields a channel of raw payloads for one topic; dropping the
/// receiver cancels the subscription.
#[async_trait::async_trait]
pub trait EventChannel: Send + Sync {
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<Value>>;
}
