use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a client session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier, used for log correlation
    pub session_id: String,

    /// Background status-poll cadence
    ///
    /// The poll is a correctness backstop against missed or reordered push
    /// events, not the primary update path. Default: 2 seconds.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            poll_interval: Duration::from_secs(2),
        }
    }
}
