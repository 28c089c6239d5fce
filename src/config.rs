use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Deserialize)]
pub struct RemoteConfig {
    /// NATS URL the recorder service is reachable on
    pub url: String,
    /// Subject prefix the service publishes under
    pub subject_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct SyncConfig {
    /// Status poll cadence in milliseconds
    pub poll_interval_ms: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
