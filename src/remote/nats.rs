use anyhow::{bail, Context, Result};
use async_nats::Client;
use futures::stream::StreamExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::models::{RecorderConfig, RecordingStatus, TradeEvent};
use crate::remote::events::EventChannel;
use crate::remote::gateway::CommandGateway;

/// Buffered events per subscription before backpressure on the forwarder
const EVENT_BUFFER: usize = 64;

/// Reply envelope for recorder commands
///
/// `ok: true` carries `data`; `ok: false` carries a human-readable `error`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandReply<T> {
    pub ok: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// NATS binding to the remote recorder service
///
/// Commands are request/reply on `<prefix>.cmd.<name>`; push events arrive on
/// `<prefix>.event.<topic>`.
pub struct NatsRemote {
    client: Client,
    prefix: String,
}

impl NatsRemote {
    /// Connect to the NATS server the recorder service is reachable on
    pub async fn connect(url: &str, prefix: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client, prefix })
    }

    async fn request_raw(&self, name: &str, payload: Vec<u8>) -> Result<Value> {
        let subject = format!("{}.cmd.{}", self.prefix, name);

        let message = self
            .client
            .request(subject.clone(), payload.into())
            .await
            .with_context(|| format!("Command request failed: {}", subject))?;

        let reply: CommandReply<Value> = serde_json::from_slice(&message.payload)
            .with_context(|| format!("Malformed reply on {}", subject))?;

        if reply.ok {
            Ok(reply.data.unwrap_or(Value::Null))
        } else {
            bail!(reply
                .error
                .unwrap_or_else(|| format!("Remote command {} failed", name)))
        }
    }

    async fn request<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let data = self.request_raw(name, Vec::new()).await?;
        serde_json::from_value(data)
            .with_context(|| format!("Unexpected data shape in {} reply", name))
    }
}

#[async_trait::async_trait]
impl CommandGateway for NatsRemote {
    async fn recording_status(&self) -> Result<RecordingStatus> {
        self.request("get_recording_status").await
    }

    async fn start_monitoring(&self) -> Result<String> {
        self.request("start_monitoring").await
    }

    async fn stop_monitoring(&self) -> Result<String> {
        self.request("stop_monitoring").await
    }

    async fn capture_screenshot(&self) -> Result<String> {
        self.request("capture_screenshot").await
    }

    async fn trade_history(&self) -> Result<Vec<TradeEvent>> {
        self.request("get_trade_history").await
    }

    async fn list_windows(&self) -> Result<Vec<String>> {
        self.request("list_windows").await
    }

    async fn recorder_config(&self) -> Result<RecorderConfig> {
        self.request("get_config").await
    }

    async fn update_recorder_config(&self, config: RecorderConfig) -> Result<()> {
        let payload = serde_json::to_vec(&config)?;
        self.request_raw("update_config", payload).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl EventChannel for NatsRemote {
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<Value>> {
        let subject = format!("{}.event.{}", self.prefix, topic);

        let mut subscriber = self
            .client
            .subscribe(subject.clone())
            .await
            .with_context(|| format!("Failed to subscribe to {}", subject))?;

        info!("Subscribed to {}", subject);

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        // Forward raw payloads as JSON values; the session validates them
        // against the known event kinds.
        tokio::spawn(async move {
            while let Some(message) = subscriber.next().await {
                let payload = if message.payload.is_empty() {
                    Value::Null
                } else {
                    match serde_json::from_slice(&message.payload) {
                        Ok(value) => value,
                        Err(e) => {
                            warn!("Dropping undecodable payload on {}: {}", subject, e);
                            continue;
                        }
                    }
                };

                if tx.send(payload).await.is_err() {
                    // Receiver dropped: subscription cancelled
                    break;
                }
            }
        });

        Ok(rx)
    }
}
