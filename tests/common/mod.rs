#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use serde_json::Value;
use tokio::sync::mpsc;

use hts_recorder_client::{
    CommandGateway, EventChannel, HtsConfig, RecorderConfig, RecordingStatus, TradeAction,
    TradeEvent,
};

/// Scripted in-memory stand-in for the remote recorder's command side
pub struct MockGateway {
    pub status: Mutex<RecordingStatus>,
    pub history: Mutex<Vec<TradeEvent>>,
    pub last_config: Mutex<Option<RecorderConfig>>,
    pub fail: AtomicBool,
    pub status_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(RecordingStatus::default()),
            history: Mutex::new(Vec::new()),
            last_config: Mutex::new(None),
            fail: AtomicBool::new(false),
            status_calls: AtomicUsize::new(0),
        })
    }

    pub fn set_status(&self, status: RecordingStatus) {
        *self.status.lock().unwrap() = status;
    }

    pub fn set_history(&self, history: Vec<TradeEvent>) {
        *self.history.lock().unwrap() = history;
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self, op: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            bail!("{} failed: remote unavailable", op);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CommandGateway for MockGateway {
    async fn recording_status(&self) -> Result<RecordingStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available("get_recording_status")?;
        Ok(self.status.lock().unwrap().clone())
    }

    async fn start_monitoring(&self) -> Result<String> {
        self.check_available("start_monitoring")?;
        self.status.lock().unwrap().is_recording = true;
        Ok("Monitoring started".to_string())
    }

    async fn stop_monitoring(&self) -> Result<String> {
        self.check_available("stop_monitoring")?;
        {
            let mut status = self.status.lock().unwrap();
            status.is_recording = false;
            status.recording_duration = None;
        }
        Ok("Monitoring stopped".to_string())
    }

    async fn capture_screenshot(&self) -> Result<String> {
        self.check_available("capture_screenshot")?;
        Ok("/captures/screenshot-001.png".to_string())
    }

    async fn trade_history(&self) -> Result<Vec<TradeEvent>> {
        self.check_available("get_trade_history")?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn list_windows(&self) -> Result<Vec<String>> {
        self.check_available("list_windows")?;
        Ok(vec!["HTS - main".to_string(), "HTS - orders".to_string()])
    }

    async fn recorder_config(&self) -> Result<RecorderConfig> {
        self.check_available("get_config")?;
        Ok(sample_recorder_config())
    }

    async fn update_recorder_config(&self, config: RecorderConfig) -> Result<()> {
        self.check_available("update_config")?;
        *self.last_config.lock().unwrap() = Some(config);
        Ok(())
    }
}

/// Scripted in-memory stand-in for the push-event channel
///
/// Tests inject events through `emit`; subscriptions that should fail at
/// setup are listed in `fail_topics` before the session starts.
pub struct MockChannel {
    senders: Mutex<HashMap<String, mpsc::Sender<Value>>>,
    fail_topics: Mutex<HashSet<String>>,
}

impl MockChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            senders: Mutex::new(HashMap::new()),
            fail_topics: Mutex::new(HashSet::new()),
        })
    }

    pub fn refuse_topic(&self, topic: &str) {
        self.fail_topics.lock().unwrap().insert(topic.to_string());
    }

    /// Deliver a raw payload to the topic's subscriber
    pub async fn emit(&self, topic: &str, payload: Value) {
        let tx = {
            let senders = self.senders.lock().unwrap();
            senders
                .get(topic)
                .cloned()
                .unwrap_or_else(|| panic!("no subscriber for {}", topic))
        };
        // A closed receiver means the subscription was cancelled; delivery
        // into a torn-down session is a no-op, not a test failure.
        let _ = tx.send(payload).await;
    }
}

#[async_trait::async_trait]
impl EventChannel for MockChannel {
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<Value>> {
        if self.fail_topics.lock().unwrap().contains(topic) {
            bail!("subscription to {} refused", topic);
        }
        let (tx, rx) = mpsc::channel(16);
        self.senders.lock().unwrap().insert(topic.to_string(), tx);
        Ok(rx)
    }
}

pub fn sample_trade() -> TradeEvent {
    TradeEvent {
        action: TradeAction::Buy,
        timestamp: "2024-01-01T09:00:00Z".parse().unwrap(),
        screenshot_path: "/a/b.png".to_string(),
        window_title: "HTS".to_string(),
    }
}

pub fn sample_recorder_config() -> RecorderConfig {
    RecorderConfig {
        hts: HtsConfig {
            process_names: vec!["kiwoom.exe".to_string()],
            window_titles: vec!["HTS".to_string()],
            check_interval_ms: 1000,
        },
        output_dir: "./recordings".to_string(),
        fps: 30,
        enable_ocr: false,
    }
}
