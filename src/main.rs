use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use hts_recorder_client::{
    CommandGateway, Config, EventChannel, NatsRemote, RecorderSession, SessionConfig,
};

#[derive(Parser)]
#[command(about = "Follow a remote HTS recorder's status from the terminal")]
struct Args {
    /// Config file, without extension (e.g. config/recorder-client)
    #[arg(long, default_value = "config/recorder-client")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("hts-recorder-client v0.1.0");
    info!(
        "Remote: {} (subject prefix: {})",
        cfg.remote.url, cfg.remote.subject_prefix
    );

    let remote = Arc::new(
        NatsRemote::connect(&cfg.remote.url, cfg.remote.subject_prefix.clone()).await?,
    );
    let gateway: Arc<dyn CommandGateway> = remote.clone();
    let events: Arc<dyn EventChannel> = remote;

    let session_config = SessionConfig {
        poll_interval: Duration::from_millis(cfg.sync.poll_interval_ms),
        ..SessionConfig::default()
    };
    let session = RecorderSession::start(gateway, events, session_config).await?;

    info!(
        "Loaded {} trade events",
        session.trade_history().borrow().len()
    );

    let mut status = session.status();
    let mut last_error = session.last_error();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = status.borrow_and_update().clone();
                info!(
                    "recording={} hts_detected={} hts_name={:?} duration={:?}",
                    snapshot.is_recording,
                    snapshot.hts_detected,
                    snapshot.hts_name,
                    snapshot.recording_duration
                );
            }
            changed = last_error.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(message) = last_error.borrow_and_update().clone() {
                    warn!("{}", message);
                }
            }
        }
    }

    session.shutdown();

    Ok(())
}
