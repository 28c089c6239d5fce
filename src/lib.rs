pub mod config;
pub mod models;
pub mod remote;
pub mod session;
pub mod sync;

pub use config::Config;
pub use models::{HtsConfig, RecorderConfig, RecordingStatus, TradeAction, TradeEvent};
pub use remote::{topics, CommandGateway, CommandReply, EventChannel, NatsRemote, RecorderEvent};
pub use session::{RecorderSession, SessionConfig};
pub use sync::{ErrorState, StatusReconciler, TradeLogCache};
