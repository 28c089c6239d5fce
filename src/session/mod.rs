//! Client session management
//!
//! This module provides the `RecorderSession` abstraction that manages:
//! - Command issuance (start/stop/capture) with forced status refresh
//! - Event-channel subscriptions and the background polling loop
//! - Trade history loading at startup and on request
//! - Aggregated teardown of every background task

mod config;
mod controller;

pub use config::SessionConfig;
pub use controller::RecorderSession;
