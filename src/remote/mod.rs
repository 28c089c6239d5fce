//! Boundary to the remote recorder service
//!
//! Two halves: `CommandGateway` for request/response command invocation and
//! `EventChannel` for push-event subscriptions. `NatsRemote` implements both
//! over NATS; the synchronization core only ever sees the traits.

pub mod events;
pub mod gateway;
pub mod nats;

pub use events::{topics, EventChannel, RecorderEvent};
pub use gateway::CommandGateway;
pub use nats::{CommandReply, NatsRemote};
