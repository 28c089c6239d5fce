//! Status reconciliation core
//!
//! This module owns the state the presentation layer reads: the
//! `RecordingStatus` snapshot, the trade history, and the single
//! most-recent-error cell. Each lives in a watch cell with exactly one
//! writer group, so readers always observe complete, untorn values.

mod error;
mod status;
mod trades;

pub use error::ErrorState;
pub use status::StatusReconciler;
pub use trades::TradeLogCache;
