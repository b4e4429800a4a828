//! Shared utilities for the consensus audit.

pub mod logging;
pub mod stats;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use stats::CountSummary;
pub use time::format_elapsed;
