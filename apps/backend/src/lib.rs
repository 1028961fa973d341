#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod table;
pub mod telemetry;
pub mod utils;


// Re-exports for public API
pub use config::timing::ResolutionDelays;
pub use error::AppError;
pub use errors::{ErrorCode, Rejection};
pub use table::{GameTable, TableRegistry};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
