use std::time::Duration;

use thiserror::Error;

/// Failure carried out of a sampling or periodic callback.
///
/// Callback failures are logged and surfaced on the status handle; they
/// never terminate the tick loop.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("sampling loop already running")]
    AlreadyRunning,
    #[error("sampling loop not running")]
    NotRunning,
    #[error("sampling loop did not stop within {0:?}")]
    JoinTimeout(Duration),
}
