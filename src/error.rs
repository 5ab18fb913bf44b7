//! Error types for waiting on eventuals.

use std::any::Any;

use thiserror::Error;

/// Boxed error carried by an [`Eventual`](crate::Eventual).
///
/// User errors travel through the library unchanged and can be recovered
/// with [`Error::downcast_ref`](std::error::Error) at retrieval time.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the library itself while waiting on an eventual.
///
/// Every variant is placed into the affected output eventual; retrieval
/// surfaces it as a [`BoxError`] that downcasts back to `WaitError`.
#[derive(Error, Debug)]
pub enum WaitError {
    /// The wait limit elapsed before the eventual became ready.
    #[error("wait limit exceeded")]
    TimedOut,

    /// The executor was stopped while the eventual was still being
    /// waited on, or the submission happened after the stop.
    #[error("executor stopped")]
    Stopped,

    /// A chained continuation could not reach its executor because the
    /// executor had already been dropped.
    #[error("no executor available")]
    NoExecutor,

    /// The user continuation panicked; the panic message is captured.
    #[error("continuation panicked: {0}")]
    Panicked(String),

    /// The promise side was dropped without producing a result.
    #[error("promise dropped without a result")]
    Abandoned,
}

/// Extracts a printable message from a panic payload.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
