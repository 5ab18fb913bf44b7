mod default;
mod invoker;
mod polling;

pub use default::{DefaultExecutor, ExecutorBuilder};
pub use invoker::{Invoker, Job, ThreadInvoker, WorkerInvoker};
pub use polling::PollingExecutor;

use crate::waitable::Waitable;

use std::sync::Arc;

/// Shared handle to an executor.
pub type ExecutorHandle = Arc<dyn Executor>;

/// The component that waits on submitted [`Waitable`]s and eventually
/// dispatches each one.
///
/// A waitable is dispatched when its `wait` method reports readiness or
/// fails, or when the executor is stopped.
pub trait Executor: Send + Sync {
    /// Takes ownership of the waitable and eventually dispatches it.
    ///
    /// Never blocks the caller. Submitting to a stopped executor
    /// dispatches the waitable synchronously with
    /// [`WaitError::Stopped`](crate::WaitError::Stopped).
    fn submit(&self, waitable: Box<dyn Waitable>);

    /// Stops the executor, failing every waitable it currently holds
    /// with [`WaitError::Stopped`](crate::WaitError::Stopped).
    ///
    /// Idempotent; the executor is permanently terminal afterwards.
    fn stop(&self);
}
