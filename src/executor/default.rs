use crate::executor::{ExecutorHandle, PollingExecutor, ThreadInvoker, WorkerInvoker};

use std::sync::Arc;
use std::time::Duration;

/// The stock executor: a [`PollingExecutor`] whose poll loop runs on
/// fresh tracked threads and whose dispatch work is serialized onto one
/// dedicated worker.
pub type DefaultExecutor = PollingExecutor<ThreadInvoker, WorkerInvoker>;

/// Builder for configuring and creating a [`DefaultExecutor`].
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
///
/// let executor = ExecutorBuilder::new()
///     .quantum(Duration::from_millis(10))
///     .build();
/// ```
pub struct ExecutorBuilder {
    /// Per-poll wait budget given to each waitable.
    quantum: Duration,
}

impl ExecutorBuilder {
    /// Creates a builder with a 10ms quantum.
    pub fn new() -> Self {
        Self {
            quantum: Duration::from_millis(10),
        }
    }

    /// Sets the per-poll wait budget.
    ///
    /// Zero is allowed and turns polling into a pure check; expect one
    /// saturated core while waitables are pending.
    pub fn quantum(mut self, quantum: Duration) -> Self {
        self.quantum = quantum;
        self
    }

    /// Builds the executor with the configured options.
    pub fn build(self) -> ExecutorHandle {
        Arc::new(DefaultExecutor::with_invokers(
            self.quantum,
            ThreadInvoker::new(),
            WorkerInvoker::new(),
        ))
    }
}

impl Default for ExecutorBuilder {
    /// Creates a default `ExecutorBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
