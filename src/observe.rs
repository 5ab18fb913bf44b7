use crate::default::require_default;
use crate::eventual::Eventual;
use crate::executor::ExecutorHandle;
use crate::waitable::{deadline_after, Observed, DEFAULT_WAIT_LIMIT};

use std::time::Duration;

/// Watches `input` and runs the continuation once it becomes ready.
///
/// A terminal attach: there is no output eventual. Errors carried by
/// the input, wait failures (timeout, stop) and panics from the
/// continuation all propagate on the thread the continuation is
/// dispatched on. Observing is fire-and-handle-locally.
///
/// # Arguments
///
/// * `executor` - Waits for `input` to become ready.
/// * `limit` - Maximum total time to wait for `input`.
/// * `input` - The eventual to observe.
/// * `cont` - Continuation invoked with the ready input eventual.
pub fn observe_with<T, F>(executor: &ExecutorHandle, limit: Duration, input: Eventual<T>, cont: F)
where
    T: Send + 'static,
    F: FnOnce(Eventual<T>) + Send + 'static,
{
    executor.submit(Box::new(Observed::new(deadline_after(limit), input, cont)));
}

/// [`observe_with`] with the default wait limit of one hour.
pub fn observe_on<T, F>(executor: &ExecutorHandle, input: Eventual<T>, cont: F)
where
    T: Send + 'static,
    F: FnOnce(Eventual<T>) + Send + 'static,
{
    observe_with(executor, DEFAULT_WAIT_LIMIT, input, cont);
}

/// [`observe_with`] on the installed default executor.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn observe_within<T, F>(limit: Duration, input: Eventual<T>, cont: F)
where
    T: Send + 'static,
    F: FnOnce(Eventual<T>) + Send + 'static,
{
    observe_with(&require_default(), limit, input, cont);
}

/// [`observe_with`] on the installed default executor, with the
/// default wait limit of one hour.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn observe<T, F>(input: Eventual<T>, cont: F)
where
    T: Send + 'static,
    F: FnOnce(Eventual<T>) + Send + 'static,
{
    observe_within(DEFAULT_WAIT_LIMIT, input, cont);
}
