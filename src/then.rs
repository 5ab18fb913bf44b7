use crate::default::require_default;
use crate::eventual::{pair, Eventual};
use crate::executor::ExecutorHandle;
use crate::waitable::{deadline_after, Chaining, Continuation, DEFAULT_WAIT_LIMIT};

use std::sync::Arc;
use std::time::Duration;

/// Creates an eventual that resolves with the continuation's return
/// value once `input` becomes ready.
///
/// The continuation receives the ready input eventual and returns a
/// plain value. If the input carries an error, the continuation is not
/// invoked and the error is forwarded to the result unchanged. If
/// waiting exceeds `limit`, the result resolves with
/// [`WaitError::TimedOut`](crate::WaitError::TimedOut).
///
/// # Arguments
///
/// * `executor` - Waits for `input` to become ready.
/// * `limit` - Maximum total time to wait for `input`.
/// * `input` - The eventual to attach the continuation to.
/// * `cont` - Continuation invoked with the ready input eventual.
pub fn then_with<T, U, F>(
    executor: &ExecutorHandle,
    limit: Duration,
    input: Eventual<T>,
    cont: F,
) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> U + Send + 'static,
{
    let (promise, result) = pair();

    executor.submit(Box::new(Continuation::new(
        deadline_after(limit),
        input,
        promise,
        cont,
    )));

    result
}

/// [`then_with`] with the default wait limit of one hour.
pub fn then_on<T, U, F>(executor: &ExecutorHandle, input: Eventual<T>, cont: F) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> U + Send + 'static,
{
    then_with(executor, DEFAULT_WAIT_LIMIT, input, cont)
}

/// [`then_with`] on the installed default executor.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn then_within<T, U, F>(limit: Duration, input: Eventual<T>, cont: F) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> U + Send + 'static,
{
    then_with(&require_default(), limit, input, cont)
}

/// [`then_with`] on the installed default executor, with the default
/// wait limit of one hour.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn then<T, U, F>(input: Eventual<T>, cont: F) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> U + Send + 'static,
{
    then_within(DEFAULT_WAIT_LIMIT, input, cont)
}

/// Creates an eventual that resolves once both `input` and the
/// eventual returned by the continuation become ready.
///
/// The continuation receives the ready input eventual and returns
/// another eventual; its result is forwarded into the returned one by
/// a second stage submitted to the same executor. The second stage
/// inherits the remaining time of `limit`, so the combined wait never
/// exceeds it. If the executor is dropped before the second stage can
/// be submitted, the result resolves with
/// [`WaitError::NoExecutor`](crate::WaitError::NoExecutor).
///
/// # Arguments
///
/// * `executor` - Waits for both stages to become ready.
/// * `limit` - Maximum total time to wait for both stages.
/// * `input` - The eventual to attach the continuation to.
/// * `cont` - Continuation returning the inner eventual.
pub fn chain_with<T, U, F>(
    executor: &ExecutorHandle,
    limit: Duration,
    input: Eventual<T>,
    cont: F,
) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> Eventual<U> + Send + 'static,
{
    let (promise, result) = pair();

    executor.submit(Box::new(Chaining::new(
        deadline_after(limit),
        Arc::downgrade(executor),
        input,
        promise,
        cont,
    )));

    result
}

/// [`chain_with`] with the default wait limit of one hour.
pub fn chain_on<T, U, F>(executor: &ExecutorHandle, input: Eventual<T>, cont: F) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> Eventual<U> + Send + 'static,
{
    chain_with(executor, DEFAULT_WAIT_LIMIT, input, cont)
}

/// [`chain_with`] on the installed default executor.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn chain_within<T, U, F>(limit: Duration, input: Eventual<T>, cont: F) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> Eventual<U> + Send + 'static,
{
    chain_with(&require_default(), limit, input, cont)
}

/// [`chain_with`] on the installed default executor, with the default
/// wait limit of one hour.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn chain<T, U, F>(input: Eventual<T>, cont: F) -> Eventual<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> Eventual<U> + Send + 'static,
{
    chain_within(DEFAULT_WAIT_LIMIT, input, cont)
}
