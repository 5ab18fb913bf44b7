use eventide::{
    default_executor, from_value, pair, set_default, then, then_on, BoxError, Executor,
    ExecutorBuilder, ExecutorHandle, Invoker, Job, PollingExecutor, WaitError, Waitable,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn executor() -> ExecutorHandle {
    ExecutorBuilder::new()
        .quantum(Duration::from_millis(1))
        .build()
}

#[test]
fn test_stop_fails_pending_waits() {
    let executor = executor();

    // Never resolves; only a stop can end this wait.
    let (promise, pending) = pair::<i32>();
    let result = then_on(&executor, pending, |input| input.take().unwrap());

    executor.stop();

    let err = result.take().unwrap_err();

    assert!(
        matches!(err.downcast_ref::<WaitError>(), Some(WaitError::Stopped)),
        "A stopped executor should fail the waits it holds"
    );

    drop(promise);
}

#[test]
fn test_submit_after_stop_fails_synchronously() {
    let executor = executor();

    executor.stop();

    let result = then_on(&executor, from_value(1), |input| input.take().unwrap());

    assert!(
        result.is_ready(),
        "A submission after stop should be failed before submit returns"
    );
    assert!(
        matches!(
            result.take().unwrap_err().downcast_ref::<WaitError>(),
            Some(WaitError::Stopped)
        ),
        "A submission after stop should carry the stopped error"
    );
}

#[test]
fn test_stop_is_idempotent() {
    let executor = executor();

    executor.stop();
    executor.stop();

    let result = then_on(&executor, from_value(2), |input| input.take().unwrap());
    assert!(result.take().is_err());
}

#[test]
fn test_dropping_the_executor_fails_pending_waits() {
    let (promise, pending) = pair::<i32>();

    let result = {
        let executor = executor();
        then_on(&executor, pending, |input| input.take().unwrap())
    };

    let err = result.take().unwrap_err();

    assert!(
        matches!(err.downcast_ref::<WaitError>(), Some(WaitError::Stopped)),
        "Dropping the executor should fail its pending waits, not leak them"
    );

    drop(promise);
}

#[test]
fn test_many_concurrent_waits_resolve() {
    let executor = executor();

    let results: Vec<_> = (0..100u64)
        .map(|index| {
            let (promise, eventual) = pair();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(5 + (index % 7)));
                promise.set_value(index);
            });
            then_on(&executor, eventual, |input| input.take().unwrap())
        })
        .collect();

    let total: u64 = results
        .into_iter()
        .map(|result| result.take().unwrap())
        .sum();

    assert_eq!(total, (0..100u64).sum::<u64>());
}

/// Runs jobs inline on the calling thread, making executor behavior
/// fully deterministic for these tests.
struct InlineInvoker;

impl Invoker for InlineInvoker {
    fn invoke(&self, job: Job) {
        job();
    }
}

impl Default for InlineInvoker {
    fn default() -> Self {
        InlineInvoker
    }
}

/// A waitable with a scripted wait outcome that records its dispatches.
struct CountingWait {
    outcome: Option<Result<bool, &'static str>>,
    dispatches: Arc<AtomicUsize>,
    dispatched_err: Arc<Mutex<Option<String>>>,
}

impl Waitable for CountingWait {
    fn wait(&mut self, _timeout: Duration) -> Result<bool, BoxError> {
        match self.outcome.take().expect("waitable polled after readiness") {
            Ok(ready) => Ok(ready),
            Err(message) => Err(message.into()),
        }
    }

    fn dispatch(self: Box<Self>, err: Option<BoxError>) {
        self.dispatches.fetch_add(1, Ordering::SeqCst);
        *self.dispatched_err.lock().unwrap() = err.map(|err| err.to_string());
    }
}

#[test]
fn test_ready_waitable_is_dispatched_exactly_once() {
    let executor = PollingExecutor::<InlineInvoker, InlineInvoker>::new(Duration::ZERO);

    let dispatches = Arc::new(AtomicUsize::new(0));
    let dispatched_err = Arc::new(Mutex::new(None));

    executor.submit(Box::new(CountingWait {
        outcome: Some(Ok(true)),
        dispatches: dispatches.clone(),
        dispatched_err: dispatched_err.clone(),
    }));

    assert_eq!(
        dispatches.load(Ordering::SeqCst),
        1,
        "A ready waitable should be dispatched exactly once"
    );
    assert!(
        dispatched_err.lock().unwrap().is_none(),
        "A ready waitable should be dispatched without an error"
    );
}

#[test]
fn test_failing_wait_is_dispatched_with_its_error() {
    let executor = PollingExecutor::<InlineInvoker, InlineInvoker>::new(Duration::ZERO);

    let dispatches = Arc::new(AtomicUsize::new(0));
    let dispatched_err = Arc::new(Mutex::new(None));

    executor.submit(Box::new(CountingWait {
        outcome: Some(Err("wait blew up")),
        dispatches: dispatches.clone(),
        dispatched_err: dispatched_err.clone(),
    }));

    assert_eq!(dispatches.load(Ordering::SeqCst), 1);
    assert_eq!(
        dispatched_err.lock().unwrap().as_deref(),
        Some("wait blew up"),
        "The wait error should reach dispatch unchanged"
    );
}

#[test]
fn test_default_executor_scope_restores_in_lifo_order() {
    assert!(
        default_executor().is_none(),
        "No default should be installed at test start"
    );

    let outer = executor();
    let inner = executor();

    {
        let _outer_guard = set_default(outer.clone());

        let result = then(from_value(10), |input| input.take().unwrap() + 1);
        assert_eq!(result.take().unwrap(), 11);

        {
            let _inner_guard = set_default(inner.clone());

            assert!(
                default_executor().is_some(),
                "The inner installation should be visible"
            );

            let result = then(from_value(20), |input| input.take().unwrap() + 1);
            assert_eq!(result.take().unwrap(), 21);
        }

        assert!(
            default_executor().is_some(),
            "Dropping the inner guard should restore the outer installation"
        );
    }

    assert!(
        default_executor().is_none(),
        "Dropping the outer guard should leave no default installed"
    );
}
