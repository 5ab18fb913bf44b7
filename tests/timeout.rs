use eventide::{
    from_value, pair, then_with, Eventual, ExecutorBuilder, ExecutorHandle, WaitError,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn executor() -> ExecutorHandle {
    ExecutorBuilder::new()
        .quantum(Duration::from_millis(5))
        .build()
}

fn async_value<T: Send + 'static>(value: T, delay: Duration) -> Eventual<T> {
    let (promise, eventual) = pair();

    thread::spawn(move || {
        thread::sleep(delay);
        promise.set_value(value);
    });

    eventual
}

#[test]
fn test_overdue_wait_fails_with_timeout() {
    let executor = executor();

    // Never resolves; the promise is parked for the duration of the
    // test so the wait can only end by timing out.
    let (promise, pending) = pair::<i32>();

    let invoked = Arc::new(AtomicBool::new(false));
    let flag = invoked.clone();

    let start = Instant::now();
    let result = then_with(&executor, Duration::from_millis(100), pending, move |input| {
        flag.store(true, Ordering::SeqCst);
        input.take().unwrap().to_string()
    });

    let err = result.take().unwrap_err();

    assert!(
        matches!(err.downcast_ref::<WaitError>(), Some(WaitError::TimedOut)),
        "An overdue wait should fail with the timeout error"
    );
    assert!(
        !invoked.load(Ordering::SeqCst),
        "The continuation should not run on timeout"
    );
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "The timeout should trigger in the order of the limit"
    );

    drop(promise);
}

#[test]
fn test_ready_value_wins_over_expired_deadline() {
    let executor = executor();

    // Zero limit: the deadline is already behind by the time the
    // executor polls, so only the last-chance check can save it.
    let result = then_with(&executor, Duration::ZERO, from_value(7), |input| {
        input.take().unwrap() + 1
    });

    assert_eq!(
        result.take().unwrap(),
        8,
        "A value present at expiry should still be delivered"
    );
}

#[test]
fn test_larger_limit_succeeds_where_smaller_fails() {
    let executor = executor();

    let generous = then_with(
        &executor,
        Duration::from_secs(5),
        async_value(1821, Duration::from_millis(50)),
        |input| input.take().unwrap(),
    );
    assert_eq!(generous.take().unwrap(), 1821);

    let (promise, pending) = pair::<i32>();
    let strict = then_with(&executor, Duration::from_millis(20), pending, |input| {
        input.take().unwrap()
    });

    assert!(
        matches!(
            strict.take().unwrap_err().downcast_ref::<WaitError>(),
            Some(WaitError::TimedOut)
        ),
        "The stricter limit should time out on the same kind of wait"
    );

    drop(promise);
}

#[test]
fn test_zero_quantum_executor_still_delivers() {
    let executor = ExecutorBuilder::new().quantum(Duration::ZERO).build();

    let result = then_with(
        &executor,
        Duration::from_secs(5),
        async_value(42, Duration::from_millis(20)),
        |input| input.take().unwrap(),
    );

    assert_eq!(
        result.take().unwrap(),
        42,
        "Pure-check polling should not change correctness"
    );
}
