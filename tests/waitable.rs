use eventide::{BoxError, TimedWaitable, WaitError, Waitable};

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// A waitable whose readiness is scripted and whose received timeouts
/// are recorded, standing in for a real eventual.
struct ScriptedWait {
    deadline: Instant,
    ready: Box<dyn FnMut() -> bool + Send>,
    timeouts: Arc<Mutex<Vec<Duration>>>,
}

impl ScriptedWait {
    fn new(limit: Duration, ready: impl FnMut() -> bool + Send + 'static) -> Self {
        Self {
            deadline: Instant::now() + limit,
            ready: Box::new(ready),
            timeouts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl TimedWaitable for ScriptedWait {
    fn deadline(&self) -> Instant {
        self.deadline
    }

    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.timeouts.lock().unwrap().push(timeout);
        (self.ready)()
    }

    fn complete(self: Box<Self>, _err: Option<BoxError>) {}
}

#[test]
fn test_wait_reports_ready_before_deadline() {
    let mut waitable = ScriptedWait::new(Duration::from_secs(3600), || true);

    let result = waitable.wait(Duration::from_millis(10));

    assert!(matches!(result, Ok(true)), "Ready waitable should report ready");
}

#[test]
fn test_wait_reports_not_ready_before_deadline() {
    let mut waitable = ScriptedWait::new(Duration::from_secs(3600), || false);

    for _ in 0..3 {
        let result = waitable.wait(Duration::from_millis(1));
        assert!(
            matches!(result, Ok(false)),
            "Pending waitable should report not ready while the deadline is ahead"
        );
    }

    assert_eq!(
        *waitable.timeouts.lock().unwrap(),
        vec![Duration::from_millis(1); 3],
        "Every wait should have been delegated with the full timeout"
    );
}

#[test]
fn test_expired_wait_does_one_zero_check_then_times_out() {
    let mut waitable = ScriptedWait::new(Duration::from_millis(10), || false);

    thread::sleep(Duration::from_millis(20));

    let err = waitable.wait(Duration::from_millis(10)).unwrap_err();

    assert!(
        matches!(err.downcast_ref::<WaitError>(), Some(WaitError::TimedOut)),
        "An expired waitable should fail with the timeout error"
    );
    assert_eq!(
        *waitable.timeouts.lock().unwrap(),
        vec![Duration::ZERO],
        "Exactly one zero-wait check should have run after expiry"
    );
}

#[test]
fn test_result_arriving_at_expiry_still_wins() {
    let mut waitable = ScriptedWait::new(Duration::from_millis(10), || true);

    thread::sleep(Duration::from_millis(20));

    let result = waitable.wait(Duration::from_millis(10));

    assert!(
        matches!(result, Ok(true)),
        "Readiness observed by the zero-wait check should win over expiry"
    );
}

#[test]
fn test_deadline_is_exposed_for_ordering() {
    let sooner = ScriptedWait::new(Duration::from_secs(10), || false);
    let later = ScriptedWait::new(Duration::from_secs(20), || false);

    let sooner_deadline = Waitable::deadline(&sooner).expect("deadline should be exposed");
    let later_deadline = Waitable::deadline(&later).expect("deadline should be exposed");

    assert!(
        sooner_deadline < later_deadline,
        "Deadlines should order by wait limit"
    );
}

/// A waitable with no deadline at all.
struct Unbounded;

impl Waitable for Unbounded {
    fn wait(&mut self, _timeout: Duration) -> Result<bool, BoxError> {
        Ok(false)
    }

    fn dispatch(self: Box<Self>, _err: Option<BoxError>) {}
}

#[test]
fn test_plain_waitable_has_no_deadline() {
    assert!(
        Unbounded.deadline().is_none(),
        "A waitable without a deadline should expose none"
    );
}
