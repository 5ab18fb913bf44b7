use crate::error::{BoxError, WaitError};

use std::mem;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Creates a linked [`Promise`]/[`Eventual`] pair.
///
/// The promise is the write side and the eventual the read side of a
/// one-shot result slot. Completing the promise (or dropping it) makes
/// the eventual ready exactly once.
///
/// # Examples
///
/// ```rust,ignore
/// let (promise, eventual) = pair();
///
/// std::thread::spawn(move || promise.set_value(1821));
///
/// assert_eq!(eventual.take().unwrap(), 1821);
/// ```
pub fn pair<T>() -> (Promise<T>, Eventual<T>) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State::Pending),
        ready: Condvar::new(),
    });

    (
        Promise {
            shared: shared.clone(),
        },
        Eventual { shared },
    )
}

/// Returns an eventual that is already resolved with the given value.
pub fn from_value<T>(value: T) -> Eventual<T> {
    let (promise, eventual) = pair();
    promise.set_value(value);
    eventual
}

/// Returns an eventual that is already resolved with the given error.
pub fn from_error<T>(error: impl Into<BoxError>) -> Eventual<T> {
    let (promise, eventual) = pair();
    promise.set_error(error);
    eventual
}

/// One-shot result slot of an eventual.
enum State<T> {
    /// No result yet.
    Pending,

    /// The promise side produced a result.
    Resolved(Result<T, BoxError>),

    /// The result has been moved out by `take`.
    Taken,
}

/// State shared between a promise and its eventual.
struct Shared<T> {
    /// Current resolution state.
    state: Mutex<State<T>>,

    /// Signalled once the state leaves `Pending`.
    ready: Condvar,
}

/// The write side of an eventual.
///
/// A `Promise` resolves its eventual exactly once, with either a value
/// or an error. Both setters consume the promise, so double completion
/// does not compile. Dropping an unresolved promise resolves the
/// eventual with [`WaitError::Abandoned`] so that no waiter blocks
/// forever on a result that can no longer arrive.
pub struct Promise<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Promise<T> {
    /// Resolves the eventual with a value.
    pub fn set_value(self, value: T) {
        self.resolve(Ok(value));
    }

    /// Resolves the eventual with an error.
    pub fn set_error(self, error: impl Into<BoxError>) {
        self.resolve(Err(error.into()));
    }

    fn resolve(self, result: Result<T, BoxError>) {
        let mut state = self.shared.state.lock().unwrap();
        *state = State::Resolved(result);
        self.shared.ready.notify_all();
    }
}

impl<T> Drop for Promise<T> {
    /// Resolves the eventual with [`WaitError::Abandoned`] if the
    /// promise never produced a result.
    fn drop(&mut self) {
        let mut state = self.shared.state.lock().unwrap();

        if matches!(*state, State::Pending) {
            *state = State::Resolved(Err(WaitError::Abandoned.into()));
            self.shared.ready.notify_all();
        }
    }
}

/// The read side of a one-shot asynchronous result.
///
/// An `Eventual` becomes ready when its [`Promise`] resolves it with a
/// value or an error. Readiness can be polled with a bounded wait via
/// [`wait_for`](Self::wait_for); the result is moved out exactly once
/// via [`take`](Self::take).
pub struct Eventual<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Eventual<T> {
    /// Waits at most `timeout` for the eventual to become ready.
    ///
    /// Returns `true` if the eventual is ready. A zero timeout performs
    /// a pure readiness check without blocking. Once this method has
    /// returned `true` it keeps returning `true` immediately.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let mut state = self.shared.state.lock().unwrap();

        if !matches!(*state, State::Pending) {
            return true;
        }

        let deadline = Instant::now().checked_add(timeout);

        loop {
            if !matches!(*state, State::Pending) {
                return true;
            }

            // A timeout too large to represent means waiting unbounded.
            let Some(deadline) = deadline else {
                state = self.shared.ready.wait(state).unwrap();
                continue;
            };

            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            let (next, _) = self
                .shared
                .ready
                .wait_timeout(state, deadline - now)
                .unwrap();
            state = next;
        }
    }

    /// Returns `true` if the eventual is ready, without blocking.
    pub fn is_ready(&self) -> bool {
        self.wait_for(Duration::ZERO)
    }

    /// Blocks until the eventual is ready, then moves the result out.
    ///
    /// # Panics
    ///
    /// Panics if the result has already been taken.
    pub fn take(&self) -> Result<T, BoxError> {
        let mut state = self.shared.state.lock().unwrap();

        while matches!(*state, State::Pending) {
            state = self.shared.ready.wait(state).unwrap();
        }

        match mem::replace(&mut *state, State::Taken) {
            State::Resolved(result) => result,
            State::Taken => panic!("eventual result already taken"),
            State::Pending => unreachable!(),
        }
    }

    /// Moves the error out if the eventual is resolved with one.
    ///
    /// Returns `None` when the eventual is pending or carries a value.
    /// Used by adapters to forward input errors without running the
    /// continuation.
    pub(crate) fn take_error(&self) -> Option<BoxError> {
        let mut state = self.shared.state.lock().unwrap();

        if !matches!(*state, State::Resolved(Err(_))) {
            return None;
        }

        match mem::replace(&mut *state, State::Taken) {
            State::Resolved(Err(error)) => Some(error),
            _ => unreachable!(),
        }
    }
}
