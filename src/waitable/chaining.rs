use crate::error::{panic_message, BoxError, WaitError};
use crate::eventual::{Eventual, Promise};
use crate::executor::Executor;
use crate::waitable::{Forwarding, TimedWaitable};

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Weak;
use std::time::{Duration, Instant};

/// Runs a continuation that returns another eventual.
///
/// Once the input is ready, the continuation produces an inner
/// eventual; a [`Forwarding`] stage over that inner eventual is then
/// submitted to the same executor, carrying this adapter's own deadline
/// so the two-stage wait still respects the caller's limit. The
/// executor is held weakly: a chained continuation must not keep its
/// executor alive past its owner's intent, and a dead executor fails
/// the output with [`WaitError::NoExecutor`].
pub(crate) struct Chaining<T, U, F> {
    deadline: Instant,
    executor: Weak<dyn Executor>,
    input: Eventual<T>,
    output: Promise<U>,
    cont: F,
}

impl<T, U, F> Chaining<T, U, F> {
    pub(crate) fn new(
        deadline: Instant,
        executor: Weak<dyn Executor>,
        input: Eventual<T>,
        output: Promise<U>,
        cont: F,
    ) -> Self {
        Self {
            deadline,
            executor,
            input,
            output,
            cont,
        }
    }
}

impl<T, U, F> TimedWaitable for Chaining<T, U, F>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> Eventual<U> + Send + 'static,
{
    fn deadline(&self) -> Instant {
        self.deadline
    }

    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.input.wait_for(timeout)
    }

    fn complete(self: Box<Self>, err: Option<BoxError>) {
        let Chaining {
            deadline,
            executor,
            input,
            output,
            cont,
        } = *self;

        if let Some(err) = err {
            output.set_error(err);
            return;
        }

        if let Some(error) = input.take_error() {
            output.set_error(error);
            return;
        }

        let inner = match catch_unwind(AssertUnwindSafe(move || cont(input))) {
            Ok(inner) => inner,
            Err(payload) => {
                output.set_error(WaitError::Panicked(panic_message(payload)));
                return;
            }
        };

        match executor.upgrade() {
            Some(executor) => {
                executor.submit(Box::new(Forwarding::new(deadline, inner, output)));
            }
            None => output.set_error(WaitError::NoExecutor),
        }
    }
}
