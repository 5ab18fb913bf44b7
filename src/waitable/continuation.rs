use crate::error::{panic_message, BoxError, WaitError};
use crate::eventual::{Eventual, Promise};
use crate::waitable::TimedWaitable;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Runs a value-returning continuation on the ready input eventual and
/// resolves the output promise with its return value.
///
/// If the input eventual carries an error, the continuation is not
/// invoked and the error is forwarded verbatim. A panicking
/// continuation resolves the output with [`WaitError::Panicked`].
pub(crate) struct Continuation<T, U, F> {
    deadline: Instant,
    input: Eventual<T>,
    output: Promise<U>,
    cont: F,
}

impl<T, U, F> Continuation<T, U, F> {
    pub(crate) fn new(deadline: Instant, input: Eventual<T>, output: Promise<U>, cont: F) -> Self {
        Self {
            deadline,
            input,
            output,
            cont,
        }
    }
}

impl<T, U, F> TimedWaitable for Continuation<T, U, F>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Eventual<T>) -> U + Send + 'static,
{
    fn deadline(&self) -> Instant {
        self.deadline
    }

    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.input.wait_for(timeout)
    }

    fn complete(self: Box<Self>, err: Option<BoxError>) {
        let Continuation {
            input,
            output,
            cont,
            ..
        } = *self;

        if let Some(err) = err {
            output.set_error(err);
            return;
        }

        if let Some(error) = input.take_error() {
            output.set_error(error);
            return;
        }

        match catch_unwind(AssertUnwindSafe(move || cont(input))) {
            Ok(value) => output.set_value(value),
            Err(payload) => output.set_error(WaitError::Panicked(panic_message(payload))),
        }
    }
}
