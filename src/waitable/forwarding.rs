use crate::error::BoxError;
use crate::eventual::{Eventual, Promise};
use crate::waitable::TimedWaitable;

use std::time::{Duration, Instant};

/// Moves the input eventual's value or error into the output promise
/// unchanged. Bridges the two executor hops of a chained continuation.
pub(crate) struct Forwarding<T> {
    deadline: Instant,
    input: Eventual<T>,
    output: Promise<T>,
}

impl<T> Forwarding<T> {
    pub(crate) fn new(deadline: Instant, input: Eventual<T>, output: Promise<T>) -> Self {
        Self {
            deadline,
            input,
            output,
        }
    }
}

impl<T: Send + 'static> TimedWaitable for Forwarding<T> {
    fn deadline(&self) -> Instant {
        self.deadline
    }

    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.input.wait_for(timeout)
    }

    fn complete(self: Box<Self>, err: Option<BoxError>) {
        if let Some(err) = err {
            self.output.set_error(err);
            return;
        }

        match self.input.take() {
            Ok(value) => self.output.set_value(value),
            Err(error) => self.output.set_error(error),
        }
    }
}
