use crate::error::BoxError;
use crate::eventual::Eventual;
use crate::waitable::TimedWaitable;

use std::time::{Duration, Instant};

/// Terminal sink: runs the continuation on the ready input eventual and
/// produces no output.
///
/// There is no output promise to absorb failures, so errors carried by
/// the input (and errors produced while waiting) are raised on the
/// dispatch thread, as are panics from the continuation itself.
pub(crate) struct Observed<T, F> {
    deadline: Instant,
    input: Eventual<T>,
    cont: F,
}

impl<T, F> Observed<T, F> {
    pub(crate) fn new(deadline: Instant, input: Eventual<T>, cont: F) -> Self {
        Self {
            deadline,
            input,
            cont,
        }
    }
}

impl<T, F> TimedWaitable for Observed<T, F>
where
    T: Send + 'static,
    F: FnOnce(Eventual<T>) + Send + 'static,
{
    fn deadline(&self) -> Instant {
        self.deadline
    }

    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.input.wait_for(timeout)
    }

    fn complete(self: Box<Self>, err: Option<BoxError>) {
        let Observed { input, cont, .. } = *self;

        if let Some(err) = err {
            panic!("observed eventual failed: {err}");
        }

        if let Some(error) = input.take_error() {
            panic!("observed eventual failed: {error}");
        }

        cont(input);
    }
}
