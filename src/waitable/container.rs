use crate::error::BoxError;
use crate::eventual::{Eventual, Promise};
use crate::waitable::TimedWaitable;

use std::time::{Duration, Instant};

/// Waits for every eventual in a container and promises the whole
/// container back once all of them are ready.
///
/// Each element is given the full timeout in turn, so the wall-clock
/// cost of one pass scales with the number of still-pending elements.
/// The deadline applies to the aggregate, not to individual elements.
/// No aggregate error is synthesized: per-element errors surface when
/// the caller takes each element.
pub(crate) struct AllContainer<T> {
    deadline: Instant,
    inputs: Vec<Eventual<T>>,
    output: Promise<Vec<Eventual<T>>>,
}

impl<T> AllContainer<T> {
    pub(crate) fn new(
        deadline: Instant,
        inputs: Vec<Eventual<T>>,
        output: Promise<Vec<Eventual<T>>>,
    ) -> Self {
        Self {
            deadline,
            inputs,
            output,
        }
    }
}

impl<T: Send + 'static> TimedWaitable for AllContainer<T> {
    fn deadline(&self) -> Instant {
        self.deadline
    }

    /// An empty container is immediately ready.
    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.inputs.iter().all(|input| input.wait_for(timeout))
    }

    fn complete(self: Box<Self>, err: Option<BoxError>) {
        if let Some(err) = err {
            self.output.set_error(err);
            return;
        }

        self.output.set_value(self.inputs);
    }
}
