use crate::error::BoxError;
use crate::eventual::{Eventual, Promise};
use crate::waitable::TimedWaitable;

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Waits for the eventuals at `source[range]` and promises the index
/// range back once all of them are ready.
///
/// The source container is shared, not owned: the caller keeps its own
/// `Arc` clone and retrieves element results from it after completion.
/// The `Arc` is what guarantees the container outlives the wait.
pub(crate) struct AllRange<T> {
    deadline: Instant,
    source: Arc<Vec<Eventual<T>>>,
    range: Range<usize>,
    output: Promise<Range<usize>>,
}

impl<T> AllRange<T> {
    pub(crate) fn new(
        deadline: Instant,
        source: Arc<Vec<Eventual<T>>>,
        range: Range<usize>,
        output: Promise<Range<usize>>,
    ) -> Self {
        Self {
            deadline,
            source,
            range,
            output,
        }
    }
}

impl<T: Send + 'static> TimedWaitable for AllRange<T> {
    fn deadline(&self) -> Instant {
        self.deadline
    }

    /// An empty range is immediately ready.
    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.source[self.range.clone()]
            .iter()
            .all(|input| input.wait_for(timeout))
    }

    fn complete(self: Box<Self>, err: Option<BoxError>) {
        if let Some(err) = err {
            self.output.set_error(err);
            return;
        }

        self.output.set_value(self.range);
    }
}
