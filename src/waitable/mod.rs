mod chaining;
mod container;
mod continuation;
mod forwarding;
mod observed;
mod range;
mod tuple;

pub(crate) use chaining::Chaining;
pub(crate) use container::AllContainer;
pub(crate) use continuation::Continuation;
pub(crate) use forwarding::Forwarding;
pub(crate) use observed::Observed;
pub(crate) use range::AllRange;
pub(crate) use tuple::AllTuple;

pub use tuple::EventualSet;

use crate::error::{BoxError, WaitError};

use std::time::{Duration, Instant};

/// Wait limit applied when an entry point is called without an explicit
/// limit.
pub const DEFAULT_WAIT_LIMIT: Duration = Duration::from_secs(60 * 60);

/// Something that can be waited on and then dispatched exactly once.
///
/// A `Waitable` wraps one eventual (or an aggregate of them) together
/// with the completion work to perform once it is ready. Executors poll
/// waitables with a bounded timeout and finalize them via
/// [`dispatch`](Self::dispatch).
///
/// Dispatch consumes the waitable, so "exactly once" is enforced by the
/// type system rather than a runtime state flag.
pub trait Waitable: Send {
    /// Waits at most `timeout` to determine whether the waitable is
    /// ready to be dispatched.
    ///
    /// Returns `Ok(true)` if ready and `Ok(false)` otherwise. An error
    /// means the waitable failed terminally and must be dispatched with
    /// that error.
    ///
    /// Once `Ok(true)` has been returned, subsequent calls return
    /// `Ok(true)` as soon as possible.
    fn wait(&mut self, timeout: Duration) -> Result<bool, BoxError>;

    /// Finalizes the waitable, consuming it.
    ///
    /// `err` is the terminal error produced while waiting, if any.
    /// Implementations route it (and any error raised by user code)
    /// into their output eventual instead of unwinding into the
    /// executor.
    fn dispatch(self: Box<Self>, err: Option<BoxError>);

    /// The absolute deadline of this waitable, if it has one.
    ///
    /// Executors may use the deadline to poll soonest-expiring
    /// waitables first; they are not required to.
    fn deadline(&self) -> Option<Instant> {
        None
    }
}

/// A [`Waitable`] bounded by a wall-clock deadline.
///
/// Implementors supply [`timed_wait`](Self::timed_wait) with their
/// specific readiness check and receive the deadline handling from the
/// blanket [`Waitable`] impl: while the deadline has not passed, waits
/// delegate to `timed_wait`; once it has, a single zero-wait check runs
/// so that a result arriving in the same instant still wins, and only
/// then does the waitable fail with [`WaitError::TimedOut`].
pub trait TimedWaitable: Send {
    /// The absolute deadline, fixed at construction.
    fn deadline(&self) -> Instant;

    /// Returns `true` iff the underlying eventual(s) became ready
    /// within `timeout`.
    fn timed_wait(&mut self, timeout: Duration) -> bool;

    /// Finalizes the waitable once it is ready or failed.
    fn complete(self: Box<Self>, err: Option<BoxError>);
}

impl<W: TimedWaitable> Waitable for W {
    fn wait(&mut self, timeout: Duration) -> Result<bool, BoxError> {
        if Instant::now() < TimedWaitable::deadline(self) {
            return Ok(self.timed_wait(timeout));
        }

        // Last-chance zero-wait check: readiness that arrived between
        // the previous wait and the deadline must not be dropped.
        if self.timed_wait(Duration::ZERO) {
            Ok(true)
        } else {
            Err(WaitError::TimedOut.into())
        }
    }

    fn dispatch(self: Box<Self>, err: Option<BoxError>) {
        self.complete(err);
    }

    fn deadline(&self) -> Option<Instant> {
        Some(TimedWaitable::deadline(self))
    }
}

/// Converts a relative wait limit into an absolute deadline.
///
/// Saturates far into the future when `now + limit` is not
/// representable.
pub(crate) fn deadline_after(limit: Duration) -> Instant {
    let now = Instant::now();

    now.checked_add(limit)
        .unwrap_or_else(|| now + Duration::from_secs(60 * 60 * 24 * 365))
}
