use crate::error::WaitError;
use crate::executor::{Executor, Invoker};
use crate::waitable::Waitable;

use log::{debug, trace};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Executor that polls its waitables to determine when they become
/// ready.
///
/// A single poll loop runs at a time, started on demand through the
/// poll invoker `P`; ready (or failed) waitables are handed to the
/// dispatch invoker `D` so completion work never runs on the poll
/// thread.
///
/// Every poll gives a waitable at most one `quantum` to report
/// readiness. A zero quantum makes polling a pure check. Larger quanta
/// reduce CPU overhead but increase time-to-detect-ready lag: with `N`
/// independent waitables the worst-case lag is `quantum · N`, and
/// `quantum · N²` when each waitable's readiness depends on another one
/// in the same batch, as with recursive continuations.
pub struct PollingExecutor<P: Invoker, D: Invoker> {
    inner: Arc<Inner<D>>,
    poll_invoker: P,
}

/// State shared with the poll loop.
struct Inner<D> {
    quantum: Duration,
    dispatch_invoker: D,
    state: Mutex<State>,
}

struct State {
    /// Waitables submitted and not yet picked up by the poll loop.
    queue: VecDeque<Box<dyn Waitable>>,

    /// One-way flag: flips to `false` on stop.
    active: bool,

    /// Whether a poll loop is currently running.
    polling: bool,
}

impl<P: Invoker, D: Invoker> PollingExecutor<P, D> {
    /// Creates an executor with default-constructed invokers.
    ///
    /// # Arguments
    ///
    /// * `quantum` - Per-poll wait budget given to each waitable.
    pub fn new(quantum: Duration) -> Self
    where
        P: Default,
        D: Default,
    {
        Self::with_invokers(quantum, P::default(), D::default())
    }

    /// Creates an executor with the given invokers.
    ///
    /// # Arguments
    ///
    /// * `quantum` - Per-poll wait budget given to each waitable.
    /// * `poll_invoker` - Runs the poll loop.
    /// * `dispatch_invoker` - Runs dispatch work for ready waitables.
    pub fn with_invokers(quantum: Duration, poll_invoker: P, dispatch_invoker: D) -> Self {
        let executor = Self {
            inner: Arc::new(Inner {
                quantum,
                dispatch_invoker,
                state: Mutex::new(State {
                    queue: VecDeque::new(),
                    active: true,
                    polling: false,
                }),
            }),
            poll_invoker,
        };

        executor.poll_invoker.start();
        executor.inner.dispatch_invoker.start();

        executor
    }
}

impl<D: Invoker> Inner<D> {
    /// Fails a waitable with [`WaitError::Stopped`] on the dispatch
    /// invoker.
    fn fail_stopped(&self, waitable: Box<dyn Waitable>) {
        self.dispatch_invoker
            .invoke(Box::new(move || waitable.dispatch(Some(WaitError::Stopped.into()))));
    }

    /// The poll loop. One runs at a time, guarded by the `polling`
    /// flag.
    ///
    /// Each iteration drains newly submitted waitables into a local
    /// batch, polls every batch member for one quantum, and hands
    /// ready or failed members to the dispatch invoker. The executor
    /// lock is held only while draining, never across `wait` or
    /// invoker calls, so submissions from any thread (including
    /// continuations running mid-dispatch) stay non-blocking.
    fn poll_loop(self: Arc<Self>) {
        trace!("poll loop started");

        let mut batch: Vec<Box<dyn Waitable>> = Vec::new();

        loop {
            {
                let mut state = self.state.lock().unwrap();

                if !state.active {
                    state.polling = false;
                    let drained: Vec<_> = state.queue.drain(..).collect();
                    drop(state);

                    let cancelled = batch.len() + drained.len();
                    for waitable in batch.drain(..).chain(drained) {
                        self.fail_stopped(waitable);
                    }

                    debug!("poll loop exiting on stop, cancelled {cancelled} waitables");
                    return;
                }

                batch.extend(state.queue.drain(..));

                if batch.is_empty() {
                    state.polling = false;
                    trace!("poll loop exiting, nothing left to watch");
                    return;
                }
            }

            let mut pending = Vec::with_capacity(batch.len());

            for mut waitable in batch.drain(..) {
                match waitable.wait(self.quantum) {
                    Ok(false) => pending.push(waitable),
                    Ok(true) => self
                        .dispatch_invoker
                        .invoke(Box::new(move || waitable.dispatch(None))),
                    Err(err) => self
                        .dispatch_invoker
                        .invoke(Box::new(move || waitable.dispatch(Some(err)))),
                }
            }

            batch = pending;
        }
    }
}

impl<P: Invoker, D: Invoker> Executor for PollingExecutor<P, D> {
    fn submit(&self, waitable: Box<dyn Waitable>) {
        let start_poller = {
            let mut state = self.inner.state.lock().unwrap();

            if !state.active {
                drop(state);
                debug!("submit on stopped executor, failing waitable");
                waitable.dispatch(Some(WaitError::Stopped.into()));
                return;
            }

            state.queue.push_back(waitable);

            if state.polling {
                false
            } else {
                state.polling = true;
                true
            }
        };

        if start_poller {
            let inner = Arc::clone(&self.inner);
            self.poll_invoker.invoke(Box::new(move || inner.poll_loop()));
        }
    }

    fn stop(&self) {
        let drained = {
            let mut state = self.inner.state.lock().unwrap();

            if !state.active {
                return;
            }

            state.active = false;
            state.queue.drain(..).collect::<Vec<_>>()
        };

        debug!("executor stopped, failing {} queued waitables", drained.len());

        for waitable in drained {
            self.inner.fail_stopped(waitable);
        }
    }
}

impl<P: Invoker, D: Invoker> Drop for PollingExecutor<P, D> {
    /// Stops the executor and joins both invokers.
    ///
    /// The poll invoker is joined first so no new dispatch work can be
    /// produced; the dispatch invoker then drains whatever is queued
    /// before its worker exits.
    fn drop(&mut self) {
        self.stop();
        self.poll_invoker.stop();
        self.inner.dispatch_invoker.stop();
    }
}
