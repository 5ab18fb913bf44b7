use log::{debug, trace};

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// A unit of work handed to an invoker.
pub type Job = Box<dyn FnOnce() + Send>;

/// A strategy for running closures somewhere else.
///
/// The polling executor uses one invoker to run its poll loop (so
/// `submit` never blocks the caller) and another to run dispatch work
/// (so continuations never run on the poll thread).
///
/// Invokers own every thread they spawn: on [`stop`](Self::stop) and on
/// drop, all of them are joined, never detached.
pub trait Invoker: Send + Sync + 'static {
    /// Prepares the invoker for use. Optional; the default is a no-op.
    fn start(&self) {}

    /// Runs the job on whatever thread this invoker manages.
    fn invoke(&self, job: Job);

    /// Tears the invoker down, joining its threads. Optional; the
    /// default is a no-op.
    fn stop(&self) {}
}

/// Invoker that runs every job on a fresh thread.
///
/// Spawned threads are kept in a tracked list; each submission first
/// reaps the handles of threads that have already finished, so the list
/// stays bounded by the number of concurrently live jobs and no thread
/// is ever detached.
pub struct ThreadInvoker {
    /// Join handles of all threads spawned so far and not yet reaped.
    threads: Mutex<Vec<JoinHandle<()>>>,
}

impl ThreadInvoker {
    /// Creates an invoker with no live threads.
    pub fn new() -> Self {
        Self {
            threads: Mutex::new(Vec::new()),
        }
    }
}

impl Default for ThreadInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl Invoker for ThreadInvoker {
    fn invoke(&self, job: Job) {
        let mut threads = self.threads.lock().unwrap();

        let (finished, running): (Vec<_>, Vec<_>) = threads
            .drain(..)
            .partition(|handle| handle.is_finished());
        *threads = running;

        for handle in finished {
            let _ = handle.join();
        }

        threads.push(thread::spawn(job));
    }

    fn stop(&self) {
        let handles: Vec<_> = self.threads.lock().unwrap().drain(..).collect();

        trace!("joining {} invoker threads", handles.len());

        for handle in handles {
            let _ = handle.join();
        }
    }
}

impl Drop for ThreadInvoker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Jobs and liveness flag shared with the worker thread.
struct WorkerState {
    jobs: VecDeque<Job>,
    active: bool,
}

struct WorkerShared {
    state: Mutex<WorkerState>,

    /// Signalled when a job arrives or the invoker stops.
    ready: Condvar,
}

/// Invoker that serializes all jobs onto one dedicated worker thread.
///
/// Jobs are queued into a FIFO and drained by a lazily-started worker.
/// On [`stop`](Invoker::stop) the worker finishes the remaining queue
/// before exiting, so no accepted job is lost.
pub struct WorkerInvoker {
    shared: Arc<WorkerShared>,

    /// Join handle of the worker thread, once started.
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerInvoker {
    /// Creates an invoker whose worker thread starts on first use.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(WorkerShared {
                state: Mutex::new(WorkerState {
                    jobs: VecDeque::new(),
                    active: true,
                }),
                ready: Condvar::new(),
            }),
            worker: Mutex::new(None),
        }
    }

    fn ensure_started(&self) {
        let mut worker = self.worker.lock().unwrap();

        if worker.is_some() {
            return;
        }

        let shared = self.shared.clone();
        *worker = Some(thread::spawn(move || Self::run(shared)));
    }

    /// Worker loop: drain jobs until the invoker is stopped and the
    /// queue is empty.
    fn run(shared: Arc<WorkerShared>) {
        loop {
            let job = {
                let mut state = shared.state.lock().unwrap();

                loop {
                    if let Some(job) = state.jobs.pop_front() {
                        break job;
                    }

                    if !state.active {
                        return;
                    }

                    state = shared.ready.wait(state).unwrap();
                }
            };

            job();
        }
    }
}

impl Default for WorkerInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl Invoker for WorkerInvoker {
    fn start(&self) {
        self.ensure_started();
    }

    fn invoke(&self, job: Job) {
        {
            let mut state = self.shared.state.lock().unwrap();

            if !state.active {
                debug!("job submitted to stopped worker invoker, dropping it");
                return;
            }

            state.jobs.push_back(job);
        }

        self.shared.ready.notify_one();
        self.ensure_started();
    }

    fn stop(&self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.active = false;
        }

        self.shared.ready.notify_all();

        let handle = self.worker.lock().unwrap().take();

        if let Some(handle) = handle {
            // The invoker may be stopped from a job running on the
            // worker itself (an executor dropped inside a
            // continuation). The worker exits on its own once the
            // queue drains; joining it from here would deadlock.
            if handle.thread().id() == thread::current().id() {
                return;
            }

            let _ = handle.join();
        }
    }
}

impl Drop for WorkerInvoker {
    fn drop(&mut self) {
        self.stop();
    }
}
