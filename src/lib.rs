//! # Eventide
//!
//! **Eventide** extends one-shot asynchronous results ("eventuals")
//! with the pieces they are missing on their own: continuations that
//! run when an eventual becomes ready, aggregation of many eventuals
//! into a single one, and an upper bound on how long any wait is
//! allowed to last.
//!
//! At its core sits a **polling executor**: a cooperative scheduler
//! that multiplexes waiting on many eventuals onto two threads (one
//! polling loop, one dispatch worker) while preserving correct
//! propagation of values, errors, timeouts and cancellation, including
//! through recursive continuations that attach further continuations.
//!
//! The library offers:
//!
//! - A [`Promise`]/[`Eventual`] one-shot pair created with [`pair`],
//!   plus [`from_value`] and [`from_error`] for already-resolved ones
//! - [`then`] for value-returning continuations and [`chain`] for
//!   continuations that return another eventual
//! - [`all`], [`all_tuple`], [`all_range`] and the [`all!`] macro for
//!   waiting on containers, tuples and shared index ranges at once
//! - [`observe`] for terminal, output-free continuations
//! - A per-submission wait limit (default one hour) that resolves
//!   overdue waits with [`WaitError::TimedOut`]
//! - A scope-installable process default executor ([`set_default`]),
//!   so entry points can be called without an executor argument
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eventide::{from_value, set_default, then, ExecutorBuilder};
//!
//! let executor = ExecutorBuilder::new().build();
//! let _guard = set_default(executor);
//!
//! let greeting = then(from_value(1821), |year| {
//!     format!("hello from {}", year.take().unwrap())
//! });
//!
//! assert_eq!(greeting.take().unwrap(), "hello from 1821");
//! ```
//!
//! Entry points come in four flavors each: bare (default executor and
//! limit), `*_within` (explicit limit), `*_on` (explicit executor) and
//! `*_with` (both explicit).

mod all;
mod default;
mod error;
mod eventual;
mod executor;
mod observe;
mod then;
mod waitable;

pub use all::{
    all, all_on, all_range, all_range_on, all_range_with, all_range_within, all_tuple,
    all_tuple_on, all_tuple_with, all_tuple_within, all_with, all_within,
};
pub use default::{default_executor, set_default, DefaultGuard};
pub use error::{BoxError, WaitError};
pub use eventual::{from_error, from_value, pair, Eventual, Promise};
pub use executor::{
    DefaultExecutor, Executor, ExecutorBuilder, ExecutorHandle, Invoker, Job, PollingExecutor,
    ThreadInvoker, WorkerInvoker,
};
pub use observe::{observe, observe_on, observe_with, observe_within};
pub use then::{chain, chain_on, chain_with, chain_within, then, then_on, then_with, then_within};
pub use waitable::{EventualSet, TimedWaitable, Waitable, DEFAULT_WAIT_LIMIT};
