use crate::default::require_default;
use crate::eventual::{pair, Eventual};
use crate::executor::ExecutorHandle;
use crate::waitable::{deadline_after, AllContainer, AllRange, AllTuple, EventualSet, DEFAULT_WAIT_LIMIT};

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

/// Creates an eventual that resolves with the whole container once
/// every eventual in it is ready.
///
/// Element errors are not aggregated: the result resolves successfully
/// and each element reports its own value or error when taken. An
/// empty container resolves immediately.
///
/// # Arguments
///
/// * `executor` - Waits for the elements to become ready.
/// * `limit` - Maximum total time to wait for all elements.
/// * `inputs` - The eventuals to wait for.
pub fn all_with<T>(
    executor: &ExecutorHandle,
    limit: Duration,
    inputs: Vec<Eventual<T>>,
) -> Eventual<Vec<Eventual<T>>>
where
    T: Send + 'static,
{
    let (promise, result) = pair();

    executor.submit(Box::new(AllContainer::new(
        deadline_after(limit),
        inputs,
        promise,
    )));

    result
}

/// [`all_with`] with the default wait limit of one hour.
pub fn all_on<T>(executor: &ExecutorHandle, inputs: Vec<Eventual<T>>) -> Eventual<Vec<Eventual<T>>>
where
    T: Send + 'static,
{
    all_with(executor, DEFAULT_WAIT_LIMIT, inputs)
}

/// [`all_with`] on the installed default executor.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn all_within<T>(limit: Duration, inputs: Vec<Eventual<T>>) -> Eventual<Vec<Eventual<T>>>
where
    T: Send + 'static,
{
    all_with(&require_default(), limit, inputs)
}

/// [`all_with`] on the installed default executor, with the default
/// wait limit of one hour.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn all<T>(inputs: Vec<Eventual<T>>) -> Eventual<Vec<Eventual<T>>>
where
    T: Send + 'static,
{
    all_within(DEFAULT_WAIT_LIMIT, inputs)
}

/// Creates an eventual that resolves with the whole tuple once every
/// eventual in it is ready.
///
/// Works for tuples of [`Eventual`]s up to arity 8. For an argument
/// list instead of a tuple, use [`all!`](crate::all!).
///
/// # Arguments
///
/// * `executor` - Waits for the elements to become ready.
/// * `limit` - Maximum total time to wait for all elements.
/// * `inputs` - Tuple of eventuals to wait for.
pub fn all_tuple_with<S>(executor: &ExecutorHandle, limit: Duration, inputs: S) -> Eventual<S>
where
    S: EventualSet,
{
    let (promise, result) = pair();

    executor.submit(Box::new(AllTuple::new(
        deadline_after(limit),
        inputs,
        promise,
    )));

    result
}

/// [`all_tuple_with`] with the default wait limit of one hour.
pub fn all_tuple_on<S>(executor: &ExecutorHandle, inputs: S) -> Eventual<S>
where
    S: EventualSet,
{
    all_tuple_with(executor, DEFAULT_WAIT_LIMIT, inputs)
}

/// [`all_tuple_with`] on the installed default executor.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn all_tuple_within<S>(limit: Duration, inputs: S) -> Eventual<S>
where
    S: EventualSet,
{
    all_tuple_with(&require_default(), limit, inputs)
}

/// [`all_tuple_with`] on the installed default executor, with the
/// default wait limit of one hour.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn all_tuple<S>(inputs: S) -> Eventual<S>
where
    S: EventualSet,
{
    all_tuple_within(DEFAULT_WAIT_LIMIT, inputs)
}

/// Creates an eventual that resolves with `range` once every eventual
/// at `source[range]` is ready.
///
/// The source container is shared rather than owned: the caller keeps
/// its own `Arc` clone alive and takes the element results from it
/// after completion. An empty range resolves immediately.
///
/// # Arguments
///
/// * `executor` - Waits for the elements to become ready.
/// * `limit` - Maximum total time to wait for all elements in range.
/// * `source` - Shared container holding the eventuals.
/// * `range` - The index range to wait for.
///
/// # Panics
///
/// Panics if `range` is out of bounds for `source`.
pub fn all_range_with<T>(
    executor: &ExecutorHandle,
    limit: Duration,
    source: Arc<Vec<Eventual<T>>>,
    range: Range<usize>,
) -> Eventual<Range<usize>>
where
    T: Send + 'static,
{
    assert!(
        range.start <= range.end && range.end <= source.len(),
        "range out of bounds for the source container"
    );

    let (promise, result) = pair();

    executor.submit(Box::new(AllRange::new(
        deadline_after(limit),
        source,
        range,
        promise,
    )));

    result
}

/// [`all_range_with`] with the default wait limit of one hour.
pub fn all_range_on<T>(
    executor: &ExecutorHandle,
    source: Arc<Vec<Eventual<T>>>,
    range: Range<usize>,
) -> Eventual<Range<usize>>
where
    T: Send + 'static,
{
    all_range_with(executor, DEFAULT_WAIT_LIMIT, source, range)
}

/// [`all_range_with`] on the installed default executor.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn all_range_within<T>(
    limit: Duration,
    source: Arc<Vec<Eventual<T>>>,
    range: Range<usize>,
) -> Eventual<Range<usize>>
where
    T: Send + 'static,
{
    all_range_with(&require_default(), limit, source, range)
}

/// [`all_range_with`] on the installed default executor, with the
/// default wait limit of one hour.
///
/// # Panics
///
/// Panics if no default executor is installed.
pub fn all_range<T>(source: Arc<Vec<Eventual<T>>>, range: Range<usize>) -> Eventual<Range<usize>>
where
    T: Send + 'static,
{
    all_range_within(DEFAULT_WAIT_LIMIT, source, range)
}

/// Waits for every eventual given as an argument, resolving with the
/// tuple of all of them.
///
/// Equivalent to calling [`all_tuple`](crate::all_tuple) on a tuple of
/// the arguments; uses the installed default executor.
///
/// # Examples
///
/// ```rust,ignore
/// let combined = all!(first, second, third);
/// let (first, second, third) = combined.take().unwrap();
/// ```
#[macro_export]
macro_rules! all {
    ($($input:expr),+ $(,)?) => {
        $crate::all_tuple(($($input,)+))
    };
}
