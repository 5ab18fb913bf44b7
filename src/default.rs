use crate::executor::ExecutorHandle;

use std::marker::PhantomData;
use std::sync::Mutex;

/// Process-wide default executor slot.
static DEFAULT_EXECUTOR: Mutex<Option<ExecutorHandle>> = Mutex::new(None);

/// Returns a snapshot of the currently installed default executor.
pub fn default_executor() -> Option<ExecutorHandle> {
    DEFAULT_EXECUTOR.lock().unwrap().clone()
}

/// Installs `executor` as the process default for the lifetime of the
/// returned guard.
///
/// Dropping the guard restores whatever was installed before, so
/// lexically nested installations unwind in LIFO order. The guard is
/// neither `Send` nor `Sync`: it must stay in the scope (and on the
/// thread) that created it.
///
/// # Examples
///
/// ```rust,ignore
/// let executor = ExecutorBuilder::new().build();
/// let _guard = set_default(executor);
///
/// // `then`, `all` and `observe` now work without an explicit
/// // executor argument.
/// ```
pub fn set_default(executor: ExecutorHandle) -> DefaultGuard {
    let mut slot = DEFAULT_EXECUTOR.lock().unwrap();
    let previous = slot.replace(executor);

    DefaultGuard {
        previous,
        _not_send: PhantomData,
    }
}

/// Restores the previously installed default executor on drop.
///
/// Returned by [`set_default`].
pub struct DefaultGuard {
    /// The installation displaced by this guard.
    previous: Option<ExecutorHandle>,

    /// Keeps the guard on the installing thread.
    _not_send: PhantomData<*const ()>,
}

impl Drop for DefaultGuard {
    fn drop(&mut self) {
        let mut slot = DEFAULT_EXECUTOR.lock().unwrap();
        *slot = self.previous.take();
    }
}

/// The default executor, for entry points called without an explicit
/// one.
///
/// Calling an entry point without a default installed is a setup bug,
/// not a runtime condition, so it panics rather than failing the
/// output eventual.
pub(crate) fn require_default() -> ExecutorHandle {
    default_executor().expect("no default executor installed")
}
