use crate::error::BoxError;
use crate::eventual::{Eventual, Promise};
use crate::waitable::TimedWaitable;

use std::time::{Duration, Instant};

/// A heterogeneous, fixed-arity set of eventuals that can be polled for
/// collective readiness.
///
/// Implemented for tuples of [`Eventual`]s up to arity 8; this is the
/// bound on [`all_tuple`](crate::all_tuple) and the
/// [`all!`](crate::all!) macro.
pub trait EventualSet: Send + 'static {
    /// Returns `true` iff every element became ready, giving each
    /// element at most `timeout` to do so.
    fn ready_within(&self, timeout: Duration) -> bool;
}

macro_rules! impl_eventual_set {
    ($($name:ident)+) => {
        impl<$($name: Send + 'static),+> EventualSet for ($(Eventual<$name>,)+) {
            fn ready_within(&self, timeout: Duration) -> bool {
                #[allow(non_snake_case)]
                let ($($name,)+) = self;
                $($name.wait_for(timeout))&&+
            }
        }
    };
}

impl_eventual_set!(A);
impl_eventual_set!(A B);
impl_eventual_set!(A B C);
impl_eventual_set!(A B C D);
impl_eventual_set!(A B C D E);
impl_eventual_set!(A B C D E F);
impl_eventual_set!(A B C D E F G);
impl_eventual_set!(A B C D E F G H);

/// Waits for every eventual in a tuple and promises the tuple back once
/// all of them are ready. Same contract as
/// [`AllContainer`](crate::waitable::AllContainer), over a fixed arity.
pub(crate) struct AllTuple<S> {
    deadline: Instant,
    inputs: S,
    output: Promise<S>,
}

impl<S> AllTuple<S> {
    pub(crate) fn new(deadline: Instant, inputs: S, output: Promise<S>) -> Self {
        Self {
            deadline,
            inputs,
            output,
        }
    }
}

impl<S: EventualSet> TimedWaitable for AllTuple<S> {
    fn deadline(&self) -> Instant {
        self.deadline
    }

    fn timed_wait(&mut self, timeout: Duration) -> bool {
        self.inputs.ready_within(timeout)
    }

    fn complete(self: Box<Self>, err: Option<BoxError>) {
        if let Some(err) = err {
            self.output.set_error(err);
            return;
        }

        self.output.set_value(self.inputs);
    }
}
