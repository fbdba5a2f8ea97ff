//! Continuation types and the single-fire cells that guard them.

use std::sync::Arc;

use parking_lot::Mutex;

use super::trampoline;

/// The failure continuation handed to a fork function.
pub type Reject<E> = Box<dyn FnOnce(E) + Send>;

/// The success continuation handed to a fork function.
pub type Resolve<A> = Box<dyn FnOnce(A) + Send>;

/// A continuation shared by several call sites that fires at most once.
///
/// Combinators such as `chain` need the same reject continuation on more
/// than one path. Cloning the cell shares the slot; the first `call` takes
/// the continuation and every later `call` is a no-op.
pub(crate) struct OnceCallback<T> {
    slot: Arc<Mutex<Option<Box<dyn FnOnce(T) + Send>>>>,
}

impl<T> Clone for OnceCallback<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: 'static> OnceCallback<T> {
    pub(crate) fn new<F>(callback: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        Self {
            slot: Arc::new(Mutex::new(Some(Box::new(callback)))),
        }
    }

    /// Invokes the continuation if it has not fired yet.
    ///
    /// Returns whether this call was the one that fired it. The lock is
    /// released before the continuation runs.
    pub(crate) fn call(&self, value: T) -> bool {
        let taken = self.slot.lock().take();
        taken.is_some_and(|callback| {
            callback(value);
            true
        })
    }

    pub(crate) fn into_boxed(self) -> Box<dyn FnOnce(T) + Send> {
        Box::new(move |value| {
            self.call(value);
        })
    }
}

/// Both continuations of one fork, of which exactly one may fire.
///
/// Whichever side fires first takes the pair and drops the other
/// continuation, so a fork function that calls both only reaches the caller
/// once. The pair is claimed at call time; the winning continuation itself
/// runs through the thread's run queue.
pub(crate) struct Settlement<E, A> {
    slot: Arc<Mutex<Option<(Reject<E>, Resolve<A>)>>>,
}

impl<E, A> Clone for Settlement<E, A> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<E: 'static, A: 'static> Settlement<E, A> {
    pub(crate) fn new(reject: Reject<E>, resolve: Resolve<A>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some((reject, resolve)))),
        }
    }

    pub(crate) fn reject(&self, error: E) -> bool {
        let taken = self.slot.lock().take();
        taken.is_some_and(|(reject, _resolve)| {
            trampoline::run(move || reject(error));
            true
        })
    }

    pub(crate) fn resolve(&self, value: A) -> bool {
        let taken = self.slot.lock().take();
        taken.is_some_and(|(_reject, resolve)| {
            trampoline::run(move || resolve(value));
            true
        })
    }

    /// Continuations that route through this settlement.
    pub(crate) fn continuations(&self) -> (Reject<E>, Resolve<A>) {
        let on_reject = self.clone();
        let on_resolve = self.clone();
        (
            Box::new(move |error| {
                on_reject.reject(error);
            }),
            Box::new(move |value| {
                on_resolve.resolve(value);
            }),
        )
    }
}
