//! The state machine behind `ap`.
//!
//! `ap` forks a function-producing future and a value-producing future
//! without waiting for either. Their continuations may arrive in any order,
//! from any thread, so the join point is an explicit state machine:
//!
//! ```text
//!             success (either side)              success (other side)
//!   Pending ───────────────────────▶ HalfResolved ──────────────────▶ Resolved
//!      │                                  │
//!      │ reject                           │ reject
//!      ▼                                  ▼
//!   Rejected ◀────────────────────────────┘
//! ```
//!
//! `Resolved` and `Rejected` are terminal. Entering either one is the only
//! way a continuation of the combined future fires, so the combined reject
//! continuation runs at most once even when both sides reject.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Future;
use super::callback::{OnceCallback, Reject};
use super::fault::Fault;

/// Which half of an `ap` arrived first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Half<F, V> {
    Function(F),
    Value(V),
}

/// Per-invocation state of an `ap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ApState<F, V> {
    Pending,
    HalfResolved(Half<F, V>),
    Resolved,
    Rejected,
}

impl<F, V> ApState<F, V> {
    /// Records the function side. Returns both halves once the value side
    /// has already arrived.
    pub(crate) fn resolve_function(&mut self, function: F) -> Option<(F, V)> {
        match std::mem::replace(self, Self::Resolved) {
            Self::Pending => {
                *self = Self::HalfResolved(Half::Function(function));
                None
            }
            Self::HalfResolved(Half::Value(value)) => Some((function, value)),
            unchanged => {
                *self = unchanged;
                None
            }
        }
    }

    /// Records the value side. Returns both halves once the function side
    /// has already arrived.
    pub(crate) fn resolve_value(&mut self, value: V) -> Option<(F, V)> {
        match std::mem::replace(self, Self::Resolved) {
            Self::Pending => {
                *self = Self::HalfResolved(Half::Value(value));
                None
            }
            Self::HalfResolved(Half::Function(function)) => Some((function, value)),
            unchanged => {
                *self = unchanged;
                None
            }
        }
    }

    /// Moves to `Rejected`. Returns `false` if a terminal state was already reached.
    pub(crate) fn reject(&mut self) -> bool {
        match self {
            Self::Pending | Self::HalfResolved(_) => {
                *self = Self::Rejected;
                true
            }
            Self::Resolved | Self::Rejected => false,
        }
    }

    pub(crate) const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }
}

/// The shared join point of one `ap` fork.
struct ApJoin<E, F, V> {
    state: Mutex<ApState<F, V>>,
    reject: OnceCallback<E>,
    combine: OnceCallback<(F, V)>,
}

impl<E: 'static, F: 'static, V: 'static> ApJoin<E, F, V> {
    fn on_function(&self, function: F) {
        let ready = self.state.lock().resolve_function(function);
        if let Some(pair) = ready {
            self.combine.call(pair);
        } else {
            self.trace_if_terminal("function");
        }
    }

    fn on_value(&self, value: V) {
        let ready = self.state.lock().resolve_value(value);
        if let Some(pair) = ready {
            self.combine.call(pair);
        } else {
            self.trace_if_terminal("value");
        }
    }

    fn on_reject(&self, error: E) {
        let first = self.state.lock().reject();
        if first {
            self.reject.call(error);
        } else {
            log::trace!("ap: dropping rejection that arrived after the join settled");
        }
    }

    fn trace_if_terminal(&self, side: &str) {
        if self.state.lock().is_terminal() {
            log::trace!("ap: dropping {side} that arrived after the join settled");
        }
    }
}

/// Forks `functions` and `values` back to back and calls `combine` once both
/// have resolved, or `reject` once if either rejects.
pub(crate) fn join<E, F, V, C>(
    functions: Future<E, F>,
    values: Future<E, V>,
    reject: Reject<E>,
    combine: C,
) where
    E: From<Fault> + Send + 'static,
    F: Send + 'static,
    V: Send + 'static,
    C: FnOnce(F, V) + Send + 'static,
{
    let join = Arc::new(ApJoin {
        state: Mutex::new(ApState::Pending),
        reject: OnceCallback::new(reject),
        combine: OnceCallback::new(move |(function, value): (F, V)| combine(function, value)),
    });

    let on_function_failure = Arc::clone(&join);
    let on_function = Arc::clone(&join);
    functions.fork(
        move |error| on_function_failure.on_reject(error),
        move |function| on_function.on_function(function),
    );

    let on_value_failure = Arc::clone(&join);
    values.fork(
        move |error| on_value_failure.on_reject(error),
        move |value| join.on_value(value),
    );
}
