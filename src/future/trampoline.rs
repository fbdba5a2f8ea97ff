//! Per-thread run queue that keeps composition off the call stack.
//!
//! Forking a composed future recurses once per combinator on the way down
//! (each combinator forks the future it wraps) and once per combinator on
//! the way back up (each continuation calls the next). A long synchronous
//! chain would exhaust the stack. Instead, fork bodies and continuation
//! deliveries are pushed onto a FIFO queue owned by the current thread.
//!
//! The first push on a thread with no active queue becomes the driver: it
//! drains the queue before returning, so a chain that settles synchronously
//! has still settled when the outermost `fork` returns. Work pushed from
//! another thread is driven on that thread.
//!
//! # Invariants
//!
//! - **FIFO order**: tasks run in the order they were pushed.
//! - **Scopes nest**: [`isolated`] drives a fresh queue on top of the
//!   current one, so a blocking wait inside a task does not wait on work
//!   queued behind it.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::fault::guard;

type Task = Box<dyn FnOnce()>;

thread_local! {
    static SCOPES: RefCell<Vec<VecDeque<Task>>> = const { RefCell::new(Vec::new()) };
}

/// Runs `task` on this thread without growing the stack of an active driver.
///
/// Queues the task if this thread is already draining; otherwise drives it
/// (and everything it queues) to completion before returning.
pub(crate) fn run<T>(task: T)
where
    T: FnOnce() + 'static,
{
    let task: Task = Box::new(task);
    let pending = SCOPES.with(|scopes| match scopes.borrow_mut().last_mut() {
        Some(queue) => {
            queue.push_back(task);
            None
        }
        None => Some(task),
    });
    if let Some(task) = pending {
        drive(task);
    }
}

/// Runs `task` in a fresh scope and drains everything it queues.
pub(crate) fn isolated<T>(task: T)
where
    T: FnOnce() + 'static,
{
    drive(Box::new(task));
}

fn drive(first: Task) {
    SCOPES.with(|scopes| scopes.borrow_mut().push(VecDeque::from([first])));
    while let Some(task) = SCOPES.with(|scopes| {
        scopes
            .borrow_mut()
            .last_mut()
            .and_then(VecDeque::pop_front)
    }) {
        if let Err(fault) = guard(task) {
            log::error!("continuation panicked after its fork settled; discarding: {fault}");
        }
    }
    SCOPES.with(|scopes| scopes.borrow_mut().pop());
}
