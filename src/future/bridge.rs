//! Bridge from fork-based futures to `async`/`.await`.
//!
//! [`Future::into_async`] only observes the outcome: the computation is
//! forked on the first poll of the returned future, and the value is handed
//! over through a `futures::channel::mpsc` channel whose senders belong to
//! the two continuations. Nothing is scheduled, and dropping the returned
//! future does not stop work the fork function already started.

use futures::StreamExt;
use futures::channel::mpsc;

use super::deferred::Future;
use super::fault::Fault;
use super::trampoline;
use super::transformer::FutureT;

impl<E, A> Future<E, A>
where
    E: From<Fault> + Send + 'static,
    A: Send + 'static,
{
    /// Converts into a [`std::future::Future`] resolving to the outcome.
    ///
    /// Yields `Err(E::from(Fault::Abandoned))` if the fork function drops
    /// both continuations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
    /// let answer: Future<String, i32> = Future::of(41).map(|x| x + 1);
    /// assert_eq!(answer.into_async().await, Ok(42));
    /// # });
    /// ```
    pub fn into_async(self) -> impl std::future::Future<Output = Result<A, E>> + Send {
        async move {
            let (sender, mut receiver) = mpsc::unbounded();
            let on_failure = sender.clone();
            trampoline::isolated(move || {
                self.fork(
                    move |error| {
                        let _ = on_failure.unbounded_send(Err(error));
                    },
                    move |value| {
                        let _ = sender.unbounded_send(Ok(value));
                    },
                );
            });
            receiver
                .next()
                .await
                .unwrap_or_else(|| Err(E::from(Fault::abandoned())))
        }
    }
}

impl<E, M> FutureT<E, M>
where
    E: From<Fault> + Send + 'static,
    M: Send + 'static,
{
    /// Converts into a [`std::future::Future`] resolving to the inner monad.
    pub fn into_async(self) -> impl std::future::Future<Output = Result<M, E>> + Send {
        self.into_future().into_async()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use rstest::rstest;

    #[rstest]
    fn into_async_yields_success() {
        let future: Future<String, i32> = Future::of(3);
        assert_eq!(block_on(future.into_async()), Ok(3));
    }

    #[rstest]
    fn into_async_yields_rejection() {
        let future: Future<String, i32> = Future::reject("denied".to_string());
        assert_eq!(block_on(future.into_async()), Err("denied".to_string()));
    }

    #[rstest]
    fn into_async_reports_abandoned_fork() {
        let future: Future<Fault, i32> = Future::new(|reject, resolve| {
            drop(reject);
            drop(resolve);
        });
        assert_eq!(block_on(future.into_async()), Err(Fault::Abandoned));
    }

    #[rstest]
    fn into_async_does_not_fork_before_polling() {
        let forked = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = std::sync::Arc::clone(&forked);
        let future: Future<String, ()> = Future::new(move |_reject, resolve| {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
            resolve(());
        });

        let pending = future.into_async();
        assert!(!forked.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(block_on(pending), Ok(()));
        assert!(forked.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[rstest]
    fn into_async_settles_deep_map_chain() {
        let mut future: Future<String, u32> = Future::of(0);
        for _ in 0..3_000 {
            future = future.map(|x| x + 1);
        }
        assert_eq!(block_on(future.into_async()), Ok(3_000));
    }

    #[rstest]
    fn transformer_into_async_yields_inner_value() {
        let lifted = FutureT::<String, Option<i32>>::lift(Some(8));
        assert_eq!(block_on(lifted.into_async()), Ok(Some(8)));
    }
}
