//! `Future` - a deferred, possibly-failing computation in continuation-passing style.

use std::fmt;
use std::sync::mpsc;

use super::apply::join;
use super::callback::{OnceCallback, Reject, Resolve, Settlement};
use super::fault::{Fault, guard};
use super::trampoline;

/// The stored fork function of a [`Future`].
type ForkFunction<E, A> = Box<dyn FnOnce(Reject<E>, Resolve<A>) + Send>;

/// A computation that, once forked, calls exactly one of two continuations.
///
/// `Future<E, A>` is inert until [`fork`](Future::fork) is called with a
/// reject continuation (receiving `E`) and a resolve continuation
/// (receiving `A`). The fork function decides when and on which thread to
/// call them: immediately, after a timer, or from a callback of some other
/// system. This type never schedules anything itself.
///
/// This is not [`std::future::Future`]; there is no polling. See
/// `into_async` (feature `async`) for a bridge.
///
/// # Ownership
///
/// Forking and every combinator consume the future. Composition always
/// builds a new value around the old one and never mutates it.
///
/// # Laws
///
/// - **Functor identity**: `fa.map(|x| x)` behaves as `fa`
/// - **Functor composition**: `fa.map(f).map(g)` behaves as `fa.map(|x| g(f(x)))`
/// - **Left identity**: `Future::of(a).chain(f)` behaves as `f(a)`
/// - **Right identity**: `fa.chain(Future::of)` behaves as `fa`
/// - **Associativity**: `fa.chain(f).chain(g)` behaves as `fa.chain(|x| f(x).chain(g))`
///
/// # Examples
///
/// ```rust
/// use forkable::future::Future;
///
/// let answer: Future<String, i32> = Future::of(20)
///     .map(|x| x + 1)
///     .chain(|x| Future::of(x * 2));
///
/// assert_eq!(answer.fork_blocking(), Ok(42));
/// ```
///
/// Resolving from another thread:
///
/// ```rust
/// use forkable::future::Future;
/// use std::thread;
///
/// let remote: Future<String, &str> = Future::new(|_reject, resolve| {
///     thread::spawn(move || resolve("from elsewhere"));
/// });
///
/// assert_eq!(remote.fork_blocking(), Ok("from elsewhere"));
/// ```
pub struct Future<E, A> {
    computation: ForkFunction<E, A>,
    description: &'static str,
}

impl<E, A> Future<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Creates a future from a fork function.
    ///
    /// The fork function receives the reject and resolve continuations and
    /// must eventually call one of them. Nothing runs until `fork`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// let parsed: Future<String, i32> = Future::new(|reject, resolve| {
    ///     match "42".parse::<i32>() {
    ///         Ok(number) => resolve(number),
    ///         Err(error) => reject(error.to_string()),
    ///     }
    /// });
    /// assert_eq!(parsed.fork_blocking(), Ok(42));
    /// ```
    pub fn new<F>(fork: F) -> Self
    where
        F: FnOnce(Reject<E>, Resolve<A>) + Send + 'static,
    {
        Self {
            computation: Box::new(fork),
            description: std::any::type_name::<F>(),
        }
    }

    /// Creates a future that resolves with `value` as soon as it is forked.
    ///
    /// This is the monadic unit; it never rejects.
    pub fn of(value: A) -> Self {
        Self::new(move |_reject, resolve| resolve(value))
    }

    /// Alias for [`of`](Future::of).
    #[inline]
    pub fn pure(value: A) -> Self {
        Self::of(value)
    }

    /// Creates a future that rejects with `error` as soon as it is forked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// let failed: Future<String, i32> = Future::reject("nope".to_string());
    /// assert_eq!(failed.fork_blocking(), Err("nope".to_string()));
    /// ```
    pub fn reject(error: E) -> Self {
        Self::new(move |reject, _resolve| reject(error))
    }
}

impl<E, A> Future<E, A> {
    /// Type name of the fork function, used by `Debug` and `Display`.
    pub(crate) const fn description(&self) -> &'static str {
        self.description
    }
}

impl<E, A> Future<E, A>
where
    E: From<Fault> + Send + 'static,
    A: Send + 'static,
{
    /// Runs the computation.
    ///
    /// At most one of the two continuations is called, at most once. If the
    /// fork function panics before either continuation fired, the panic is
    /// converted to a [`Fault`] and passed to `on_reject`; `fork` itself
    /// does not panic. A panic raised after a continuation already fired
    /// (for instance inside `on_resolve`) is logged and discarded. Panics on
    /// other threads the fork function started are out of reach.
    ///
    /// Fork bodies and continuation calls go through a per-thread run queue,
    /// so the depth of a composed chain is not bounded by the call stack. A
    /// chain that settles synchronously has settled when `fork` returns; if
    /// `fork` is called while this thread is already forking (from inside a
    /// fork function or continuation), the work runs right after the current
    /// step returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    /// use std::sync::mpsc;
    ///
    /// let (sender, receiver) = mpsc::channel();
    /// let failure = sender.clone();
    /// Future::<String, i32>::of(7).fork(
    ///     move |error| failure.send(Err(error)).unwrap(),
    ///     move |value| sender.send(Ok(value)).unwrap(),
    /// );
    /// assert_eq!(receiver.recv().unwrap(), Ok(7));
    /// ```
    pub fn fork<R, S>(self, on_reject: R, on_resolve: S)
    where
        R: FnOnce(E) + Send + 'static,
        S: FnOnce(A) + Send + 'static,
    {
        let Self {
            computation,
            description,
        } = self;
        trampoline::run(move || {
            let settlement = Settlement::new(Box::new(on_reject), Box::new(on_resolve));
            let (reject, resolve) = settlement.continuations();

            if let Err(fault) = guard(move || computation(reject, resolve)) {
                let message = fault.to_string();
                if settlement.reject(E::from(fault)) {
                    log::debug!("fork of {description} rejected with a fault: {message}");
                } else {
                    log::error!("fork of {description} panicked after settling; discarding: {message}");
                }
            }
        });
    }

    /// Forks the future and blocks the current thread until it settles.
    ///
    /// Returns `Err(E::from(Fault::Abandoned))` if the fork function drops
    /// both continuations without calling either. Safe to call from inside
    /// a fork function or a combinator's function.
    pub fn fork_blocking(self) -> Result<A, E> {
        let (sender, receiver) = mpsc::channel();
        let on_failure = sender.clone();
        trampoline::isolated(move || {
            self.fork(
                move |error| {
                    let _ = on_failure.send(Err(error));
                },
                move |value| {
                    let _ = sender.send(Ok(value));
                },
            );
        });
        receiver
            .recv()
            .unwrap_or_else(|_| Err(E::from(Fault::abandoned())))
    }

    /// Transforms the eventual success value.
    ///
    /// Equivalent to `chain(|a| Future::of(function(a)))`. A rejection passes
    /// through and `function` is never called.
    pub fn map<B, F>(self, function: F) -> Future<E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        self.chain(move |value| Future::of(function(value)))
    }

    /// Sequences a dependent computation (monadic bind).
    ///
    /// `function` runs only after this future resolved, and the future it
    /// returns is forked in turn. A rejection of this future short-circuits.
    /// A panic inside `function` becomes a rejection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// fn half(n: i32) -> Future<String, i32> {
    ///     if n % 2 == 0 { Future::of(n / 2) } else { Future::reject(format!("{n} is odd")) }
    /// }
    ///
    /// assert_eq!(Future::of(8).chain(half).chain(half).fork_blocking(), Ok(2));
    /// assert_eq!(Future::of(6).chain(half).chain(half).fork_blocking(), Err("3 is odd".to_string()));
    /// ```
    pub fn chain<B, F>(self, function: F) -> Future<E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Future<E, B> + Send + 'static,
    {
        Future::new(move |reject: Reject<E>, resolve: Resolve<B>| {
            let reject = OnceCallback::new(reject);
            let on_failure = reject.clone();
            self.fork(
                move |error| {
                    on_failure.call(error);
                },
                move |value| match guard(move || function(value)) {
                    Ok(next) => next.fork(move |error| {
                        reject.call(error);
                    }, resolve),
                    Err(fault) => {
                        reject.call(E::from(fault));
                    }
                },
            );
        })
    }

    /// Alias for [`chain`](Future::chain).
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Future<E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Future<E, B> + Send + 'static,
    {
        self.chain(function)
    }

    /// Runs `next` after this future resolves, discarding this value.
    #[must_use]
    pub fn then<B>(self, next: Future<E, B>) -> Future<E, B>
    where
        B: Send + 'static,
    {
        self.chain(move |_| next)
    }

    /// Recovers from a rejection (bind on the reject side).
    ///
    /// On rejection, forks the future returned by `function`; on success,
    /// passes the value through untouched. This is the only combinator that
    /// can turn a rejection back into a success.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// let recovered: Future<String, usize> = Future::<String, usize>::reject("lost".to_string())
    ///     .chain_reject(|error| Future::of(error.len()));
    /// assert_eq!(recovered.fork_blocking(), Ok(4));
    /// ```
    pub fn chain_reject<E2, F>(self, function: F) -> Future<E2, A>
    where
        E2: From<Fault> + Send + 'static,
        F: FnOnce(E) -> Future<E2, A> + Send + 'static,
    {
        Future::new(move |reject: Reject<E2>, resolve: Resolve<A>| {
            let resolve = OnceCallback::new(resolve);
            let on_success = resolve.clone();
            self.fork(
                move |error| match guard(move || function(error)) {
                    Ok(recovery) => recovery.fork(reject, move |value| {
                        resolve.call(value);
                    }),
                    Err(fault) => reject(E2::from(fault)),
                },
                move |value| {
                    on_success.call(value);
                },
            );
        })
    }

    /// Transforms whichever value arrives without changing which side fires.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// let ok: Future<String, i32> = Future::of(2);
    /// assert_eq!(ok.bimap(|e: String| format!("error: {e}"), |x| x * 10).fork_blocking(), Ok(20));
    ///
    /// let failed: Future<String, i32> = Future::reject("four".to_string());
    /// assert_eq!(failed.bimap(|e| e.to_uppercase(), |x| x * 10).fork_blocking(), Err("FOUR".to_string()));
    /// ```
    pub fn bimap<E2, B, F, G>(self, on_reject: F, on_resolve: G) -> Future<E2, B>
    where
        E2: From<Fault> + Send + 'static,
        B: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
        G: FnOnce(A) -> B + Send + 'static,
    {
        Future::new(move |reject: Reject<E2>, resolve: Resolve<B>| {
            let reject = OnceCallback::new(reject);
            let on_fault = reject.clone();
            self.fork(
                move |error| {
                    reject.call(guard(move || on_reject(error)).unwrap_or_else(E2::from));
                },
                move |value| match guard(move || on_resolve(value)) {
                    Ok(mapped) => resolve(mapped),
                    Err(fault) => {
                        on_fault.call(E2::from(fault));
                    }
                },
            );
        })
    }

    /// Transforms the rejection value only.
    pub fn map_reject<E2, F>(self, function: F) -> Future<E2, A>
    where
        E2: From<Fault> + Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        self.bimap(function, |value| value)
    }

    /// Applies the function this future resolves to, to the value `other`
    /// resolves to.
    ///
    /// Both futures are forked right away, without waiting for each other.
    /// Whichever success arrives second performs the application. If either
    /// side rejects, the result rejects with that value, and the reject
    /// continuation fires once even when both sides reject.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// let increment: Future<String, fn(i32) -> i32> = Future::of(|x| x + 1);
    /// assert_eq!(increment.ap(Future::of(41)).fork_blocking(), Ok(42));
    /// ```
    pub fn ap<B, C>(self, other: Future<E, B>) -> Future<E, C>
    where
        A: FnOnce(B) -> C,
        B: Send + 'static,
        C: Send + 'static,
    {
        Future::new(move |reject: Reject<E>, resolve: Resolve<C>| {
            let reject = OnceCallback::new(reject);
            let on_fault = reject.clone();
            join(self, other, reject.into_boxed(), move |function: A, value: B| {
                match guard(move || function(value)) {
                    Ok(result) => resolve(result),
                    Err(fault) => {
                        on_fault.call(E::from(fault));
                    }
                }
            });
        })
    }

    /// Combines two futures with a binary function, forking both at once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::Future;
    ///
    /// let sum = Future::<String, i32>::of(40).map2(Future::of(2), |a, b| a + b);
    /// assert_eq!(sum.fork_blocking(), Ok(42));
    /// ```
    pub fn map2<B, C, F>(self, other: Future<E, B>, function: F) -> Future<E, C>
    where
        B: Send + 'static,
        C: Send + 'static,
        F: FnOnce(A, B) -> C + Send + 'static,
    {
        self.map(move |a| move |b| function(a, b)).ap(other)
    }

    /// Pairs the values of two futures, forking both at once.
    pub fn product<B>(self, other: Future<E, B>) -> Future<E, (A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }
}

impl<E, A> fmt::Debug for Future<E, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Future")
            .field("fork", &self.description)
            .finish_non_exhaustive()
    }
}

impl<E, A> fmt::Display for Future<E, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Future({})", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static_assertions::assert_impl_all!(Future<String, i32>: Send);
    static_assertions::assert_not_impl_any!(Future<String, i32>: Sync);

    #[rstest]
    fn of_resolves_immediately() {
        assert_eq!(Future::<String, i32>::of(1).fork_blocking(), Ok(1));
    }

    #[rstest]
    fn reject_rejects_immediately() {
        assert_eq!(
            Future::<String, i32>::reject("no".to_string()).fork_blocking(),
            Err("no".to_string())
        );
    }

    #[rstest]
    fn construction_is_lazy() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let future: Future<String, i32> = Future::new(move |_reject, resolve| {
            counter.fetch_add(1, Ordering::SeqCst);
            resolve(3);
        });
        let mapped = future.map(|x| x + 1);

        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(mapped.fork_blocking(), Ok(4));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn fork_converts_panic_into_rejection() {
        let future: Future<Fault, i32> = Future::new(|_reject, _resolve| panic!("kaboom"));
        assert_eq!(
            future.fork_blocking(),
            Err(Fault::Panicked {
                message: "kaboom".to_string()
            })
        );
    }

    #[rstest]
    fn fork_only_honours_first_continuation() {
        let future: Future<String, i32> = Future::new(|reject, resolve| {
            resolve(1);
            reject("ignored".to_string());
        });
        assert_eq!(future.fork_blocking(), Ok(1));
    }

    #[rstest]
    fn abandoned_fork_reports_fault() {
        let future: Future<Fault, i32> = Future::new(|reject, resolve| {
            drop(reject);
            drop(resolve);
        });
        assert_eq!(future.fork_blocking(), Err(Fault::Abandoned));
    }

    #[rstest]
    fn panic_in_map_function_becomes_rejection() {
        let future: Future<String, i32> = Future::of(1).map(|_| -> i32 { panic!("bad map") });
        assert_eq!(
            future.fork_blocking(),
            Err("fork function panicked: bad map".to_string())
        );
    }

    #[rstest]
    fn then_discards_first_value() {
        let future: Future<String, &str> = Future::of(1).then(Future::of("second"));
        assert_eq!(future.fork_blocking(), Ok("second"));
    }

    #[rstest]
    fn map_reject_leaves_success_alone() {
        let future: Future<String, i32> =
            Future::<String, i32>::of(5).map_reject(|e| format!("wrapped {e}"));
        assert_eq!(future.fork_blocking(), Ok(5));
    }

    #[rstest]
    fn map_reject_rewrites_failure() {
        let future: Future<String, i32> =
            Future::<String, i32>::reject("inner".to_string()).map_reject(|e| format!("wrapped {e}"));
        assert_eq!(future.fork_blocking(), Err("wrapped inner".to_string()));
    }

    #[rstest]
    fn product_pairs_values() {
        let future = Future::<String, i32>::of(1).product(Future::of("one"));
        assert_eq!(future.fork_blocking(), Ok((1, "one")));
    }

    #[rstest]
    fn display_names_the_fork_function() {
        let future: Future<String, i32> = Future::of(1);
        let text = future.to_string();
        assert!(text.starts_with("Future("));
        assert!(text.contains("of"));
        assert!(format!("{future:?}").contains("Future"));
    }
}
