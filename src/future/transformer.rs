//! `FutureT` - the Future monad transformer.
//!
//! `FutureT<E, M>` is a [`Future`] whose success value is an inner monad `M`
//! (`Option<A>`, `Result<A, X>`, [`Identity<A>`](crate::typeclass::Identity),
//! [`Validated<X, A>`](super::Validated), ...). The outer layer owns deferred
//! execution and rejection; the inner layer keeps its own effect, and every
//! combinator hands inner composition to `M`'s [`Monad`] operations.
//!
//! # Choosing between `chain` and `chain_inner`
//!
//! - [`chain`](FutureT::chain) receives the whole inner value `M` and returns
//!   another `FutureT`, so the next step may itself be deferred.
//! - [`chain_inner`](FutureT::chain_inner) receives `M::Inner` and returns a
//!   plain inner value; the step is `m.flat_map(function)` and resolves
//!   directly.
//!
//! # Examples
//!
//! ```rust
//! use forkable::future::FutureT;
//!
//! let found: FutureT<String, Option<i32>> = FutureT::<String, Option<()>>::of(5);
//! assert_eq!(found.fork_blocking(), Ok(Some(5)));
//!
//! let missing = FutureT::<String, Option<i32>>::lift(None)
//!     .map(|n| n * 2);
//! assert_eq!(missing.fork_blocking(), Ok(None));
//! ```

use std::fmt;

use super::callback::{Reject, Resolve};
use super::deferred::Future;
use super::fault::Fault;
use crate::typeclass::{Applicative, Monad};

/// A [`Future`] resolving to an inner monad `M`.
///
/// # Laws
///
/// Besides the monad laws of `chain`:
///
/// - **Lift pure**: `FutureT::<E, M>::of(a)` behaves as `FutureT::lift(M::pure(a))`
/// - **Lift bind**: `FutureT::lift(m).chain_inner(f)` behaves as `FutureT::lift(m.flat_map(f))`
pub struct FutureT<E, M> {
    future: Future<E, M>,
}

impl<E, M> FutureT<E, M>
where
    E: Send + 'static,
    M: Send + 'static,
{
    /// Creates a transformer from a fork function whose success
    /// continuation receives the inner monad.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::FutureT;
    ///
    /// let looked_up: FutureT<String, Option<&str>> =
    ///     FutureT::new(|_reject, resolve| resolve(Some("value")));
    /// assert_eq!(looked_up.fork_blocking(), Ok(Some("value")));
    /// ```
    pub fn new<F>(fork: F) -> Self
    where
        F: FnOnce(Reject<E>, Resolve<M>) + Send + 'static,
    {
        Self {
            future: Future::new(fork),
        }
    }

    /// Wraps an existing future whose value is already an inner monad.
    pub const fn from_future(future: Future<E, M>) -> Self {
        Self { future }
    }

    /// Unwraps into the underlying future.
    pub fn into_future(self) -> Future<E, M> {
        self.future
    }

    /// Lifts an inner monad value. The outer layer always succeeds.
    pub fn lift(inner: M) -> Self {
        Self::from_future(Future::of(inner))
    }

    /// Creates a transformer that rejects on the outer layer.
    pub fn reject(error: E) -> Self {
        Self::from_future(Future::reject(error))
    }
}

impl<E, M> FutureT<E, M>
where
    E: Send + 'static,
    M: Applicative + Send + 'static,
{
    /// Lifts a plain value as `M::pure(value)`.
    ///
    /// Called through any instantiation of the inner constructor, the way
    /// [`Applicative::pure`] is: `FutureT::<E, Option<()>>::of(5)` yields a
    /// `FutureT<E, Option<i32>>`.
    pub fn of<A>(value: A) -> FutureT<E, M::WithType<A>>
    where
        M::WithType<A>: Send + 'static,
    {
        FutureT::lift(M::pure(value))
    }

    /// Alias for [`of`](FutureT::of).
    #[inline]
    pub fn pure<A>(value: A) -> FutureT<E, M::WithType<A>>
    where
        M::WithType<A>: Send + 'static,
    {
        Self::of(value)
    }
}

impl<E, M> FutureT<E, M>
where
    E: From<Fault> + Send + 'static,
    M: Send + 'static,
{
    /// Lifts an outer computation, wrapping its value with `M::pure`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::{Future, FutureT};
    ///
    /// let outer: Future<String, i32> = Future::of(3);
    /// let lifted = FutureT::<String, Option<()>>::lift_future(outer);
    /// assert_eq!(lifted.fork_blocking(), Ok(Some(3)));
    /// ```
    pub fn lift_future<A>(future: Future<E, A>) -> FutureT<E, M::WithType<A>>
    where
        M: Applicative,
        A: Send + 'static,
        M::WithType<A>: Send + 'static,
    {
        FutureT::from_future(future.map(M::pure))
    }

    /// Runs the computation. Same contract as [`Future::fork`].
    pub fn fork<R, S>(self, on_reject: R, on_resolve: S)
    where
        R: FnOnce(E) + Send + 'static,
        S: FnOnce(M) + Send + 'static,
    {
        self.future.fork(on_reject, on_resolve);
    }

    /// Forks and blocks until the outer layer settles.
    pub fn fork_blocking(self) -> Result<M, E> {
        self.future.fork_blocking()
    }

    /// Sequences a step that receives the whole inner value.
    ///
    /// `function` runs after this transformer resolved and its result is
    /// forked in turn. Outer rejections short-circuit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::FutureT;
    /// use forkable::typeclass::Monad;
    ///
    /// let first = FutureT::<String, Option<i32>>::lift(Some(4));
    /// let second = first.chain(|inner| FutureT::lift(inner.flat_map(|n| Some(n * 10))));
    /// assert_eq!(second.fork_blocking(), Ok(Some(40)));
    /// ```
    pub fn chain<N, F>(self, function: F) -> FutureT<E, N>
    where
        N: Send + 'static,
        F: FnOnce(M) -> FutureT<E, N> + Send + 'static,
    {
        FutureT::from_future(self.future.chain(move |inner| function(inner).future))
    }

    /// Recovers from an outer rejection.
    pub fn chain_reject<E2, F>(self, function: F) -> FutureT<E2, M>
    where
        E2: From<Fault> + Send + 'static,
        F: FnOnce(E) -> FutureT<E2, M> + Send + 'static,
    {
        FutureT::from_future(self.future.chain_reject(move |error| function(error).future))
    }

    /// Transforms the outer rejection value.
    pub fn map_reject<E2, F>(self, function: F) -> FutureT<E2, M>
    where
        E2: From<Fault> + Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        FutureT::from_future(self.future.map_reject(function))
    }
}

impl<E, M> FutureT<E, M>
where
    E: From<Fault> + Send + 'static,
    M: Monad + Send + 'static,
{
    /// Transforms the value inside the inner monad with `M::fmap`.
    ///
    /// Equivalent to `chain(|inner| FutureT::lift(inner.fmap(function)))`.
    pub fn map<B, F>(self, function: F) -> FutureT<E, M::WithType<B>>
    where
        B: 'static,
        F: FnOnce(M::Inner) -> B + Send + 'static,
        M::WithType<B>: Send + 'static,
    {
        self.chain(move |inner| FutureT::lift(inner.fmap(function)))
    }

    /// Binds in the inner monad: resolves with `inner.flat_map(function)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::FutureT;
    ///
    /// let checked = FutureT::<String, Result<i32, String>>::lift(Ok(12))
    ///     .chain_inner(|n| if n > 10 { Err(format!("{n} too big")) } else { Ok(n) });
    /// assert_eq!(checked.fork_blocking(), Ok(Err("12 too big".to_string())));
    /// ```
    pub fn chain_inner<B, F>(self, function: F) -> FutureT<E, M::WithType<B>>
    where
        F: FnOnce(M::Inner) -> M::WithType<B> + Send + 'static,
        M::WithType<B>: Send + 'static,
    {
        self.chain(move |inner| FutureT::lift(inner.flat_map(function)))
    }

    /// Applies an inner function to an inner value with `M::apply`.
    ///
    /// Both transformers are forked right away. The outer layer follows the
    /// same single-fire rejection rules as [`Future::ap`]; the inner layer
    /// combines with the inner monad's own applicative, so `Option`
    /// short-circuits and [`Validated`](super::Validated) accumulates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forkable::future::FutureT;
    ///
    /// let function = FutureT::<String, Option<fn(i32) -> i32>>::lift(Some(|x| x * 2));
    /// let value = FutureT::<String, Option<i32>>::lift(Some(21));
    /// assert_eq!(function.ap(value).fork_blocking(), Ok(Some(42)));
    /// ```
    pub fn ap<B, C>(self, other: FutureT<E, M::WithType<B>>) -> FutureT<E, M::WithType<C>>
    where
        M::Inner: FnOnce(B) -> C,
        M::WithType<B>: Send + 'static,
        M::WithType<C>: Send + 'static,
    {
        FutureT::from_future(
            self.future
                .map2(other.future, |functions: M, values: M::WithType<B>| functions.apply(values)),
        )
    }
}

impl<E, M> fmt::Debug for FutureT<E, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FutureT")
            .field("fork", &self.future.description())
            .finish_non_exhaustive()
    }
}

impl<E, M> fmt::Display for FutureT<E, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "FutureT({})", self.future.description())
    }
}
