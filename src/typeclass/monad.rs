//! Monad type class - sequencing computations with dependency.
//!
//! # Laws
//!
//! ## Left Identity
//!
//! ```text
//! pure(a).flat_map(f) == f(a)
//! ```
//!
//! ## Right Identity
//!
//! ```text
//! m.flat_map(pure) == m
//! ```
//!
//! ## Associativity
//!
//! ```text
//! m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
//! ```
//!
//! `Monad` is the full capability set a [`FutureT`](crate::future::FutureT)
//! requires of its inner monad: `pure`, `fmap`, `flat_map` and `apply`.

use super::applicative::Applicative;
use super::identity::Identity;

/// A type class for types that support sequential composition.
///
/// # Examples
///
/// ```rust
/// use forkable::typeclass::Monad;
///
/// let halved = Some(10).flat_map(|n| if n > 0 { Some(n / 2) } else { None });
/// assert_eq!(halved, Some(5));
/// ```
pub trait Monad: Applicative {
    /// Applies a function returning a new monad and flattens the result.
    fn flat_map<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Self::WithType<B>;
}

impl<A> Monad for Option<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(A) -> Option<B>,
    {
        self.and_then(function)
    }
}

impl<T, E> Monad for Result<T, E> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Result<B, E>
    where
        F: FnOnce(T) -> Result<B, E>,
    {
        self.and_then(function)
    }
}

impl<A> Monad for Identity<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Identity<B>
    where
        F: FnOnce(A) -> Identity<B>,
    {
        function(self.0)
    }
}
