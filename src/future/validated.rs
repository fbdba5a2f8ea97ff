//! `Validated` - an inner monad that accumulates failures in `apply`.
//!
//! `Validated<X, A>` is either `Valid(A)` or `Invalid(X)`. Its applicative
//! `apply` merges the failures of both sides with [`Semigroup::combine`],
//! while `flat_map` stops at the first failure because the second step
//! depends on the first. Wrapped in a [`FutureT`](super::FutureT), it shows
//! the transformer's `ap` keeping the inner combination rules.
//!
//! # Examples
//!
//! ```rust
//! use forkable::future::Validated;
//! use forkable::typeclass::Applicative;
//!
//! let name: Validated<Vec<&str>, &str> = Validated::invalid(vec!["name is empty"]);
//! let age: Validated<Vec<&str>, u32> = Validated::invalid(vec!["age is negative"]);
//!
//! let person = name.map2(age, |name, age| (name, age));
//! assert_eq!(person, Validated::Invalid(vec!["name is empty", "age is negative"]));
//! ```

use crate::typeclass::{Applicative, Functor, Monad, Semigroup, TypeConstructor};

/// A success value or an accumulated failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validated<X, A> {
    /// The value passed validation.
    Valid(A),
    /// One or more failures, merged with [`Semigroup::combine`].
    Invalid(X),
}

impl<X, A> Validated<X, A> {
    /// Creates a valid value.
    pub const fn valid(value: A) -> Self {
        Self::Valid(value)
    }

    /// Creates an invalid value.
    pub const fn invalid(errors: X) -> Self {
        Self::Invalid(errors)
    }

    /// Returns `true` if this is `Valid`.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns `true` if this is `Invalid`.
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Creates a `Validated` from a `Result`.
    pub fn from_result(result: Result<A, X>) -> Self {
        result.into()
    }

    /// Converts into a `Result`.
    pub fn into_result(self) -> Result<A, X> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

impl<X, A> From<Result<A, X>> for Validated<X, A> {
    fn from(result: Result<A, X>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(errors) => Self::Invalid(errors),
        }
    }
}

impl<X, A> TypeConstructor for Validated<X, A> {
    type Inner = A;
    type WithType<B> = Validated<X, B>;
}

impl<X, A> Functor for Validated<X, A> {
    #[inline]
    fn fmap<B, F>(self, function: F) -> Validated<X, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Valid(value) => Validated::Valid(function(value)),
            Self::Invalid(errors) => Validated::Invalid(errors),
        }
    }
}

impl<X: Semigroup, A> Applicative for Validated<X, A> {
    #[inline]
    fn pure<B>(value: B) -> Validated<X, B> {
        Validated::Valid(value)
    }

    fn map2<B, C, F>(self, other: Validated<X, B>, function: F) -> Validated<X, C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Self::Valid(a), Validated::Valid(b)) => Validated::Valid(function(a, b)),
            (Self::Invalid(left), Validated::Invalid(right)) => {
                Validated::Invalid(left.combine(right))
            }
            (Self::Invalid(errors), Validated::Valid(_))
            | (Self::Valid(_), Validated::Invalid(errors)) => Validated::Invalid(errors),
        }
    }

    fn apply<B, Output>(self, other: Validated<X, B>) -> Validated<X, Output>
    where
        A: FnOnce(B) -> Output,
    {
        self.map2(other, |function, value| function(value))
    }
}

impl<X: Semigroup, A> Monad for Validated<X, A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Validated<X, B>
    where
        F: FnOnce(A) -> Validated<X, B>,
    {
        match self {
            Self::Valid(value) => function(value),
            Self::Invalid(errors) => Validated::Invalid(errors),
        }
    }
}
