//! Type class traits for functional programming abstractions.
//!
//! This module provides the type classes that describe what an inner monad
//! must offer to be wrapped by [`FutureT`](crate::future::FutureT):
//!
//! - [`Functor`]: Mapping over container values (`fmap`)
//! - [`Applicative`]: Lifting values and applying functions within containers (`pure`, `apply`)
//! - [`Monad`]: Sequencing computations with dependency (`flat_map`)
//! - [`Semigroup`]: Associative binary operations, used for error accumulation
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native support for higher-kinded types (HKT).
//! [`TypeConstructor`] uses Generic Associated Types to emulate them, so a
//! transformer can be written once for "any `M<_>`".
//!
//! ## Foundation Types
//!
//! - [`Identity`]: Identity wrapper type (identity functor)
//!
//! # Examples
//!
//! ```rust
//! use forkable::typeclass::{Applicative, Monad};
//!
//! let x: Option<i32> = <Option<()>>::pure(42);
//! assert_eq!(x.flat_map(|n| Some(n + 1)), Some(43));
//! ```

mod applicative;
mod functor;
mod higher;
mod identity;
mod monad;
mod semigroup;

pub use applicative::Applicative;
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use identity::Identity;
pub use monad::Monad;
pub use semigroup::Semigroup;
