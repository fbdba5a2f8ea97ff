//! # forkable
//!
//! Deferred, possibly-failing computations in continuation-passing style,
//! and a monad transformer that layers them over any inner monad.
//!
//! ## Overview
//!
//! - **Future**: a computation that does nothing until forked with a reject
//!   and a resolve continuation, composed with `map`, `chain`, `ap`,
//!   `bimap` and `chain_reject`
//! - **`FutureT`**: the same computation resolving to an inner monad
//!   (`Option`, `Result`, `Identity`, `Validated`)
//! - **Type Classes**: `Functor`, `Applicative`, `Monad` and `Semigroup`,
//!   the interface an inner monad provides
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits (Functor, Monad, etc.)
//! - `future`: `Future`, `FutureT`, `Fault` and `Validated`
//! - `async`: `into_async` bridge to `std::future::Future`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use forkable::prelude::*;
//!
//! let doubled: Future<String, i32> = Future::of(21).map(|x| x * 2);
//! assert_eq!(doubled.fork_blocking(), Ok(42));
//!
//! let inner = FutureT::<String, Option<i32>>::lift(Some(2)).chain_inner(|x| Some(x + 1));
//! assert_eq!(inner.fork_blocking(), Ok(Some(3)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use forkable::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "future")]
    pub use crate::future::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "future")]
pub mod future;
