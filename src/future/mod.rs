//! Deferred computations in continuation-passing style.
//!
//! A [`Future<E, A>`](Future) wraps a fork function that receives two
//! continuations, one for failure (`E`) and one for success (`A`). Nothing
//! runs until [`Future::fork`] supplies them. Composition (`map`, `chain`,
//! `ap`, `bimap`, `chain_reject`) builds a new fork function around the old
//! one and never mutates it.
//!
//! [`FutureT<E, M>`](FutureT) layers the same machinery over an inner monad
//! `M`, delegating inner composition to the [`typeclass`](crate::typeclass)
//! traits.
//!
//! # Faults
//!
//! A panic inside a fork function or inside a function passed to a
//! combinator is caught and delivered to the reject continuation as
//! `E::from(Fault)`. Error types opt in by implementing `From<Fault>`;
//! `String` and [`Fault`] itself already do.
//!
//! # Examples
//!
//! ```rust
//! use forkable::future::Future;
//!
//! let add_one: Future<String, fn(i32) -> i32> = Future::of(|x| x + 1);
//! assert_eq!(add_one.ap(Future::of(41)).fork_blocking(), Ok(42));
//! ```

mod apply;
#[cfg(feature = "async")]
mod bridge;
mod callback;
mod deferred;
mod fault;
mod trampoline;
mod transformer;
mod validated;

pub use callback::{Reject, Resolve};
pub use deferred::Future;
pub use fault::Fault;
pub use transformer::FutureT;
pub use validated::Validated;
