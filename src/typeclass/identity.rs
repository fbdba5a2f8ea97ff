//! Identity wrapper type - the identity functor.
//!
//! `Identity` adds no effect at all. Wrapped in a
//! [`FutureT`](crate::future::FutureT) it makes the transformer behave exactly
//! like a plain [`Future`](crate::future::Future), which is what the
//! transformer tests lean on.

use super::TypeConstructor;

/// The identity functor - wraps a value without adding any behavior.
///
/// # Examples
///
/// ```rust
/// use forkable::future::FutureT;
/// use forkable::typeclass::Identity;
///
/// let plain = FutureT::<String, Identity<()>>::of(7).map(|n| n * 6);
/// assert_eq!(plain.fork_blocking(), Ok(Identity(42)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity<A>(pub A);

impl<A> TypeConstructor for Identity<A> {
    type Inner = A;
    type WithType<B> = Identity<B>;
}
