//! Higher-Kinded Type emulation through Generic Associated Types.
//!
//! Rust cannot abstract over a type constructor such as `Option<_>` directly.
//! [`TypeConstructor`] names the "hole" of a concrete type (`Inner`) and lets
//! a trait re-fill it with another type (`WithType<B>`). The whole
//! [`Functor`](super::Functor) / [`Applicative`](super::Applicative) /
//! [`Monad`](super::Monad) hierarchy, and therefore every inner monad a
//! [`FutureT`](crate::future::FutureT) can wrap, is built on top of it.
//!
//! # Example
//!
//! ```rust
//! use forkable::typeclass::TypeConstructor;
//!
//! fn empty_like<T: TypeConstructor>(_value: T) -> T::WithType<String>
//! where
//!     T::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let none_string: Option<String> = empty_like(Some(42));
//! assert_eq!(none_string, None);
//! ```

/// A trait representing a type constructor applied to some type.
///
/// # Associated Types
///
/// - `Inner`: The type parameter this constructor is currently applied to.
/// - `WithType<B>`: The same constructor applied to `B`.
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` should be `F` itself.
pub trait TypeConstructor {
    /// The inner type, e.g. `i32` for `Option<i32>`.
    type Inner;

    /// The same type constructor applied to a different type `B`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<A> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B> = Option<B>;
}

impl<T, E> TypeConstructor for Result<T, E> {
    type Inner = T;
    type WithType<B> = Result<B, E>;
}
