//! Semigroup type class - types with an associative binary operation.
//!
//! [`Validated`](crate::future::Validated) uses `combine` to merge the
//! failures of both sides of an `apply`.
//!
//! # Laws
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use forkable::typeclass::Semigroup;
//!
//! assert_eq!(vec![1, 2].combine(vec![3, 4]), vec![1, 2, 3, 4]);
//! ```

/// A type class for types with an associative binary operation.
pub trait Semigroup: Sized {
    /// Combines two values. Must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vec_combine_preserves_order() {
        assert_eq!(vec!["x"].combine(vec!["y", "z"]), vec!["x", "y", "z"]);
    }

    #[rstest]
    fn vec_combine_is_associative() {
        let left = vec![1].combine(vec![2]).combine(vec![3]);
        let right = vec![1].combine(vec![2].combine(vec![3]));
        assert_eq!(left, right);
    }
}
