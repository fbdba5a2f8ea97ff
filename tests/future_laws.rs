#![cfg(feature = "future")]
//! Property-based tests for Future laws.
//!
//! Two futures are considered equal when `fork_blocking` yields the same
//! outcome.
//!
//! - Functor identity and composition
//! - Monad left identity, right identity and associativity
//! - Applicative homomorphism and the `ap`/`map2` agreement

use forkable::future::Future;
use proptest::prelude::*;

fn settle(value: i32, reject: bool) -> Future<String, i32> {
    if reject {
        Future::reject(format!("rejected {value}"))
    } else {
        Future::of(value)
    }
}

fn halve(n: i32) -> Future<String, i32> {
    if n % 2 == 0 {
        Future::of(n / 2)
    } else {
        Future::reject(format!("{n} is odd"))
    }
}

fn decrement(n: i32) -> Future<String, i32> {
    Future::of(n.wrapping_sub(1))
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Identity Law: fa.map(|x| x) == fa
    #[test]
    fn prop_future_functor_identity(value: i32, reject: bool) {
        let mapped = settle(value, reject).map(|x| x).fork_blocking();
        prop_assert_eq!(mapped, settle(value, reject).fork_blocking());
    }

    /// Composition Law: fa.map(f).map(g) == fa.map(|x| g(f(x)))
    #[test]
    fn prop_future_functor_composition(value: i32, reject: bool) {
        let function1 = |n: i32| n.wrapping_add(7);
        let function2 = |n: i32| n.wrapping_mul(3);

        let left = settle(value, reject).map(function1).map(function2).fork_blocking();
        let right = settle(value, reject)
            .map(move |x| function2(function1(x)))
            .fork_blocking();

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity Law: Future::of(a).chain(f) == f(a)
    #[test]
    fn prop_future_left_identity(value: i32) {
        let left = Future::of(value).chain(halve).fork_blocking();
        prop_assert_eq!(left, halve(value).fork_blocking());
    }

    /// Right Identity Law: fa.chain(Future::of) == fa
    #[test]
    fn prop_future_right_identity(value: i32, reject: bool) {
        let left = settle(value, reject).chain(Future::of).fork_blocking();
        prop_assert_eq!(left, settle(value, reject).fork_blocking());
    }

    /// Associativity Law: fa.chain(f).chain(g) == fa.chain(|x| f(x).chain(g))
    #[test]
    fn prop_future_associativity(value: i32, reject: bool) {
        let left = settle(value, reject).chain(halve).chain(decrement).fork_blocking();
        let right = settle(value, reject)
            .chain(|x| halve(x).chain(decrement))
            .fork_blocking();

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Applicative Laws
// =============================================================================

proptest! {
    /// Homomorphism Law: of(f).ap(of(x)) == of(f(x))
    #[test]
    fn prop_future_homomorphism(value: i32) {
        let function: fn(i32) -> i32 = |n| n.wrapping_mul(5);

        let left = Future::<String, fn(i32) -> i32>::of(function)
            .ap(Future::of(value))
            .fork_blocking();
        prop_assert_eq!(left, Ok(function(value)));
    }

    /// map2 agrees with map followed by ap.
    #[test]
    fn prop_future_map2_matches_ap(left: i32, right: i32, reject_left: bool, reject_right: bool) {
        let combined = settle(left, reject_left)
            .map2(settle(right, reject_right), i32::wrapping_add)
            .fork_blocking();
        let applied = settle(left, reject_left)
            .map(|a| move |b: i32| a.wrapping_add(b))
            .ap(settle(right, reject_right))
            .fork_blocking();

        prop_assert_eq!(combined, applied);
    }

    /// A rejection on either side of ap wins, preferring the function side.
    #[test]
    fn prop_future_ap_rejects_with_first_error(value: i32) {
        let rejected = settle(value, true)
            .map(|a| move |b: i32| a.wrapping_add(b))
            .ap(settle(value, true))
            .fork_blocking();

        prop_assert_eq!(rejected, Err(format!("rejected {value}")));
    }
}
