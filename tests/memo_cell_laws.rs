#![cfg(feature = "control")]
//! Property-based tests for MemoCell.
//!
//! These tests verify referential transparency and the functor/monad
//! laws up to forcing: a MemoCell is compared by its forced value.

use proptest::prelude::*;
use valgebra::control::MemoCell;

proptest! {
    // =========================================================================
    // Referential Transparency
    // =========================================================================

    #[test]
    fn prop_force_equals_wrapped_value(value in any::<i32>()) {
        let cell = MemoCell::new(move || value);
        prop_assert_eq!(*cell.force(), value);
    }

    #[test]
    fn prop_force_is_stable(value in any::<i32>()) {
        let cell = MemoCell::new(move || value);
        prop_assert_eq!(cell.force(), cell.force());
    }

    #[test]
    fn prop_pure_equals_deferred(value in any::<i32>()) {
        prop_assert_eq!(MemoCell::pure(value), MemoCell::new(move || value));
    }

    #[test]
    fn prop_into_inner_agrees_with_force(value in any::<i32>()) {
        let cell = MemoCell::new(move || value);
        let forced = *cell.force();
        prop_assert_eq!(cell.into_inner(), forced);
    }

    // =========================================================================
    // Functor Laws
    // =========================================================================

    #[test]
    fn prop_functor_identity(value in any::<i32>()) {
        let mapped = MemoCell::new(move || value).map(|x| *x);
        prop_assert_eq!(*mapped.force(), value);
    }

    #[test]
    fn prop_functor_composition(value in any::<i32>()) {
        let f = |x: &i32| x.wrapping_add(1);
        let g = |x: &i32| x.wrapping_mul(3);

        let composed = MemoCell::new(move || value).map(move |x| g(&f(x)));
        let chained = MemoCell::new(move || value).map(f).map(g);
        prop_assert_eq!(*composed.force(), *chained.force());
    }

    // =========================================================================
    // Monad Laws
    // =========================================================================

    #[test]
    fn prop_monad_left_identity(value in any::<i32>()) {
        let f = |x: &i32| {
            let x = *x;
            MemoCell::new(move || x.wrapping_mul(2))
        };

        let bound = MemoCell::pure(value).flat_map(f);
        prop_assert_eq!(*bound.force(), *f(&value).force());
    }

    #[test]
    fn prop_monad_right_identity(value in any::<i32>()) {
        let bound = MemoCell::new(move || value).flat_map(|x| MemoCell::pure(*x));
        prop_assert_eq!(*bound.force(), value);
    }

    #[test]
    fn prop_monad_associativity(value in any::<i32>()) {
        let f = |x: &i32| {
            let x = *x;
            MemoCell::new(move || x.wrapping_add(10))
        };
        let g = |x: &i32| {
            let x = *x;
            MemoCell::new(move || x.wrapping_mul(2))
        };

        let left = MemoCell::new(move || value).flat_map(f).flat_map(g);
        let right = MemoCell::new(move || value)
            .flat_map(move |x| f(x).flat_map(g));
        prop_assert_eq!(*left.force(), *right.force());
    }
}
