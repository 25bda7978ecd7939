//! # valgebra
//!
//! An immutable value algebra for Rust: memoized lazy cells, closed sum
//! types, and a persistent linear-sequence contract.
//!
//! ## Overview
//!
//! This library replaces mutable, null-permitting idioms with
//! value-semantics equivalents that compose safely under aliasing and
//! concurrent read access:
//!
//! - **Control values**: [`MemoCell`](control::MemoCell) for thread-safe
//!   memoized lazy evaluation, [`Optional`](control::Optional) for
//!   presence/absence, and [`Disjoint`](control::Disjoint) for
//!   mutually-exclusive outcomes.
//! - **Persistent sequences**: the
//!   [`PersistentSequence`](persistent::PersistentSequence) contract with
//!   dozens of derived structural operations, and
//!   [`ConsList`](persistent::ConsList), its canonical structurally-shared
//!   implementation.
//!
//! Every transformation returns a new value; receivers and previously
//! obtained values remain valid and unchanged.
//!
//! ## Feature Flags
//!
//! - `control`: control values (`MemoCell`, `Optional`, `Disjoint`)
//! - `persistent`: the sequence contract and `ConsList`
//! - `serde`: serialization support for the value types
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use valgebra::prelude::*;
//!
//! let list = ConsList::unit([1, 2, 3]);
//! assert_eq!(list.index_where(|x| *x == 2, 0), Some(1));
//!
//! let cell = MemoCell::new(|| 42);
//! assert_eq!(*cell.force(), 42);
//! assert!(cell.is_evaluated());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use valgebra::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;
