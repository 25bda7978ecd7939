//! Control values for functional programming.
//!
//! This module provides the immutable control values of the algebra:
//!
//! - [`MemoCell`]: thread-safe lazy evaluation with memoization
//! - [`Optional`]: a closed presence/absence container
//! - [`Disjoint`]: a closed container for one of two mutually exclusive
//!   outcomes
//!
//! # Examples
//!
//! ## Lazy Evaluation
//!
//! ```rust
//! use valgebra::control::MemoCell;
//!
//! let cell = MemoCell::new(|| {
//!     println!("Computing...");
//!     42
//! });
//! // "Computing..." is not printed yet
//!
//! let value = cell.force();
//! // Now "Computing..." is printed and value is 42
//! assert_eq!(*value, 42);
//! ```
//!
//! ## Absence Without Null
//!
//! ```rust
//! use valgebra::control::Optional;
//!
//! let present = Optional::present(5);
//! assert_eq!(present.filter(|x| *x > 10), Optional::absent());
//! ```

mod disjoint;
mod memo_cell;
mod optional;

pub use disjoint::Disjoint;
pub use memo_cell::MemoCell;
pub use optional::Optional;
