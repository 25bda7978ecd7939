//! Persistent (immutable) sequences.
//!
//! This module provides the [`PersistentSequence`] contract, a linear
//! sequence built on head/tail decomposition where every transformation
//! returns a new sequence value, and [`ConsList`], its canonical
//! structurally-shared implementation.
//!
//! # Structural Sharing
//!
//! Taking the tail of a sequence never copies the remaining elements; it
//! returns an existing sub-structure. Transformations leave the receiver
//! and every previously obtained sequence value valid and unchanged.
//!
//! # Examples
//!
//! ```rust
//! use valgebra::persistent::{ConsList, PersistentSequence};
//!
//! let list = ConsList::empty().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), &1);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.length(), 3);     // Original unchanged
//! assert_eq!(extended.length(), 4); // New list
//! ```

mod cons_list;
mod sequence;

pub use cons_list::ConsList;
pub use sequence::{PersistentSequence, SequenceIter};
