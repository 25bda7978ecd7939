#![allow(unsafe_code)]
//! Thread-safe lazy evaluation with memoization.
//!
//! This module provides the `MemoCell<T, F>` type, a single-slot lazy holder.
//! The producer runs only when the value is first demanded and its result is
//! cached for every subsequent access, so a `MemoCell` is referentially
//! transparent: forcing it twice observes one computation.
//!
//! # Safety
//!
//! This module uses unsafe code for the interior value slot. The following
//! invariants are maintained:
//! - the slot is written at most once, by the thread holding the slow-path
//!   mutex while the evaluated flag is still `false`
//! - the evaluated flag is set with `Release` ordering after the write, and
//!   every read of the slot is preceded by an `Acquire` load observing `true`
//! - once the flag is `true`, the slot is never written again
//!
//! # Failure and Retry
//!
//! A producer that panics during evaluation propagates the panic to the
//! forcing caller and leaves the cell unevaluated with the producer intact.
//! A later call to `force()` re-invokes the producer. Only a *successful*
//! evaluation is cached; a failing attempt is not. Racing observers that
//! were blocked on the slow path will retry the evaluation themselves and
//! typically observe the same failure.
//!
//! # Re-entry Warning
//!
//! Calling `force()` recursively from within the producer on the same cell
//! deadlocks on the slow-path mutex. This is a documented hazard, not
//! automatically prevented.
//!
//! # Examples
//!
//! ```rust
//! use valgebra::control::MemoCell;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cell = Arc::new(MemoCell::new(|| {
//!     println!("Computing...");
//!     42
//! }));
//!
//! // Spawn multiple threads that demand the lazy value
//! let handles: Vec<_> = (0..10).map(|_| {
//!     let cell = Arc::clone(&cell);
//!     thread::spawn(move || *cell.force())
//! }).collect();
//!
//! // All threads get the same value, and the producer ran only once
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 42);
//! }
//! ```

use std::cell::UnsafeCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::Optional;

/// A thread-safe, memoizing lazy value.
///
/// `MemoCell<T, F>` defers computation until the value is first accessed via
/// `force()`. Once computed, the value is cached and subsequent calls return
/// the cached value without recomputation.
///
/// Any number of threads may call `force()` concurrently; the producer runs
/// at most once per successful evaluation. The first access takes the
/// slow-path mutex; every later access is a single atomic load.
///
/// # Type Parameters
///
/// * `T` - The type of the computed value
/// * `F` - The type of the producer (defaults to `fn() -> T`)
///
/// The producer is `Fn() -> T` rather than `FnOnce` so that a failed
/// evaluation attempt can be retried; it is dropped after the first
/// successful evaluation, releasing any captured resources.
///
/// # Thread Safety
///
/// This type implements `Send` and `Sync` when `T: Send + Sync` and
/// `F: Send`.
///
/// # Examples
///
/// ```rust
/// use valgebra::control::MemoCell;
///
/// let cell = MemoCell::new(|| 21 * 2);
/// assert!(!cell.is_evaluated());
///
/// assert_eq!(*cell.force(), 42);
/// assert!(cell.is_evaluated());
/// ```
pub struct MemoCell<T, F = fn() -> T> {
    evaluated: AtomicBool,
    value: UnsafeCell<Option<T>>,
    producer: Mutex<Option<F>>,
    empty: bool,
}

// # Safety
//
// Send/Sync conditions: T: Send + Sync, F: Send
// - T: Send: into_inner() can move the value to another thread
// - T: Sync: force() hands out &T to any number of threads
// - F: Send: the producer may run on whichever thread forces first
// - The evaluated flag plus the slow-path mutex guarantee the slot is
//   written once and published with Release/Acquire ordering
unsafe impl<T: Send + Sync, F: Send> Send for MemoCell<T, F> {}
unsafe impl<T: Send + Sync, F: Send> Sync for MemoCell<T, F> {}

impl<T, F: Fn() -> T> MemoCell<T, F> {
    /// Creates a new lazy cell with the given producer.
    ///
    /// The producer will not be invoked until `force()` is called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| {
    ///     println!("Initializing...");
    ///     42
    /// });
    /// // Nothing printed yet
    /// ```
    #[inline]
    pub const fn new(producer: F) -> Self {
        Self {
            evaluated: AtomicBool::new(false),
            value: UnsafeCell::new(None),
            producer: Mutex::new(Some(producer)),
            empty: false,
        }
    }

    /// Forces evaluation of the cell and returns a reference to the value.
    ///
    /// If the value has not been computed yet, the producer is invoked and
    /// the result cached. Subsequent calls return the cached value.
    ///
    /// If multiple threads call `force()` concurrently, only one invokes the
    /// producer; the others block on the slow path and then observe the
    /// cached value.
    ///
    /// # Panics
    ///
    /// - With a "no such element" message if this is the [`empty`] cell
    /// - If the producer panics; the panic propagates unchanged and the cell
    ///   remains unevaluated, so a later call retries the producer
    ///
    /// [`empty`]: MemoCell::empty
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| 42);
    /// assert_eq!(*cell.force(), 42);
    /// ```
    pub fn force(&self) -> &T {
        assert!(!self.empty, "no such element: force() on empty MemoCell");

        if !self.evaluated.load(Ordering::Acquire) {
            let mut slot = self.producer.lock();
            // Re-check under the mutex: another thread may have finished
            // the evaluation while we were waiting for the lock.
            if !self.evaluated.load(Ordering::Relaxed) {
                let producer = slot
                    .as_ref()
                    .expect("unevaluated MemoCell holds a producer");
                // A panic here unwinds with the producer still in its slot,
                // leaving the cell unevaluated and retryable.
                let value = producer();

                // SAFETY: the slow-path mutex is held and the evaluated flag
                // is still false, so no other thread reads or writes the
                // slot until the Release store below.
                unsafe {
                    *self.value.get() = Some(value);
                }
                *slot = None; // release resources captured by the producer
                self.evaluated.store(true, Ordering::Release);
            }
        }

        // SAFETY: the evaluated flag was observed true with Acquire ordering
        // (or set by this thread), so the write of the value happens-before
        // this read and the slot is never written again.
        unsafe { &*self.value.get() }
            .as_ref()
            .expect("evaluated MemoCell holds a value")
    }

    /// Forces evaluation, returning `Absent` instead of panicking on the
    /// empty cell.
    ///
    /// This is the recoverable sibling of [`force`](MemoCell::force).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::{MemoCell, Optional};
    ///
    /// let cell = MemoCell::new(|| 42);
    /// assert_eq!(cell.force_optional(), Optional::present(&42));
    ///
    /// let empty: MemoCell<i32> = MemoCell::empty();
    /// assert_eq!(empty.force_optional(), Optional::absent());
    /// ```
    pub fn force_optional(&self) -> Optional<&T> {
        if self.empty {
            Optional::Absent
        } else {
            Optional::Present(self.force())
        }
    }

    /// Consumes the cell and returns the value, forcing if necessary.
    ///
    /// # Panics
    ///
    /// - With a "no such element" message if this is the empty cell
    /// - If the producer panics during a deferred evaluation
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| 42);
    /// assert_eq!(cell.into_inner(), 42);
    /// ```
    pub fn into_inner(self) -> T {
        assert!(
            !self.empty,
            "no such element: into_inner() on empty MemoCell"
        );
        let Self {
            evaluated,
            value,
            producer,
            ..
        } = self;
        if evaluated.into_inner() {
            value
                .into_inner()
                .expect("evaluated MemoCell holds a value")
        } else {
            let producer = producer
                .into_inner()
                .expect("unevaluated MemoCell holds a producer");
            producer()
        }
    }

    /// Applies a function to the eventual value, producing a new lazy cell.
    ///
    /// Neither the original producer nor `function` runs until the derived
    /// cell is forced; laziness is preserved across composition. Mapping the
    /// empty cell yields an empty cell.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| 21);
    /// let doubled = cell.map(|x| x * 2);
    ///
    /// assert_eq!(*doubled.force(), 42);
    /// ```
    pub fn map<U, G>(self, function: G) -> MemoCell<U, impl Fn() -> U>
    where
        G: Fn(&T) -> U,
    {
        let empty = self.empty;
        let cell = MemoCell::new(move || function(self.force()));
        MemoCell { empty, ..cell }
    }

    /// Applies a function that returns a `MemoCell`, then flattens the
    /// result.
    ///
    /// This is the monadic bind operation; like `map` it defers all work
    /// until the derived cell is forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| 21);
    /// let result = cell.flat_map(|x| {
    ///     let x = *x;
    ///     MemoCell::new(move || x * 2)
    /// });
    ///
    /// assert_eq!(*result.force(), 42);
    /// ```
    pub fn flat_map<U, H, G>(self, function: G) -> MemoCell<U, impl Fn() -> U>
    where
        H: Fn() -> U,
        G: Fn(&T) -> MemoCell<U, H>,
    {
        let empty = self.empty;
        let cell = MemoCell::new(move || function(self.force()).into_inner());
        MemoCell { empty, ..cell }
    }

    /// Filters the eventual value, producing a lazy `Optional`.
    ///
    /// The derived cell forces this one when demanded and yields
    /// `Present(value)` when the predicate holds, `Absent` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::{MemoCell, Optional};
    ///
    /// let cell = MemoCell::new(|| 5);
    /// let filtered = cell.filter(|x| *x > 10);
    ///
    /// assert_eq!(*filtered.force(), Optional::absent());
    /// ```
    pub fn filter<P>(self, predicate: P) -> MemoCell<Optional<T>, impl Fn() -> Optional<T>>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        let empty = self.empty;
        let cell = MemoCell::new(move || {
            let value = self.force();
            if predicate(value) {
                Optional::Present(value.clone())
            } else {
                Optional::Absent
            }
        });
        MemoCell { empty, ..cell }
    }

    /// Forces the cell, applies an action to the value, and returns the
    /// cell.
    ///
    /// Unlike `map`, `peek` is eager: it evaluates immediately.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on the empty cell.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| 42).peek(|x| println!("computed {x}"));
    /// assert!(cell.is_evaluated());
    /// ```
    pub fn peek<A>(self, action: A) -> Self
    where
        A: FnOnce(&T),
    {
        action(self.force());
        self
    }
}

impl<T> MemoCell<T, fn() -> T> {
    /// Creates a cell that is already evaluated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new_with_value(42);
    /// assert!(cell.is_evaluated());
    /// ```
    #[inline]
    pub const fn new_with_value(value: T) -> Self {
        Self {
            evaluated: AtomicBool::new(true),
            value: UnsafeCell::new(Some(value)),
            producer: Mutex::new(None),
            empty: false,
        }
    }

    /// Creates a pure lazy cell (Applicative pure).
    ///
    /// This is equivalent to `new_with_value` and lifts a value into the
    /// `MemoCell` context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::pure(42);
    /// assert_eq!(*cell.force(), 42);
    /// ```
    #[inline]
    pub const fn pure(value: T) -> Self {
        Self::new_with_value(value)
    }

    /// Returns the distinguished empty cell.
    ///
    /// Its `force()` panics with a "no such element" message,
    /// `force_optional()` returns `Absent`, and `is_empty()` reports `true`
    /// without ever attempting evaluation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let empty: MemoCell<i32> = MemoCell::empty();
    /// assert!(empty.is_empty());
    /// assert!(!empty.is_evaluated());
    /// ```
    #[inline]
    pub const fn empty() -> Self {
        Self {
            evaluated: AtomicBool::new(false),
            value: UnsafeCell::new(None),
            producer: Mutex::new(None),
            empty: true,
        }
    }
}

impl<T, F> MemoCell<T, F> {
    /// Returns a reference to the value if it has been evaluated.
    ///
    /// Unlike `force()`, this method never triggers evaluation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| 42);
    /// assert!(cell.get().is_none());
    ///
    /// let _ = cell.force();
    /// assert_eq!(cell.get(), Some(&42));
    /// ```
    #[inline]
    pub fn get(&self) -> Option<&T> {
        if self.evaluated.load(Ordering::Acquire) {
            // SAFETY: the evaluated flag is true, so the slot holds a value
            // and is never written again.
            unsafe { &*self.value.get() }.as_ref()
        } else {
            None
        }
    }

    /// Returns whether `force()` has completed successfully at least once.
    ///
    /// Non-blocking; a single atomic load.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell = MemoCell::new(|| 42);
    /// assert!(!cell.is_evaluated());
    ///
    /// let _ = cell.force();
    /// assert!(cell.is_evaluated());
    /// ```
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated.load(Ordering::Acquire)
    }

    /// Returns whether this is the distinguished empty cell.
    ///
    /// Never attempts evaluation.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }
}

impl<T: Clone, F: Clone + Fn() -> T> Clone for MemoCell<T, F> {
    /// Clones the cached value when evaluated, otherwise the producer.
    ///
    /// The clone is an independent cell: forcing it does not affect the
    /// original, and an unevaluated clone evaluates its own copy of the
    /// producer.
    fn clone(&self) -> Self {
        // The evaluated check and the slot read must be atomic with respect
        // to `force()`, which clears the slot under this same lock after
        // caching the value. Locking first means an unevaluated observation
        // guarantees the producer is still in its slot.
        let slot = self.producer.lock();
        match self.get() {
            Some(value) => Self {
                evaluated: AtomicBool::new(true),
                value: UnsafeCell::new(Some(value.clone())),
                producer: Mutex::new(None),
                empty: false,
            },
            None => Self {
                evaluated: AtomicBool::new(false),
                value: UnsafeCell::new(None),
                producer: Mutex::new(slot.clone()),
                empty: self.empty,
            },
        }
    }
}

impl<T: Default> Default for MemoCell<T> {
    /// Creates a cell that lazily computes the default value of `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::MemoCell;
    ///
    /// let cell: MemoCell<i32> = MemoCell::default();
    /// assert_eq!(*cell.force(), 0);
    /// ```
    fn default() -> Self {
        Self::new(T::default)
    }
}

// Equality and hashing force evaluation: two cells are equal iff their
// forced values are equal. Empty cells are equal only to empty cells.
impl<T: PartialEq, F: Fn() -> T, G: Fn() -> T> PartialEq<MemoCell<T, G>> for MemoCell<T, F> {
    fn eq(&self, other: &MemoCell<T, G>) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => self.force() == other.force(),
        }
    }
}

impl<T: Eq, F: Fn() -> T> Eq for MemoCell<T, F> {}

impl<T: Hash, F: Fn() -> T> Hash for MemoCell<T, F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.empty.hash(state);
        if !self.empty {
            self.force().hash(state);
        }
    }
}

// Rendering never forces: an unevaluated cell shows a placeholder.
impl<T: fmt::Debug, F> fmt::Debug for MemoCell<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => formatter.debug_tuple("MemoCell").field(value).finish(),
            None => formatter.debug_tuple("MemoCell").field(&"?").finish(),
        }
    }
}

impl<T: fmt::Display, F> fmt::Display for MemoCell<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => write!(formatter, "MemoCell({value})"),
            None => formatter.write_str("MemoCell(?)"),
        }
    }
}

// Serialization writes the forced value, never the producer, so a
// deserialized cell is always pre-evaluated.
#[cfg(feature = "serde")]
impl<T, F> serde::Serialize for MemoCell<T, F>
where
    T: serde::Serialize,
    F: Fn() -> T,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;
        if self.is_empty() {
            return Err(S::Error::custom("cannot serialize an empty MemoCell"));
        }
        self.force().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for MemoCell<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new_with_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::thread;

    static_assertions::assert_impl_all!(MemoCell<i32>: Send, Sync);

    #[rstest]
    fn test_memo_cell_defers_computation() {
        let computed = Cell::new(false);
        let _cell = MemoCell::new(|| {
            computed.set(true);
            42
        });
        assert!(!computed.get());
    }

    #[rstest]
    fn test_memo_cell_force_computes_value() {
        let cell = MemoCell::new(|| 42);
        assert_eq!(*cell.force(), 42);
        assert!(cell.is_evaluated());
    }

    #[rstest]
    fn test_memo_cell_memoization() {
        let calls = Cell::new(0);
        let cell = MemoCell::new(|| {
            calls.set(calls.get() + 1);
            42
        });

        assert_eq!(calls.get(), 0);
        let _ = cell.force();
        assert_eq!(calls.get(), 1);
        let _ = cell.force();
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_memo_cell_force_returns_same_value() {
        let cell = MemoCell::new(|| String::from("value"));
        let first = cell.force() as *const String;
        let second = cell.force() as *const String;
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_memo_cell_producer_dropped_after_evaluation() {
        struct DropTracker(Arc<AtomicUsize>);
        impl Drop for DropTracker {
            fn drop(&mut self) {
                self.0.fetch_add(1, AtomicOrdering::SeqCst);
            }
        }

        let dropped = Arc::new(AtomicUsize::new(0));
        let tracker = DropTracker(Arc::clone(&dropped));
        let cell = MemoCell::new(move || {
            let _captured = &tracker;
            42
        });

        assert_eq!(dropped.load(AtomicOrdering::SeqCst), 0);
        let _ = cell.force();
        assert_eq!(dropped.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(*cell.force(), 42);
    }

    #[rstest]
    fn test_memo_cell_empty_reports_without_evaluation() {
        let empty: MemoCell<i32> = MemoCell::empty();
        assert!(empty.is_empty());
        assert!(!empty.is_evaluated());
    }

    #[rstest]
    fn test_memo_cell_empty_force_panics() {
        let empty: MemoCell<i32> = MemoCell::empty();
        let result = catch_unwind(AssertUnwindSafe(|| *empty.force()));
        assert!(result.is_err());
    }

    #[rstest]
    fn test_memo_cell_empty_force_optional_is_absent() {
        let empty: MemoCell<i32> = MemoCell::empty();
        assert_eq!(empty.force_optional(), Optional::absent());
    }

    #[rstest]
    fn test_memo_cell_failed_evaluation_permits_retry() {
        let attempts = Cell::new(0);
        let cell = MemoCell::new(|| {
            attempts.set(attempts.get() + 1);
            assert!(attempts.get() > 1, "flaky producer");
            42
        });

        let first = catch_unwind(AssertUnwindSafe(|| *cell.force()));
        assert!(first.is_err());
        assert!(!cell.is_evaluated());

        assert_eq!(*cell.force(), 42);
        assert_eq!(attempts.get(), 2);
        assert!(cell.is_evaluated());
    }

    #[rstest]
    fn test_memo_cell_new_with_value() {
        let cell = MemoCell::new_with_value(42);
        assert!(cell.is_evaluated());
        assert_eq!(*cell.force(), 42);
    }

    #[rstest]
    fn test_memo_cell_pure() {
        let cell = MemoCell::pure(42);
        assert_eq!(*cell.force(), 42);
    }

    #[rstest]
    fn test_memo_cell_get_before_and_after_force() {
        let cell = MemoCell::new(|| 42);
        assert!(cell.get().is_none());
        let _ = cell.force();
        assert_eq!(cell.get(), Some(&42));
    }

    #[rstest]
    fn test_memo_cell_into_inner_unevaluated() {
        let cell = MemoCell::new(|| 42);
        assert_eq!(cell.into_inner(), 42);
    }

    #[rstest]
    fn test_memo_cell_into_inner_evaluated() {
        let cell = MemoCell::new(|| 42);
        let _ = cell.force();
        assert_eq!(cell.into_inner(), 42);
    }

    #[rstest]
    fn test_memo_cell_map_preserves_laziness() {
        let producer_calls = Cell::new(0);
        let mapper_calls = Cell::new(0);
        let cell = MemoCell::new(|| {
            producer_calls.set(producer_calls.get() + 1);
            21
        });
        let doubled = cell.map(|x| {
            mapper_calls.set(mapper_calls.get() + 1);
            x * 2
        });

        assert_eq!(producer_calls.get(), 0);
        assert_eq!(mapper_calls.get(), 0);

        assert_eq!(*doubled.force(), 42);
        assert_eq!(producer_calls.get(), 1);
        assert_eq!(mapper_calls.get(), 1);
    }

    #[rstest]
    fn test_memo_cell_map_on_empty_is_empty() {
        let empty: MemoCell<i32> = MemoCell::empty();
        let mapped = empty.map(|x| x * 2);
        assert!(mapped.is_empty());
        assert_eq!(mapped.force_optional(), Optional::absent());
    }

    #[rstest]
    fn test_memo_cell_flat_map() {
        let cell = MemoCell::new(|| 21);
        let result = cell.flat_map(|x| {
            let x = *x;
            MemoCell::new(move || x * 2)
        });
        assert_eq!(*result.force(), 42);
    }

    #[rstest]
    fn test_memo_cell_filter_present() {
        let cell = MemoCell::new(|| 42);
        let filtered = cell.filter(|x| *x > 10);
        assert_eq!(*filtered.force(), Optional::present(42));
    }

    #[rstest]
    fn test_memo_cell_filter_absent() {
        let cell = MemoCell::new(|| 5);
        let filtered = cell.filter(|x| *x > 10);
        assert_eq!(*filtered.force(), Optional::absent());
    }

    #[rstest]
    fn test_memo_cell_peek_is_eager() {
        let seen = Cell::new(0);
        let cell = MemoCell::new(|| 42).peek(|x| seen.set(*x));
        assert!(cell.is_evaluated());
        assert_eq!(seen.get(), 42);
    }

    #[rstest]
    fn test_memo_cell_display_placeholder_does_not_force() {
        let cell = MemoCell::new(|| 42);
        assert_eq!(format!("{cell}"), "MemoCell(?)");
        assert!(!cell.is_evaluated());

        let _ = cell.force();
        assert_eq!(format!("{cell}"), "MemoCell(42)");
    }

    #[rstest]
    fn test_memo_cell_debug() {
        let cell = MemoCell::new(|| 42);
        assert_eq!(format!("{cell:?}"), "MemoCell(\"?\")");
        let _ = cell.force();
        assert_eq!(format!("{cell:?}"), "MemoCell(42)");
    }

    #[rstest]
    fn test_memo_cell_equality_forces_both() {
        let left = MemoCell::new(|| 42);
        let right = MemoCell::new_with_value(42);
        assert!(left == right);
        assert!(left.is_evaluated());
    }

    #[rstest]
    fn test_memo_cell_empty_equality() {
        let left: MemoCell<i32> = MemoCell::empty();
        let right: MemoCell<i32> = MemoCell::empty();
        let full: MemoCell<i32> = MemoCell::new_with_value(42);
        assert!(left == right);
        assert!(left != full);
    }

    #[rstest]
    fn test_memo_cell_default() {
        let cell: MemoCell<i32> = MemoCell::default();
        assert_eq!(*cell.force(), 0);
    }

    #[rstest]
    fn test_memo_cell_clone_is_independent() {
        let calls = Cell::new(0);
        let cell = MemoCell::new(|| {
            calls.set(calls.get() + 1);
            42
        });
        let clone = cell.clone();

        assert_eq!(*clone.force(), 42);
        assert!(!cell.is_evaluated());
        assert_eq!(*cell.force(), 42);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn test_memo_cell_clone_of_evaluated_is_evaluated() {
        let cell = MemoCell::new(|| 42);
        let _ = cell.force();
        let clone = cell.clone();
        assert!(clone.is_evaluated());
        assert_eq!(*clone.force(), 42);
    }

    #[rstest]
    fn test_concurrent_evaluation_exactly_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let cell = Arc::new(MemoCell::new(move || {
            counter_clone.fetch_add(1, AtomicOrdering::SeqCst);
            42
        }));

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || *cell.force())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }

        assert_eq!(counter.load(AtomicOrdering::SeqCst), 1);
    }
}
