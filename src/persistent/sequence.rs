//! The persistent linear-sequence contract.
//!
//! [`PersistentSequence`] is an abstract capability, not a concrete
//! structure: a sequence is either empty or a head element plus a tail
//! sequence. Implementations provide six primitives (`empty`, `cons`,
//! `is_empty`, `head`, `tail`, `length`) and inherit dozens of derived
//! operations expressed purely in terms of those primitives. An
//! implementation may override a derived operation for performance, but
//! the observable behavior must match the default semantics.
//!
//! Every derived operation returns a new sequence value; the receiver and
//! any sequence obtained earlier remain valid and unchanged.

use std::cmp::Ordering;
use std::iter;
use std::marker::PhantomData;

use crate::control::Optional;

/// An owning iterator over the elements of a persistent sequence.
///
/// Produced by [`PersistentSequence::iter`]; walks the sequence by
/// repeated head/tail decomposition, cloning each element.
pub struct SequenceIter<T: Clone, S: PersistentSequence<T>> {
    remaining: S,
    _element: PhantomData<T>,
}

impl<T: Clone, S: PersistentSequence<T>> SequenceIter<T, S> {
    pub(crate) fn new(sequence: S) -> Self {
        Self {
            remaining: sequence,
            _element: PhantomData,
        }
    }
}

impl<T: Clone, S: PersistentSequence<T>> Iterator for SequenceIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining.is_empty() {
            None
        } else {
            let element = self.remaining.head().clone();
            self.remaining = self.remaining.tail();
            Some(element)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let length = self.remaining.length();
        (length, Some(length))
    }
}

impl<T: Clone, S: PersistentSequence<T>> ExactSizeIterator for SequenceIter<T, S> {}

/// A persistent linear sequence.
///
/// The conceptual shape is the canonical empty sequence, or a head element
/// plus a tail sequence. The contract requires:
///
/// - **Structural sharing**: `tail()` never copies the remaining elements;
///   it returns an existing sub-structure.
/// - **Purity**: every transformation returns a new sequence; the receiver
///   and previously obtained values are unchanged.
/// - **Linear order**: traversal is left-to-right and index-based
///   operations are 0-based relative to that traversal.
///
/// Unconditional accessors (`head`, `tail`, `last`, `reduce_left`) panic
/// with a "no such element" message on an empty receiver; their
/// `*_option` siblings return [`Optional::Absent`] instead.
///
/// The associated [`WithElement`](PersistentSequence::WithElement) type
/// lets element-type-changing operations such as [`map`] return the same
/// concrete kind of sequence.
///
/// [`map`]: PersistentSequence::map
///
/// # Examples
///
/// ```rust
/// use valgebra::persistent::{ConsList, PersistentSequence};
///
/// let list = ConsList::unit([1, 2, 3]);
/// assert_eq!(list.index_where(|x| *x == 2, 0), Some(1));
/// assert_eq!(list.map(|x| x * 2), ConsList::unit([2, 4, 6]));
/// assert_eq!(list.head(), &1); // the receiver is unchanged
/// ```
pub trait PersistentSequence<T: Clone>: Sized + Clone {
    /// The same kind of sequence with a different element type.
    type WithElement<B: Clone>: PersistentSequence<B>;

    /// Returns the canonical empty sequence.
    fn empty() -> Self;

    /// Returns a new sequence with `element` prepended.
    ///
    /// Must run in bounded time and share the receiver as its tail.
    #[must_use]
    fn cons(&self, element: T) -> Self;

    /// Returns `true` if the sequence has no elements.
    fn is_empty(&self) -> bool;

    /// Returns a reference to the first element.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on an empty sequence.
    fn head(&self) -> &T;

    /// Returns the sequence of all elements after the first.
    ///
    /// Must run in bounded time and never copy the remaining elements.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on an empty sequence.
    #[must_use]
    fn tail(&self) -> Self;

    /// Returns the number of elements.
    fn length(&self) -> usize;

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Builds a sequence from any iterable source, preserving its order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list = ConsList::unit([1, 2, 3]);
    /// assert_eq!(list.head(), &1);
    /// ```
    fn unit<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut buffer: Vec<T> = elements.into_iter().collect();
        let mut sequence = Self::empty();
        while let Some(element) = buffer.pop() {
            sequence = sequence.cons(element);
        }
        sequence
    }

    /// Builds a sequence of the same kind with a different element type.
    fn unit_of<B, I>(elements: I) -> Self::WithElement<B>
    where
        B: Clone,
        I: IntoIterator<Item = B>,
    {
        let mut buffer: Vec<B> = elements.into_iter().collect();
        let mut sequence = <Self::WithElement<B> as PersistentSequence<B>>::empty();
        while let Some(element) = buffer.pop() {
            sequence = sequence.cons(element);
        }
        sequence
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    /// Returns the first element, or `Absent` on an empty sequence.
    fn head_option(&self) -> Optional<&T> {
        if self.is_empty() {
            Optional::Absent
        } else {
            Optional::Present(self.head())
        }
    }

    /// Returns the tail, or `Absent` on an empty sequence.
    fn tail_option(&self) -> Optional<Self> {
        if self.is_empty() {
            Optional::Absent
        } else {
            Optional::Present(self.tail())
        }
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on an empty sequence.
    fn last(&self) -> T {
        assert!(!self.is_empty(), "no such element: last() on empty sequence");
        let mut these = self.clone();
        while !these.tail().is_empty() {
            these = these.tail();
        }
        these.head().clone()
    }

    /// Returns the last element, or `Absent` on an empty sequence.
    fn last_option(&self) -> Optional<T> {
        if self.is_empty() {
            Optional::Absent
        } else {
            Optional::Present(self.last())
        }
    }

    /// Returns all elements but the last.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on an empty sequence.
    #[must_use]
    fn init(&self) -> Self {
        assert!(!self.is_empty(), "no such element: init() on empty sequence");
        self.take(self.length() - 1)
    }

    /// Returns all elements but the last, or `Absent` on an empty sequence.
    fn init_option(&self) -> Optional<Self> {
        if self.is_empty() {
            Optional::Absent
        } else {
            Optional::Present(self.init())
        }
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message when `index` is out of
    /// range.
    fn get(&self, index: usize) -> T {
        match self.iter().nth(index) {
            Some(element) => element,
            None => panic!("no such element: index {index} out of bounds"),
        }
    }

    /// Returns an owning iterator over cloned elements, left to right.
    fn iter(&self) -> SequenceIter<T, Self> {
        SequenceIter::new(self.clone())
    }

    /// Returns an iterator over the elements in reverse order.
    ///
    /// Defined as the iterator of [`reverse`](PersistentSequence::reverse);
    /// an implementation with a reverse-linked backing may override this,
    /// but the element order must be identical.
    fn reverse_iterator(&self) -> SequenceIter<T, Self> {
        self.reverse().iter()
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Returns the index of the first element at or after `from` that
    /// satisfies the predicate.
    ///
    /// A `from` beyond the length is not an error; the scan finds nothing
    /// and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list = ConsList::unit([1, 2, 3]);
    /// assert_eq!(list.index_where(|x| *x == 2, 0), Some(1));
    /// assert_eq!(list.index_where(|x| *x == 2, 2), None);
    /// assert_eq!(ConsList::<i32>::empty().index_where(|_| true, 0), None);
    /// ```
    fn index_where<P>(&self, predicate: P, from: usize) -> Option<usize>
    where
        P: Fn(&T) -> bool,
    {
        let mut index = from;
        let mut these = self.drop(from);
        while !these.is_empty() {
            if predicate(these.head()) {
                return Some(index);
            }
            index += 1;
            these = these.tail();
        }
        None
    }

    /// Returns the index of the first occurrence of `element` at or after
    /// `from`.
    fn index_of(&self, element: &T, from: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_where(|candidate| candidate == element, from)
    }

    /// Returns the index of the last element at or before `end` that
    /// satisfies the predicate.
    ///
    /// The scan runs left to right and stops at the natural end of the
    /// sequence, so an `end` beyond the length is not an error: the whole
    /// sequence is scanned.
    fn last_index_where<P>(&self, predicate: P, end: usize) -> Option<usize>
    where
        P: Fn(&T) -> bool,
    {
        let mut index = 0;
        let mut these = self.clone();
        let mut last = None;
        while !these.is_empty() && index <= end {
            if predicate(these.head()) {
                last = Some(index);
            }
            these = these.tail();
            index += 1;
        }
        last
    }

    /// Returns the index of the last occurrence of `element` at or before
    /// `end`.
    fn last_index_of(&self, element: &T, end: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.last_index_where(|candidate| candidate == element, end)
    }

    /// Counts the maximal run of consecutive elements satisfying the
    /// predicate starting exactly at `from`.
    ///
    /// Returns 0 when the element at `from` fails the predicate or `from`
    /// is out of range; the run is anchored at `from`, not at the first
    /// match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list = ConsList::unit([2, 4, 6, 1, 8]);
    /// assert_eq!(list.segment_length(|x| x % 2 == 0, 0), 3);
    /// assert_eq!(list.segment_length(|x| x % 2 == 0, 3), 0);
    /// ```
    fn segment_length<P>(&self, predicate: P, from: usize) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let mut these = self.drop(from);
        let mut count = 0;
        while !these.is_empty() && predicate(these.head()) {
            count += 1;
            these = these.tail();
        }
        count
    }

    /// Counts the run of matching elements at the start of the sequence.
    fn prefix_length<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.segment_length(predicate, 0)
    }

    /// Returns the first element satisfying the predicate.
    fn find<P>(&self, predicate: P) -> Optional<T>
    where
        P: Fn(&T) -> bool,
    {
        self.iter().find(|element| predicate(element)).into()
    }

    /// Returns `true` if any element equals `element`.
    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.exists(|candidate| candidate == element)
    }

    /// Returns `true` if any element satisfies the predicate.
    fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.iter().any(|element| predicate(&element))
    }

    /// Returns `true` if every element satisfies the predicate.
    fn for_all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.iter().all(|element| predicate(&element))
    }

    // ------------------------------------------------------------------
    // Structural transforms (same element type)
    // ------------------------------------------------------------------

    /// Returns a new sequence with `element` added at the end.
    #[must_use]
    fn append(&self, element: T) -> Self {
        Self::unit(self.iter().chain(iter::once(element)))
    }

    /// Returns a new sequence with all given elements added at the end.
    #[must_use]
    fn append_all<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::unit(self.iter().chain(elements))
    }

    /// Returns a new sequence with `element` added at the front.
    ///
    /// Equivalent to [`cons`](PersistentSequence::cons).
    #[must_use]
    fn prepend(&self, element: T) -> Self {
        self.cons(element)
    }

    /// Returns a new sequence with all given elements added at the front,
    /// preserving their order.
    #[must_use]
    fn prepend_all<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::unit(elements.into_iter().chain(self.iter()))
    }

    /// Removes duplicate elements, keeping the first occurrence of each.
    #[must_use]
    fn distinct(&self) -> Self
    where
        T: PartialEq,
    {
        let mut kept: Vec<T> = Vec::new();
        for element in self.iter() {
            if !kept.contains(&element) {
                kept.push(element);
            }
        }
        Self::unit(kept)
    }

    /// Removes elements whose extracted key was already seen, keeping the
    /// first occurrence per key.
    #[must_use]
    fn distinct_by<K, F>(&self, key_of: F) -> Self
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let mut keys: Vec<K> = Vec::new();
        let mut kept: Vec<T> = Vec::new();
        for element in self.iter() {
            let key = key_of(&element);
            if !keys.contains(&key) {
                keys.push(key);
                kept.push(element);
            }
        }
        Self::unit(kept)
    }

    /// Returns the sequence without its first `count` elements.
    ///
    /// Dropping more elements than exist yields the empty sequence; the
    /// result shares structure with the receiver.
    #[must_use]
    fn drop(&self, count: usize) -> Self {
        let mut these = self.clone();
        let mut remaining = count;
        while remaining > 0 && !these.is_empty() {
            these = these.tail();
            remaining -= 1;
        }
        these
    }

    /// Returns the sequence without its last `count` elements.
    #[must_use]
    fn drop_right(&self, count: usize) -> Self {
        self.take(self.length().saturating_sub(count))
    }

    /// Drops the longest prefix of elements satisfying the predicate.
    ///
    /// The result shares structure with the receiver.
    #[must_use]
    fn drop_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        let mut these = self.clone();
        while !these.is_empty() && predicate(these.head()) {
            these = these.tail();
        }
        these
    }

    /// Returns the first `count` elements.
    #[must_use]
    fn take(&self, count: usize) -> Self {
        Self::unit(self.iter().take(count))
    }

    /// Returns the last `count` elements, sharing structure with the
    /// receiver.
    #[must_use]
    fn take_right(&self, count: usize) -> Self {
        self.drop(self.length().saturating_sub(count))
    }

    /// Returns the longest prefix of elements satisfying the predicate.
    #[must_use]
    fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        Self::unit(self.iter().take_while(|element| predicate(element)))
    }

    /// Returns the prefix of elements before the first one satisfying the
    /// predicate.
    #[must_use]
    fn take_until<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.take_while(|element| !predicate(element))
    }

    /// Keeps only the elements satisfying the predicate.
    #[must_use]
    fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        Self::unit(self.iter().filter(|element| predicate(element)))
    }

    /// Keeps only the elements present in the given collection.
    #[must_use]
    fn retain_all<I>(&self, elements: I) -> Self
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
    {
        let retained: Vec<T> = elements.into_iter().collect();
        self.filter(|element| retained.contains(element))
    }

    /// Removes the first occurrence of `element`, if present.
    #[must_use]
    fn remove(&self, element: &T) -> Self
    where
        T: PartialEq,
    {
        match self.index_of(element, 0) {
            Some(index) => self.remove_at(index),
            None => self.clone(),
        }
    }

    /// Removes the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    fn remove_at(&self, index: usize) -> Self {
        assert!(
            index < self.length(),
            "index {index} out of bounds for remove_at"
        );
        Self::unit(
            self.iter()
                .enumerate()
                .filter(|(position, _)| *position != index)
                .map(|(_, element)| element),
        )
    }

    /// Removes the first element satisfying the predicate, if any.
    #[must_use]
    fn remove_first<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        match self.index_where(predicate, 0) {
            Some(index) => self.remove_at(index),
            None => self.clone(),
        }
    }

    /// Removes the last element satisfying the predicate, if any.
    #[must_use]
    fn remove_last<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        match self.last_index_where(predicate, usize::MAX) {
            Some(index) => self.remove_at(index),
            None => self.clone(),
        }
    }

    /// Removes every occurrence of each element in the given collection.
    #[must_use]
    fn remove_all<I>(&self, elements: I) -> Self
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
    {
        let removed: Vec<T> = elements.into_iter().collect();
        self.filter(|element| !removed.contains(element))
    }

    /// Replaces the first occurrence of `old` with `new`.
    #[must_use]
    fn replace(&self, old: &T, new: T) -> Self
    where
        T: PartialEq,
    {
        match self.index_of(old, 0) {
            Some(index) => self.update(index, new),
            None => self.clone(),
        }
    }

    /// Replaces every occurrence of `old` with `new`.
    #[must_use]
    fn replace_all(&self, old: &T, new: T) -> Self
    where
        T: PartialEq,
    {
        Self::unit(self.iter().map(|element| {
            if &element == old {
                new.clone()
            } else {
                element
            }
        }))
    }

    /// Inserts `element` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics when `index` is greater than the length.
    #[must_use]
    fn insert(&self, index: usize, element: T) -> Self {
        assert!(
            index <= self.length(),
            "index {index} out of bounds for insert"
        );
        let mut buffer: Vec<T> = self.iter().collect();
        buffer.insert(index, element);
        Self::unit(buffer)
    }

    /// Inserts all given elements at `index`, preserving their order.
    ///
    /// # Panics
    ///
    /// Panics when `index` is greater than the length.
    #[must_use]
    fn insert_all<I>(&self, index: usize, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        assert!(
            index <= self.length(),
            "index {index} out of bounds for insert_all"
        );
        let mut buffer: Vec<T> = self.iter().collect();
        buffer.splice(index..index, elements);
        Self::unit(buffer)
    }

    /// Replaces the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    #[must_use]
    fn update(&self, index: usize, element: T) -> Self {
        assert!(
            index < self.length(),
            "index {index} out of bounds for update"
        );
        Self::unit(self.iter().enumerate().map(|(position, existing)| {
            if position == index {
                element.clone()
            } else {
                existing
            }
        }))
    }

    /// Places `separator` between every pair of adjacent elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list = ConsList::unit([1, 2, 3]);
    /// assert_eq!(list.intersperse(0), ConsList::unit([1, 0, 2, 0, 3]));
    /// ```
    #[must_use]
    fn intersperse(&self, separator: T) -> Self {
        let mut buffer: Vec<T> = Vec::new();
        for (position, element) in self.iter().enumerate() {
            if position > 0 {
                buffer.push(separator.clone());
            }
            buffer.push(element);
        }
        Self::unit(buffer)
    }

    /// Extends the sequence to `length` elements by appending copies of
    /// `element`; a sequence already that long is returned unchanged.
    #[must_use]
    fn pad_to(&self, length: usize, element: T) -> Self {
        let current = self.length();
        if current >= length {
            self.clone()
        } else {
            Self::unit(self.iter().chain(iter::repeat_n(element, length - current)))
        }
    }

    /// Replaces `replaced` elements starting at `from` with the elements
    /// of `that`.
    ///
    /// A `from` beyond the length appends `that` at the end; a `replaced`
    /// count running past the end removes through the last element.
    #[must_use]
    fn patch(&self, from: usize, that: &Self, replaced: usize) -> Self {
        Self::unit(
            self.take(from)
                .iter()
                .chain(that.iter())
                .chain(self.drop(from.saturating_add(replaced)).iter()),
        )
    }

    /// Returns the elements from index `begin` (inclusive) to `end`
    /// (exclusive).
    ///
    /// Both bounds are clamped to the sequence; an empty or inverted range
    /// yields the empty sequence.
    #[must_use]
    fn slice(&self, begin: usize, end: usize) -> Self {
        self.drop(begin).take(end.saturating_sub(begin))
    }

    /// Returns the elements in reverse order.
    #[must_use]
    fn reverse(&self) -> Self {
        let mut reversed = Self::empty();
        let mut these = self.clone();
        while !these.is_empty() {
            reversed = reversed.cons(these.head().clone());
            these = these.tail();
        }
        reversed
    }

    /// Returns the elements in ascending order.
    #[must_use]
    fn sort(&self) -> Self
    where
        T: Ord,
    {
        let mut buffer: Vec<T> = self.iter().collect();
        buffer.sort();
        Self::unit(buffer)
    }

    /// Returns the elements ordered by the given comparator.
    ///
    /// The sort is stable: equal elements keep their relative order.
    #[must_use]
    fn sort_by<F>(&self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut buffer: Vec<T> = self.iter().collect();
        buffer.sort_by(|left, right| compare(left, right));
        Self::unit(buffer)
    }

    /// Returns the elements ordered by the extracted key.
    #[must_use]
    fn sort_by_key<K, F>(&self, key_of: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut buffer: Vec<T> = self.iter().collect();
        buffer.sort_by_key(|element| key_of(element));
        Self::unit(buffer)
    }

    /// Splits at the end of the longest matching prefix.
    ///
    /// Returns the prefix of elements satisfying the predicate and the
    /// rest; the suffix shares structure with the receiver.
    fn span<P>(&self, predicate: P) -> (Self, Self)
    where
        P: Fn(&T) -> bool,
    {
        let mut prefix: Vec<T> = Vec::new();
        let mut these = self.clone();
        while !these.is_empty() && predicate(these.head()) {
            prefix.push(these.head().clone());
            these = these.tail();
        }
        (Self::unit(prefix), these)
    }

    /// Splits into the elements satisfying the predicate and those that
    /// do not, each side preserving traversal order.
    fn partition<P>(&self, predicate: P) -> (Self, Self)
    where
        P: Fn(&T) -> bool,
    {
        let mut matching: Vec<T> = Vec::new();
        let mut rest: Vec<T> = Vec::new();
        for element in self.iter() {
            if predicate(&element) {
                matching.push(element);
            } else {
                rest.push(element);
            }
        }
        (Self::unit(matching), Self::unit(rest))
    }

    /// Splits into the first `index` elements and the rest.
    fn split_at(&self, index: usize) -> (Self, Self) {
        (self.take(index), self.drop(index))
    }

    // ------------------------------------------------------------------
    // Transforms changing the element type
    // ------------------------------------------------------------------

    /// Applies a function to every element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list = ConsList::unit([1, 2, 3]);
    /// assert_eq!(list.map(|x| x * 2), ConsList::unit([2, 4, 6]));
    /// ```
    #[must_use]
    fn map<B, F>(&self, function: F) -> Self::WithElement<B>
    where
        B: Clone,
        F: Fn(&T) -> B,
    {
        Self::unit_of(self.iter().map(|element| function(&element)))
    }

    /// Applies a sequence-producing function to every element and
    /// concatenates the results.
    #[must_use]
    fn flat_map<B, F>(&self, function: F) -> Self::WithElement<B>
    where
        B: Clone,
        F: Fn(&T) -> Self::WithElement<B>,
    {
        Self::unit_of(self.iter().flat_map(|element| function(&element).iter()))
    }

    /// Pairs elements with those of another sequence; the result has the
    /// length of the shorter input.
    #[must_use]
    fn zip<B, S>(&self, other: &S) -> Self::WithElement<(T, B)>
    where
        B: Clone,
        S: PersistentSequence<B>,
    {
        Self::unit_of(self.iter().zip(other.iter()))
    }

    /// Pairs elements with those of another sequence, padding the shorter
    /// side with the given fill values.
    #[must_use]
    fn zip_all<B, S>(&self, other: &S, this_fill: T, that_fill: B) -> Self::WithElement<(T, B)>
    where
        B: Clone,
        S: PersistentSequence<B>,
    {
        let mut left = self.iter();
        let mut right = other.iter();
        let mut pairs: Vec<(T, B)> = Vec::new();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) => pairs.push((a, b)),
                (Some(a), None) => pairs.push((a, that_fill.clone())),
                (None, Some(b)) => pairs.push((this_fill.clone(), b)),
                (None, None) => break,
            }
        }
        Self::unit_of(pairs)
    }

    /// Pairs every element with its 0-based index.
    #[must_use]
    fn zip_with_index(&self) -> Self::WithElement<(T, usize)> {
        Self::unit_of(self.iter().zip(0..))
    }

    /// Returns every pairing of an element of this sequence with an
    /// element of `other`, in row-major order.
    #[must_use]
    fn cross_product<B, S>(&self, other: &S) -> Self::WithElement<(T, B)>
    where
        B: Clone,
        S: PersistentSequence<B>,
    {
        Self::unit_of(self.iter().flat_map(|a| {
            other.iter().map(move |b| (a.clone(), b))
        }))
    }

    /// Returns the `k`-element combinations in lexicographic order of
    /// element positions.
    ///
    /// A `k` greater than the length yields the empty sequence; `k == 0`
    /// yields one empty combination.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list = ConsList::unit([1, 2, 3]);
    /// assert_eq!(
    ///     list.combinations(2),
    ///     ConsList::unit([
    ///         ConsList::unit([1, 2]),
    ///         ConsList::unit([1, 3]),
    ///         ConsList::unit([2, 3]),
    ///     ])
    /// );
    /// ```
    #[must_use]
    fn combinations(&self, k: usize) -> Self::WithElement<Self> {
        let elements: Vec<T> = self.iter().collect();
        let n = elements.len();
        if k > n {
            return <Self::WithElement<Self> as PersistentSequence<Self>>::empty();
        }
        let mut indices: Vec<usize> = (0..k).collect();
        let mut result: Vec<Self> = Vec::new();
        loop {
            result.push(Self::unit(
                indices.iter().map(|&index| elements[index].clone()),
            ));
            // Advance to the next index tuple; stop once all are maximal.
            let mut position = k;
            while position > 0 && indices[position - 1] == position - 1 + n - k {
                position -= 1;
            }
            if position == 0 {
                break;
            }
            indices[position - 1] += 1;
            for later in position..k {
                indices[later] = indices[later - 1] + 1;
            }
        }
        Self::unit_of(result)
    }

    /// Returns the combinations of every size from 0 through the length.
    #[must_use]
    fn all_combinations(&self) -> Self::WithElement<Self> {
        let mut result: Vec<Self> = Vec::new();
        for k in 0..=self.length() {
            result.extend(self.combinations(k).iter());
        }
        Self::unit_of(result)
    }

    /// Returns the distinct permutations of the elements.
    ///
    /// Duplicate elements do not produce duplicate permutations; the
    /// empty sequence has no permutations.
    #[must_use]
    fn permutations(&self) -> Self::WithElement<Self>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return <Self::WithElement<Self> as PersistentSequence<Self>>::empty();
        }
        if self.length() == 1 {
            return <Self::WithElement<Self> as PersistentSequence<Self>>::empty()
                .cons(self.clone());
        }
        let mut result: Vec<Self> = Vec::new();
        for element in self.distinct().iter() {
            for permutation in self.remove(&element).permutations().iter() {
                result.push(permutation.cons(element.clone()));
            }
        }
        Self::unit_of(result)
    }

    /// Splits the sequence into consecutive groups of `size` elements;
    /// the last group may be shorter.
    ///
    /// # Panics
    ///
    /// Panics when `size` is zero.
    #[must_use]
    fn grouped(&self, size: usize) -> Self::WithElement<Self> {
        assert!(size > 0, "grouped requires a positive group size");
        let mut groups: Vec<Self> = Vec::new();
        let mut these = self.clone();
        while !these.is_empty() {
            groups.push(these.take(size));
            these = these.drop(size);
        }
        Self::unit_of(groups)
    }

    // ------------------------------------------------------------------
    // Folds
    // ------------------------------------------------------------------

    /// Folds the elements left to right onto a seed.
    fn fold_left<B, F>(&self, seed: B, function: F) -> B
    where
        F: Fn(B, &T) -> B,
    {
        let mut accumulator = seed;
        let mut these = self.clone();
        while !these.is_empty() {
            accumulator = function(accumulator, these.head());
            these = these.tail();
        }
        accumulator
    }

    /// Folds the elements right to left onto a seed.
    fn fold_right<B, F>(&self, function: F, seed: B) -> B
    where
        F: Fn(&T, B) -> B,
    {
        let mut accumulator = seed;
        for element in self.reverse_iterator() {
            accumulator = function(&element, accumulator);
        }
        accumulator
    }

    /// Combines the elements left to right without a seed.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on an empty sequence.
    fn reduce_left<F>(&self, function: F) -> T
    where
        F: Fn(T, &T) -> T,
    {
        assert!(
            !self.is_empty(),
            "no such element: reduce_left() on empty sequence"
        );
        let mut accumulator = self.head().clone();
        let mut these = self.tail();
        while !these.is_empty() {
            accumulator = function(accumulator, these.head());
            these = these.tail();
        }
        accumulator
    }

    /// Combines the elements left to right, or `Absent` on an empty
    /// sequence.
    fn reduce_left_option<F>(&self, function: F) -> Optional<T>
    where
        F: Fn(T, &T) -> T,
    {
        if self.is_empty() {
            Optional::Absent
        } else {
            Optional::Present(self.reduce_left(function))
        }
    }

    /// Folds left to right, keeping every intermediate state starting
    /// with the seed.
    #[must_use]
    fn scan_left<B, F>(&self, seed: B, function: F) -> Self::WithElement<B>
    where
        B: Clone,
        F: Fn(&B, &T) -> B,
    {
        let mut states: Vec<B> = vec![seed];
        for element in self.iter() {
            let next = function(&states[states.len() - 1], &element);
            states.push(next);
        }
        Self::unit_of(states)
    }

    /// Folds right to left, keeping every intermediate state ending with
    /// the seed.
    #[must_use]
    fn scan_right<B, F>(&self, function: F, seed: B) -> Self::WithElement<B>
    where
        B: Clone,
        F: Fn(&T, &B) -> B,
    {
        let mut states: Vec<B> = vec![seed];
        for element in self.reverse_iterator() {
            let next = function(&element, &states[states.len() - 1]);
            states.push(next);
        }
        states.reverse();
        Self::unit_of(states)
    }
}
