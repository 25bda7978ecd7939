//! A persistent singly-linked list.
//!
//! `ConsList<T>` is the canonical implementation of the
//! [`PersistentSequence`] contract: a reference-counted cons list with a
//! cached length. `cons` and `tail` are O(1) and share the spine of the
//! receiver, so derived lists reuse existing nodes instead of copying.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::rc::Rc;

use super::{PersistentSequence, SequenceIter};

struct Node<T> {
    element: T,
    next: Option<Rc<Node<T>>>,
}

/// A persistent singly-linked list with structural sharing.
///
/// Prepending and taking the tail are constant-time operations that share
/// all existing nodes; no operation mutates the receiver.
///
/// # Examples
///
/// ```rust
/// use valgebra::persistent::{ConsList, PersistentSequence};
///
/// let list = ConsList::empty().cons(3).cons(2).cons(1);
/// assert_eq!(list.head(), &1);
/// assert_eq!(list.length(), 3);
///
/// // The original list survives every derivation
/// let tail = list.tail();
/// assert_eq!(tail, ConsList::unit([2, 3]));
/// assert_eq!(list.length(), 3);
/// ```
pub struct ConsList<T> {
    head: Option<Rc<Node<T>>>,
    length: usize,
}

impl<T> ConsList<T> {
    /// Creates an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list: ConsList<i32> = ConsList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    // Borrowing walk over the spine, used by the comparison and
    // formatting impls that must not require T: Clone.
    fn nodes(&self) -> impl Iterator<Item = &T> {
        let mut current = self.head.as_deref();
        iter::from_fn(move || {
            let node = current?;
            current = node.next.as_deref();
            Some(&node.element)
        })
    }
}

impl<T: Clone> ConsList<T> {
    /// Splits the list into its head and tail, or `Absent` when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    /// use valgebra::persistent::{ConsList, PersistentSequence};
    ///
    /// let list = ConsList::unit([1, 2, 3]);
    /// let Optional::Present((head, tail)) = list.uncons() else {
    ///     unreachable!()
    /// };
    /// assert_eq!(head, 1);
    /// assert_eq!(tail, ConsList::unit([2, 3]));
    /// ```
    pub fn uncons(&self) -> crate::control::Optional<(T, Self)> {
        match &self.head {
            Some(node) => crate::control::Optional::Present((node.element.clone(), self.tail())),
            None => crate::control::Optional::Absent,
        }
    }
}

impl<T: Clone> PersistentSequence<T> for ConsList<T> {
    type WithElement<B: Clone> = ConsList<B>;

    fn empty() -> Self {
        Self::new()
    }

    fn cons(&self, element: T) -> Self {
        Self {
            head: Some(Rc::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn head(&self) -> &T {
        match &self.head {
            Some(node) => &node.element,
            None => panic!("no such element: head() on empty sequence"),
        }
    }

    fn tail(&self) -> Self {
        match &self.head {
            Some(node) => Self {
                head: node.next.clone(),
                length: self.length - 1,
            },
            None => panic!("no such element: tail() on empty sequence"),
        }
    }

    fn length(&self) -> usize {
        self.length
    }
}

impl<T> Clone for ConsList<T> {
    // O(1): the spine is shared, only the head pointer is cloned.
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for ConsList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Unwind the spine iteratively so that dropping a long list does not
// recurse once per node. Nodes still shared with other lists stop the
// walk; they are not ours to free.
impl<T> Drop for ConsList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match Rc::try_unwrap(node) {
                Ok(mut inner) => current = inner.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: PartialEq> PartialEq for ConsList<T> {
    // Length first: unequal lengths never compare element-wise.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.nodes().eq(other.nodes())
    }
}

impl<T: Eq> Eq for ConsList<T> {}

impl<T: PartialOrd> PartialOrd for ConsList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.nodes().partial_cmp(other.nodes())
    }
}

impl<T: Ord> Ord for ConsList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nodes().cmp(other.nodes())
    }
}

impl<T: Hash> Hash for ConsList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self.nodes() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConsList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.nodes()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ConsList<T> {
    /// Renders as `[1, 2, 3]`.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (position, element) in self.nodes().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{element}")?;
        }
        formatter.write_str("]")
    }
}

impl<T: Clone> FromIterator<T> for ConsList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(elements: I) -> Self {
        Self::unit(elements)
    }
}

impl<T: Clone> IntoIterator for ConsList<T> {
    type Item = T;
    type IntoIter = SequenceIter<T, Self>;

    fn into_iter(self) -> Self::IntoIter {
        SequenceIter::new(self)
    }
}

impl<'a, T: Clone> IntoIterator for &'a ConsList<T> {
    type Item = T;
    type IntoIter = SequenceIter<T, ConsList<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ConsList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.nodes())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ConsList<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(Self::unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_cons_list_empty() {
        let list: ConsList<i32> = ConsList::empty();
        assert!(list.is_empty());
        assert_eq!(list.length(), 0);
    }

    #[rstest]
    fn test_cons_list_cons_and_head() {
        let list = ConsList::empty().cons(3).cons(2).cons(1);
        assert_eq!(list.head(), &1);
        assert_eq!(list.length(), 3);
    }

    #[rstest]
    fn test_cons_list_unit_preserves_order() {
        let list = ConsList::unit([1, 2, 3]);
        assert_eq!(list.head(), &1);
        assert_eq!(list.tail().head(), &2);
        assert_eq!(list.tail().tail().head(), &3);
    }

    #[rstest]
    fn test_cons_list_tail_shares_structure() {
        let list = ConsList::unit([1, 2, 3]);
        let first = list.tail();
        let second = list.tail();

        assert_eq!(first, second);
        // Both tails point at the same node, not a copy.
        assert!(std::ptr::eq(first.head(), second.head()));
    }

    #[rstest]
    fn test_cons_list_cons_leaves_original_unchanged() {
        let list = ConsList::unit([2, 3]);
        let extended = list.cons(1);

        assert_eq!(list.length(), 2);
        assert_eq!(list.head(), &2);
        assert_eq!(extended.length(), 3);
        assert_eq!(extended.head(), &1);
    }

    #[rstest]
    #[should_panic(expected = "no such element")]
    fn test_cons_list_head_on_empty_panics() {
        let list: ConsList<i32> = ConsList::empty();
        let _ = list.head();
    }

    #[rstest]
    #[should_panic(expected = "no such element")]
    fn test_cons_list_tail_on_empty_panics() {
        let list: ConsList<i32> = ConsList::empty();
        let _ = list.tail();
    }

    #[rstest]
    fn test_cons_list_uncons() {
        use crate::control::Optional;

        let list = ConsList::unit([1, 2, 3]);
        assert_eq!(
            list.uncons(),
            Optional::present((1, ConsList::unit([2, 3])))
        );
        assert_eq!(ConsList::<i32>::empty().uncons(), Optional::absent());
    }

    #[rstest]
    fn test_cons_list_equality_is_length_first() {
        assert_eq!(ConsList::unit([1, 2, 3]), ConsList::unit([1, 2, 3]));
        assert_ne!(ConsList::unit([1, 2, 3]), ConsList::unit([1, 2]));
        assert_ne!(ConsList::unit([1, 2, 3]), ConsList::unit([1, 2, 4]));
    }

    #[rstest]
    fn test_cons_list_ordering_is_lexicographic() {
        assert!(ConsList::unit([1, 2]) < ConsList::unit([1, 3]));
        assert!(ConsList::unit([1, 2]) < ConsList::unit([1, 2, 0]));
        assert!(ConsList::<i32>::empty() < ConsList::unit([0]));
    }

    #[rstest]
    fn test_cons_list_display() {
        assert_eq!(ConsList::unit([1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(ConsList::<i32>::empty().to_string(), "[]");
    }

    #[rstest]
    fn test_cons_list_debug() {
        assert_eq!(format!("{:?}", ConsList::unit([1, 2, 3])), "[1, 2, 3]");
    }

    #[rstest]
    fn test_cons_list_from_iterator() {
        let list: ConsList<i32> = (1..=3).collect();
        assert_eq!(list, ConsList::unit([1, 2, 3]));
    }

    #[rstest]
    fn test_cons_list_into_iterator() {
        let list = ConsList::unit([1, 2, 3]);
        let collected: Vec<i32> = (&list).into_iter().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert_eq!(list.length(), 3);

        let owned: Vec<i32> = list.into_iter().collect();
        assert_eq!(owned, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_cons_list_drop_long_list_does_not_overflow() {
        let list: ConsList<i32> = (0..100_000).collect();
        drop(list);
    }

    #[rstest]
    fn test_cons_list_hash_agrees_with_equality() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |list: &ConsList<i32>| {
            let mut hasher = DefaultHasher::new();
            list.hash(&mut hasher);
            hasher.finish()
        };

        assert_eq!(hash(&ConsList::unit([1, 2, 3])), hash(&ConsList::unit([1, 2, 3])));
    }
}
