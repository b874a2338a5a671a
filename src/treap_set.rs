//! An ordered set backed by a treap.

use std::{
    borrow::Borrow,
    fmt,
    hash::{self, Hash},
    iter,
    ops::RangeBounds,
};

use log::{debug, trace};

use crate::{
    iter::{IntoIter, Iter, Range},
    priority_generator::{PriorityGenerator, Uniform},
    treap::Treap,
};

// ////////////////////////////////////////////////////////////////////////////
// TreapSet
// ////////////////////////////////////////////////////////////////////////////

/// An ordered set of unique values, stored in a treap.
///
/// A treap is a binary search tree in which each node additionally carries a
/// randomly drawn priority, and the tree is kept as a max-heap on these
/// priorities. Insertion, removal, membership tests and successor queries all
/// take `O(log n)` expected time, independently of the order in which values
/// are inserted.
///
/// The set is rebalanced through two primitives only: *split* partitions a
/// tree around a key and *merge* joins two key-disjoint trees. Every node also
/// records its parent, which lets a [`Cursor`][crate::Cursor] step to the
/// next or previous element without borrowing the set, so that cursors
/// survive modifications of the set elsewhere.
///
/// The ordering of the elements is given by their [`Ord`] implementation,
/// which **must** be a total order that does not change while the element is
/// in the set.
///
/// # Examples
///
/// ```
/// use treap_set::TreapSet;
///
/// let mut set = TreapSet::new();
/// for value in [5, 3, 8, 1, 4] {
///     set.insert(value);
/// }
/// assert!(set.iter().eq(&[1, 3, 4, 5, 8]));
///
/// set.erase(&3);
/// assert_eq!(set.len(), 4);
/// assert!(set.iter().eq(&[1, 4, 5, 8]));
///
/// let cursor = set.lower_bound(&4);
/// assert_eq!(set.value(&cursor), Ok(&4));
/// assert_eq!(set.find(&3), set.end());
/// ```
pub struct TreapSet<T, G = Uniform> {
    pub(crate) tree: Treap<T>,
    len: usize,
    generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> TreapSet<T> {
    /// Create a new, empty set whose priorities are drawn by a [`Uniform`]
    /// generator seeded from the thread-local random number generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<i64> = TreapSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        TreapSet::with_generator(Uniform::new())
    }
}

impl<T, G> TreapSet<T, G> {
    /// Create a new, empty set drawing node priorities from `generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::{TreapSet, Uniform};
    ///
    /// // Two sets built from the same seed and the same insertions have the
    /// // same internal shape.
    /// let mut a = TreapSet::with_generator(Uniform::seeded(7));
    /// let mut b = TreapSet::with_generator(Uniform::seeded(7));
    /// a.extend(0..100);
    /// b.extend(0..100);
    /// assert_eq!(a.height(), b.height());
    /// ```
    #[must_use]
    #[inline]
    pub fn with_generator(generator: G) -> Self {
        TreapSet {
            tree: Treap::new(),
            len: 0,
            generator,
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<_> = (0..10).collect();
    /// assert_eq!(set.len(), 10);
    /// ```
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert!(set.is_empty());
    ///
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all elements from the set.
    ///
    /// The memory used for the nodes is kept and reused by later insertions.
    /// Cursors obtained before the call no longer resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set: TreapSet<_> = (0..10).collect();
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root of the
    /// underlying tree to one of its leaves, or `0` for an empty set.
    ///
    /// For `n` elements, this is `O(log n)` with high probability, provided the
    /// generator draws priorities from a wide range so that ties are rare.
    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Provides a reference to the smallest element, or `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert!(set.first().is_none());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|id| &self.tree.node(id).value)
    }

    /// Provides a reference to the largest element, or `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert!(set.last().is_none());
    ///
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    #[must_use]
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|id| &self.tree.node(id).value)
    }

    /// Removes the smallest element and returns it, or `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set: TreapSet<_> = [1, 2].into();
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert!(set.pop_first().is_none());
    /// ```
    #[inline]
    pub fn pop_first(&mut self) -> Option<T> {
        let id = self.tree.first()?;
        self.len -= 1;
        Some(self.tree.unlink(id))
    }

    /// Removes the largest element and returns it, or `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set: TreapSet<_> = [1, 2].into();
    /// assert_eq!(set.pop_last(), Some(2));
    /// assert_eq!(set.pop_last(), Some(1));
    /// assert!(set.pop_last().is_none());
    /// ```
    #[inline]
    pub fn pop_last(&mut self) -> Option<T> {
        let id = self.tree.last()?;
        self.len -= 1;
        Some(self.tree.unlink(id))
    }

    /// Creates a double-ended iterator over the elements of the set, in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<_> = [3, 1, 2].into();
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(set.iter().rev().next(), Some(&3));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree, self.len)
    }
}

impl<T, G> TreapSet<T, G>
where
    T: Ord,
{
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. If the set already
    /// contains an equal value, the set is left unchanged, `value` is dropped
    /// and no priority is drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert!(set.insert(0));
    /// assert!(set.insert(5));
    /// assert!(!set.insert(5));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        G: PriorityGenerator,
    {
        if self.contains(&value) {
            return false;
        }
        let priority = self.generator.priority();
        match self.tree.insert(value, priority) {
            Ok(_) => {
                self.len += 1;
                trace!("inserted node with priority {priority}; len = {}", self.len);
                true
            }
            // Absence of the value was checked above.
            Err(err) => unreachable!("{err}"),
        }
    }

    /// Removes a value from the set, returning whether it was present.
    ///
    /// Removing an absent value is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set: TreapSet<_> = (0..10).collect();
    /// assert!(set.erase(&4));
    /// assert!(!set.erase(&4));
    /// assert_eq!(set.len(), 9);
    /// ```
    #[inline]
    pub fn erase<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`, or `None` if there is
    /// no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let mut set: TreapSet<String> = ["a", "b"].map(String::from).into();
    /// assert_eq!(set.take("a"), Some(String::from("a")));
    /// assert!(set.take("a").is_none());
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = self.tree.remove(value)?;
        self.len -= 1;
        trace!("removed node; len = {}", self.len);
        Some(removed)
    }

    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<_> = (0..10).collect();
    /// assert!(set.contains(&4));
    /// assert!(!set.contains(&15));
    /// ```
    #[must_use]
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find(value).is_some()
    }

    /// Returns a reference to the element equal to `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<_> = [1, 2, 3].into();
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    #[must_use]
    #[inline]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find(value).map(|id| &self.tree.node(id).value)
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the
    /// set, in ascending order.
    ///
    /// Unlike [`BTreeSet::range`][std::collections::BTreeSet::range], an
    /// inverted range yields nothing instead of panicking.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    /// use std::ops::Bound::{Excluded, Unbounded};
    ///
    /// let set: TreapSet<_> = (0..10).collect();
    /// assert!(set.range(3..=6).eq(&[3, 4, 5, 6]));
    /// assert!(set.range((Excluded(7), Unbounded)).eq(&[8, 9]));
    /// assert_eq!(set.range(6..3).next(), None);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        let front = self.tree.seek_front(range.start_bound());
        let back = self.tree.seek_back(range.end_bound());
        match (front, back) {
            (Some(front), Some(back))
                if self.tree.node(front).value <= self.tree.node(back).value =>
            {
                Range::new(&self.tree, front, back)
            }
            _ => Range::empty(&self.tree),
        }
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

#[cfg(test)]
impl<T: Ord, G> TreapSet<T, G> {
    /// Checks the integrity of the set.
    pub(crate) fn check(&self) {
        assert_eq!(self.tree.check(), self.len, "len out of sync");
        assert_eq!(self.tree.node_count(), self.len, "len out of sync");
    }
}

impl<T, G> TreapSet<T, G>
where
    T: fmt::Debug,
{
    /// Writes the internal structure of the set to `sink`: one line per
    /// element in ascending order, followed by the value of the element's
    /// parent in the tree (or `root`).
    ///
    /// The output is meant for debugging; its format is not stable.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `sink`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<_> = [1].into();
    /// let mut out = String::new();
    /// set.write_structure(&mut out).unwrap();
    /// assert_eq!(out, "1 root\n");
    /// ```
    #[inline]
    pub fn write_structure<W: fmt::Write>(&self, sink: &mut W) -> fmt::Result {
        self.tree.write_structure(sink)
    }

    /// Logs the internal structure of the set at the `debug` level, as
    /// produced by [`write_structure`][Self::write_structure].
    pub fn debug_structure(&self) {
        let mut out = String::new();
        if self.write_structure(&mut out).is_err() {
            return;
        }
        for line in out.lines() {
            debug!("{line}");
        }
        debug!("end of structure ({} elements)", self.len);
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for TreapSet<T> {
    #[inline]
    fn default() -> TreapSet<T> {
        TreapSet::new()
    }
}

/// Copying a set re-inserts every element, in ascending order, into a new set
/// whose generator is a clone of the source's generator.
///
/// The copy has the same elements as the source but the priorities are drawn
/// afresh, so its internal shape generally differs from the source's.
impl<T, G> Clone for TreapSet<T, G>
where
    T: Ord + Clone,
    G: PriorityGenerator + Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        let mut copy = TreapSet::with_generator(self.generator.clone());
        copy.extend(self.iter().cloned());
        copy
    }

    /// Assignment: the current contents are dropped and replaced by a copy of
    /// `source`.
    #[inline]
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.generator.clone_from(&source.generator);
        self.extend(source.iter().cloned());
    }
}

/// This implementation of `PartialEq` only checks that the *elements* are
/// equal; the shape of the trees and the generators are ignored.
impl<A, B, G, H> PartialEq<TreapSet<B, H>> for TreapSet<A, G>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &TreapSet<B, H>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, G> Eq for TreapSet<T, G> {}

impl<T: Hash, G> Hash for TreapSet<T, G> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T, G> Extend<T> for TreapSet<T, G>
where
    T: Ord,
    G: PriorityGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.insert(element);
        }
    }
}

impl<'a, T, G> Extend<&'a T> for TreapSet<T, G>
where
    T: 'a + Ord + Copy,
    G: PriorityGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iterable: I) {
        self.extend(iterable.into_iter().copied());
    }
}

impl<T: Ord> iter::FromIterator<T> for TreapSet<T> {
    #[inline]
    fn from_iter<I>(iter: I) -> TreapSet<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = TreapSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for TreapSet<T> {
    #[inline]
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T, G> fmt::Debug for TreapSet<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, G> IntoIterator for TreapSet<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.tree)
    }
}

impl<'a, T, G> IntoIterator for &'a TreapSet<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::{
        collections::BTreeSet,
        hash::{DefaultHasher, Hash, Hasher},
        iter,
        ops::Bound,
    };

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rand::prelude::*;
    use rstest::rstest;

    use super::TreapSet;
    use crate::{
        error::TreapError,
        priority_generator::{PriorityGenerator, Uniform},
    };

    /// Replays a fixed list of priorities, cycling when exhausted.
    #[derive(Clone)]
    struct Scripted {
        priorities: Vec<u64>,
        next: usize,
    }

    impl Scripted {
        fn new(priorities: &[u64]) -> Self {
            Scripted {
                priorities: priorities.to_vec(),
                next: 0,
            }
        }
    }

    impl PriorityGenerator for Scripted {
        fn priority(&mut self) -> u64 {
            let priority = self.priorities[self.next % self.priorities.len()];
            self.next += 1;
            priority
        }
    }

    fn structure<T: std::fmt::Debug, G>(set: &TreapSet<T, G>) -> String {
        let mut out = String::new();
        set.write_structure(&mut out).unwrap();
        out
    }

    #[test]
    fn basic_small() {
        let mut set: TreapSet<i64> = TreapSet::new();
        set.check();
        assert!(!set.erase(&1));
        set.check();
        assert!(set.insert(1));
        set.check();
        assert!(set.erase(&1));
        set.check();
        assert!(set.insert(1));
        set.check();
        assert!(set.insert(2));
        set.check();
        assert!(set.erase(&1));
        set.check();
        assert!(set.erase(&2));
        set.check();
        assert!(!set.erase(&1));
        set.check();
    }

    #[test]
    fn basic_large() {
        let size = 10_000;
        let mut set = TreapSet::with_generator(Uniform::seeded(0x1234_abcd));
        assert!(set.is_empty());

        for i in 0..size {
            set.insert(i);
            assert_eq!(set.len(), i + 1);
        }
        set.check();

        for i in 0..size {
            assert_eq!(set.take(&i), Some(i));
            assert_eq!(set.len(), size - i - 1);
        }
        set.check();
    }

    #[test]
    fn scenario() {
        let mut set = TreapSet::new();
        for value in [5, 3, 8, 1, 4] {
            set.insert(value);
        }
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);

        set.erase(&3);
        set.check();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 4, 5, 8]);
        assert_eq!(set.len(), 4);

        let cursor = set.lower_bound(&4);
        assert_eq!(set.value(&cursor), Ok(&4));
        assert_eq!(set.find(&3), set.end());
    }

    #[test]
    fn insert_duplicate() {
        let mut set = TreapSet::with_generator(Scripted::new(&[50, 30, 40]));
        assert!(set.insert(1));
        let shape = structure(&set);
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
        assert_eq!(structure(&set), shape);

        // The rejected duplicate did not consume a priority.
        assert!(set.insert(2));
        assert!(set.insert(3));
        insta::assert_snapshot!(structure(&set), @r"
        1 root
        2 parent: 3
        3 parent: 1
        ");
    }

    #[test]
    fn structure_with_scripted_priorities() {
        let mut set = TreapSet::with_generator(Scripted::new(&[90, 70, 40, 20, 65]));
        set.extend([5, 3, 8, 1, 4]);
        set.check();
        insta::assert_snapshot!(structure(&set), @r"
        1 parent: 3
        3 parent: 5
        4 parent: 3
        5 root
        8 parent: 5
        ");
        assert_eq!(set.height(), 3);
    }

    #[test]
    fn debug_structure_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
        let set: TreapSet<_> = (0..10).collect();
        set.debug_structure();
        assert_eq!(format!("{set:?}"), "{0, 1, 2, 3, 4, 5, 6, 7, 8, 9}");
    }

    #[rstest]
    #[case(&[], None, None)]
    #[case(&[7], Some(7), Some(7))]
    #[case(&[4, 9, 1, 6], Some(1), Some(9))]
    fn first_last(#[case] values: &[i32], #[case] first: Option<i32>, #[case] last: Option<i32>) {
        let set: TreapSet<_> = values.iter().copied().collect();
        assert_eq!(set.first().copied(), first);
        assert_eq!(set.last().copied(), last);
    }

    #[test]
    fn pop() {
        let size = 1000;
        let mut set: TreapSet<_> = (0..size).collect();
        for i in 0..size / 2 {
            assert_eq!(set.pop_first(), Some(i));
            assert_eq!(set.pop_last(), Some(size - i - 1));
            assert_eq!(set.len(), size - 2 * (i + 1));
            set.check();
        }
        assert!(set.is_empty());
        assert!(set.pop_first().is_none());
        assert!(set.pop_last().is_none());
    }

    #[test]
    fn contains() {
        let (min, max) = (25, 75);
        let set: TreapSet<_> = (min..max).collect();

        for i in 0..100 {
            assert_eq!(set.contains(&i), (min..max).contains(&i));
            assert_eq!(set.get(&i).is_some(), (min..max).contains(&i));
        }
    }

    #[test]
    fn borrowed_lookup() {
        let mut set: TreapSet<String> = ["apple", "banana", "cherry"].map(String::from).into();
        assert!(set.contains("banana"));
        assert_eq!(set.get("cherry").map(String::as_str), Some("cherry"));
        assert!(set.erase("apple"));
        assert!(!set.contains("apple"));
        assert_eq!(
            set.range::<str, _>((Bound::Included("b"), Bound::Unbounded))
                .count(),
            2
        );
    }

    #[test]
    fn clear() {
        let mut set: TreapSet<i64> = (0..100).collect();
        assert_eq!(set.len(), 100);
        let cursor = set.find(&5);
        set.clear();
        set.check();
        assert!(set.is_empty());
        set.extend(0..10);
        set.check();
        assert_eq!(set.len(), 10);
        assert_eq!(set.value(&cursor), Err(TreapError::StaleCursor));
    }

    #[test]
    fn random_operations_match_btreeset() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut set = TreapSet::with_generator(Uniform::seeded(1));
        let mut expected = BTreeSet::new();
        for step in 0..20_000 {
            let value: u16 = rng.random_range(0..512);
            if rng.random_bool(0.6) {
                assert_eq!(set.insert(value), expected.insert(value));
            } else {
                assert_eq!(set.erase(&value), expected.remove(&value));
            }
            assert_eq!(set.len(), expected.len());
            if step % 1000 == 0 {
                set.check();
                assert!(set.iter().eq(expected.iter()));
            }
        }
        set.check();
        assert!(set.iter().eq(expected.iter()));
        for value in 0..512_u16 {
            assert_eq!(set.contains(&value), expected.contains(&value));
        }
    }

    #[test]
    fn erase_then_find() {
        let mut set: TreapSet<_> = (0..200).collect();
        for value in (0..200).filter(|v| v % 3 == 0) {
            set.erase(&value);
        }
        set.check();
        for value in 0..200 {
            if value % 3 == 0 {
                assert_eq!(set.find(&value), set.end());
            } else {
                assert_eq!(set.value(&set.find(&value)), Ok(&value));
            }
        }
    }

    #[test]
    fn ascending_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let set: TreapSet<u32> = iter::repeat_with(|| rng.random()).take(5_000).collect();
        assert!(set.iter().zip(set.iter().skip(1)).all(|(a, b)| a < b));
        assert_eq!(set.iter().count(), set.len());
    }

    #[rstest]
    fn depth_is_logarithmic(#[values(100, 1_000, 10_000)] size: u32) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(u64::from(size));
        let bound = 4.0 * f64::from(size).log2() + 8.0;
        for _ in 0..20 {
            let set: TreapSet<u32> = iter::repeat_with(|| rng.random())
                .take(usize::try_from(size)?)
                .collect();
            let height = f64::from(u32::try_from(set.height())?);
            assert!(height <= bound, "height {height} too large for {size} elements");
        }
        Ok(())
    }

    #[test]
    fn sorted_insertions_stay_balanced() {
        let set = TreapSet::<u32>::from_iter(0..10_000);
        assert!(set.height() <= 60, "height {}", set.height());
    }

    #[test]
    fn narrowest_priority_range_stays_balanced() -> Result<()> {
        assert!(Uniform::with_max(1).is_err());

        let mut set = TreapSet::with_generator(Uniform::with_max(Uniform::MIN_MAX)?);
        set.extend(0..200_000_u32);
        set.check();
        assert!(set.height() <= 100, "height {}", set.height());
        Ok(())
    }

    #[test]
    fn clone_is_independent() {
        let mut a: TreapSet<_> = (0..100).collect();
        let b = a.clone();
        b.check();
        assert_eq!(a, b);

        for i in 0..50 {
            a.erase(&i);
        }
        a.insert(1_000);
        assert_eq!(b.len(), 100);
        assert!(b.iter().copied().eq(0..100));
        assert_ne!(a, b);
    }

    #[test]
    fn clone_redraws_priorities() {
        let mut a = TreapSet::with_generator(Scripted::new(&[1, 2, 3, 4, 5]));
        a.extend([3, 1, 4, 5, 2]);
        let b = a.clone();
        assert_eq!(a, b);
        // In `a`, 2 drew the highest priority. The copy re-inserts 1..=5 in
        // ascending order while replaying the priorities 1..=5, so 5 ends up
        // at the root.
        assert_eq!(structure(&a).lines().find(|l| l.ends_with("root")), Some("2 root"));
        assert_eq!(structure(&b).lines().find(|l| l.ends_with("root")), Some("5 root"));
    }

    #[test]
    fn clone_from() {
        let source: TreapSet<_> = (10..20).collect();
        let mut target: TreapSet<_> = (0..5).collect();
        target.clone_from(&source);
        target.check();
        assert_eq!(target, source);
        assert!(!target.contains(&0));
    }

    #[test]
    fn equality() {
        let a: TreapSet<i64> = (0..100).collect();
        let b: TreapSet<i64> = (0..100).rev().collect();
        let c: TreapSet<i64> = (0..10).collect();
        let d: TreapSet<i64> = (100..200).collect();
        let e: TreapSet<i64> = (0..100).chain(0..1).collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a, e);
        assert_ne!(c, d);
    }

    #[test]
    fn hash_follows_contents() {
        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let a: TreapSet<_> = [3, 1, 2].into();
        let b: TreapSet<_> = [1, 2, 3, 3].into();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn extend_by_reference() -> Result<()> {
        let mut set: TreapSet<i32, _> = TreapSet::with_generator(Uniform::with_max(1 << 40)?);
        set.extend(&[3, 1, 2]);
        set.extend([2, 4]);
        assert!(set.iter().eq(&[1, 2, 3, 4]));
        Ok(())
    }
}
