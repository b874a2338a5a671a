//! Iterators over the elements of a [`TreapSet`][crate::TreapSet].
//!
//! All iterators yield elements in ascending order and can be consumed from
//! either end.

use std::{iter::FusedIterator, vec};

use crate::{arena::NodeId, treap::Treap};

// ///////////////////////////////////////////////
// Range
// ///////////////////////////////////////////////

/// Iterator over a contiguous run of elements of a set, by reference.
///
/// Created by [`TreapSet::range`][crate::TreapSet::range].
pub struct Range<'a, T> {
    tree: &'a Treap<T>,
    // Both ends are inclusive; either both are set or neither is.
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl<'a, T> Range<'a, T> {
    /// Iterates from `front` to `back` inclusive. `front` must not come after
    /// `back`.
    pub(crate) fn new(tree: &'a Treap<T>, front: NodeId, back: NodeId) -> Self {
        Range {
            tree,
            front: Some(front),
            back: Some(back),
        }
    }

    pub(crate) fn empty(tree: &'a Treap<T>) -> Self {
        Range {
            tree,
            front: None,
            back: None,
        }
    }

    fn finish(&mut self) {
        self.front = None;
        self.back = None;
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front?;
        if self.back == Some(current) {
            self.finish();
        } else {
            self.front = self.tree.successor(current);
        }
        Some(&self.tree.node(current).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.front.is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }

    fn min(mut self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for Range<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let current = self.back?;
        if self.front == Some(current) {
            self.finish();
        } else {
            self.back = self.tree.predecessor(current);
        }
        Some(&self.tree.node(current).value)
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

// ///////////////////////////////////////////////
// Iter
// ///////////////////////////////////////////////

/// Iterator over every element of a set, by reference.
///
/// Created by [`TreapSet::iter`][crate::TreapSet::iter].
pub struct Iter<'a, T> {
    range: Range<'a, T>,
    size: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Treap<T>, size: usize) -> Self {
        let range = match (tree.first(), tree.last()) {
            (Some(first), Some(last)) => Range::new(tree, first, last),
            _ => Range::empty(tree),
        };
        Iter { range, size }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.range.next()?;
        self.size -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }

    fn min(mut self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.next_back()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let value = self.range.next_back()?;
        self.size -= 1;
        Some(value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            range: self.range.clone(),
            size: self.size,
        }
    }
}

// ///////////////////////////////////////////////
// IntoIter
// ///////////////////////////////////////////////

/// Owning iterator over the elements of a set.
///
/// Created by [`TreapSet::into_iter`][crate::TreapSet::into_iter]. The nodes
/// are released up front, so dropping the iterator early only drops the
/// remaining elements.
pub struct IntoIter<T> {
    values: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(tree: Treap<T>) -> Self {
        IntoIter {
            values: tree.into_sorted_vec().into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
