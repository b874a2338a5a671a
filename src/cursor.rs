//! Bidirectional cursors over a [`TreapSet`].
//!
//! A [`Cursor`] is a position in a set: either an element, or the end
//! position one past the largest element. Cursors do not borrow the set they
//! come from, and every operation on a cursor goes through that set. As a
//! result, a cursor stays valid while other elements are inserted or removed;
//! only the removal of the element it points at invalidates it, which is
//! reported as [`TreapError::StaleCursor`].
//!
//! There is no position before the first element: retreating from the first
//! element is an error, just like advancing from the end. A default cursor is
//! not positioned at all, and every operation on it fails with
//! [`TreapError::UnsetCursor`] until it is overwritten by a cursor obtained
//! from the set.

use std::borrow::Borrow;

use crate::{arena::NodeId, error::TreapError, treap_set::TreapSet};

/// A position within a [`TreapSet`].
///
/// Two cursors are equal if both are at the end position, both point at the
/// same element, or both are unset. The default cursor is unset: it is neither
/// an element nor the end position.
///
/// A cursor must only be used with the set that created it.
///
/// # Examples
///
/// ```
/// use treap_set::TreapSet;
///
/// let set: TreapSet<_> = [10, 20, 30].into();
/// let mut cursor = set.begin();
/// let mut seen = Vec::new();
/// while cursor != set.end() {
///     seen.push(*set.value(&cursor)?);
///     set.advance(&mut cursor)?;
/// }
/// assert_eq!(seen, vec![10, 20, 30]);
/// # Ok::<(), treap_set::TreapError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    position: Position,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
enum Position {
    Node(NodeId),
    End,
    #[default]
    Unset,
}

impl Cursor {
    fn at(id: Option<NodeId>) -> Self {
        Cursor {
            position: id.map_or(Position::End, Position::Node),
        }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    #[inline]
    pub fn is_end(&self) -> bool {
        self.position == Position::End
    }
}

impl<T, G> TreapSet<T, G> {
    /// Returns a cursor at the smallest element, or the end position if the set
    /// is empty.
    #[must_use]
    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor::at(self.tree.first())
    }

    /// Returns the end position, one past the largest element.
    ///
    /// Retreating from the end position moves to the largest element present
    /// at the time of the retreat.
    #[must_use]
    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor::at(None)
    }

    /// Returns the element the cursor points at.
    ///
    /// # Errors
    ///
    /// Fails with [`TreapError::DerefEnd`] at the end position, with
    /// [`TreapError::StaleCursor`] if the element has been removed, and with
    /// [`TreapError::UnsetCursor`] for a default cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::{TreapError, TreapSet};
    ///
    /// let set: TreapSet<_> = [1, 2].into();
    /// assert_eq!(set.value(&set.begin()), Ok(&1));
    /// assert_eq!(set.value(&set.end()), Err(TreapError::DerefEnd));
    /// ```
    #[inline]
    pub fn value(&self, cursor: &Cursor) -> Result<&T, TreapError> {
        let id = self.live_node(cursor)?;
        Ok(&self.tree.node(id).value)
    }

    /// Moves the cursor to the next element, or to the end position if it was
    /// at the largest element.
    ///
    /// # Errors
    ///
    /// Fails with [`TreapError::AdvancePastEnd`] at the end position, with
    /// [`TreapError::StaleCursor`] if the element has been removed, and with
    /// [`TreapError::UnsetCursor`] for a default cursor. The cursor is left
    /// unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::{TreapError, TreapSet};
    ///
    /// let set: TreapSet<_> = [1, 2].into();
    /// let mut cursor = set.find(&2);
    /// set.advance(&mut cursor)?;
    /// assert!(cursor.is_end());
    /// assert_eq!(set.advance(&mut cursor), Err(TreapError::AdvancePastEnd));
    /// # Ok::<(), TreapError>(())
    /// ```
    pub fn advance(&self, cursor: &mut Cursor) -> Result<(), TreapError> {
        let id = match self.live_node(cursor) {
            Ok(id) => id,
            Err(TreapError::DerefEnd) => return Err(TreapError::AdvancePastEnd),
            Err(err) => return Err(err),
        };
        *cursor = Cursor::at(self.tree.successor(id));
        Ok(())
    }

    /// Moves the cursor to the previous element. From the end position, this
    /// moves to the largest element.
    ///
    /// # Errors
    ///
    /// Fails with [`TreapError::RetreatBeforeBegin`] at the smallest element or
    /// if the set is empty, with [`TreapError::StaleCursor`] if the element has
    /// been removed, and with [`TreapError::UnsetCursor`] for a default cursor.
    /// The cursor is left unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::{TreapError, TreapSet};
    ///
    /// let set: TreapSet<_> = [1, 2].into();
    /// let mut cursor = set.end();
    /// set.retreat(&mut cursor)?;
    /// assert_eq!(set.value(&cursor), Ok(&2));
    /// set.retreat(&mut cursor)?;
    /// assert_eq!(set.retreat(&mut cursor), Err(TreapError::RetreatBeforeBegin));
    /// assert_eq!(set.value(&cursor), Ok(&1));
    /// # Ok::<(), TreapError>(())
    /// ```
    pub fn retreat(&self, cursor: &mut Cursor) -> Result<(), TreapError> {
        let previous = match cursor.position {
            Position::End => self.tree.last(),
            Position::Node(_) | Position::Unset => {
                let id = self.live_node(cursor)?;
                self.tree.predecessor(id)
            }
        };
        match previous {
            Some(id) => {
                cursor.position = Position::Node(id);
                Ok(())
            }
            None => Err(TreapError::RetreatBeforeBegin),
        }
    }

    fn live_node(&self, cursor: &Cursor) -> Result<NodeId, TreapError> {
        match cursor.position {
            Position::End => Err(TreapError::DerefEnd),
            Position::Node(id) if self.tree.is_live(id) => Ok(id),
            Position::Node(_) => Err(TreapError::StaleCursor),
            Position::Unset => Err(TreapError::UnsetCursor),
        }
    }
}

impl<T, G> TreapSet<T, G>
where
    T: Ord,
{
    /// Returns a cursor at the element equal to `value`, or the end position if
    /// there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<_> = [1, 2, 3].into();
    /// assert_eq!(set.value(&set.find(&2)), Ok(&2));
    /// assert_eq!(set.find(&4), set.end());
    /// ```
    #[must_use]
    #[inline]
    pub fn find<Q>(&self, value: &Q) -> Cursor
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::at(self.tree.find(value))
    }

    /// Returns a cursor at the first element not less than `value`, or the end
    /// position if every element is less than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::TreapSet;
    ///
    /// let set: TreapSet<_> = [2, 4, 6, 8].into();
    /// assert_eq!(set.value(&set.lower_bound(&5)), Ok(&6));
    /// assert_eq!(set.value(&set.lower_bound(&8)), Ok(&8));
    /// assert_eq!(set.lower_bound(&9), set.end());
    /// ```
    #[must_use]
    #[inline]
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::at(self.tree.lower_bound(value))
    }
}
