//! Errors reported by the treap and its cursors.

use thiserror::Error;

/// Errors that can occur while operating on a [`TreapSet`][crate::TreapSet]
/// or one of its [`Cursor`][crate::Cursor]s.
///
/// Only the cursor variants can be observed through the public API; the
/// structural variant signals a broken internal invariant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum TreapError {
    /// A split was asked to partition a subtree around a key that is already
    /// stored in it.
    #[error("split encountered an element equal to the split key.")]
    EqualSplitKey,
    /// The cursor is at the end position and has no element.
    #[error("cannot dereference the end position.")]
    DerefEnd,
    /// The cursor is already at the end position.
    #[error("cannot advance past the end position.")]
    AdvancePastEnd,
    /// The cursor is already at the first element, or the set is empty.
    #[error("cannot retreat before the first element.")]
    RetreatBeforeBegin,
    /// The element the cursor pointed at has been removed from the set.
    #[error("cursor refers to an element that is no longer in the set.")]
    StaleCursor,
    /// The cursor was default-constructed and was never positioned in a set.
    #[error("cursor is not positioned in the set.")]
    UnsetCursor,
}

impl TreapError {
    /// Returns `true` if the error comes from a broken internal invariant
    /// rather than from misuse of a cursor.
    #[must_use]
    #[inline]
    pub fn is_internal(&self) -> bool {
        matches!(self, TreapError::EqualSplitKey)
    }
}
