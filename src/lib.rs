//! A treap is a binary search tree in which every node also carries a random
//! priority, and which is kept as a max-heap on those priorities. Elements can
//! be accessed, inserted and removed in `O(log(n))` on average, whatever the
//! order in which they arrive.
//!
//! Conceptually, a treap resembles something like:
//!
//! ```text
//!                 [5 | 90]
//!                /        \
//!          [3 | 70]      [8 | 40]
//!         /        \
//!    [1 | 20]    [4 | 60]
//! ```
//!
//! where each node `[value | priority]` has its smaller values on the left,
//! its larger values on the right, and only lower priorities below it. Every
//! node also knows its parent, which is what allows a [`Cursor`] to step to
//! the next or previous element without a stack.
//!
//! All restructuring goes through two primitives: *split*, which cuts a tree
//! into the values below and above a key, and *merge*, which joins two trees
//! whose values do not overlap.
//!
//! The element type has an ordering which **must** be well-behaved, i.e. a
//! total order as required by [`Ord`]. Specifically:
//!
//! - Be well defined: `a.cmp(b)` should always return the same value.
//! - Be anti-symmetric: `a > b` iff `b < a`, and `a == b` iff `b == a`.
//! - Be transitive: if `a > b` and `b > c` then `a > c`.
//!
//! **Failure to satisfy these properties will not cause memory unsafety, but
//! lookups may miss elements and iteration order is unspecified.**
//!
//! # Examples
//!
//! ```
//! use treap_set::TreapSet;
//!
//! let mut set = TreapSet::new();
//! for value in [5, 3, 8, 1, 4] {
//!     set.insert(value);
//! }
//! assert!(!set.insert(3));
//! assert!(set.erase(&8));
//!
//! let cursor = set.lower_bound(&2);
//! assert_eq!(set.value(&cursor), Ok(&3));
//! assert!(set.iter().eq(&[1, 3, 4, 5]));
//! ```

mod arena;
mod cursor;
mod error;
mod iter;
pub mod priority_generator;
mod treap;
mod treap_set;

pub use crate::{
    cursor::Cursor,
    error::TreapError,
    iter::{IntoIter, Iter, Range},
    priority_generator::{PriorityGenerator, Uniform, UniformError},
    treap_set::TreapSet,
};
