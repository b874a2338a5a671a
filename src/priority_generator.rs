//! Every node of a treap carries a priority, drawn once when the node is
//! created, and the tree is kept as a max-heap on these priorities. As long as
//! the priorities are independent and uniformly distributed, the shape of the
//! tree is that of a random binary search tree and its expected depth is
//! `O(log n)` regardless of the order in which the values were inserted.
//!
//! It is very unlikely that this will need to be changed as the default
//! [`Uniform`] generator should suffice, but if need be custom priority
//! generators can be implemented (for example, to replay a fixed sequence of
//! priorities and obtain a deterministic tree shape).

pub mod uniform;

pub use uniform::{Uniform, UniformError};

// ////////////////////////////////////////////////////////////////////////////
// Priority Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new value in the set, a node is created with a
/// priority as determined by a [`PriorityGenerator`].
pub trait PriorityGenerator {
    /// Generate the priority of a new node.
    ///
    /// Larger priorities end up closer to the root. Ties are allowed but
    /// degrade the balance of the tree if they are frequent.
    #[must_use]
    fn priority(&mut self) -> u64;
}

impl<G> PriorityGenerator for &mut G
where
    G: PriorityGenerator + ?Sized,
{
    #[inline]
    fn priority(&mut self) -> u64 {
        (**self).priority()
    }
}
