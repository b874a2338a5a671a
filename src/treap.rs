//! The node tree behind a [`TreapSet`][crate::TreapSet].
//!
//! A treap is a binary search tree on the node values which is, at the same
//! time, a max-heap on the node priorities:
//!
//! ```text
//!                 [5|90]
//!                /      \
//!           [3|70]      [8|40]
//!           /    \
//!      [1|20]    [4|65]
//! ```
//!
//! where `[v|p]` is a node with value `v` and priority `p`. With random
//! priorities the tree has the shape of a random binary search tree, and so
//! an expected depth of `O(log n)`.
//!
//! The tree is rebalanced exclusively through [`Treap::split`] and
//! [`Treap::merge`]; no rotations are performed. Each node also records its
//! parent so that the in-order successor and predecessor of any node can be
//! found without a stack, which is what cursors and iterators rely on.

use std::{borrow::Borrow, cmp::Ordering, fmt, ops::Bound};

use crate::{
    arena::{Arena, NodeId},
    error::TreapError,
};

// ////////////////////////////////////////////////////////////////////////////
// Node
// ////////////////////////////////////////////////////////////////////////////

/// A node of the treap.
///
/// The node owns its children through `left` and `right`; `parent` is only a
/// way back up the tree and must be kept consistent with the child links of
/// the parent.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) priority: u64,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(value: T, priority: u64) -> Self {
        Node {
            value,
            priority,
            left: None,
            right: None,
            parent: None,
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Treap
// ////////////////////////////////////////////////////////////////////////////

/// An arena of nodes together with the root of the tree they form.
pub(crate) struct Treap<T> {
    nodes: Arena<Node<T>>,
    root: Option<NodeId>,
}

// ///////////////////////////////////////////////
// Link maintenance
// ///////////////////////////////////////////////

impl<T> Treap<T> {
    pub(crate) fn new() -> Self {
        Treap {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    /// Returns `true` if `id` still refers to a node of this tree.
    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of live nodes.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.nodes[id].left = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(id);
        }
    }

    fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.nodes[id].right = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(id);
        }
    }

    fn set_root(&mut self, tree: Option<NodeId>) {
        self.root = tree;
        if let Some(root) = tree {
            self.nodes[root].parent = None;
        }
    }
}

// ///////////////////////////////////////////////
// Structural primitives
// ///////////////////////////////////////////////

impl<T> Treap<T> {
    /// Merges two subtrees into one, restoring the heap property.
    ///
    /// Every value in `left` must be less than every value in `right`; this is
    /// not checked. The root of the result is left for the caller to attach.
    pub(crate) fn merge(&mut self, left: Option<NodeId>, right: Option<NodeId>) -> Option<NodeId> {
        match (left, right) {
            (Some(l), Some(r)) => {
                if self.nodes[l].priority > self.nodes[r].priority {
                    let inner = self.nodes[l].right;
                    let merged = self.merge(inner, Some(r));
                    self.set_right(l, merged);
                    Some(l)
                } else {
                    let inner = self.nodes[r].left;
                    let merged = self.merge(Some(l), inner);
                    self.set_left(r, merged);
                    Some(r)
                }
            }
            (tree, None) | (None, tree) => tree,
        }
    }

    /// Splices `id` out of the tree, replacing it by the merge of its
    /// children. `parent` must be the current parent of `id`.
    ///
    /// The node itself stays in the arena; the caller releases it.
    fn splice_out(&mut self, id: NodeId, parent: Option<NodeId>) {
        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        for child in [left, right].into_iter().flatten() {
            self.nodes[child].parent = parent;
        }
        let replacement = self.merge(left, right);
        match parent {
            None => self.set_root(replacement),
            Some(parent) if self.nodes[parent].left == Some(id) => {
                self.set_left(parent, replacement);
            }
            Some(parent) => self.set_right(parent, replacement),
        }
    }

    /// Removes the node `id` from the tree and returns its value.
    pub(crate) fn unlink(&mut self, id: NodeId) -> T {
        let parent = self.nodes[id].parent;
        self.splice_out(id, parent);
        self.release(id)
    }

    fn release(&mut self, id: NodeId) -> T {
        match self.nodes.free(id) {
            Some(node) => node.value,
            None => unreachable!("released a node that is not in the arena"),
        }
    }
}

impl<T: Ord> Treap<T> {
    /// Partitions `tree` into the values less than `key` and the values
    /// greater than `key`. Both returned roots are parentless.
    ///
    /// # Errors
    ///
    /// Fails with [`TreapError::EqualSplitKey`] if `key` is stored in `tree`.
    /// No link is modified in that case: every level only relinks after the
    /// recursive call below it has succeeded.
    pub(crate) fn split(
        &mut self,
        tree: Option<NodeId>,
        key: &T,
    ) -> Result<(Option<NodeId>, Option<NodeId>), TreapError> {
        let Some(id) = tree else {
            return Ok((None, None));
        };
        match key.cmp(&self.nodes[id].value) {
            Ordering::Less => {
                let left = self.nodes[id].left;
                let (less, greater) = self.split(left, key)?;
                self.set_left(id, greater);
                self.nodes[id].parent = None;
                Ok((less, Some(id)))
            }
            Ordering::Greater => {
                let right = self.nodes[id].right;
                let (less, greater) = self.split(right, key)?;
                self.set_right(id, less);
                self.nodes[id].parent = None;
                Ok((Some(id), greater))
            }
            Ordering::Equal => Err(TreapError::EqualSplitKey),
        }
    }

    /// Inserts `value` with the given `priority` by splitting the tree around
    /// `value` and merging the new node in between the two halves.
    ///
    /// # Errors
    ///
    /// Fails with [`TreapError::EqualSplitKey`], leaving the tree untouched,
    /// if `value` is already stored.
    pub(crate) fn insert(&mut self, value: T, priority: u64) -> Result<NodeId, TreapError> {
        let root = self.root;
        let (less, greater) = self.split(root, &value)?;
        let id = self.nodes.allocate(Node::new(value, priority));
        let left = self.merge(less, Some(id));
        let merged = self.merge(left, greater);
        self.set_root(merged);
        Ok(id)
    }

    /// Removes the value equal to `key`, returning it, or `None` if absent.
    ///
    /// Descends from the root keeping track of the parent of the examined
    /// node, then splices the matching node out of its parent's slot.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut parent = None;
        let mut tree = self.root;
        while let Some(id) = tree {
            let node = &self.nodes[id];
            match key.cmp(node.value.borrow()) {
                Ordering::Less => tree = node.left,
                Ordering::Greater => tree = node.right,
                Ordering::Equal => {
                    self.splice_out(id, parent);
                    return Some(self.release(id));
                }
            }
            parent = Some(id);
        }
        None
    }
}

// ///////////////////////////////////////////////
// Queries
// ///////////////////////////////////////////////

impl<T> Treap<T> {
    /// The node holding the smallest value.
    pub(crate) fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// The node holding the largest value.
    pub(crate) fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.rightmost(root))
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// The in-order successor of `id`.
    ///
    /// Either the leftmost node of the right subtree or, failing that, the
    /// first ancestor reached from its left subtree.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[id].right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        while let Some(parent) = self.nodes[child].parent {
            if self.nodes[parent].left == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// The in-order predecessor of `id`; the mirror of
    /// [`successor`][Self::successor].
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.nodes[id].left {
            return Some(self.rightmost(left));
        }
        let mut child = id;
        while let Some(parent) = self.nodes[child].parent {
            if self.nodes[parent].right == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// Number of nodes on the longest root-to-leaf path.
    ///
    /// Walks the tree with an explicit stack, so that it also works on trees
    /// that have degenerated towards a list.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Consumes the tree, returning its values in ascending order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<T> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.first();
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.successor(id);
        }
        ids.into_iter().map(|id| self.release(id)).collect()
    }
}

impl<T: Ord> Treap<T> {
    /// The node equal to `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            cursor = match key.cmp(node.value.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// The first node not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.ceiling(key, true)
    }

    /// The first node greater than `key`, or equal to it if `inclusive`.
    ///
    /// The descent remembers the last node at which it turned left; that node
    /// is the smallest value seen so far on the right of `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q, inclusive: bool) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut candidate = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            cursor = match node.value.borrow().cmp(key) {
                Ordering::Equal if inclusive => return Some(id),
                Ordering::Less | Ordering::Equal => node.right,
                Ordering::Greater => {
                    candidate = Some(id);
                    node.left
                }
            };
        }
        candidate
    }

    /// The last node less than `key`, or equal to it if `inclusive`.
    pub(crate) fn floor<Q>(&self, key: &Q, inclusive: bool) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut candidate = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            cursor = match node.value.borrow().cmp(key) {
                Ordering::Equal if inclusive => return Some(id),
                Ordering::Greater | Ordering::Equal => node.left,
                Ordering::Less => {
                    candidate = Some(id);
                    node.right
                }
            };
        }
        candidate
    }

    /// The first node within the lower `bound`.
    pub(crate) fn seek_front<Q>(&self, bound: Bound<&Q>) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match bound {
            Bound::Included(key) => self.ceiling(key, true),
            Bound::Excluded(key) => self.ceiling(key, false),
            Bound::Unbounded => self.first(),
        }
    }

    /// The last node within the upper `bound`.
    pub(crate) fn seek_back<Q>(&self, bound: Bound<&Q>) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match bound {
            Bound::Included(key) => self.floor(key, true),
            Bound::Excluded(key) => self.floor(key, false),
            Bound::Unbounded => self.last(),
        }
    }
}

// ///////////////////////////////////////////////
// Diagnostics
// ///////////////////////////////////////////////

impl<T: fmt::Debug> Treap<T> {
    /// Writes one line per node, in ascending order, naming the value of the
    /// node's parent.
    pub(crate) fn write_structure<W: fmt::Write>(&self, sink: &mut W) -> fmt::Result {
        let mut cursor = self.first();
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            match node.parent {
                Some(parent) => writeln!(sink, "{:?} parent: {:?}", node.value, self.nodes[parent].value)?,
                None => writeln!(sink, "{:?} root", node.value)?,
            }
            cursor = self.successor(id);
        }
        Ok(())
    }
}

#[cfg(test)]
impl<T: Ord> Treap<T> {
    /// Checks the integrity of the tree, returning the number of nodes.
    ///
    /// # Panics
    ///
    /// Panics if the BST order, the heap order or the parent links are broken.
    pub(crate) fn check(&self) -> usize {
        if let Some(root) = self.root {
            assert!(self.nodes[root].parent.is_none(), "root has a parent");
        }
        let count = self.check_subtree(self.root);
        assert_eq!(count, self.nodes.len(), "unreachable nodes in the arena");
        count
    }

    fn check_subtree(&self, tree: Option<NodeId>) -> usize {
        let mut count = 0;
        let mut stack: Vec<(NodeId, Option<&T>, Option<&T>)> =
            tree.map(|id| (id, None, None)).into_iter().collect();
        while let Some((id, lower, upper)) = stack.pop() {
            count += 1;
            let node = &self.nodes[id];
            if let Some(lower) = lower {
                assert!(lower < &node.value, "BST order broken");
            }
            if let Some(upper) = upper {
                assert!(&node.value < upper, "BST order broken");
            }
            for child in [node.left, node.right].into_iter().flatten() {
                let child = &self.nodes[child];
                assert_eq!(child.parent, Some(id), "parent link broken");
                assert!(child.priority <= node.priority, "heap order broken");
            }
            if let Some(left) = node.left {
                stack.push((left, lower, Some(&node.value)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(&node.value), upper));
            }
        }
        count
    }
}
