//! Slab storage for the nodes of a treap.
//!
//! Nodes refer to each other (children and parent) through [`NodeId`]s rather
//! than pointers. A slot freed by a removal is reused by a later allocation,
//! but each reuse bumps the slot's generation so that ids handed out for the
//! old occupant no longer resolve.

use std::{mem, ops};

/// A handle to a value stored in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    index: usize,
    generation: u64,
}

enum Block<T> {
    Occupied(T),
    // Next vacant block in the free list.
    Vacant(Option<usize>),
}

struct Slot<T> {
    generation: u64,
    block: Block<T>,
}

/// A single-typed allocator handing out generation-checked [`NodeId`]s.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` and returns its id.
    pub(crate) fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.free.take() {
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    block: Block::Occupied(value),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
            Some(index) => {
                let slot = &mut self.slots[index];
                match mem::replace(&mut slot.block, Block::Occupied(value)) {
                    Block::Vacant(next) => self.free = next,
                    Block::Occupied(_) => unreachable!("free list points at an occupied slot"),
                }
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
        }
    }

    /// Removes the value behind `id`, returning it, or `None` if `id` is stale.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        let slot = &mut self.slots[id.index];
        slot.generation = slot.generation.wrapping_add(1);
        match mem::replace(&mut slot.block, Block::Vacant(self.free)) {
            Block::Occupied(value) => {
                self.free = Some(id.index);
                self.len -= 1;
                Some(value)
            }
            Block::Vacant(_) => unreachable!("generation matched a vacant slot"),
        }
    }

    /// Returns `true` if `id` refers to a live value.
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.slots.get(id.index).is_some_and(|slot| {
            slot.generation == id.generation && matches!(slot.block, Block::Occupied(_))
        })
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.index) {
            Some(Slot {
                generation,
                block: Block::Occupied(value),
            }) if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.index) {
            Some(Slot {
                generation,
                block: Block::Occupied(value),
            }) if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Drops every value. Previously issued ids are never reissued.
    ///
    /// As with [`Vec::clear`], the allocated slots are kept for reuse. They
    /// also hold the generations that keep old ids from resolving, so they
    /// are only released when the arena is dropped.
    pub(crate) fn clear(&mut self) {
        self.free = None;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.generation = slot.generation.wrapping_add(1);
            slot.block = Block::Vacant(self.free);
            self.free = Some(index);
        }
        self.len = 0;
    }
}

impl<T> ops::Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        self.get(id).expect("node id is stale")
    }
}

impl<T> ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        self.get_mut(id).expect("node id is stale")
    }
}
