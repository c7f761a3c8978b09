//! Doubly-linked chain of arena-allocated nodes.
//!
//! This module provides [`LinkedChain`], the list-backed store used by
//! [`ListSequence`](crate::sequence::ListSequence), and [`ChainCursor`], the
//! forward sweep over it.
//!
//! # Overview
//!
//! Nodes live in a single slot vector and refer to their neighbours by slot
//! index instead of by pointer:
//!
//! ```text
//! slots:  [ B | (free) | A | C ]
//!                 head = 2, tail = 3
//! chain:  A(2) <-> B(0) <-> C(3)
//! ```
//!
//! Removed nodes turn into vacant slots threaded onto a free list and are
//! reused by later insertions, so the slot vector only grows when the chain
//! is longer than it has ever been. Relinking is O(1); only locating an
//! interior position walks the chain.
//!
//! # Examples
//!
//! ```rust
//! use seqkit::store::{IndexedStore, LinkedChain, Store};
//!
//! let mut chain = LinkedChain::new();
//! chain.push_back(2).unwrap();
//! chain.push_front(1).unwrap();
//! chain.push_back(3).unwrap();
//! assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! assert_eq!(chain.erase_at(1), Ok(2));
//! assert_eq!(chain.size(), 2);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;
use std::ops::Index;

use super::{IndexedStore, Store, check_index, check_position, check_sub_range};
use crate::error::{SequenceError, SequenceResult};

/// Internal node structure for the chain.
struct Node<T> {
    /// The element stored in this node.
    element: T,
    /// Slot of the previous node, `None` for the head.
    prev: Option<usize>,
    /// Slot of the next node, `None` for the tail.
    next: Option<usize>,
}

/// A slot of the node arena.
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// A doubly-linked chain of elements.
///
/// # Time Complexity
///
/// | Operation                  | Complexity     |
/// |----------------------------|----------------|
/// | `push_front`/`push_back`   | O(1) amortized |
/// | `pop_front`/`pop_back`     | O(1)           |
/// | `get`/`set`                | O(n)           |
/// | `insert_at`/`erase_at`     | O(n)           |
/// | `sub_range`                | O(n)           |
/// | `concat`                   | O(m)           |
/// | full sweep via [`iter`](Self::iter) | O(n) |
pub struct LinkedChain<T> {
    slots: Vec<Slot<T>>,
    /// Head of the vacant slot list.
    free: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    length: usize,
}

impl<T> LinkedChain<T> {
    /// Creates an empty chain without allocating.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::store::LinkedChain;
    ///
    /// let chain: LinkedChain<i32> = LinkedChain::new();
    /// assert!(chain.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
            length: 0,
        }
    }

    /// Creates an empty chain with node slots reserved for `capacity`
    /// elements.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the slots cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> SequenceResult<Self> {
        let mut chain = Self::new();
        chain.reserve_nodes(capacity)?;
        Ok(chain)
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the chain holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Starts a forward sweep at the head of the chain.
    ///
    /// Each call returns an independent cursor, so several sweeps can run
    /// side by side.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::store::LinkedChain;
    ///
    /// let chain: LinkedChain<i32> = (1..=3).collect();
    /// let mut cursor = chain.cursor();
    /// assert_eq!(cursor.read_and_advance(), Ok(&1));
    /// assert_eq!(cursor.read_and_advance(), Ok(&2));
    /// cursor.reset();
    /// assert_eq!(cursor.read_and_advance(), Ok(&1));
    /// ```
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> ChainCursor<'_, T> {
        ChainCursor {
            chain: self,
            current: self.head,
            position: 0,
        }
    }

    /// Returns an iterator over the elements from head to tail.
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> ChainCursor<'_, T> {
        self.cursor()
    }

    fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("slot {slot} is linked but vacant"),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("slot {slot} is linked but vacant"),
        }
    }

    /// Makes sure `additional` nodes can be attached without reallocating.
    fn reserve_nodes(&mut self, additional: usize) -> SequenceResult<()> {
        let vacant = self.slots.len() - self.length;
        let missing = additional.saturating_sub(vacant);
        self.slots
            .try_reserve(missing)
            .map_err(|source| SequenceError::allocation(missing, source))
    }

    /// Stores `node` in a free slot, or a new one, and returns the slot.
    fn allocate(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(slot) => {
                let previous = mem::replace(&mut self.slots[slot], Slot::Occupied(node));
                match previous {
                    Slot::Vacant { next_free } => self.free = next_free,
                    Slot::Occupied(_) => unreachable!("free list points at occupied slot {slot}"),
                }
                slot
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    /// Vacates `slot` and returns the element it held.
    fn release(&mut self, slot: usize) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        match mem::replace(&mut self.slots[slot], vacant) {
            Slot::Occupied(node) => {
                self.free = Some(slot);
                node.element
            }
            Slot::Vacant { .. } => unreachable!("released vacant slot {slot}"),
        }
    }

    /// Links a new node holding `element` after the tail.
    ///
    /// Only reallocates the slot vector when no room was reserved.
    fn attach_back(&mut self, element: T) {
        let slot = self.allocate(Node {
            element,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.length += 1;
    }

    fn attach_front(&mut self, element: T) {
        let slot = self.allocate(Node {
            element,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => self.node_mut(head).prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.length += 1;
    }

    /// Unlinks the node in `slot` from its neighbours and releases it.
    fn detach(&mut self, slot: usize) -> T {
        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
        self.length -= 1;
        self.release(slot)
    }

    /// Returns the slot of the node at `index`, walking from the nearer end.
    ///
    /// `index` must already be validated against `self.length`.
    fn locate(&self, index: usize) -> usize {
        let slot = if index <= self.length / 2 {
            (0..index).fold(self.head, |slot, _| {
                slot.and_then(|current| self.node(current).next)
            })
        } else {
            (index + 1..self.length).fold(self.tail, |slot, _| {
                slot.and_then(|current| self.node(current).prev)
            })
        };
        slot.unwrap_or_else(|| {
            unreachable!("index {index} not reachable in chain of {}", self.length)
        })
    }

    /// Checks the structural invariants of the chain.
    ///
    /// The forward walk visits exactly `length` nodes and ends at `tail`, and
    /// the backward walk visits the same nodes in reverse.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut forward = Vec::new();
        let mut previous = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = self.node(slot);
            assert_eq!(node.prev, previous, "prev link of slot {slot}");
            forward.push(slot);
            previous = Some(slot);
            cursor = node.next;
        }
        assert_eq!(forward.len(), self.length);
        assert_eq!(forward.last().copied(), self.tail);

        let mut backward = Vec::new();
        let mut cursor = self.tail;
        while let Some(slot) = cursor {
            backward.push(slot);
            cursor = self.node(slot).prev;
        }
        backward.reverse();
        assert_eq!(forward, backward);

        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(occupied, self.length);
    }
}

impl<T: Clone> LinkedChain<T> {
    /// Builds a chain from clones of the elements visited by `source`.
    fn collect_from(size: usize, source: impl FnOnce(&mut dyn FnMut(&T))) -> SequenceResult<Self> {
        let mut chain = Self::try_with_capacity(size)?;
        source(&mut |element: &T| chain.attach_back(element.clone()));
        Ok(chain)
    }
}

// =============================================================================
// Store Implementations
// =============================================================================

impl<T> IndexedStore<T> for LinkedChain<T> {
    fn get(&self, index: usize) -> SequenceResult<&T> {
        check_index(index, self.length)?;
        Ok(&self.node(self.locate(index)).element)
    }

    #[inline]
    fn size(&self) -> usize {
        self.length
    }

    fn for_each_element(&self, visitor: &mut dyn FnMut(&T)) {
        self.cursor().for_each(visitor);
    }
}

impl<T: Clone> Store<T> for LinkedChain<T> {
    fn empty() -> Self {
        Self::new()
    }

    fn try_from_slice(items: &[T]) -> SequenceResult<Self> {
        Self::collect_from(items.len(), |visit| items.iter().for_each(visit))
    }

    fn try_from_store(other: &dyn IndexedStore<T>) -> SequenceResult<Self> {
        Self::collect_from(other.size(), |visit| other.for_each_element(visit))
    }

    fn try_clone(&self) -> SequenceResult<Self> {
        Self::collect_from(self.length, |visit| self.cursor().for_each(visit))
    }

    fn first(&self) -> SequenceResult<&T> {
        self.head
            .map(|slot| &self.node(slot).element)
            .ok_or(SequenceError::empty("get the first element"))
    }

    fn last(&self) -> SequenceResult<&T> {
        self.tail
            .map(|slot| &self.node(slot).element)
            .ok_or(SequenceError::empty("get the last element"))
    }

    fn set(&mut self, value: T, index: usize) -> SequenceResult<()> {
        check_index(index, self.length)?;
        let slot = self.locate(index);
        self.node_mut(slot).element = value;
        Ok(())
    }

    fn push_front(&mut self, value: T) -> SequenceResult<()> {
        self.reserve_nodes(1)?;
        self.attach_front(value);
        Ok(())
    }

    fn push_back(&mut self, value: T) -> SequenceResult<()> {
        self.reserve_nodes(1)?;
        self.attach_back(value);
        Ok(())
    }

    fn insert_at(&mut self, value: T, index: usize) -> SequenceResult<()> {
        check_position(index, self.length)?;
        if index == 0 {
            return self.push_front(value);
        }
        if index == self.length {
            return self.push_back(value);
        }

        self.reserve_nodes(1)?;
        let after = self.locate(index);
        let before = self.node(after).prev;
        let slot = self.allocate(Node {
            element: value,
            prev: before,
            next: Some(after),
        });
        self.node_mut(after).prev = Some(slot);
        if let Some(before) = before {
            self.node_mut(before).next = Some(slot);
        }
        self.length += 1;
        Ok(())
    }

    fn erase_at(&mut self, index: usize) -> SequenceResult<T> {
        check_index(index, self.length)?;
        if index == 0 {
            return self.pop_front();
        }
        if index == self.length - 1 {
            return self.pop_back();
        }
        let slot = self.locate(index);
        Ok(self.detach(slot))
    }

    fn pop_front(&mut self) -> SequenceResult<T> {
        let head = self
            .head
            .ok_or(SequenceError::empty("remove the first element"))?;
        Ok(self.detach(head))
    }

    fn pop_back(&mut self) -> SequenceResult<T> {
        let tail = self
            .tail
            .ok_or(SequenceError::empty("remove the last element"))?;
        Ok(self.detach(tail))
    }

    fn sub_range(&self, start: usize, end: usize) -> SequenceResult<Self> {
        check_sub_range(start, end, self.length)?;
        let mut cursor = self.cursor();
        for _ in 0..start {
            cursor.next();
        }
        Self::collect_from(end - start, |visit| cursor.take(end - start).for_each(visit))
    }

    fn concat(&mut self, other: &Self) -> SequenceResult<()> {
        // Reserve every node up front so a failure appends nothing.
        self.reserve_nodes(other.length)?;
        for element in other {
            self.attach_back(element.clone());
        }
        Ok(())
    }

    fn map_in_place<F>(&mut self, mut function: F)
    where
        F: FnMut(&T) -> T,
    {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = self.node_mut(slot);
            node.element = function(&node.element);
            cursor = node.next;
        }
    }

    fn retain<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = self.node(slot);
            cursor = node.next;
            if !predicate(&node.element) {
                self.detach(slot);
            }
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.length = 0;
    }

    fn fold<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(initial, function)
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A forward sweep over a [`LinkedChain`].
///
/// The cursor remembers the node it will read next, so a full sweep costs
/// O(n) instead of the O(n²) of repeated indexed reads. Cursors borrow the
/// chain, so a structural edit cannot happen while one is alive.
pub struct ChainCursor<'a, T> {
    chain: &'a LinkedChain<T>,
    current: Option<usize>,
    position: usize,
}

impl<'a, T> ChainCursor<'a, T> {
    /// Returns the element under the cursor and moves to the next node.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] once the sweep has passed the tail.
    pub fn read_and_advance(&mut self) -> SequenceResult<&'a T> {
        let chain = self.chain;
        let slot = self
            .current
            .ok_or_else(|| SequenceError::out_of_range(self.position, chain.length))?;
        let node = chain.node(slot);
        self.current = node.next;
        self.position += 1;
        Ok(&node.element)
    }

    /// Moves the cursor back to the head of the chain.
    pub const fn reset(&mut self) {
        self.current = self.chain.head;
        self.position = 0;
    }

    /// Index of the element the next read returns.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl<'a, T> Iterator for ChainCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_and_advance().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chain.length - self.position;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ChainCursor<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for LinkedChain<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedChain<T> {
    /// Copies the chain into a compact arena with no vacant slots.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> Index<usize> for LinkedChain<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is out of range; use [`IndexedStore::get`] for a
    /// checked read.
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> FromIterator<T> for LinkedChain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Self::new();
        for element in iter {
            chain.attach_back(element);
        }
        chain
    }
}

impl<'a, T> IntoIterator for &'a LinkedChain<T> {
    type Item = &'a T;
    type IntoIter = ChainCursor<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for LinkedChain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for LinkedChain<T> {}

impl<T: Hash> Hash for LinkedChain<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedChain<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedChain<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_bracketed(formatter, self.iter())
    }
}

// =============================================================================
// Tests
// =============================================================================
