//! Contiguous growable buffer.
//!
//! This module provides [`DynamicArray`], the array-backed store used by
//! [`ArraySequence`](crate::sequence::ArraySequence).
//!
//! # Overview
//!
//! `DynamicArray` keeps its elements in one contiguous allocation:
//!
//! - O(1) random access and overwrite
//! - amortized O(1) append, doubling the capacity when it runs out
//! - O(n) insertion and removal at arbitrary positions
//!
//! The capacity never shrinks on its own. Every allocation goes through
//! `try_reserve`, so running out of memory is reported as
//! [`SequenceError::AllocationFailure`] and leaves the buffer untouched.
//!
//! # Examples
//!
//! ```rust
//! use seqkit::store::{DynamicArray, IndexedStore, Store};
//!
//! let mut array = DynamicArray::new();
//! array.push_back(1).unwrap();
//! array.push_back(3).unwrap();
//! array.insert_at(2, 1).unwrap();
//! assert_eq!(array.as_slice(), &[1, 2, 3]);
//! assert!(array.capacity() >= array.size());
//! ```

use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

use super::{IndexedStore, Store, check_index, check_position, check_sub_range};
use crate::error::{SequenceError, SequenceResult};

/// A contiguous, growable buffer of elements.
///
/// # Time Complexity
///
/// | Operation    | Complexity     |
/// |--------------|----------------|
/// | `get`/`set`  | O(1)           |
/// | `push_back`  | O(1) amortized |
/// | `pop_back`   | O(1)           |
/// | `insert_at`  | O(n)           |
/// | `erase_at`   | O(n)           |
/// | `sub_range`  | O(end - start) |
/// | `concat`     | O(m)           |
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DynamicArray<T> {
    /// Live elements; `elements.capacity()` is the allocated slot count.
    elements: Vec<T>,
}

impl<T> DynamicArray<T> {
    /// Capacity allocated by the first growth of an empty buffer.
    pub const MINIMUM_CAPACITY: usize = 4;

    /// Factor by which the capacity grows when an append does not fit.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates an empty buffer without allocating.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::store::DynamicArray;
    ///
    /// let array: DynamicArray<i32> = DynamicArray::new();
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty buffer with room for at least `capacity` elements.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the memory cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::store::DynamicArray;
    ///
    /// let array: DynamicArray<u8> = DynamicArray::try_with_capacity(16).unwrap();
    /// assert!(array.capacity() >= 16);
    ///
    /// assert!(DynamicArray::<u64>::try_with_capacity(usize::MAX).is_err());
    /// ```
    pub fn try_with_capacity(capacity: usize) -> SequenceResult<Self> {
        let mut elements = Vec::new();
        elements
            .try_reserve_exact(capacity)
            .map_err(|source| SequenceError::allocation(capacity, source))?;
        Ok(Self { elements })
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of allocated slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Returns the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns an iterator over the elements in index order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> DynamicArrayIterator<'_, T> {
        DynamicArrayIterator {
            inner: self.elements.iter(),
        }
    }

    /// Makes room for `additional` more elements.
    ///
    /// Grows to `max(capacity * GROWTH_FACTOR, len + additional,
    /// MINIMUM_CAPACITY)`; if that larger request fails, retries with exactly
    /// `additional` before reporting failure.
    fn reserve_for(&mut self, additional: usize) -> SequenceResult<()> {
        let length = self.elements.len();
        let capacity = self.elements.capacity();
        if length.saturating_add(additional) <= capacity {
            return Ok(());
        }

        let target = capacity
            .saturating_mul(Self::GROWTH_FACTOR)
            .max(length.saturating_add(additional))
            .max(Self::MINIMUM_CAPACITY);

        if self.elements.try_reserve_exact(target - length).is_ok() {
            return Ok(());
        }
        self.elements
            .try_reserve_exact(additional)
            .map_err(|source| SequenceError::allocation(additional, source))
    }
}

impl<T: Clone> DynamicArray<T> {
    fn copy_of(items: &[T]) -> SequenceResult<Self> {
        let mut array = Self::try_with_capacity(items.len())?;
        array.elements.extend_from_slice(items);
        Ok(array)
    }
}

// =============================================================================
// Store Implementations
// =============================================================================

impl<T> IndexedStore<T> for DynamicArray<T> {
    #[inline]
    fn get(&self, index: usize) -> SequenceResult<&T> {
        self.elements
            .get(index)
            .ok_or_else(|| SequenceError::out_of_range(index, self.elements.len()))
    }

    #[inline]
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn for_each_element(&self, visitor: &mut dyn FnMut(&T)) {
        self.elements.iter().for_each(visitor);
    }
}

impl<T: Clone> Store<T> for DynamicArray<T> {
    fn empty() -> Self {
        Self::new()
    }

    fn try_from_slice(items: &[T]) -> SequenceResult<Self> {
        Self::copy_of(items)
    }

    fn try_from_store(other: &dyn IndexedStore<T>) -> SequenceResult<Self> {
        let mut array = Self::try_with_capacity(other.size())?;
        other.for_each_element(&mut |element: &T| array.elements.push(element.clone()));
        Ok(array)
    }

    fn try_clone(&self) -> SequenceResult<Self> {
        Self::copy_of(&self.elements)
    }

    fn first(&self) -> SequenceResult<&T> {
        self.elements
            .first()
            .ok_or(SequenceError::empty("get the first element"))
    }

    fn last(&self) -> SequenceResult<&T> {
        self.elements
            .last()
            .ok_or(SequenceError::empty("get the last element"))
    }

    fn set(&mut self, value: T, index: usize) -> SequenceResult<()> {
        check_index(index, self.elements.len())?;
        self.elements[index] = value;
        Ok(())
    }

    fn push_front(&mut self, value: T) -> SequenceResult<()> {
        self.insert_at(value, 0)
    }

    fn push_back(&mut self, value: T) -> SequenceResult<()> {
        self.reserve_for(1)?;
        self.elements.push(value);
        Ok(())
    }

    fn insert_at(&mut self, value: T, index: usize) -> SequenceResult<()> {
        check_position(index, self.elements.len())?;
        self.reserve_for(1)?;
        self.elements.insert(index, value);
        Ok(())
    }

    fn erase_at(&mut self, index: usize) -> SequenceResult<T> {
        check_index(index, self.elements.len())?;
        Ok(self.elements.remove(index))
    }

    fn pop_front(&mut self) -> SequenceResult<T> {
        if self.elements.is_empty() {
            return Err(SequenceError::empty("remove the first element"));
        }
        Ok(self.elements.remove(0))
    }

    fn pop_back(&mut self) -> SequenceResult<T> {
        self.elements
            .pop()
            .ok_or(SequenceError::empty("remove the last element"))
    }

    fn sub_range(&self, start: usize, end: usize) -> SequenceResult<Self> {
        check_sub_range(start, end, self.elements.len())?;
        Self::copy_of(&self.elements[start..end])
    }

    fn concat(&mut self, other: &Self) -> SequenceResult<()> {
        // Reserve the whole tail up front so a failure appends nothing.
        self.reserve_for(other.elements.len())?;
        self.elements.extend_from_slice(&other.elements);
        Ok(())
    }

    fn map_in_place<F>(&mut self, mut function: F)
    where
        F: FnMut(&T) -> T,
    {
        for index in 0..self.elements.len() {
            let mapped = function(&self.elements[index]);
            self.elements[index] = mapped;
        }
    }

    fn retain<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&T) -> bool,
    {
        // Compacts the kept elements to the front, then truncates the tail.
        let mut kept = 0;
        for index in 0..self.elements.len() {
            if predicate(&self.elements[index]) {
                self.elements.swap(kept, index);
                kept += 1;
            }
        }
        self.elements.truncate(kept);
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn fold<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.elements.iter().fold(initial, function)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// A borrowing iterator over the elements of a [`DynamicArray`].
pub struct DynamicArrayIterator<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for DynamicArrayIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for DynamicArrayIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for DynamicArrayIterator<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for DynamicArray<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is out of range; use [`IndexedStore::get`] for a
    /// checked read.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = DynamicArrayIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_bracketed(formatter, self.iter())
    }
}

// =============================================================================
// Tests
// =============================================================================
