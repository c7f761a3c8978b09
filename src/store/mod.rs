//! Backing stores for sequences.
//!
//! Two interchangeable stores are provided:
//!
//! - [`DynamicArray`]: contiguous growable buffer
//! - [`LinkedChain`]: doubly-linked chain of arena-allocated nodes
//!
//! # Time Complexity
//!
//! | Operation     | `DynamicArray` | `LinkedChain` |
//! |---------------|----------------|---------------|
//! | `get`/`set`   | O(1)           | O(n)          |
//! | `push_back`   | O(1)*          | O(1)*         |
//! | `push_front`  | O(n)           | O(1)*         |
//! | `pop_back`    | O(1)           | O(1)          |
//! | `pop_front`   | O(n)           | O(1)          |
//! | `insert_at`   | O(n)           | O(n)          |
//! | `erase_at`    | O(n)           | O(n)          |
//! | `sub_range`   | O(k)           | O(n)          |
//! | `concat`      | O(m)           | O(m)          |
//!
//! \* amortized
//!
//! Both stores share the read-only [`IndexedStore`] capability, which lets
//! one kind be copy-constructed from the other:
//!
//! ```rust
//! use seqkit::store::{DynamicArray, IndexedStore, LinkedChain, Store};
//!
//! let chain: LinkedChain<i32> = (1..=4).collect();
//! let array = DynamicArray::try_from_store(&chain).unwrap();
//! assert_eq!(array.size(), 4);
//! assert_eq!(array.get(2), Ok(&3));
//! ```

use std::fmt;

use crate::error::{SequenceError, SequenceResult};

mod buffer;
mod chain;

pub use buffer::DynamicArray;
pub use buffer::DynamicArrayIterator;
pub use chain::ChainCursor;
pub use chain::LinkedChain;

/// Minimal read-only view of a positional store.
///
/// This trait is object safe so that higher layers can hold a
/// `&dyn IndexedStore<T>` regardless of which store backs it.
pub trait IndexedStore<T> {
    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index >= self.size()`.
    fn get(&self, index: usize) -> SequenceResult<&T>;

    /// Returns the number of stored elements.
    fn size(&self) -> usize;

    /// Visits every element in index order.
    ///
    /// The default walks `get(0..size)`; stores without O(1) random access
    /// override it with a single linear sweep.
    fn for_each_element(&self, visitor: &mut dyn FnMut(&T)) {
        // Every index below `size()` is valid, so `get` never fails here.
        (0..self.size())
            .filter_map(|index| self.get(index).ok())
            .for_each(visitor);
    }
}

/// The full structural contract a sequence adapter needs from its store.
///
/// Every operation either succeeds completely or leaves the store exactly as
/// it was before the call.
pub trait Store<T: Clone>: IndexedStore<T> + Clone + Sized {
    /// Creates an empty store.
    fn empty() -> Self;

    /// Creates a store holding clones of `items`, in order.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the storage cannot be reserved.
    fn try_from_slice(items: &[T]) -> SequenceResult<Self>;

    /// Creates a store holding clones of every element of `other`, in order.
    ///
    /// `other` may be a store of a different kind.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the storage cannot be reserved.
    fn try_from_store(other: &dyn IndexedStore<T>) -> SequenceResult<Self>;

    /// Creates an independent copy of this store.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the storage cannot be reserved.
    fn try_clone(&self) -> SequenceResult<Self>;

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty store.
    fn first(&self) -> SequenceResult<&T>;

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty store.
    fn last(&self) -> SequenceResult<&T>;

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index >= self.size()`.
    fn set(&mut self, value: T, index: usize) -> SequenceResult<()>;

    /// Inserts `value` before the first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot grow.
    fn push_front(&mut self, value: T) -> SequenceResult<()>;

    /// Appends `value` after the last element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot grow.
    fn push_back(&mut self, value: T) -> SequenceResult<()>;

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// `index == self.size()` appends.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index > self.size()`,
    /// [`SequenceError::AllocationFailure`] if the store cannot grow.
    fn insert_at(&mut self, value: T, index: usize) -> SequenceResult<()>;

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index >= self.size()`, including
    /// on an empty store.
    fn erase_at(&mut self, index: usize) -> SequenceResult<T>;

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty store.
    fn pop_front(&mut self) -> SequenceResult<T>;

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty store.
    fn pop_back(&mut self) -> SequenceResult<T>;

    /// Copies the elements `[start, end)` into a new store of the same kind.
    ///
    /// # Errors
    ///
    /// See [`check_sub_range`]; additionally
    /// [`SequenceError::AllocationFailure`] if the copy cannot be allocated,
    /// in which case nothing of the partial copy survives.
    fn sub_range(&self, start: usize, end: usize) -> SequenceResult<Self>;

    /// Appends clones of all elements of `other`, preserving order.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot grow; no
    /// element of `other` is appended in that case.
    fn concat(&mut self, other: &Self) -> SequenceResult<()>;

    /// Replaces every element `e` with `function(&e)`, in index order.
    fn map_in_place<F>(&mut self, function: F)
    where
        F: FnMut(&T) -> T;

    /// Keeps exactly the elements satisfying `predicate`, in their original
    /// relative order.
    fn retain<P>(&mut self, predicate: P)
    where
        P: FnMut(&T) -> bool;

    /// Removes every element.
    fn clear(&mut self);

    /// Folds the elements in index order, starting from `initial`.
    fn fold<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B;
}

/// Validates an element index against `length` (`[0, length)`).
///
/// # Errors
///
/// [`SequenceError::OutOfRange`] when `index >= length`.
#[inline]
pub const fn check_index(index: usize, length: usize) -> SequenceResult<()> {
    if index < length {
        Ok(())
    } else {
        Err(SequenceError::out_of_range(index, length))
    }
}

/// Validates an insertion position against `length` (`[0, length]`).
///
/// # Errors
///
/// [`SequenceError::OutOfRange`] when `index > length`.
#[inline]
pub const fn check_position(index: usize, length: usize) -> SequenceResult<()> {
    if index <= length {
        Ok(())
    } else {
        Err(SequenceError::out_of_range(index, length))
    }
}

/// Validates a sub-range request against `length`.
///
/// `start` must lie in `[0, length)`, `end` in `[0, length]`, and `start`
/// must be strictly less than `end`.
///
/// # Errors
///
/// [`SequenceError::OutOfRange`] for an endpoint outside its range,
/// [`SequenceError::InvalidArgument`] when `start >= end`.
pub const fn check_sub_range(start: usize, end: usize, length: usize) -> SequenceResult<()> {
    if start >= length {
        return Err(SequenceError::out_of_range(start, length));
    }
    if end > length {
        return Err(SequenceError::out_of_range(end, length));
    }
    if start >= end {
        return Err(SequenceError::invalid(
            "sub-range end must be greater than its start",
        ));
    }
    Ok(())
}

/// Writes `elements` as `[a, b, c]`.
pub(crate) fn write_bracketed<'a, T, I>(
    formatter: &mut fmt::Formatter<'_>,
    elements: I,
) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    write!(formatter, "[")?;
    let mut first = true;
    for element in elements {
        if first {
            first = false;
        } else {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{element}")?;
    }
    write!(formatter, "]")
}
