//! The positional sequence contract and its two adapters.
//!
//! - [`Sequence`]: the abstract contract (reads, edits, sub-ranges, map,
//!   filter, reduce), independent of the backing store
//! - [`StoreSequence`]: the single adapter implementing it over any
//!   [`Store`](crate::store::Store)
//! - [`ArraySequence`]: `StoreSequence` over a
//!   [`DynamicArray`](crate::store::DynamicArray)
//! - [`ListSequence`]: `StoreSequence` over a
//!   [`LinkedChain`](crate::store::LinkedChain)
//! - [`Ownership`]: in-place or copy-on-write mutation
//!
//! # Examples
//!
//! ```rust
//! use seqkit::prelude::*;
//!
//! let sequence = ArraySequence::from_slice(&[1, 2, 3], Ownership::InPlace).unwrap();
//! sequence.append(4).unwrap();
//! sequence.insert_at(99, 0).unwrap();
//! sequence.erase_at(2).unwrap();
//! sequence.map(|value| value * 3).unwrap();
//! assert_eq!(sequence.to_vec(), vec![297, 3, 9, 12]);
//!
//! let total = sequence.reduce(|element, accumulator| element + accumulator, 0);
//! assert_eq!(total, 321);
//! ```

use std::cell::Ref;
use std::ops::Deref;

use crate::error::{SequenceError, SequenceResult};
use crate::store::IndexedStore;

mod adapter;
mod ownership;

pub use adapter::ArraySequence;
pub use adapter::ListSequence;
pub use adapter::StoreSequence;
pub use ownership::Ownership;

/// An ordered, index-addressed collection.
///
/// Read operations never have side effects. Mutating operations return the
/// *target* sequence chosen by the implementation's [`Ownership`]: the
/// receiver itself for in-place sequences, a new independent sequence for
/// copy-on-write ones. Either way the returned handle shows the edit.
///
/// A failed mutation leaves every sequence exactly as it was.
///
/// The read half of the trait is object safe, so drivers can hold a
/// `&dyn Sequence<T>` for display and for cross-kind copying.
pub trait Sequence<T: Clone> {
    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty sequence.
    fn get_first(&self) -> SequenceResult<T>;

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty sequence.
    fn get_last(&self) -> SequenceResult<T>;

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index >= self.length()`.
    fn get(&self, index: usize) -> SequenceResult<T>;

    /// Returns the number of elements.
    fn length(&self) -> usize;

    /// Returns `true` if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Borrows the backing store through its read-only capability.
    ///
    /// # Panics
    ///
    /// Panics if the store is being mutated through another handle at the
    /// time of the call (only possible from inside a `map`/`filter`
    /// closure).
    fn data_holder(&self) -> StoreView<'_, T>;

    /// Collects the elements in index order with a single sweep.
    fn to_vec(&self) -> Vec<T> {
        let view = self.data_holder();
        let mut elements = Vec::with_capacity(view.size());
        view.for_each_element(&mut |element: &T| elements.push(element.clone()));
        elements
    }

    /// Overwrites the element at `index` with `value`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index >= self.length()`.
    fn set(&self, value: T, index: usize) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Inserts `item` before the first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot grow.
    fn prepend(&self, item: T) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Inserts `item` after the last element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot grow.
    fn append(&self, item: T) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Inserts `item` so that it ends up at `index`; `index == length`
    /// appends.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index > self.length()`.
    fn insert_at(&self, item: T, index: usize) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Removes the first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty sequence.
    fn remove_first(&self) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] on an empty sequence.
    fn remove_last(&self) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `index >= self.length()`, including
    /// on an empty sequence.
    fn erase_at(&self, index: usize) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Appends every element of `other`, preserving order.
    ///
    /// `other` may be an alias of `self`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot grow.
    fn concat(&self, other: &Self) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Returns a new sequence of the same kind and ownership holding the
    /// elements `[start, end)`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfRange`] when `start >= length` or
    /// `end > length`; [`SequenceError::InvalidArgument`] when
    /// `start >= end`.
    fn get_sub_sequence(&self, start: usize, end: usize) -> SequenceResult<Self>
    where
        Self: Sized;

    /// Replaces every element `e` with `function(&e)`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if a copy-on-write target cannot
    /// be allocated.
    ///
    /// # Panics
    ///
    /// The target's store is mutably borrowed while `function` runs; reading
    /// or editing the target through an alias from inside `function` panics.
    fn map<F>(&self, function: F) -> SequenceResult<Self>
    where
        F: FnMut(&T) -> T,
        Self: Sized;

    /// Keeps, in their original order, exactly the elements satisfying
    /// `predicate`. This is the `where` operation of the contract.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if a copy-on-write target cannot
    /// be allocated.
    ///
    /// # Panics
    ///
    /// The target's store is mutably borrowed while `predicate` runs; reading
    /// or editing the target through an alias from inside `predicate` panics.
    fn filter<P>(&self, predicate: P) -> SequenceResult<Self>
    where
        P: FnMut(&T) -> bool,
        Self: Sized;

    /// Folds the elements in index order.
    ///
    /// The accumulator starts at `initial`; each step computes
    /// `function(element, accumulator)` with the element first. For
    /// `[a, b, c]` the result is `f(c, f(b, f(a, initial)))`.
    ///
    /// # Panics
    ///
    /// The store stays borrowed while `function` runs; editing an in-place
    /// alias of this sequence from inside `function` panics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::prelude::*;
    ///
    /// let sequence = ListSequence::from_slice(&[1, 2, 3], Ownership::CopyOnWrite).unwrap();
    /// // 3 - (2 - (1 - 0))
    /// assert_eq!(sequence.reduce(|element, accumulator| element - accumulator, 0), 2);
    /// ```
    fn reduce<B, F>(&self, function: F, initial: B) -> B
    where
        F: FnMut(&T, B) -> B,
        Self: Sized;
}

/// A borrowed, read-only view of a sequence's backing store.
///
/// Returned by [`Sequence::data_holder`]; usable wherever a
/// `&dyn IndexedStore<T>` is expected, e.g. to copy-construct a store of a
/// different kind.
pub struct StoreView<'a, T> {
    inner: Ref<'a, dyn IndexedStore<T> + 'a>,
}

impl<'a, T> StoreView<'a, T> {
    pub(crate) fn new(inner: Ref<'a, dyn IndexedStore<T> + 'a>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Deref for StoreView<'a, T> {
    type Target = dyn IndexedStore<T> + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl<T> IndexedStore<T> for StoreView<'_, T> {
    fn get(&self, index: usize) -> SequenceResult<&T> {
        self.inner.get(index)
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn for_each_element(&self, visitor: &mut dyn FnMut(&T)) {
        self.inner.for_each_element(visitor);
    }
}

/// Converts a signed, driver-supplied index into a contract index.
///
/// Text drivers parse indices as signed numbers; a negative value is
/// reported as [`SequenceError::OutOfRange`] against `length`, exactly as an
/// index past the end would be.
///
/// # Errors
///
/// [`SequenceError::OutOfRange`] when `index` is negative.
///
/// # Examples
///
/// ```rust
/// use seqkit::sequence::signed_index;
///
/// assert_eq!(signed_index(2, 4), Ok(2));
/// assert!(signed_index(-1, 4).unwrap_err().is_out_of_range());
/// ```
pub fn signed_index(index: isize, length: usize) -> SequenceResult<usize> {
    usize::try_from(index).map_err(|_| SequenceError::OutOfRange { index, length })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use static_assertions::assert_not_impl_any;

    assert_not_impl_any!(ArraySequence<i32>: Send, Sync);
    assert_not_impl_any!(ListSequence<i32>: Send, Sync);

    #[rstest]
    #[case(0, 0, Ok(0))]
    #[case(3, 4, Ok(3))]
    #[case(-1, 4, Err(SequenceError::OutOfRange { index: -1, length: 4 }))]
    fn test_signed_index(
        #[case] index: isize,
        #[case] length: usize,
        #[case] expected: SequenceResult<usize>,
    ) {
        assert_eq!(signed_index(index, length), expected);
    }

    #[rstest]
    fn test_reads_through_dyn_sequence() {
        let array = ArraySequence::from_slice(&[1, 2, 3], Ownership::InPlace).unwrap();
        let list = ListSequence::from_slice(&[4, 5], Ownership::CopyOnWrite).unwrap();
        let sequences: [&dyn Sequence<i32>; 2] = [&array, &list];

        let lengths: Vec<usize> = sequences.iter().map(|sequence| sequence.length()).collect();
        assert_eq!(lengths, vec![3, 2]);
        assert_eq!(sequences[1].get_last(), Ok(5));
        assert_eq!(sequences[0].to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    #[should_panic(expected = "already")]
    fn test_reduce_closure_editing_alias_panics() {
        let sequence = ListSequence::from_slice(&[1, 2], Ownership::InPlace).unwrap();
        let alias = sequence.alias();
        sequence.reduce(
            |element, count: usize| {
                alias.append(*element).unwrap();
                count + 1
            },
            0,
        );
    }

    #[rstest]
    #[should_panic(expected = "already")]
    fn test_map_closure_reading_alias_panics() {
        let sequence = ArraySequence::from_slice(&[1, 2], Ownership::InPlace).unwrap();
        let alias = sequence.alias();
        let _ = sequence.map(|element| element + alias.length() as i32);
    }

    #[rstest]
    #[should_panic(expected = "already")]
    fn test_filter_closure_reading_alias_panics() {
        let sequence = ListSequence::from_slice(&[1, 2], Ownership::InPlace).unwrap();
        let alias = sequence.alias();
        let _ = sequence.filter(|element| alias.get(0).is_ok_and(|first| first == *element));
    }

    #[rstest]
    fn test_store_view_feeds_cross_kind_copy() {
        use crate::store::{DynamicArray, Store};

        let list = ListSequence::from_slice(&[7, 8, 9], Ownership::InPlace).unwrap();
        let array = DynamicArray::try_from_store(&*list.data_holder()).unwrap();
        assert_eq!(array.as_slice(), &[7, 8, 9]);
    }
}
