//! The store-backed sequence adapter.
//!
//! [`StoreSequence`] implements [`Sequence`] once, generically over the
//! backing [`Store`]. [`ArraySequence`] and [`ListSequence`] are that same
//! adapter instantiated with a [`DynamicArray`] or a [`LinkedChain`].
//!
//! # Handles and Aliasing
//!
//! A `StoreSequence` is a handle to a shared store cell:
//!
//! - [`StoreSequence::alias`] returns a second handle to the *same* sequence;
//!   in-place edits through either handle are visible through both.
//! - [`Clone`] produces an independent sequence with its own copy of the
//!   store, like a copy constructor.
//!
//! Mutating operations first resolve their target through the sequence's
//! [`Ownership`], then edit the target's store, then return the target.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::ops::AddAssign;
use std::rc::Rc;

use super::ownership::{Ownership, Retarget};
use super::{Sequence, StoreView};
use crate::error::{SequenceError, SequenceResult};
use crate::store::{DynamicArray, IndexedStore, LinkedChain, Store};

/// Shared, interiorly mutable store cell behind every handle.
type SharedStore<S> = Rc<RefCell<S>>;

/// A sequence backed by a contiguous [`DynamicArray`].
///
/// O(1) indexed reads and writes; O(n) edits at the front.
pub type ArraySequence<T> = StoreSequence<T, DynamicArray<T>>;

/// A sequence backed by a doubly-linked [`LinkedChain`].
///
/// O(1) edits at both ends; O(n) indexed reads and writes.
pub type ListSequence<T> = StoreSequence<T, LinkedChain<T>>;

/// A [`Sequence`] delegating to a backing store `S`.
///
/// # Examples
///
/// ```rust
/// use seqkit::prelude::*;
///
/// let original = ListSequence::from_slice(&[5, 10], Ownership::CopyOnWrite).unwrap();
/// let derived = original.append(15).unwrap();
///
/// assert_eq!(original.length(), 2);
/// assert_eq!(original.to_vec(), vec![5, 10]);
/// assert_eq!(derived.length(), 3);
/// assert_eq!(derived.to_vec(), vec![5, 10, 15]);
/// ```
pub struct StoreSequence<T, S> {
    store: SharedStore<S>,
    ownership: Ownership,
    element: PhantomData<T>,
}

impl<T: Clone, S: Store<T>> StoreSequence<T, S> {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new(ownership: Ownership) -> Self {
        Self::from_store(S::empty(), ownership)
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: S, ownership: Ownership) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
            ownership,
            element: PhantomData,
        }
    }

    /// Creates a sequence holding clones of `items`, in order.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot be allocated.
    pub fn from_slice(items: &[T], ownership: Ownership) -> SequenceResult<Self> {
        Ok(Self::from_store(S::try_from_slice(items)?, ownership))
    }

    /// Creates a sequence from the first `count` elements of `items`.
    ///
    /// This is the raw "pointer and count" constructor used by text
    /// drivers, where `count` arrives as a signed number.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidArgument`] when `count` is negative or larger
    /// than `items.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::prelude::*;
    ///
    /// let sequence = ArraySequence::from_counted(&[1, 2, 3], 2, Ownership::InPlace).unwrap();
    /// assert_eq!(sequence.to_vec(), vec![1, 2]);
    ///
    /// let error = ArraySequence::from_counted(&[1, 2, 3], -1, Ownership::InPlace).unwrap_err();
    /// assert!(error.is_invalid_argument());
    /// ```
    pub fn from_counted(items: &[T], count: isize, ownership: Ownership) -> SequenceResult<Self> {
        let count = usize::try_from(count)
            .map_err(|_| SequenceError::invalid("element count must not be negative"))?;
        let items = items
            .get(..count)
            .ok_or(SequenceError::invalid("element count exceeds the supplied items"))?;
        Self::from_slice(items, ownership)
    }

    /// Creates a sequence holding a copy of `other`'s elements.
    ///
    /// `other` may be backed by a different kind of store.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the store cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::prelude::*;
    ///
    /// let list = ListSequence::from_slice(&[1, 2, 3], Ownership::InPlace).unwrap();
    /// let array = ArraySequence::from_sequence(&list, Ownership::CopyOnWrite).unwrap();
    /// assert_eq!(array.to_vec(), list.to_vec());
    /// ```
    pub fn from_sequence(other: &dyn Sequence<T>, ownership: Ownership) -> SequenceResult<Self> {
        let store = S::try_from_store(&*other.data_holder())?;
        Ok(Self::from_store(store, ownership))
    }

    /// Returns this sequence's ownership discipline.
    #[inline]
    #[must_use]
    pub const fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Returns another handle to this very sequence.
    ///
    /// The handles share one store; for an in-place sequence every edit made
    /// through one handle is visible through the other.
    #[must_use]
    pub fn alias(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            ownership: self.ownership,
            element: PhantomData,
        }
    }

    /// Returns `true` if both handles refer to the same sequence.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }

    /// Replaces the contents with a copy of `other`'s elements.
    ///
    /// `other` may be of a different store kind, or an alias of `self`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::AllocationFailure`] if the copy cannot be allocated;
    /// the target keeps its previous contents.
    pub fn assign(&self, other: &dyn Sequence<T>) -> SequenceResult<Self> {
        let replacement = S::try_from_store(&*other.data_holder())?;
        self.edit(|store| {
            *store = replacement;
            Ok(())
        })
    }

    /// Resolves the target, applies `operation` to its store, returns it.
    ///
    /// The single code path behind every mutating operation.
    fn edit<R, F>(&self, operation: F) -> SequenceResult<Self>
    where
        F: FnOnce(&mut S) -> SequenceResult<R>,
    {
        let target = self.ownership.target(self)?;
        operation(&mut target.store.borrow_mut())?;
        Ok(target)
    }

    fn store(&self) -> Ref<'_, S> {
        self.store.borrow()
    }
}

fn as_indexed<'a, T, S>(store: &S) -> &(dyn IndexedStore<T> + 'a)
where
    S: IndexedStore<T> + 'a,
{
    store
}

impl<T: Clone, S: Store<T>> Retarget for StoreSequence<T, S> {
    fn share(&self) -> Self {
        self.alias()
    }

    fn detach(&self) -> SequenceResult<Self> {
        let store = self.store().try_clone()?;
        Ok(Self::from_store(store, self.ownership))
    }
}

// =============================================================================
// Sequence Implementation
// =============================================================================

impl<T: Clone, S: Store<T>> Sequence<T> for StoreSequence<T, S> {
    fn get_first(&self) -> SequenceResult<T> {
        self.store().first().cloned()
    }

    fn get_last(&self) -> SequenceResult<T> {
        self.store().last().cloned()
    }

    fn get(&self, index: usize) -> SequenceResult<T> {
        self.store().get(index).cloned()
    }

    fn length(&self) -> usize {
        self.store().size()
    }

    fn data_holder(&self) -> StoreView<'_, T> {
        StoreView::new(Ref::map(self.store(), as_indexed::<T, S>))
    }

    fn set(&self, value: T, index: usize) -> SequenceResult<Self> {
        self.edit(|store| store.set(value, index))
    }

    fn prepend(&self, item: T) -> SequenceResult<Self> {
        self.edit(|store| store.push_front(item))
    }

    fn append(&self, item: T) -> SequenceResult<Self> {
        self.edit(|store| store.push_back(item))
    }

    fn insert_at(&self, item: T, index: usize) -> SequenceResult<Self> {
        self.edit(|store| store.insert_at(item, index))
    }

    fn remove_first(&self) -> SequenceResult<Self> {
        self.edit(|store| store.pop_front())
    }

    fn remove_last(&self) -> SequenceResult<Self> {
        self.edit(|store| store.pop_back())
    }

    fn erase_at(&self, index: usize) -> SequenceResult<Self> {
        self.edit(|store| store.erase_at(index))
    }

    fn concat(&self, other: &Self) -> SequenceResult<Self> {
        if self.ptr_eq(other) {
            let snapshot = other.store().try_clone()?;
            return self.edit(|store| store.concat(&snapshot));
        }
        self.edit(|store| store.concat(&other.store()))
    }

    fn get_sub_sequence(&self, start: usize, end: usize) -> SequenceResult<Self> {
        let store = self.store().sub_range(start, end)?;
        Ok(Self::from_store(store, self.ownership))
    }

    fn map<F>(&self, function: F) -> SequenceResult<Self>
    where
        F: FnMut(&T) -> T,
    {
        self.edit(|store| {
            store.map_in_place(function);
            Ok(())
        })
    }

    fn filter<P>(&self, predicate: P) -> SequenceResult<Self>
    where
        P: FnMut(&T) -> bool,
    {
        self.edit(|store| {
            store.retain(predicate);
            Ok(())
        })
    }

    fn reduce<B, F>(&self, mut function: F, initial: B) -> B
    where
        F: FnMut(&T, B) -> B,
    {
        self.store()
            .fold(initial, |accumulator, element| function(element, accumulator))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Clone, S: Store<T>> Clone for StoreSequence<T, S> {
    /// Copies the store into a new, independent sequence with the same
    /// ownership. Use [`StoreSequence::alias`] for a second handle instead.
    fn clone(&self) -> Self {
        Self::from_store(S::clone(&self.store()), self.ownership)
    }
}

impl<'a, T: Clone, S: Store<T>> AddAssign<&'a StoreSequence<T, S>> for StoreSequence<T, S> {
    /// Appends `other` through [`Sequence::concat`] and rebinds `self` to
    /// the target.
    ///
    /// An in-place sequence stays the same handle. A copy-on-write one now
    /// refers to the concatenated copy, and other handles to the old
    /// contents are unaffected. Use [`Sequence::concat`] to handle
    /// allocation failure.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot grow, like `Vec::extend`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqkit::prelude::*;
    ///
    /// let mut sequence = ListSequence::from_slice(&[1, 2], Ownership::CopyOnWrite).unwrap();
    /// let before = sequence.alias();
    /// sequence += &ListSequence::from_slice(&[3], Ownership::CopyOnWrite).unwrap();
    ///
    /// assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(before.to_vec(), vec![1, 2]);
    /// ```
    fn add_assign(&mut self, other: &'a Self) {
        match self.concat(other) {
            Ok(target) => *self = target,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: Clone, S: Store<T> + PartialEq> PartialEq for StoreSequence<T, S> {
    /// Compares contents only; the ownership discipline is ignored.
    fn eq(&self, other: &Self) -> bool {
        *self.store() == *other.store()
    }
}

impl<T: Clone, S: Store<T> + Eq> Eq for StoreSequence<T, S> {}

impl<T, S: fmt::Debug> fmt::Debug for StoreSequence<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StoreSequence")
            .field("ownership", &self.ownership)
            .field("elements", &*self.store.borrow())
            .finish()
    }
}

impl<T, S: fmt::Display> fmt::Display for StoreSequence<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.store.borrow())
    }
}

// =============================================================================
// Tests
// =============================================================================
