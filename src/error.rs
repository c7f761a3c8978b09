//! Error types shared by every store and sequence.
//!
//! All fallible operations in this crate return [`SequenceResult`]. Errors are
//! always handed back to the immediate caller; nothing in the crate logs,
//! prints, or silently recovers.

use std::collections::TryReserveError;

/// The failure modes of positional collection operations.
///
/// # Examples
///
/// ```rust
/// use seqkit::error::SequenceError;
/// use seqkit::store::{DynamicArray, IndexedStore};
///
/// let array: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(
///     array.get(3),
///     Err(SequenceError::OutOfRange { index: 3, length: 3 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// An index argument fell outside the range accepted by the operation.
    #[error("index {index} is out of range for length {length}")]
    OutOfRange {
        /// The rejected index, as supplied by the caller.
        index: isize,
        /// The length of the collection at the time of the call.
        length: usize,
    },

    /// A first/last read or a removal was attempted on an empty collection.
    #[error("cannot {operation} on an empty collection")]
    EmptyCollection {
        /// The operation that required at least one element.
        operation: &'static str,
    },

    /// The request is structurally impossible (negative count, empty range).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: &'static str,
    },

    /// Memory for a structural edit could not be obtained.
    ///
    /// The structure the operation was applied to is left exactly as it was.
    #[error("failed to allocate room for {requested} more elements")]
    AllocationFailure {
        /// Number of additional slots that were requested.
        requested: usize,
        /// The allocator's report.
        #[source]
        source: TryReserveError,
    },
}

/// Result alias used throughout the crate.
pub type SequenceResult<T> = Result<T, SequenceError>;

impl SequenceError {
    /// Builds an [`SequenceError::OutOfRange`] from an unsigned index.
    #[must_use]
    pub const fn out_of_range(index: usize, length: usize) -> Self {
        let index = if index > isize::MAX as usize {
            isize::MAX
        } else {
            index as isize
        };
        Self::OutOfRange { index, length }
    }

    /// Builds an [`SequenceError::EmptyCollection`] for `operation`.
    #[must_use]
    pub const fn empty(operation: &'static str) -> Self {
        Self::EmptyCollection { operation }
    }

    /// Builds an [`SequenceError::InvalidArgument`] with the given reason.
    #[must_use]
    pub const fn invalid(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }

    /// Adapts a failed `try_reserve` call into an allocation failure.
    #[must_use]
    pub const fn allocation(requested: usize, source: TryReserveError) -> Self {
        Self::AllocationFailure { requested, source }
    }

    /// Returns `true` for [`SequenceError::OutOfRange`].
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Returns `true` for [`SequenceError::EmptyCollection`].
    #[must_use]
    pub const fn is_empty_collection(&self) -> bool {
        matches!(self, Self::EmptyCollection { .. })
    }

    /// Returns `true` for [`SequenceError::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` for [`SequenceError::AllocationFailure`].
    #[must_use]
    pub const fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailure { .. })
    }
}
