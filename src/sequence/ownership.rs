//! Ownership disciplines for sequence mutation.
//!
//! Every mutating sequence operation first asks the sequence's [`Ownership`]
//! for a *target*: the handle the edit is applied to and then returned.
//!
//! - [`Ownership::InPlace`]: the target is the receiver itself. Every alias
//!   of the receiver observes the edit.
//! - [`Ownership::CopyOnWrite`]: the target is a fresh sequence carrying an
//!   independent copy of the receiver's store. The receiver is never
//!   modified; the caller must use the returned handle.
//!
//! This is the only place where the two disciplines differ, so each mutating
//! operation is written once for both.
//!
//! # Examples
//!
//! ```rust
//! use seqkit::prelude::*;
//!
//! let mutable = ArraySequence::from_slice(&[1, 2], Ownership::InPlace).unwrap();
//! let returned = mutable.append(3).unwrap();
//! assert_eq!(mutable.to_vec(), vec![1, 2, 3]);
//! assert!(returned.ptr_eq(&mutable));
//!
//! let immutable = ArraySequence::from_slice(&[1, 2], Ownership::CopyOnWrite).unwrap();
//! let derived = immutable.append(3).unwrap();
//! assert_eq!(immutable.to_vec(), vec![1, 2]);
//! assert_eq!(derived.to_vec(), vec![1, 2, 3]);
//! ```

use std::fmt;

use crate::error::SequenceResult;

/// How a sequence applies mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Mutations modify the receiver (the "mutable" sequence).
    InPlace,
    /// Mutations produce an independent modified copy (the "immutable"
    /// sequence).
    CopyOnWrite,
}

impl Ownership {
    /// Returns `true` for [`Ownership::InPlace`].
    #[inline]
    #[must_use]
    pub const fn is_in_place(self) -> bool {
        matches!(self, Self::InPlace)
    }

    /// Returns `true` for [`Ownership::CopyOnWrite`].
    #[inline]
    #[must_use]
    pub const fn is_copy_on_write(self) -> bool {
        matches!(self, Self::CopyOnWrite)
    }

    /// Resolves the handle a mutating call on `receiver` must edit.
    ///
    /// # Errors
    ///
    /// Propagates the failure of [`Retarget::detach`] when the copy cannot be
    /// allocated; the receiver is unaffected.
    pub(crate) fn target<H: Retarget>(self, receiver: &H) -> SequenceResult<H> {
        match self {
            Self::InPlace => Ok(receiver.share()),
            Self::CopyOnWrite => receiver.detach(),
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InPlace => write!(formatter, "mutable"),
            Self::CopyOnWrite => write!(formatter, "immutable"),
        }
    }
}

/// The two ways a sequence handle can be turned into a mutation target.
pub(crate) trait Retarget: Sized {
    /// Returns another handle to the same sequence, sharing its store.
    fn share(&self) -> Self;

    /// Returns a new sequence owning an independent copy of the store.
    fn detach(&self) -> SequenceResult<Self>;
}
