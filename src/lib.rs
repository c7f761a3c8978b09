//! # seqkit
//!
//! Generic positional sequences over two interchangeable backing stores,
//! each usable with in-place or copy-on-write mutation.
//!
//! ## Overview
//!
//! - **Stores**: [`DynamicArray`](store::DynamicArray), a growable contiguous
//!   buffer, and [`LinkedChain`](store::LinkedChain), a doubly-linked chain
//!   with a cursor
//! - **Sequence contract**: [`Sequence`](sequence::Sequence), the
//!   store-independent set of reads, edits, sub-ranges, map, filter and reduce
//! - **Adapters**: [`ArraySequence`](sequence::ArraySequence) and
//!   [`ListSequence`](sequence::ListSequence)
//! - **Ownership**: [`Ownership::InPlace`](sequence::Ownership::InPlace)
//!   mutates the receiver;
//!   [`Ownership::CopyOnWrite`](sequence::Ownership::CopyOnWrite) leaves it
//!   untouched and returns a modified copy
//! - **Errors**: every fallible operation returns a
//!   [`SequenceResult`](error::SequenceResult)
//!
//! ## Example
//!
//! ```rust
//! use seqkit::prelude::*;
//!
//! let mutable = ListSequence::from_slice(&[5, 10], Ownership::InPlace).unwrap();
//! mutable.prepend(0).unwrap();
//! assert_eq!(mutable.to_vec(), vec![0, 5, 10]);
//!
//! let immutable = ArraySequence::from_sequence(&mutable, Ownership::CopyOnWrite).unwrap();
//! let evens = immutable.filter(|value| value % 10 == 0).unwrap();
//! assert_eq!(immutable.length(), 3);
//! assert_eq!(evens.to_vec(), vec![0, 10]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the error type, both stores, the sequence contract and its
/// adapters.
///
/// # Usage
///
/// ```rust
/// use seqkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;
    pub use crate::sequence::*;
    pub use crate::store::*;
}

pub mod error;
pub mod sequence;
pub mod store;
