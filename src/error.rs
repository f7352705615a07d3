//! Errors reported by [`Tree`][crate::Tree] when a caller breaks a precondition.
//!
//! "Not found" is never an error: [`Tree::contains`][crate::Tree::contains] and
//! [`Tree::remove`][crate::Tree::remove] answer with a `bool`. Every error is detected before the
//! tree (or the caller's buffer) is touched, so a failed call leaves everything as it was.

use thiserror::Error;

/// Precondition failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The comparator can only be replaced while the tree is empty.
    #[error("cannot change the comparator of a tree holding {count} elements")]
    InvalidState {
        /// How many elements the tree held when the change was attempted.
        count: usize,
    },

    /// A destination index does not point inside the destination buffer.
    #[error("start index {index} is outside a buffer of length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the buffer it was checked against.
        len: usize,
    },

    /// The destination buffer cannot hold every element from the start index onward.
    #[error("destination too small: {required} slots required, {available} available")]
    Capacity {
        /// Number of elements that had to be written.
        required: usize,
        /// Number of slots between the start index and the end of the buffer.
        available: usize,
    },
}

/// A `Result` whose error is this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
