// SPDX-License-Identifier: MIT
//! Types and utilities related to error handling and reporting

use std::error::Error as StdError;
use std::fmt;


/// Error conditions surfaced by [SortedSet](super::SortedSet) operations
///
/// Every mutating or querying operation either completes (possibly reporting
/// a non-error outcome such as [Added::Duplicate](super::Added::Duplicate) or
/// [Removed::Absent](super::Removed::Absent)) or fails with one of these
/// variants. Failures never leave the set partially mutated: an operation
/// either runs to completion under the lock or fails before acquiring it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The item (or one of its nested components) is of a kind the set does
    /// not accept. See [Term](super::Term) for the accepted/rejected kinds.
    UnsupportedType,

    /// `at` was called with an index at or beyond `size` and no fallback
    /// value was supplied.
    OutOfBounds,

    /// `find_index` or `index_remove` was called with an item that is not a
    /// member of the set.
    NotPresent,

    /// A precondition was violated: `new` was given a zero capacity or
    /// bucket size, or `from_proper_enumerable` was given input that is not
    /// strictly increasing and duplicate-free.
    InvalidInput,

    /// The lock could not be acquired immediately. Only produced under
    /// [LockPolicy::TryAcquire](super::LockPolicy::TryAcquire).
    Contended,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match self {
            Self::UnsupportedType => "item contains a value of an unsupported kind",
            Self::OutOfBounds => "index is out of bounds",
            Self::NotPresent => "item is not present in the set",
            Self::InvalidInput => "input violates the operation's precondition",
            Self::Contended => "lock could not be acquired without blocking",
        })
    }
}

impl StdError for Error {}
