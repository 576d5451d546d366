//! Error type for the set collections.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by the fallible set operations.
///
/// There is nothing transient in here: none of these conditions goes away by
/// retrying the same call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetError {
    /// The node arena could not grow to hold another element.
    #[error("failed to allocate set storage: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// `try_next` was called on an iterator that had already produced every
    /// element.
    #[error("iterator is exhausted")]
    ExhaustedIterator,
}
