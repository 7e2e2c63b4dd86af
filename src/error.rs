//! Errors returned by fallible [`Tree`][crate::Tree] operations.

use thiserror::Error;

/// The ways an operation on a [`Tree`][crate::Tree] can fail. None of these leave the tree in a
/// different state than before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The operation needs at least one node but the tree has none.
    #[error("the tree is empty")]
    EmptyTree,

    /// No node in the tree holds the requested key.
    #[error("key is not present in the tree")]
    KeyNotFound,

    /// The key being inserted is already stored. Nothing was changed.
    #[error("key is already present in the tree")]
    DuplicateKey,
}
