// src/core/indexing/kdtree/error.rs

use std::fmt;

/// Custom error types for KD-Tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    /// A strict lookup asked for a point that is not stored in the tree.
    NotFound(String),
    /// A k-nearest query that cannot be answered: `k == 0`, an empty tree,
    /// or `k` larger than the tree under the strict neighbor policy.
    InvalidQuery(String),
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KdTreeError::NotFound(msg) => write!(f, "KD-Tree Not Found: {}", msg),
            KdTreeError::InvalidQuery(msg) => write!(f, "KD-Tree Invalid Query: {}", msg),
        }
    }
}

impl std::error::Error for KdTreeError {}
