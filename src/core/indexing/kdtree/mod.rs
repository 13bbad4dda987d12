// src/core/indexing/kdtree/mod.rs

//! KD-Tree implementation for point-keyed storage and k-nearest-neighbor
//! majority-vote queries.
//!
//! Points are inserted one at a time into an unbalanced tree that cycles its
//! splitting axis with depth. A query walks the tree near side first, keeps
//! the best `k` candidates in a `BoundedPriorityQueue`, and skips any far
//! subtree the splitting plane proves cannot contain a closer point. The
//! answer is the most frequent value among the retained candidates.
//!
//! A tree is plain owned data with no interior mutability: shared references
//! may query it from several threads, mutation needs `&mut`.

// Re-export key components for easier use.
pub use self::bounded_queue::BoundedPriorityQueue;
pub use self::error::KdTreeError;
pub use self::point::Point;
pub use self::search::SearchStats;
pub use self::tree::{Iter, KdTree};

// Modules within the kdtree crate
mod bounded_queue;
mod error;
mod point;
mod search;
mod tree;
