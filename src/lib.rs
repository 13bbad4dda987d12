#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::module_inception, clippy::wildcard_imports)]

//! # Oxikd: a kd-tree with majority-vote nearest-neighbor queries
//!
//! `oxikd` stores values under fixed-dimension points and answers
//! "what value do the `k` nearest points mostly carry?" It features:
//! - An unbalanced kd-tree keyed by `Point<N>`, splitting on axis `depth % N`
//! - Point-keyed insert, overwrite, strict and non-failing lookups
//! - Pruned k-nearest search over a bounded candidate queue
//! - Deep copies that share nothing with the source tree
//! - TOML-loadable query configuration
//!
//! ```
//! use oxikd::{KdTree, Point};
//!
//! let mut tree = KdTree::new();
//! tree.insert(Point::new([0.0, 0.0]), "a");
//! tree.insert(Point::new([1.0, 1.0]), "b");
//! tree.insert(Point::new([5.0, 5.0]), "c");
//!
//! assert_eq!(tree.k_nearest_value(&Point::new([0.1, 0.1]), 1), Ok("a"));
//! ```

pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::core::common::OxikdError;
pub use crate::core::config::{Config, ConfigBuilder, NeighborPolicy};
pub use crate::core::indexing::kdtree::{
    BoundedPriorityQueue, KdTree, KdTreeError, Point, SearchStats,
};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, OxikdError>;
