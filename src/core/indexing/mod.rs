pub mod kdtree;

// Re-export the tree for convenience if other top-level modules use it.
pub use kdtree::KdTree;
