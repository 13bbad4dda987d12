// src/core/indexing/kdtree/tree.rs

//! Defines the core KD-Tree structures: `KdNode` and `KdTree`.

use std::fmt;

use log::trace;

use super::error::KdTreeError;
use super::point::Point;
use crate::core::config::Config;

/// Child slot of a node; `None` is an empty subtree.
pub(crate) type Link<const N: usize, V> = Option<Box<KdNode<N, V>>>;

/// Represents a node in the KD-Tree.
///
/// Each node stores one point and its value and exclusively owns both
/// subtrees. A node at depth `d` splits on axis `d % N`: points strictly
/// smaller on that axis live on the left, everything else (ties included)
/// on the right.
#[derive(Debug)]
pub(crate) struct KdNode<const N: usize, V> {
    pub(crate) point: Point<N>,
    pub(crate) value: V,
    pub(crate) left: Link<N, V>,
    pub(crate) right: Link<N, V>,
}

impl<const N: usize, V> KdNode<N, V> {
    pub(crate) const fn new(point: Point<N>, value: V) -> Self {
        Self {
            point,
            value,
            left: None,
            right: None,
        }
    }

    /// Picks the child a point descends into when compared on `axis`.
    pub(crate) fn child_for(&self, point: &Point<N>, axis: usize) -> Option<&Self> {
        if point[axis] < self.point[axis] {
            self.left.as_deref()
        } else {
            self.right.as_deref()
        }
    }
}

/// A kd-tree mapping `N`-dimensional points to values of type `V`.
///
/// The tree is unbalanced: its shape depends only on insertion order. Every
/// distinct point is stored once; inserting an existing point overwrites its
/// value.
pub struct KdTree<const N: usize, V> {
    pub(crate) root: Link<N, V>,
    len: usize,
    config: Config,
}

impl<const N: usize, V> KdTree<N, V> {
    const NON_ZERO_DIMENSION: () = assert!(N > 0, "a KdTree needs at least one dimension");

    /// Creates an empty tree with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty tree that answers queries according to `config`.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO_DIMENSION;
        Self {
            root: None,
            len: 0,
            config,
        }
    }

    /// The query configuration this tree was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the dimension of the points stored in this tree.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        N
    }

    /// Number of distinct points stored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether `point` is stored in the tree.
    #[must_use]
    pub fn contains(&self, point: &Point<N>) -> bool {
        self.find(point).is_some()
    }

    /// Inserts `point` with `value`.
    ///
    /// If the point is already present its value is overwritten and the tree
    /// keeps its size. Returns `true` when a new node was created.
    ///
    /// `point` must have finite coordinates. A NaN coordinate never compares
    /// equal, so re-inserting such a point adds another node instead of
    /// overwriting. `Point::try_new` filters these out.
    pub fn insert(&mut self, point: Point<N>, value: V) -> bool {
        let (slot, depth) = locate_slot(&mut self.root, &point);
        match slot {
            Some(node) => {
                trace!("Overwrote value of {:?} at depth {}", point, depth);
                node.value = value;
                false
            }
            None => {
                *slot = Some(Box::new(KdNode::new(point, value)));
                self.len += 1;
                trace!("Inserted {:?} at depth {}", point, depth);
                true
            }
        }
    }

    /// Returns a reference to the value stored for `point`, if any.
    #[must_use]
    pub fn get(&self, point: &Point<N>) -> Option<&V> {
        self.find(point).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored for `point`, if any.
    pub fn get_mut(&mut self, point: &Point<N>) -> Option<&mut V> {
        let mut cursor = self.root.as_deref_mut();
        let mut axis = 0;
        while let Some(node) = cursor {
            if node.point == *point {
                return Some(&mut node.value);
            }
            cursor = if point[axis] < node.point[axis] {
                node.left.as_deref_mut()
            } else {
                node.right.as_deref_mut()
            };
            axis = (axis + 1) % N;
        }
        None
    }

    /// Returns the value stored for `point`.
    ///
    /// # Errors
    ///
    /// Returns `KdTreeError::NotFound` if the point is not in the tree.
    pub fn at(&self, point: &Point<N>) -> Result<&V, KdTreeError> {
        self.get(point).ok_or_else(|| not_found(point))
    }

    /// Returns a mutable reference to the value stored for `point`.
    ///
    /// # Errors
    ///
    /// Returns `KdTreeError::NotFound` if the point is not in the tree.
    pub fn at_mut(&mut self, point: &Point<N>) -> Result<&mut V, KdTreeError> {
        match self.get_mut(point) {
            Some(value) => Ok(value),
            None => Err(not_found(point)),
        }
    }

    /// Returns a mutable reference to the value for `point`, inserting
    /// `V::default()` first if the point is absent.
    pub fn entry_or_default(&mut self, point: Point<N>) -> &mut V
    where
        V: Default,
    {
        let (slot, depth) = locate_slot(&mut self.root, &point);
        if slot.is_none() {
            self.len += 1;
            trace!("Inserted default value for {:?} at depth {}", point, depth);
        }
        &mut slot
            .get_or_insert_with(|| Box::new(KdNode::new(point, V::default())))
            .value
    }

    /// Depth of the deepest node, counting the root as 1. Empty trees have
    /// height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&KdNode<N, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Iterates over the stored entries in pre-order.
    pub fn iter(&self) -> Iter<'_, N, V> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }

    fn find(&self, point: &Point<N>) -> Option<&KdNode<N, V>> {
        let mut cursor = self.root.as_deref();
        let mut axis = 0;
        while let Some(node) = cursor {
            if node.point == *point {
                return Some(node);
            }
            cursor = node.child_for(point, axis);
            axis = (axis + 1) % N;
        }
        None
    }
}

/// Descends from `root` to the slot holding `point`, or to the empty slot
/// where it would be attached. Also returns the depth of that slot.
fn locate_slot<'a, const N: usize, V>(
    root: &'a mut Link<N, V>,
    point: &Point<N>,
) -> (&'a mut Link<N, V>, usize) {
    let mut slot = root;
    let mut depth = 0;
    while slot.as_ref().is_some_and(|node| node.point != *point) {
        let Some(node) = slot else { break };
        let axis = depth % N;
        slot = if point[axis] < node.point[axis] {
            &mut node.left
        } else {
            &mut node.right
        };
        depth += 1;
    }
    (slot, depth)
}

fn not_found<const N: usize>(point: &Point<N>) -> KdTreeError {
    KdTreeError::NotFound(format!("Point {:?} is not in the tree.", point.coords()))
}

impl<const N: usize, V> Default for KdTree<N, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, V: Clone> Clone for KdTree<N, V> {
    /// Deep-copies every node. The copy has the same shape and content and
    /// shares nothing with `self`.
    fn clone(&self) -> Self {
        Self {
            root: self.root.as_deref().map(clone_subtree),
            len: self.len,
            config: self.config.clone(),
        }
    }

    /// Copies `source` in full before releasing the current nodes.
    fn clone_from(&mut self, source: &Self) {
        let replacement = source.clone();
        *self = replacement;
    }
}

/// Structural copy of a subtree, built with an explicit stack.
fn clone_subtree<const N: usize, V: Clone>(source: &KdNode<N, V>) -> Box<KdNode<N, V>> {
    let mut root = Box::new(KdNode::new(source.point, source.value.clone()));
    let mut stack: Vec<(&KdNode<N, V>, &mut KdNode<N, V>)> = vec![(source, &mut *root)];
    while let Some((from, to)) = stack.pop() {
        let KdNode { left, right, .. } = to;
        *left = from
            .left
            .as_deref()
            .map(|child| Box::new(KdNode::new(child.point, child.value.clone())));
        *right = from
            .right
            .as_deref()
            .map(|child| Box::new(KdNode::new(child.point, child.value.clone())));
        if let (Some(from_left), Some(to_left)) = (from.left.as_deref(), left.as_deref_mut()) {
            stack.push((from_left, to_left));
        }
        if let (Some(from_right), Some(to_right)) = (from.right.as_deref(), right.as_deref_mut()) {
            stack.push((from_right, to_right));
        }
    }
    root
}

impl<const N: usize, V> Drop for KdTree<N, V> {
    fn drop(&mut self) {
        // Detach children before each node is freed so dropping never recurses.
        let mut stack: Vec<Box<KdNode<N, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<const N: usize, V: fmt::Debug> fmt::Debug for KdTree<N, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Pre-order iterator over the entries of a `KdTree`.
pub struct Iter<'a, const N: usize, V> {
    stack: Vec<&'a KdNode<N, V>>,
}

impl<'a, const N: usize, V> Iterator for Iter<'a, N, V> {
    type Item = (&'a Point<N>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some((&node.point, &node.value))
    }
}

impl<'a, const N: usize, V> IntoIterator for &'a KdTree<N, V> {
    type Item = (&'a Point<N>, &'a V);
    type IntoIter = Iter<'a, N, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const N: usize, V> Extend<(Point<N>, V)> for KdTree<N, V> {
    fn extend<I: IntoIterator<Item = (Point<N>, V)>>(&mut self, iter: I) {
        for (point, value) in iter {
            self.insert(point, value);
        }
    }
}

impl<const N: usize, V> FromIterator<(Point<N>, V)> for KdTree<N, V> {
    fn from_iter<I: IntoIterator<Item = (Point<N>, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
