// src/core/indexing/kdtree/search.rs

//! Logic for performing K-Nearest Neighbor (KNN) majority-vote queries in a KD-Tree.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use super::bounded_queue::BoundedPriorityQueue;
use super::error::KdTreeError;
use super::point::Point;
use super::tree::{KdNode, KdTree};
use crate::core::config::NeighborPolicy;

/// Counters collected while answering one k-nearest query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose point was measured against the query.
    pub visited: usize,
    /// Non-empty far subtrees skipped because the splitting plane lay
    /// farther away than the current k-th best candidate.
    pub pruned: usize,
}

impl<const N: usize, V> KdTree<N, V>
where
    V: Clone + Eq + Hash,
{
    /// Finds the `k` stored points nearest to `query` and returns the value
    /// that occurs most often among them.
    ///
    /// Candidates are counted from nearest to farthest and the leader only
    /// changes on a strict increase, so among equally frequent values the one
    /// that reached that count first wins.
    ///
    /// # Errors
    ///
    /// Returns `KdTreeError::InvalidQuery` when `k` is zero, when the tree is
    /// empty, or when `k` exceeds the number of stored points and the tree
    /// is configured with `NeighborPolicy::Strict`.
    pub fn k_nearest_value(&self, query: &Point<N>, k: usize) -> Result<V, KdTreeError> {
        self.k_nearest_value_with_stats(query, k).map(|(value, _)| value)
    }

    /// Same as `k_nearest_value`, also reporting how much of the tree was
    /// visited.
    ///
    /// # Errors
    ///
    /// See `k_nearest_value`.
    pub fn k_nearest_value_with_stats(
        &self,
        query: &Point<N>,
        k: usize,
    ) -> Result<(V, SearchStats), KdTreeError> {
        let k = self.effective_k(k)?;

        let mut candidates = BoundedPriorityQueue::with_capacity(k);
        let mut stats = SearchStats::default();
        search_tree(self.root.as_deref(), query, &mut candidates, &mut stats);

        let winner = majority_vote(candidates).cloned().ok_or_else(|| {
            KdTreeError::InvalidQuery("Search produced no candidates.".to_string())
        })?;

        debug!(
            "kNN query k={} over {} points: visited {}, pruned {}",
            k,
            self.len(),
            stats.visited,
            stats.pruned
        );
        Ok((winner, stats))
    }

    /// Runs `k_nearest_value` with the configured `default_k`.
    ///
    /// # Errors
    ///
    /// See `k_nearest_value`.
    pub fn classify(&self, query: &Point<N>) -> Result<V, KdTreeError> {
        self.k_nearest_value(query, self.config().default_k)
    }

    fn effective_k(&self, k: usize) -> Result<usize, KdTreeError> {
        if k == 0 {
            return Err(KdTreeError::InvalidQuery("k must be at least 1.".to_string()));
        }
        if self.is_empty() {
            return Err(KdTreeError::InvalidQuery(
                "Cannot run a nearest-neighbor query on an empty tree.".to_string(),
            ));
        }
        if k <= self.len() {
            return Ok(k);
        }
        match self.config().neighbor_policy {
            NeighborPolicy::Clamp => Ok(self.len()),
            NeighborPolicy::Strict => Err(KdTreeError::InvalidQuery(format!(
                "Requested {} neighbors but the tree holds only {} points.",
                k,
                self.len()
            ))),
        }
    }
}

/// Pending work for the search walk.
enum Step<'a, const N: usize, V> {
    /// Measure a node, then descend into its near child.
    Visit(&'a KdNode<N, V>, usize),
    /// The near side of a node is done; decide whether its far side is worth a visit.
    CheckFar(&'a KdNode<N, V>, usize),
}

/// Near-first walk with plane pruning, driven by an explicit stack so the
/// depth of the tree never bounds the call stack. A node's far side is only
/// considered once its whole near side has been searched.
fn search_tree<'a, const N: usize, V>(
    root: Option<&'a KdNode<N, V>>,
    query: &Point<N>,
    candidates: &mut BoundedPriorityQueue<&'a V>,
    stats: &mut SearchStats,
) {
    let mut stack: Vec<Step<'a, N, V>> =
        root.map(|node| Step::Visit(node, 0)).into_iter().collect();
    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(node, axis) => {
                stats.visited += 1;
                candidates.offer(&node.value, node.point.distance(query));
                stack.push(Step::CheckFar(node, axis));
                let near = if query[axis] < node.point[axis] {
                    node.left.as_deref()
                } else {
                    node.right.as_deref()
                };
                stack.extend(near.map(|child| Step::Visit(child, (axis + 1) % N)));
            }
            Step::CheckFar(node, axis) => {
                let far = if query[axis] < node.point[axis] {
                    node.right.as_deref()
                } else {
                    node.left.as_deref()
                };
                let Some(far) = far else {
                    continue;
                };
                // The far side can only hold a closer point if the splitting
                // plane is nearer than the current k-th best candidate.
                let distance_to_plane = (node.point[axis] - query[axis]).abs();
                let crosses_plane = candidates
                    .worst()
                    .map_or(true, |worst| distance_to_plane < worst);
                if !candidates.is_full() || crosses_plane {
                    stack.push(Step::Visit(far, (axis + 1) % N));
                } else {
                    stats.pruned += 1;
                }
            }
        }
    }
}

/// Drains `candidates` nearest-first and returns the most frequent value.
fn majority_vote<V: Eq + Hash>(mut candidates: BoundedPriorityQueue<&V>) -> Option<&V> {
    let mut frequencies: HashMap<&V, usize> = HashMap::with_capacity(candidates.len());
    let mut leader = None;
    let mut leader_count = 0;
    while let Some(value) = candidates.extract_min() {
        let count = frequencies.entry(value).or_insert(0);
        *count += 1;
        if *count > leader_count {
            leader_count = *count;
            leader = Some(value);
        }
    }
    leader
}
