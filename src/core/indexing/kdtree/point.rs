// src/core/indexing/kdtree/point.rs

//! Fixed-dimension points stored as kd-tree keys.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::ops::{Index, IndexMut};

/// A point in `N`-dimensional space.
///
/// Points are plain values: the tree copies them on insert and never shares
/// them between nodes. Two points are equal when every coordinate is equal,
/// so a point with a NaN coordinate is not even equal to itself. Keys stored
/// in a `KdTree` must be finite; use `Point::try_new` for untrusted input.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<const N: usize> {
    #[serde_as(as = "[_; N]")]
    coords: [f64; N],
}

impl<const N: usize> Point<N> {
    /// Creates a point from its coordinates.
    ///
    /// Coordinates are not checked. Points used as tree keys must be finite.
    #[must_use]
    pub const fn new(coords: [f64; N]) -> Self {
        Self { coords }
    }

    /// Creates a point, or returns `None` if any coordinate is NaN or infinite.
    #[must_use]
    pub fn try_new(coords: [f64; N]) -> Option<Self> {
        let point = Self { coords };
        point.is_finite().then_some(point)
    }

    /// Returns whether every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }

    /// Returns the coordinates of this point.
    #[must_use]
    pub const fn coords(&self) -> &[f64; N] {
        &self.coords
    }

    /// Returns the number of coordinates, `N`.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        N
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl<const N: usize> From<[f64; N]> for Point<N> {
    fn from(coords: [f64; N]) -> Self {
        Self::new(coords)
    }
}

impl<const N: usize> Index<usize> for Point<N> {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.coords[axis]
    }
}

impl<const N: usize> IndexMut<usize> for Point<N> {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.coords[axis]
    }
}
