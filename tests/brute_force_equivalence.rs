//! Pruned k-nearest search must agree exactly with a linear scan.

use oxikd::{KdTree, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn random_point<const N: usize>(rng: &mut StdRng) -> Point<N> {
    let mut coords = [0.0; N];
    for c in &mut coords {
        *c = rng.gen_range(-100.0..100.0);
    }
    Point::new(coords)
}

/// Majority vote over all stored entries, scanning nearest-first.
fn brute_force_vote<const N: usize>(entries: &[(Point<N>, u8)], query: &Point<N>, k: usize) -> u8 {
    let mut by_distance: Vec<(f64, u8)> = entries.iter().map(|(p, v)| (p.distance(query), *v)).collect();
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut frequencies: HashMap<u8, usize> = HashMap::new();
    let mut leader = None;
    let mut leader_count = 0;
    for (_, value) in by_distance.into_iter().take(k) {
        let count = frequencies.entry(value).or_insert(0);
        *count += 1;
        if *count > leader_count {
            leader_count = *count;
            leader = Some(value);
        }
    }
    leader.unwrap()
}

fn check_dimension<const N: usize>(seed: u64, points: usize, labels: u8) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree: KdTree<N, u8> = KdTree::new();
    let mut entries = Vec::with_capacity(points);
    for _ in 0..points {
        let point = random_point::<N>(&mut rng);
        let label = rng.gen_range(0..labels);
        tree.insert(point, label);
        entries.push((point, label));
    }
    assert_eq!(tree.len(), entries.len());

    for _ in 0..50 {
        let query = random_point::<N>(&mut rng);
        for k in [1, 2, 3, 5, 8, 13] {
            let expected = brute_force_vote(&entries, &query, k);
            let actual = tree.k_nearest_value(&query, k).unwrap();
            assert_eq!(actual, expected, "mismatch for query {:?} with k = {}", query, k);
        }
    }
}

#[test]
fn matches_linear_scan_in_2d() {
    check_dimension::<2>(7, 1_000, 4);
}

#[test]
fn matches_linear_scan_in_3d() {
    check_dimension::<3>(11, 800, 3);
}

#[test]
fn matches_linear_scan_in_5d() {
    check_dimension::<5>(13, 600, 5);
}

#[test]
fn matches_linear_scan_when_k_covers_everything() {
    let mut rng = StdRng::seed_from_u64(17);
    let entries: Vec<(Point<2>, u8)> = (0..40).map(|_| (random_point(&mut rng), rng.gen_range(0..3))).collect();
    let tree: KdTree<2, u8> = entries.iter().copied().collect();

    let query = random_point::<2>(&mut rng);
    assert_eq!(tree.k_nearest_value(&query, 40).unwrap(), brute_force_vote(&entries, &query, 40));
    // The default policy clamps oversized k to every stored point.
    assert_eq!(tree.k_nearest_value(&query, 500).unwrap(), brute_force_vote(&entries, &query, 40));
}

#[test]
fn pruning_skips_most_of_a_large_tree() {
    let mut rng = StdRng::seed_from_u64(23);
    let tree: KdTree<2, u8> = (0..5_000).map(|_| (random_point(&mut rng), rng.gen_range(0..2))).collect();

    let (_, stats) = tree.k_nearest_value_with_stats(&random_point(&mut rng), 3).unwrap();
    assert!(stats.pruned > 0);
    assert!(stats.visited < tree.len() / 2, "visited {} of {}", stats.visited, tree.len());
}
