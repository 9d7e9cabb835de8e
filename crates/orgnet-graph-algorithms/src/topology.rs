//! Graph topology analysis algorithms
//!
//! Triangle counting, clustering coefficients and degree histograms over an
//! undirected [`GraphView`].

use super::common::GraphView;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Triangle Counting
///
/// Returns total number of triangles in the graph. Each triangle is counted
/// once.
pub fn count_triangles(view: &GraphView) -> usize {
    let mut triangle_count = 0;

    // For each edge (u, v), find common neighbors of u and v.
    // To avoid overcounting, we only consider nodes with indices u < v < w.
    for u in 0..view.node_count {
        let u_neighbors = view.neighbors(u);

        for &v in u_neighbors {
            if v <= u {
                continue;
            }

            for &w in view.neighbors(v) {
                if w <= v {
                    continue;
                }
                if u_neighbors.binary_search(&w).is_ok() {
                    triangle_count += 1;
                }
            }
        }
    }

    triangle_count
}

/// Number of edges among the neighbors of `idx`
fn neighbor_links(view: &GraphView, idx: usize) -> usize {
    let neighbors = view.neighbors(idx);
    let mut links = 0;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if view.is_adjacent(a, b) {
                links += 1;
            }
        }
    }
    links
}

/// Local clustering coefficient of a single node.
///
/// `links among neighbors / C(k, 2)`; returns `None` for nodes with degree
/// below 2, for which the coefficient is undefined.
pub fn local_clustering(view: &GraphView, idx: usize) -> Option<f64> {
    let k = view.degree(idx);
    if k < 2 {
        return None;
    }
    let possible = (k * (k - 1) / 2) as f64;
    Some(neighbor_links(view, idx) as f64 / possible)
}

/// Average local clustering coefficient over nodes with degree > 1.
///
/// Returns 0.0 if no node qualifies.
pub fn average_clustering(view: &GraphView) -> f64 {
    #[cfg(feature = "parallel")]
    let coefficients: Vec<f64> = (0..view.node_count)
        .into_par_iter()
        .filter_map(|idx| local_clustering(view, idx))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let coefficients: Vec<f64> = (0..view.node_count)
        .filter_map(|idx| local_clustering(view, idx))
        .collect();

    if coefficients.is_empty() {
        return 0.0;
    }
    // Sequential sum keeps the result independent of thread scheduling
    coefficients.iter().sum::<f64>() / coefficients.len() as f64
}

/// Number of connected triples (paths of length two), `Σ C(k, 2)`.
pub fn count_connected_triples(view: &GraphView) -> usize {
    (0..view.node_count)
        .map(|idx| {
            let k = view.degree(idx);
            k * k.saturating_sub(1) / 2
        })
        .sum()
}

/// Global transitivity: `3 × triangles / connected triples`.
///
/// Returns 0.0 when the graph has no connected triple.
pub fn global_transitivity(view: &GraphView) -> f64 {
    let triples = count_connected_triples(view);
    if triples == 0 {
        return 0.0;
    }
    (3 * count_triangles(view)) as f64 / triples as f64
}

/// Histogram of degree value -> number of nodes with that degree
pub fn degree_histogram(view: &GraphView) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for idx in 0..view.node_count {
        *histogram.entry(view.degree(idx)).or_insert(0) += 1;
    }
    histogram
}
