//! Triangle count: how many closed triads each node belongs to.
//!
//! Exact and integer valued; no iteration, no convergence concerns.
//! Shared with [`clustering_coefficient`](super::clustering_coefficient),
//! which normalizes the same count by the number of neighbour pairs.

use super::to_score_map;
use crate::{Graph, ScoreMap};
use std::collections::HashSet;

/// Triangles through each node, indexed by node index.
///
/// For every node the neighbour list is scanned pairwise, so the cost is
/// O(Σ d²) with O(1) adjacency lookups.
pub(crate) fn triangles_by_index(graph: &Graph) -> Vec<usize> {
    let g = graph.as_petgraph();
    let n = g.node_count();

    let adjacency: Vec<HashSet<usize>> = g
        .node_indices()
        .map(|idx| g.neighbors(idx).map(|nbr| nbr.index()).collect())
        .collect();

    (0..n)
        .map(|u| {
            let mut nbrs: Vec<usize> = adjacency[u].iter().copied().collect();
            nbrs.sort_unstable();
            let mut count = 0;
            for (i, &v) in nbrs.iter().enumerate() {
                for &w in &nbrs[i + 1..] {
                    if adjacency[v].contains(&w) {
                        count += 1;
                    }
                }
            }
            count
        })
        .collect()
}

/// Number of triangles each node participates in.
///
/// # Example
///
/// ```
/// use contagion_core::{Graph, NodeId};
/// use contagion_core::algo::centrality::triangle_count;
///
/// let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
///
/// let scores = triangle_count(&g);
/// assert_eq!(scores[&NodeId::from("A")], 1.0);
/// assert_eq!(scores[&NodeId::from("D")], 0.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn triangle_count(graph: &Graph) -> ScoreMap {
    let values = triangles_by_index(graph)
        .into_iter()
        .map(|t| t as f64)
        .collect();
    to_score_map(graph, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_k3() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A")]);
        let scores = triangle_count(&g);
        assert_eq!(scores.len(), 3);
        for score in scores.values() {
            assert_eq!(*score, 1.0);
        }
    }

    #[test]
    fn test_triangle_k4() {
        let g = Graph::from_edges([
            ("A", "B"),
            ("A", "C"),
            ("A", "D"),
            ("B", "C"),
            ("B", "D"),
            ("C", "D"),
        ]);
        // Each node sits in C(3, 2) = 3 triangles
        for score in triangle_count(&g).values() {
            assert_eq!(*score, 3.0);
        }
    }

    #[test]
    fn test_triangle_tree_is_zero() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("B", "D")]);
        assert!(triangle_count(&g).values().all(|&t| t == 0.0));
    }
}
