//! Local clustering coefficient.
//!
//! ```text
//! C(v) = 2 × T(v) / (d(v) × (d(v) - 1))
//! ```
//!
//! Where T(v) is the number of triangles through v. Nodes of degree < 2
//! have no neighbour pairs and score 0.
//!
//! # References
//!
//! - Watts & Strogatz (1998). "Collective dynamics of small-world networks"

use super::to_score_map;
use super::triangles::triangles_by_index;
use crate::{Graph, ScoreMap};

/// Fraction of each node's neighbour pairs that are themselves adjacent.
///
/// # Example
///
/// ```
/// use contagion_core::{Graph, NodeId};
/// use contagion_core::algo::centrality::clustering_coefficient;
///
/// // Triangle A-B-C with a pendant D on C
/// let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
///
/// let scores = clustering_coefficient(&g);
/// assert_eq!(scores[&NodeId::from("A")], 1.0);
/// assert!((scores[&NodeId::from("C")] - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn clustering_coefficient(graph: &Graph) -> ScoreMap {
    let g = graph.as_petgraph();
    let triangles = triangles_by_index(graph);

    let values = g
        .node_indices()
        .map(|idx| {
            let d = g.neighbors(idx).count();
            if d < 2 {
                0.0
            } else {
                2.0 * triangles[idx.index()] as f64 / (d * (d - 1)) as f64
            }
        })
        .collect();

    to_score_map(graph, values)
}
