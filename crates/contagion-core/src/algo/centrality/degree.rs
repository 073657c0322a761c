//! Degree centrality: the simplest centrality measure.
//!
//! # Intuition
//!
//! Degree centrality simply counts connections. A seed with many
//! neighbours claims many nodes in the first diffusion step.
//!
//! # Normalization
//!
//! ```text
//! C_D(v) = deg(v) / (n - 1)
//! ```
//!
//! Where n is the number of nodes. This gives values in [0, 1].
//!
//! # Limitations
//!
//! - Ignores network structure beyond immediate neighbors
//! - A node with 10 low-degree neighbors ranks same as one with 10 hubs

use super::to_score_map;
use crate::{Graph, ScoreMap};

/// Compute normalized degree centrality for all nodes.
///
/// # Example
///
/// ```
/// use contagion_core::{Graph, NodeId};
/// use contagion_core::algo::centrality::degree_centrality;
///
/// let g = Graph::from_edges([("A", "B"), ("A", "C"), ("B", "C"), ("C", "D")]);
///
/// let scores = degree_centrality(&g);
/// assert_eq!(scores[&NodeId::from("C")], 1.0); // touches all 3 others
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &Graph) -> ScoreMap {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n == 0 {
        return ScoreMap::new();
    }

    let norm_factor = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let values = g
        .node_indices()
        .map(|idx| g.neighbors(idx).count() as f64 / norm_factor)
        .collect();

    to_score_map(graph, values)
}
