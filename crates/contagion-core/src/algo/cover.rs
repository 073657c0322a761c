//! Approximate minimum weighted vertex cover.
//!
//! A vertex cover is a node set touching every edge; any node left out is
//! adjacent only to covered nodes. Finding the minimum is NP-hard, so this
//! uses the local-ratio method of Bar-Yehuda & Even (1985), which is a
//! 2-approximation in O(E):
//!
//! ```text
//! for each edge (u, v):
//!     δ = min(cost(u), cost(v))
//!     cost(u) -= δ; cost(v) -= δ
//! cover = { v : cost(v) = 0 }
//! ```
//!
//! Edges are visited in the graph's sorted edge order, so the cover is
//! reproducible.

use crate::{Graph, NodeId, ScoreMap};
use petgraph::visit::EdgeRef;

/// Compute an approximate minimum weighted vertex cover.
///
/// Node weights come from `weights`; nodes without an entry (or every node
/// when `weights` is `None`) weigh 1. Negative weights are treated as 0.
/// The cover is returned in ascending ID order.
///
/// # Example
///
/// ```
/// use contagion_core::Graph;
/// use contagion_core::algo::cover::min_weighted_vertex_cover;
///
/// let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "D")]);
/// let cover = min_weighted_vertex_cover(&g, None);
///
/// for (a, b) in g.edges() {
///     assert!(cover.contains(a) || cover.contains(b));
/// }
/// ```
#[must_use]
pub fn min_weighted_vertex_cover(graph: &Graph, weights: Option<&ScoreMap>) -> Vec<NodeId> {
    let g = graph.as_petgraph();

    let mut cost: Vec<f64> = g
        .node_indices()
        .map(|idx| {
            weights
                .and_then(|w| w.get(&g[idx]).copied())
                .unwrap_or(1.0)
                .max(0.0)
        })
        .collect();

    for edge in g.edge_references() {
        let (u, v) = (edge.source().index(), edge.target().index());
        let delta = cost[u].min(cost[v]);
        cost[u] -= delta;
        cost[v] -= delta;
    }

    g.node_indices()
        .filter(|idx| cost[idx.index()] <= 0.0)
        .map(|idx| g[idx].clone())
        .collect()
}
