//! Betweenness centrality: measuring brokerage and bridging.
//!
//! # Intuition
//!
//! Betweenness measures how often a node lies on shortest paths between
//! other nodes. A seed with high betweenness sits where diffusion from
//! separate regions has to pass.
//!
//! # Definition
//!
//! ```text
//! C_B(v) = Σ_{s≠v≠t} σ_st(v) / σ_st
//! ```
//!
//! Where:
//! - σ_st = number of shortest paths from s to t
//! - σ_st(v) = number of those paths passing through v
//!
//! # Brandes' Algorithm (2001)
//!
//! 1. Run BFS from each source s
//! 2. Track σ_sv (shortest path counts) during forward pass
//! 3. Accumulate dependencies δ_s(v) during backward pass
//!
//! ```text
//! δ_s(v) = Σ_{w: v∈P_s(w)} (σ_sv/σ_sw) × (1 + δ_s(w))
//! ```
//!
//! # Normalization
//!
//! Each unordered pair is seen from both ends, so raw sums are halved.
//! Normalized scores divide by the number of pairs not involving v:
//!
//! ```text
//! C_B_norm(v) = C_B(v) / [(n-1)(n-2)/2]
//! ```
//!
//! # References
//!
//! - Brandes (2001). "A faster algorithm for betweenness centrality"
//! - Freeman (1977). "A set of measures of centrality based on betweenness"

use super::to_score_map;
use crate::{Graph, NodeId, ScoreMap};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::VecDeque;

/// Configuration for betweenness centrality.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct BetweennessConfig {
    /// Normalize scores to the fraction of pairs in [0, 1].
    pub normalized: bool,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self { normalized: true }
    }
}

/// Compute betweenness centrality using Brandes' algorithm.
///
/// Sources are processed sequentially in index order so floating-point
/// accumulation happens in the same order on every run.
///
/// # Complexity
///
/// - Time: O(VE) for unweighted graphs
/// - Space: O(V + E)
///
/// # Example
///
/// ```
/// use contagion_core::{Graph, NodeId};
/// use contagion_core::algo::centrality::{betweenness_centrality, BetweennessConfig};
///
/// let g = Graph::from_edges([("A", "B"), ("B", "C")]);
///
/// let scores = betweenness_centrality(&g, BetweennessConfig::default());
/// // B is on the only path from A to C
/// assert_eq!(scores[&NodeId::from("B")], 1.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(graph: &Graph, config: BetweennessConfig) -> ScoreMap {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n < 2 {
        return to_score_map(graph, vec![0.0; n]);
    }

    let mut betweenness = vec![0.0_f64; n];

    for s in g.node_indices() {
        let (sigma, predecessors, order) = bfs_shortest_paths(g, s);

        // Backward pass: accumulate dependencies
        let mut delta = vec![0.0_f64; n];

        // Process nodes in reverse BFS order (farthest first)
        for &w in order.iter().rev() {
            let w_idx = w.index();
            for &v in &predecessors[w_idx] {
                let v_idx = v.index();
                // δ_s(v) += (σ_sv / σ_sw) × (1 + δ_s(w))
                let coeff = sigma[v_idx] / sigma[w_idx];
                delta[v_idx] += coeff * (1.0 + delta[w_idx]);
            }
            if w != s {
                betweenness[w_idx] += delta[w_idx];
            }
        }
    }

    // Each unordered pair was counted from both endpoints
    let scale = if config.normalized && n > 2 {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        0.5
    };
    for b in &mut betweenness {
        *b *= scale;
    }

    to_score_map(graph, betweenness)
}

/// BFS to find shortest paths from source.
///
/// Returns:
/// - sigma: σ_sv = number of shortest paths from s to v
/// - predecessors: P_s(v) = predecessors on shortest paths
/// - order: nodes in BFS order (for backward pass)
fn bfs_shortest_paths(
    graph: &UnGraph<NodeId, ()>,
    source: NodeIndex,
) -> (Vec<f64>, Vec<Vec<NodeIndex>>, Vec<NodeIndex>) {
    let n = graph.node_count();
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);

    sigma[source.index()] = 1.0;
    dist[source.index()] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let v_idx = v.index();
        let v_dist = dist[v_idx];

        for w in graph.neighbors(v) {
            let w_idx = w.index();

            // First time seeing w?
            if dist[w_idx] < 0 {
                dist[w_idx] = v_dist + 1;
                queue.push_back(w);
            }

            // Is this a shortest path to w?
            if dist[w_idx] == v_dist + 1 {
                sigma[w_idx] += sigma[v_idx];
                predecessors[w_idx].push(v);
            }
        }
    }

    (sigma, predecessors, order)
}
