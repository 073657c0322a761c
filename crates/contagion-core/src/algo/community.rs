//! Community detection via Louvain modularity optimization.
//!
//! ## The Modularity Objective
//!
//! ```text
//! Q = Σ_c [ L_c / m  -  γ × (K_c / 2m)² ]
//! ```
//!
//! Where:
//! - m = total edge weight
//! - L_c = edge weight inside community c
//! - K_c = sum of degrees of the nodes in c
//! - γ = resolution parameter
//!
//! ## The Resolution Parameter γ
//!
//! - **γ = 1**: Standard modularity (default)
//! - **γ > 1**: Smaller communities (higher penalty for merging)
//! - **γ < 1**: Larger communities (lower penalty for merging)
//!
//! ## Algorithm
//!
//! Louvain (Blondel et al. 2008) alternates two phases:
//!
//! 1. **Local moving**: visit nodes in a shuffled order, move each to the
//!    neighbouring community with the best positive modularity gain, repeat
//!    until a full pass moves nothing.
//! 2. **Aggregation**: contract every community into one weighted node
//!    (internal edges become a self-loop) and run phase 1 again.
//!
//! It stops when a level moves nothing, when a level improves Q by no more
//! than `threshold`, or after `max_levels`.
//!
//! The visit order is the only randomness. It comes from an `XorShiftRng`
//! seeded by the caller, so a fixed seed reproduces the same partition.
//!
//! ## References
//!
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."

use crate::{Graph, NodeId};
use petgraph::visit::EdgeRef;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Configuration for Louvain community detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LouvainConfig {
    /// Resolution γ. Higher values give smaller communities.
    pub resolution: f64,
    /// Seed for the node visit order.
    pub seed: u64,
    /// Minimum modularity gain required to aggregate another level.
    pub threshold: f64,
    /// Upper bound on aggregation levels.
    pub max_levels: usize,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            seed: 42,
            threshold: 1e-7,
            max_levels: 32,
        }
    }
}

/// Weighted graph for one Louvain level. Node i of level k+1 is community i
/// of level k.
struct Level {
    /// Neighbour lists without self-loops.
    adjacency: Vec<Vec<(usize, f64)>>,
    /// Self-loop weight per node (contracted internal edges).
    self_loops: Vec<f64>,
}

impl Level {
    fn from_graph(graph: &Graph) -> Self {
        let g = graph.as_petgraph();
        let n = g.node_count();
        let mut adjacency = vec![Vec::new(); n];
        for edge in g.edge_references() {
            let (u, v) = (edge.source().index(), edge.target().index());
            adjacency[u].push((v, 1.0));
            adjacency[v].push((u, 1.0));
        }
        Self {
            adjacency,
            self_loops: vec![0.0; n],
        }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Weighted degrees. A self-loop counts twice.
    fn degrees(&self) -> Vec<f64> {
        self.adjacency
            .iter()
            .zip(&self.self_loops)
            .map(|(nbrs, &lp)| nbrs.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * lp)
            .collect()
    }

    fn modularity(&self, assignment: &[usize], resolution: f64) -> f64 {
        let degrees = self.degrees();
        let m = degrees.iter().sum::<f64>() / 2.0;
        if m == 0.0 {
            return 0.0;
        }

        let mut internal: HashMap<usize, f64> = HashMap::new();
        let mut totals: HashMap<usize, f64> = HashMap::new();
        for u in 0..self.len() {
            let c = assignment[u];
            *totals.entry(c).or_default() += degrees[u];
            *internal.entry(c).or_default() += self.self_loops[u];
            for &(v, w) in &self.adjacency[u] {
                // Each undirected edge appears twice in the lists
                if u < v && assignment[v] == c {
                    *internal.entry(c).or_default() += w;
                }
            }
        }

        totals
            .iter()
            .map(|(c, &k)| {
                let l = internal.get(c).copied().unwrap_or(0.0);
                l / m - resolution * (k / (2.0 * m)).powi(2)
            })
            .sum()
    }

    /// Phase 1. Returns the community of every node and whether any node
    /// moved.
    fn local_moving(&self, resolution: f64, rng: &mut XorShiftRng) -> (Vec<usize>, bool) {
        let n = self.len();
        let degrees = self.degrees();
        let m = degrees.iter().sum::<f64>() / 2.0;
        let mut community: Vec<usize> = (0..n).collect();
        if m == 0.0 {
            return (community, false);
        }

        let mut totals = degrees.clone();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let mut improved = false;
        loop {
            let mut moves = 0;
            for &u in &order {
                let current = community[u];
                let k_u = degrees[u];

                // Edge weight from u to each neighbouring community, in
                // first-seen order
                let mut links: Vec<(usize, f64)> = Vec::new();
                let mut slot: HashMap<usize, usize> = HashMap::new();
                for &(v, w) in &self.adjacency[u] {
                    let c = community[v];
                    match slot.get(&c) {
                        Some(&i) => links[i].1 += w,
                        None => {
                            slot.insert(c, links.len());
                            links.push((c, w));
                        }
                    }
                }

                totals[current] -= k_u;
                let to_current = slot.get(&current).map_or(0.0, |&i| links[i].1);
                let remove_cost =
                    -to_current / m + resolution * totals[current] * k_u / (2.0 * m * m);

                let mut best = current;
                let mut best_gain = 0.0;
                for &(c, w) in &links {
                    let gain = remove_cost + w / m - resolution * totals[c] * k_u / (2.0 * m * m);
                    if gain > best_gain {
                        best_gain = gain;
                        best = c;
                    }
                }

                totals[best] += k_u;
                if best != current {
                    community[u] = best;
                    moves += 1;
                    improved = true;
                }
            }
            if moves == 0 {
                break;
            }
        }

        (community, improved)
    }

    /// Phase 2. `assignment` must be renumbered to 0..count.
    fn aggregate(&self, assignment: &[usize], count: usize) -> Self {
        let mut weights: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
        let mut self_loops = vec![0.0; count];

        for u in 0..self.len() {
            let cu = assignment[u];
            self_loops[cu] += self.self_loops[u];
            for &(v, w) in &self.adjacency[u] {
                if u > v {
                    continue;
                }
                let cv = assignment[v];
                if cu == cv {
                    self_loops[cu] += w;
                } else {
                    *weights[cu].entry(cv).or_default() += w;
                    *weights[cv].entry(cu).or_default() += w;
                }
            }
        }

        Self {
            adjacency: weights.into_iter().map(|m| m.into_iter().collect()).collect(),
            self_loops,
        }
    }
}

/// Renumber labels to 0..count in order of first appearance.
fn renumber(assignment: &[usize]) -> (Vec<usize>, usize) {
    let mut map: HashMap<usize, usize> = HashMap::new();
    let labels = assignment
        .iter()
        .map(|c| {
            let next = map.len();
            *map.entry(*c).or_insert(next)
        })
        .collect();
    (labels, map.len())
}

/// Detect communities with the Louvain method.
///
/// Returns every node exactly once. Members of each community are sorted
/// ascending and communities are ordered by their smallest member, so the
/// output is canonical for a given seed.
///
/// # Example
///
/// ```
/// use contagion_core::Graph;
/// use contagion_core::algo::community::{louvain_communities, LouvainConfig};
///
/// // Two triangles joined by a single bridge
/// let g = Graph::from_edges([
///     ("A", "B"), ("B", "C"), ("C", "A"),
///     ("D", "E"), ("E", "F"), ("F", "D"),
///     ("C", "D"),
/// ]);
///
/// let communities = louvain_communities(&g, LouvainConfig::default());
/// assert_eq!(communities.len(), 2);
/// ```
#[must_use]
pub fn louvain_communities(graph: &Graph, config: LouvainConfig) -> Vec<Vec<NodeId>> {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n == 0 {
        return vec![];
    }

    let mut rng = XorShiftRng::seed_from_u64(config.seed);
    let mut membership: Vec<usize> = (0..n).collect();
    let mut level = Level::from_graph(graph);
    let mut current_q = level.modularity(&membership, config.resolution);

    for depth in 0..config.max_levels {
        let (assignment, moved) = level.local_moving(config.resolution, &mut rng);
        if !moved {
            break;
        }

        let (labels, count) = renumber(&assignment);
        for m in &mut membership {
            *m = labels[*m];
        }

        let new_q = level.modularity(&labels, config.resolution);
        tracing::debug!(depth, communities = count, modularity = new_q, "louvain level");

        level = level.aggregate(&labels, count);
        if new_q - current_q <= config.threshold {
            break;
        }
        current_q = new_q;
    }

    let mut groups: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
    for idx in g.node_indices() {
        groups
            .entry(membership[idx.index()])
            .or_default()
            .push(g[idx].clone());
    }

    // Node indices follow id order, so members are already sorted
    let mut communities: Vec<Vec<NodeId>> = groups.into_values().collect();
    communities.sort_by(|a, b| a[0].cmp(&b[0]));
    communities
}

/// Modularity of a partition at the given resolution.
///
/// Nodes missing from `communities` are treated as singletons; ids not in
/// the graph are ignored.
#[must_use]
pub fn modularity(graph: &Graph, communities: &[Vec<NodeId>], resolution: f64) -> f64 {
    let n = graph.node_count();
    let mut assignment: Vec<usize> = (0..n).collect();
    for (c, members) in communities.iter().enumerate() {
        for id in members {
            if let Some(idx) = graph.index_of(id) {
                assignment[idx.index()] = n + c;
            }
        }
    }
    Level::from_graph(graph).modularity(&assignment, resolution)
}

/// The community with the most nodes. Ties go to the community holding the
/// smallest node ID.
#[must_use]
pub fn largest_community(communities: &[Vec<NodeId>]) -> Option<&[NodeId]> {
    communities
        .iter()
        .filter_map(|c| c.iter().min().map(|min| (c, min)))
        .max_by(|(a, a_min), (b, b_min)| a.len().cmp(&b.len()).then_with(|| b_min.cmp(a_min)))
        .map(|(c, _)| c.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Graph {
        Graph::from_edges([
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("D", "E"),
            ("E", "F"),
            ("F", "D"),
            ("C", "D"),
        ])
    }

    fn ids(names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn test_louvain_two_triangles() {
        let communities = louvain_communities(&two_triangles(), LouvainConfig::default());
        assert_eq!(communities, vec![ids(&["A", "B", "C"]), ids(&["D", "E", "F"])]);
    }

    #[test]
    fn test_louvain_partition_covers_all_nodes() {
        let g = two_triangles();
        let communities = louvain_communities(&g, LouvainConfig::default());
        let total: usize = communities.iter().map(Vec::len).sum();
        assert_eq!(total, g.node_count());
    }

    #[test]
    fn test_louvain_low_resolution_merges() {
        let config = LouvainConfig {
            resolution: 0.01,
            ..Default::default()
        };
        let communities = louvain_communities(&two_triangles(), config);
        assert_eq!(communities.len(), 1);
        assert_eq!(communities[0].len(), 6);
    }

    #[test]
    fn test_louvain_seed_reproducible() {
        let g = Graph::from_edges((0..30_u64).flat_map(|i| [(i, (i + 1) % 30), (i, (i + 7) % 30)]));
        let config = LouvainConfig {
            seed: 7,
            ..Default::default()
        };
        assert_eq!(louvain_communities(&g, config), louvain_communities(&g, config));
    }

    #[test]
    fn test_modularity_two_triangles() {
        let g = two_triangles();
        let q = modularity(&g, &[ids(&["A", "B", "C"]), ids(&["D", "E", "F"])], 1.0);
        // 2 × (3/7 - (7/14)²)
        assert!((q - (6.0 / 7.0 - 0.5)).abs() < 1e-12, "{q}");

        let single = modularity(&g, &[ids(&["A", "B", "C", "D", "E", "F"])], 1.0);
        assert!(single.abs() < 1e-12, "one community has Q = 0: {single}");
    }

    #[test]
    fn test_largest_community_tie_break() {
        let communities = vec![ids(&["D", "E", "F"]), ids(&["A", "B", "C"]), ids(&["G"])];
        let largest = largest_community(&communities).unwrap();
        assert_eq!(largest, ids(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn test_largest_community_by_size() {
        let communities = vec![ids(&["A", "B"]), ids(&["C", "D", "E"])];
        assert_eq!(largest_community(&communities).unwrap().len(), 3);
        assert!(largest_community(&[]).is_none());
    }
}
