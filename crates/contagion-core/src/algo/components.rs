//! Connected components analysis.
//!
//! Game graphs are undirected, so only plain connectivity is needed. Used to
//! reject disconnected inputs for eigenvector centrality and surfaced in
//! [`GraphStats`](crate::GraphStats).

use crate::{Graph, NodeId};
use petgraph::visit::EdgeRef;
use std::cmp::Ordering;
use std::collections::BTreeMap;

// Union-Find helper functions (at module level per clippy)
fn uf_find(parent: &mut [usize], i: usize) -> usize {
    if parent[i] != i {
        parent[i] = uf_find(parent, parent[i]); // Path compression
    }
    parent[i]
}

fn uf_union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
    let px = uf_find(parent, x);
    let py = uf_find(parent, y);
    if px == py {
        return;
    }
    // Union by rank
    match rank[px].cmp(&rank[py]) {
        Ordering::Less => parent[px] = py,
        Ordering::Greater => parent[py] = px,
        Ordering::Equal => {
            parent[py] = px;
            rank[px] += 1;
        }
    }
}

/// Component label per node index. Labels are the smallest node index in
/// each component, so they are stable across runs.
pub(crate) fn component_labels(graph: &Graph) -> Vec<usize> {
    let g = graph.as_petgraph();
    let n = g.node_count();

    let mut parent: Vec<usize> = (0..n).collect();
    let mut rank: Vec<usize> = vec![0; n];

    for edge in g.edge_references() {
        uf_union(&mut parent, &mut rank, edge.source().index(), edge.target().index());
    }

    let mut smallest: BTreeMap<usize, usize> = BTreeMap::new();
    let roots: Vec<usize> = (0..n).map(|i| uf_find(&mut parent, i)).collect();
    for (i, &root) in roots.iter().enumerate() {
        smallest.entry(root).or_insert(i);
    }
    roots.into_iter().map(|root| smallest[&root]).collect()
}

/// Compute connected components.
///
/// Uses Union-Find for O(V + E × α(V)). Components are ordered by their
/// smallest node ID and list members in ascending ID order.
#[must_use]
pub fn connected_components(graph: &Graph) -> Vec<Vec<NodeId>> {
    let g = graph.as_petgraph();
    let labels = component_labels(graph);

    let mut components: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
    for idx in g.node_indices() {
        components
            .entry(labels[idx.index()])
            .or_default()
            .push(g[idx].clone());
    }

    components.into_values().collect()
}

/// Number of connected components.
#[must_use]
pub fn component_count(graph: &Graph) -> usize {
    let mut labels = component_labels(graph);
    labels.sort_unstable();
    labels.dedup();
    labels.len()
}

/// Whether every node can reach every other node. The empty graph counts
/// as connected.
#[must_use]
pub fn is_connected(graph: &Graph) -> bool {
    component_count(graph) <= 1
}
