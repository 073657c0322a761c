use crate::algo::components::connected_components;
use crate::{NodeId, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// An undirected simple graph with stable node identifiers.
///
/// Uses petgraph's undirected graph internally. Nodes are inserted in
/// [`NodeId`] order and edges in sorted endpoint order, so node indices and
/// neighbour iteration are identical for identical inputs. Every scorer
/// relies on that for bit-identical output.
///
/// Self-loops and duplicate edges are dropped on construction. The handle is
/// read-only once built; reductions produce new graphs instead of mutating.
///
/// # Example
///
/// ```rust
/// use contagion_core::Graph;
///
/// let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "B"), ("C", "C")]);
///
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    /// The underlying undirected graph.
    graph: UnGraph<NodeId, ()>,

    /// Map from node ID to node index.
    index: HashMap<NodeId, NodeIndex>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            index: HashMap::new(),
        }
    }

    /// Build a graph from an explicit node list plus edges.
    ///
    /// Edge endpoints are added to the node set if missing. Nodes listed
    /// without edges are kept (as isolated nodes) until
    /// [`without_isolated`](Self::without_isolated) strips them.
    pub fn from_parts<N, A, B>(
        nodes: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (A, B)>,
    ) -> Self
    where
        N: Into<NodeId>,
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        let mut node_set: BTreeSet<NodeId> = nodes.into_iter().map(Into::into).collect();
        let mut edge_set: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();

        for (a, b) in edges {
            let (a, b) = (a.into(), b.into());
            node_set.insert(a.clone());
            node_set.insert(b.clone());
            if a == b {
                continue;
            }
            if a < b {
                edge_set.insert((a, b));
            } else {
                edge_set.insert((b, a));
            }
        }

        let mut graph = UnGraph::with_capacity(node_set.len(), edge_set.len());
        let mut index = HashMap::with_capacity(node_set.len());
        for id in node_set {
            let idx = graph.add_node(id.clone());
            index.insert(id, idx);
        }
        for (a, b) in &edge_set {
            graph.add_edge(index[a], index[b], ());
        }

        Self { graph, index }
    }

    /// Build a graph from an edge list.
    pub fn from_edges<A, B>(edges: impl IntoIterator<Item = (A, B)>) -> Self
    where
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        Self::from_parts(std::iter::empty::<NodeId>(), edges)
    }

    /// Build a graph from an adjacency map (node -> neighbour list).
    ///
    /// The map is read as undirected: `{"a": ["b"]}` and `{"b": ["a"]}`
    /// produce the same graph. Keys with empty lists become isolated nodes.
    pub fn from_adjacency(adjacency: HashMap<String, Vec<String>>) -> Self {
        let nodes: Vec<String> = adjacency.keys().cloned().collect();
        let edges = adjacency
            .into_iter()
            .flat_map(|(head, tails)| tails.into_iter().map(move |tail| (head.clone(), tail)));
        Self::from_parts(nodes, edges)
    }

    /// Parse a JSON adjacency object.
    pub fn from_json_adjacency_str(json: &str) -> Result<Self> {
        let adjacency: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_adjacency(adjacency))
    }

    /// Load from a JSON adjacency file.
    pub fn from_json_adjacency_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let adjacency: HashMap<String, Vec<String>> = serde_json::from_reader(reader)?;
        Ok(Self::from_adjacency(adjacency))
    }

    /// Copy of this graph with every degree-0 node removed.
    pub fn without_isolated(&self) -> Self {
        let keep: Vec<&NodeId> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_some())
            .map(|idx| &self.graph[idx])
            .collect();
        self.induced_subgraph(keep)
    }

    /// Node-induced subgraph: the given nodes plus every edge whose
    /// endpoints are both retained.
    ///
    /// Ids not present in this graph are ignored, so the result never holds
    /// a node this graph does not.
    pub fn induced_subgraph<'a>(&self, keep: impl IntoIterator<Item = &'a NodeId>) -> Self {
        let retained: BTreeSet<&NodeId> = keep
            .into_iter()
            .filter(|id| self.index.contains_key(*id))
            .collect();

        let edges: Vec<(NodeId, NodeId)> = self
            .graph
            .edge_references()
            .filter_map(|e| {
                let a = &self.graph[e.source()];
                let b = &self.graph[e.target()];
                (retained.contains(a) && retained.contains(b)).then(|| (a.clone(), b.clone()))
            })
            .collect();

        Self::from_parts(retained.into_iter().cloned(), edges)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterate node IDs in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.graph.node_weights()
    }

    /// Iterate edges as `(smaller, larger)` id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
    }

    /// Whether the node is present.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Get node index for an ID.
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Degree of a node (0 when absent). O(d).
    pub fn degree(&self, id: &NodeId) -> usize {
        self.index
            .get(id)
            .map_or(0, |&idx| self.graph.neighbors(idx).count())
    }

    /// Neighbour IDs of a node. O(d).
    pub fn neighbors(&self, id: &NodeId) -> Vec<&NodeId> {
        match self.index.get(id) {
            Some(&idx) => self.graph.neighbors(idx).map(|n| &self.graph[n]).collect(),
            None => vec![],
        }
    }

    /// Check if an edge exists between two nodes. O(d).
    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        self.graph.find_edge(ia, ib).is_some()
    }

    /// Number of degree-0 nodes.
    pub fn isolated_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .count()
    }

    /// Get the underlying petgraph for algorithms.
    pub fn as_petgraph(&self) -> &UnGraph<NodeId, ()> {
        &self.graph
    }
}

/// Statistics about a graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Average degree (2E / V).
    pub avg_degree: f64,
    /// Edge density (E / (V choose 2)).
    pub density: f64,
    /// Number of connected components.
    pub component_count: usize,
}

impl Graph {
    /// Compute statistics about the graph.
    pub fn stats(&self) -> GraphStats {
        let n = self.node_count();
        let m = self.edge_count();

        let avg_degree = if n > 0 {
            2.0 * m as f64 / n as f64
        } else {
            0.0
        };
        let density = if n > 1 {
            2.0 * m as f64 / (n as f64 * (n - 1) as f64)
        } else {
            0.0
        };

        GraphStats {
            node_count: n,
            edge_count: m,
            avg_degree,
            density,
            component_count: connected_components(self).len(),
        }
    }
}
