//! Graph reduction before expensive scoring.
//!
//! Closeness and betweenness cost O(V·E). On large game graphs the seed
//! search can instead run on a smaller induced subgraph where influence is
//! expected to concentrate:
//!
//! - [`Reducer::Community`]: the largest Louvain community
//! - [`Reducer::VertexCover`]: an approximate minimum vertex cover
//!
//! A [`Reduction`] borrows the graph it came from. Its subgraph only ever
//! holds nodes of that graph, and its edges are exactly the original edges
//! between retained nodes. Retained nodes left without any edge are
//! dropped so scorers keep seeing graphs without isolated nodes.

use crate::algo::community::{largest_community, louvain_communities, LouvainConfig};
use crate::algo::cover::min_weighted_vertex_cover;
use crate::{Graph, NodeId};
use serde::{Deserialize, Serialize};

/// Reduction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reducer {
    /// Keep the largest community of a Louvain partition.
    Community {
        /// Louvain resolution γ.
        resolution: f64,
        /// Seed for the Louvain visit order.
        seed: u64,
    },
    /// Keep an approximate minimum vertex cover (unit weights).
    VertexCover,
}

impl Reducer {
    /// Community reduction with default Louvain settings.
    pub fn community() -> Self {
        let defaults = LouvainConfig::default();
        Self::Community {
            resolution: defaults.resolution,
            seed: defaults.seed,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Community { .. } => "community",
            Self::VertexCover => "vertex_cover",
        }
    }

    /// Apply the reduction.
    pub fn reduce<'g>(&self, graph: &'g Graph) -> Reduction<'g> {
        let retained: Vec<NodeId> = match *self {
            Self::Community { resolution, seed } => {
                let config = LouvainConfig {
                    resolution,
                    seed,
                    ..Default::default()
                };
                let communities = louvain_communities(graph, config);
                tracing::debug!(communities = communities.len(), "louvain partition");
                largest_community(&communities)
                    .map(<[NodeId]>::to_vec)
                    .unwrap_or_default()
            }
            Self::VertexCover => min_weighted_vertex_cover(graph, None),
        };

        let subgraph = graph.induced_subgraph(&retained).without_isolated();
        tracing::info!(
            reducer = self.name(),
            original = graph.node_count(),
            retained = retained.len(),
            nodes = subgraph.node_count(),
            edges = subgraph.edge_count(),
            "graph reduced"
        );

        Reduction {
            original: graph,
            subgraph,
            reducer: *self,
        }
    }
}

/// A node-induced subgraph tied to the graph it was cut from.
#[derive(Debug, Clone)]
pub struct Reduction<'g> {
    original: &'g Graph,
    subgraph: Graph,
    reducer: Reducer,
}

impl<'g> Reduction<'g> {
    /// The graph this reduction was taken from.
    pub fn original(&self) -> &'g Graph {
        self.original
    }

    /// The reduced subgraph.
    pub fn graph(&self) -> &Graph {
        &self.subgraph
    }

    /// The strategy that produced this reduction.
    pub fn reducer(&self) -> Reducer {
        self.reducer
    }

    /// Fraction of the original nodes kept.
    #[allow(clippy::cast_precision_loss)]
    pub fn retained_fraction(&self) -> f64 {
        if self.original.is_empty() {
            return 0.0;
        }
        self.subgraph.node_count() as f64 / self.original.node_count() as f64
    }
}
