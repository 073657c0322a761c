//! Eigenvector centrality: importance via important neighbors.
//!
//! # Intuition
//!
//! A node is important if it's connected to other important nodes.
//! This creates a recursive definition resolved by finding the
//! dominant eigenvector of the adjacency matrix.
//!
//! # Definition
//!
//! ```text
//! x_v = (1/λ) × Σ_{u~v} x_u
//! ```
//!
//! Equivalently: Ax = λx, where λ is the spectral radius of A.
//!
//! # Algorithm: Shifted Power Iteration
//!
//! 1. Initialize x uniformly
//! 2. Repeat: x' = (A + I) × x, then x' = x' / ||x'||₂
//! 3. Stop when ||x' - x||₁ < n × tolerance
//!
//! The identity shift leaves the eigenvectors unchanged but keeps the
//! iteration from oscillating on bipartite graphs (paths, stars, trees),
//! where plain power iteration never settles.
//!
//! # Failure Modes
//!
//! The Perron vector is only unique on a connected graph, so a
//! disconnected input is rejected up front with [`Error::Disconnected`].
//! Hitting the iteration cap yields [`Error::Convergence`]. Neither case
//! returns partial scores.
//!
//! # References
//!
//! - Bonacich (1972). "Factoring and weighting approaches to status scores"

use super::to_score_map;
use crate::algo::components::component_count;
use crate::{Error, Graph, Result, ScoreMap};

/// Configuration for eigenvector centrality.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct EigenvectorConfig {
    /// Maximum iterations before failing.
    pub max_iterations: usize,
    /// Convergence tolerance per node (L1 norm of change / n).
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Compute eigenvector centrality via power iteration.
///
/// # Errors
///
/// - [`Error::Disconnected`] if the graph has more than one component
/// - [`Error::Convergence`] if the iteration cap is reached
///
/// # Complexity
///
/// - Time: O(E × iterations)
/// - Space: O(V)
///
/// # Example
///
/// ```
/// use contagion_core::{Graph, NodeId};
/// use contagion_core::algo::centrality::{eigenvector_centrality, EigenvectorConfig};
///
/// let g = Graph::from_edges([("Hub", "A"), ("Hub", "B"), ("Hub", "C")]);
///
/// let scores = eigenvector_centrality(&g, EigenvectorConfig::default()).unwrap();
/// assert!(scores[&NodeId::from("Hub")] > scores[&NodeId::from("A")]);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(graph: &Graph, config: EigenvectorConfig) -> Result<ScoreMap> {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n == 0 {
        return Ok(ScoreMap::new());
    }

    let components = component_count(graph);
    if components > 1 {
        return Err(Error::Disconnected {
            measure: "eigenvector",
            components,
        });
    }

    let mut scores = vec![1.0 / n as f64; n];
    let mut new_scores = vec![0.0; n];

    for _iter in 0..config.max_iterations {
        // (A + I) × x
        new_scores.copy_from_slice(&scores);
        for idx in g.node_indices() {
            let x = scores[idx.index()];
            for nbr in g.neighbors(idx) {
                new_scores[nbr.index()] += x;
            }
        }

        // Normalize (L2 norm)
        let norm: f64 = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for s in &mut new_scores {
                *s /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut scores, &mut new_scores);

        if diff < n as f64 * config.tolerance {
            return Ok(to_score_map(graph, scores));
        }
    }

    Err(Error::Convergence {
        measure: "eigenvector",
        iterations: config.max_iterations,
    })
}
