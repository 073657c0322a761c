//! Katz centrality: influence via damped path counting.
//!
//! # Intuition
//!
//! Katz centrality counts all walks ending at a node, with longer walks
//! weighted less. Unlike eigenvector centrality it is well defined on a
//! disconnected graph: every node keeps the baseline β.
//!
//! # Definition
//!
//! ```text
//! x_v = α × Σ_{u~v} x_u + β
//! ```
//!
//! In matrix form: x = α A x + β 1
//!
//! # Choosing α
//!
//! The series converges only when α < 1/λ_max. Past that bound the
//! iteration grows without limit; the iteration cap turns that into
//! [`Error::Convergence`] instead of a run that never ends or a score map
//! full of infinities.
//!
//! # References
//!
//! - Katz (1953). "A new status index derived from sociometric analysis"

use super::to_score_map;
use crate::{Error, Graph, Result, ScoreMap};

/// Configuration for Katz centrality.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct KatzConfig {
    /// Attenuation factor per hop. Must be < 1/λ_max for convergence.
    pub alpha: f64,
    /// Baseline centrality for each node.
    pub beta: f64,
    /// Maximum iterations before failing.
    pub max_iterations: usize,
    /// Convergence tolerance per node (L1 norm of change / n).
    pub tolerance: f64,
    /// Scale final scores so the largest is 1.
    pub normalized: bool,
}

impl Default for KatzConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 1.0,
            max_iterations: 1000,
            tolerance: 1e-6,
            normalized: true,
        }
    }
}

/// Compute Katz centrality via power iteration.
///
/// # Errors
///
/// [`Error::Convergence`] if the iteration cap is reached or the values
/// stop being finite (α above 1/λ_max).
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
/// use contagion_core::algo::centrality::{katz_centrality, KatzConfig};
///
/// let g = Graph::from_edges([("A", "B"), ("B", "C")]);
///
/// let scores = katz_centrality(&g, KatzConfig::default()).unwrap();
/// assert_eq!(scores[&NodeId::from("B")], 1.0);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn katz_centrality(graph: &Graph, config: KatzConfig) -> Result<ScoreMap> {
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n == 0 {
        return Ok(ScoreMap::new());
    }

    let failure = Error::Convergence {
        measure: "katz",
        iterations: config.max_iterations,
    };

    let mut scores = vec![0.0; n];
    let mut new_scores = vec![0.0; n];

    for _iter in 0..config.max_iterations {
        // x^(k+1) = α A x^(k) + β
        for idx in g.node_indices() {
            let neighbor_sum: f64 = g.neighbors(idx).map(|nbr| scores[nbr.index()]).sum();
            new_scores[idx.index()] = config.alpha * neighbor_sum + config.beta;
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut scores, &mut new_scores);

        if !diff.is_finite() {
            return Err(failure);
        }

        if diff < n as f64 * config.tolerance {
            if config.normalized {
                let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if max > 0.0 {
                    for s in &mut scores {
                        *s /= max;
                    }
                }
            }
            return Ok(to_score_map(graph, scores));
        }
    }

    Err(failure)
}
