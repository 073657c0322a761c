//! Strategies: which measures to run and how to merge them.
//!
//! A [`Strategy`] is a tagged variant over explicit identifiers, never a
//! positional code:
//!
//! | Id | Variant | Combined score |
//! |----|---------|----------------|
//! | `degree`, `closeness`, ... | [`Strategy::Single`] | the measure itself |
//! | `weighted` | [`Strategy::Weighted`] | [`weighted_sum`] |
//! | `ensemble` | [`Strategy::Ensemble`] | [`ensemble`] votes |
//!
//! [`select_seeds`] runs the whole pipeline for one [`RunConfig`]:
//!
//! ```text
//! Graph ─▶ Reducer? ─▶ score_all (rayon fan-out) ─▶ combine ─▶ top_k
//!                                                              │
//!                           insufficient after reduction ◀─────┘
//!                           └─▶ re-score full graph ─▶ top_up
//! ```

use crate::algo::centrality::{
    betweenness_centrality, closeness_centrality, clustering_coefficient, degree_centrality,
    eigenvector_centrality, katz_centrality, triangle_count, BetweennessConfig, ClosenessConfig,
    EigenvectorConfig, KatzConfig,
};
use crate::combine::{ensemble, weighted_sum};
use crate::run::RunConfig;
use crate::select::{rank_all, top_k, top_up};
use crate::{Error, Graph, NodeId, Result, ScoreMap};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// A single centrality measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Degree,
    Closeness,
    Betweenness,
    Eigenvector,
    Katz,
    Clustering,
    Triangles,
}

impl Measure {
    /// Every measure, in identifier order.
    pub const ALL: [Measure; 7] = [
        Measure::Degree,
        Measure::Closeness,
        Measure::Betweenness,
        Measure::Eigenvector,
        Measure::Katz,
        Measure::Clustering,
        Measure::Triangles,
    ];

    /// Identifier used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Closeness => "closeness",
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
            Self::Katz => "katz",
            Self::Clustering => "clustering",
            Self::Triangles => "triangles",
        }
    }

    /// Whether the measure iterates and may fail to converge.
    pub fn is_iterative(self) -> bool {
        matches!(self, Self::Eigenvector | Self::Katz)
    }

    /// Score every node of `graph`.
    ///
    /// # Errors
    ///
    /// Eigenvector and Katz report [`Error::Convergence`] or
    /// [`Error::Disconnected`]; the other measures never fail.
    pub fn score(self, graph: &Graph, config: &ScoringConfig) -> Result<ScoreMap> {
        let start = Instant::now();
        let scores = match self {
            Self::Degree => degree_centrality(graph),
            Self::Closeness => closeness_centrality(graph, config.closeness),
            Self::Betweenness => betweenness_centrality(graph, config.betweenness),
            Self::Eigenvector => eigenvector_centrality(graph, config.eigenvector)?,
            Self::Katz => katz_centrality(graph, config.katz)?,
            Self::Clustering => clustering_coefficient(graph),
            Self::Triangles => triangle_count(graph),
        };
        tracing::debug!(
            measure = self.name(),
            nodes = graph.node_count(),
            elapsed = ?start.elapsed(),
            "scored"
        );
        Ok(scores)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == needle)
            .ok_or_else(|| Error::Configuration(format!("unknown measure: {s:?}")))
    }
}

/// Parameters for every tunable scorer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub closeness: ClosenessConfig,
    pub betweenness: BetweennessConfig,
    pub eigenvector: EigenvectorConfig,
    pub katz: KatzConfig,
}

/// How score maps are produced and merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// One measure, ranked directly.
    Single { measure: Measure },
    /// Weighted additive combination, one weight per measure.
    Weighted {
        measures: Vec<Measure>,
        weights: Vec<f64>,
    },
    /// Voting over each measure's top `2 × num_seeds` list.
    Ensemble { measures: Vec<Measure> },
}

impl Strategy {
    /// Measures used by combined strategies when none are named.
    pub const DEFAULT_COMBINED: [Measure; 3] =
        [Measure::Degree, Measure::Closeness, Measure::Betweenness];

    /// Resolve a strategy identifier.
    ///
    /// `id` is a measure name, `weighted`, or `ensemble`. `measures` names
    /// the inputs of a combined strategy (defaults to
    /// [`DEFAULT_COMBINED`](Self::DEFAULT_COMBINED)).
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for an unknown id, for weights passed to a
    /// strategy other than `weighted`, for a measure list passed to a single
    /// measure, or for a weight count that differs from the measure count.
    ///
    /// # Example
    ///
    /// ```
    /// use contagion_core::{Measure, Strategy};
    ///
    /// let s = Strategy::from_id("weighted", None, vec![1.0, 0.5, 0.5]).unwrap();
    /// assert_eq!(s.measures(), &[Measure::Degree, Measure::Closeness, Measure::Betweenness]);
    ///
    /// assert!(Strategy::from_id("degree", None, vec![1.0]).is_err());
    /// assert!(Strategy::from_id("pagerank", None, vec![]).is_err());
    /// ```
    pub fn from_id(id: &str, measures: Option<Vec<Measure>>, weights: Vec<f64>) -> Result<Self> {
        let strategy = match id.trim().to_ascii_lowercase().as_str() {
            "weighted" => Self::Weighted {
                measures: measures.unwrap_or_else(|| Self::DEFAULT_COMBINED.to_vec()),
                weights,
            },
            "ensemble" => {
                if !weights.is_empty() {
                    return Err(Error::Configuration(
                        "weights are only accepted by the weighted strategy".into(),
                    ));
                }
                Self::Ensemble {
                    measures: measures.unwrap_or_else(|| Self::DEFAULT_COMBINED.to_vec()),
                }
            }
            other => {
                let measure: Measure = other.parse()?;
                if !weights.is_empty() {
                    return Err(Error::Configuration(
                        "weights are only accepted by the weighted strategy".into(),
                    ));
                }
                if measures.is_some() {
                    return Err(Error::Configuration(format!(
                        "a measure list needs a combined strategy, not {measure}"
                    )));
                }
                Self::Single { measure }
            }
        };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Identifier this strategy was built from.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Single { measure } => measure.name(),
            Self::Weighted { .. } => "weighted",
            Self::Ensemble { .. } => "ensemble",
        }
    }

    /// Measures this strategy scores, in combination order.
    pub fn measures(&self) -> &[Measure] {
        match self {
            Self::Single { measure } => std::slice::from_ref(measure),
            Self::Weighted { measures, .. } | Self::Ensemble { measures } => measures.as_slice(),
        }
    }

    /// Check arity and weight constraints.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Single { .. } => Ok(()),
            Self::Weighted { measures, weights } => {
                if measures.is_empty() {
                    return Err(Error::Configuration(
                        "weighted strategy needs at least one measure".into(),
                    ));
                }
                if weights.len() != measures.len() {
                    return Err(Error::Configuration(format!(
                        "{} weights supplied for {} measures",
                        weights.len(),
                        measures.len()
                    )));
                }
                if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
                    return Err(Error::Configuration(format!(
                        "weights must be finite and non-negative, got {bad}"
                    )));
                }
                Ok(())
            }
            Self::Ensemble { measures } => {
                if measures.is_empty() {
                    return Err(Error::Configuration(
                        "ensemble strategy needs at least one measure".into(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Score `graph` and merge the maps into one ranking score.
    ///
    /// `num_seeds` sets the ensemble candidate list width.
    pub fn score(
        &self,
        graph: &Graph,
        scoring: &ScoringConfig,
        fallback: Option<Measure>,
        num_seeds: usize,
    ) -> Result<ScoreMap> {
        let mut maps = score_all(graph, self.measures(), scoring, fallback)?;
        match self {
            Self::Single { .. } => maps
                .pop()
                .ok_or_else(|| Error::Configuration("no measure to score".into())),
            Self::Weighted { weights, .. } => weighted_sum(&maps, weights),
            Self::Ensemble { .. } => ensemble(&maps, num_seeds),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { measure } => write!(f, "{measure}"),
            Self::Weighted { measures, weights } => {
                write!(f, "weighted(")?;
                for (i, (m, w)) in measures.iter().zip(weights).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{w}×{m}")?;
                }
                write!(f, ")")
            }
            Self::Ensemble { measures } => {
                let names: Vec<&str> = measures.iter().map(|m| m.name()).collect();
                write!(f, "ensemble({})", names.join(", "))
            }
        }
    }
}

/// Score `measure`, replacing a structural failure with `fallback` if set.
///
/// # Errors
///
/// The measure's error when no fallback is configured or the error is not
/// structural; otherwise whatever the fallback returns.
pub fn score_with_fallback(
    graph: &Graph,
    measure: Measure,
    scoring: &ScoringConfig,
    fallback: Option<Measure>,
) -> Result<ScoreMap> {
    match (measure.score(graph, scoring), fallback) {
        (Err(err), Some(alt)) if err.is_structural() && alt != measure => {
            tracing::warn!(%measure, fallback = %alt, error = %err, "falling back");
            alt.score(graph, scoring)
        }
        (result, _) => result,
    }
}

/// Score every measure in parallel and join.
///
/// Maps come back in `measures` order. Each scorer only reads the shared
/// graph, so the result is identical to a sequential run.
pub fn score_all(
    graph: &Graph,
    measures: &[Measure],
    scoring: &ScoringConfig,
    fallback: Option<Measure>,
) -> Result<Vec<ScoreMap>> {
    measures
        .par_iter()
        .map(|&m| score_with_fallback(graph, m, scoring, fallback))
        .collect()
}

/// Run the full seed-selection pipeline.
///
/// Returns exactly `config.num_seeds` distinct nodes of `graph`, best
/// first.
///
/// # Errors
///
/// - [`Error::Configuration`] if `config` fails validation
/// - [`Error::Convergence`] / [`Error::Disconnected`] from a measure when no
///   fallback recovers it
/// - [`Error::InsufficientCandidates`] if even the full graph cannot supply
///   `num_seeds` scored nodes
pub fn select_seeds(graph: &Graph, config: &RunConfig) -> Result<Vec<NodeId>> {
    config.validate()?;
    let k = config.num_seeds;
    let strategy = &config.strategy;
    tracing::info!(
        strategy = %strategy,
        num_seeds = k,
        nodes = graph.node_count(),
        "selecting seeds"
    );

    let Some(reducer) = config.reducer else {
        let scores = strategy.score(graph, &config.scoring, config.fallback, k)?;
        return top_k(&scores, k);
    };

    let reduction = reducer.reduce(graph);
    let reduced = strategy.score(reduction.graph(), &config.scoring, config.fallback, k)?;
    match top_k(&reduced, k) {
        Err(Error::InsufficientCandidates { available, .. }) => {
            tracing::warn!(
                reducer = reducer.name(),
                available,
                requested = k,
                "reduced pool too small, widening to the full graph"
            );
            let picked = rank_all(&reduced);
            let full = strategy.score(reduction.original(), &config.scoring, config.fallback, k)?;
            top_up(&picked, &full, k)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::Reducer;
    use crate::run::RunMeta;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn meta(num_seeds: usize) -> RunMeta {
        RunMeta {
            num_players: 2,
            num_seeds,
            unique_id: 1,
        }
    }

    fn path4() -> Graph {
        Graph::from_edges([("A", "B"), ("B", "C"), ("C", "D")])
    }

    #[test]
    fn test_measure_parse_roundtrip() {
        for m in Measure::ALL {
            assert_eq!(m.name().parse::<Measure>().unwrap(), m);
        }
        assert_eq!(" Katz ".parse::<Measure>().unwrap(), Measure::Katz);
        assert!(matches!(
            "pagerank".parse::<Measure>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_from_id_variants() {
        assert_eq!(
            Strategy::from_id("closeness", None, vec![]).unwrap(),
            Strategy::Single {
                measure: Measure::Closeness
            }
        );
        let e = Strategy::from_id("ensemble", Some(vec![Measure::Katz]), vec![]).unwrap();
        assert_eq!(e.measures(), &[Measure::Katz]);
        assert_eq!(e.id(), "ensemble");
    }

    #[test]
    fn test_from_id_rejects_misrouted_arguments() {
        assert!(Strategy::from_id("weighted", None, vec![1.0]).is_err());
        assert!(Strategy::from_id("weighted", None, vec![1.0, -1.0, 1.0]).is_err());
        assert!(Strategy::from_id("ensemble", None, vec![1.0]).is_err());
        assert!(Strategy::from_id("degree", Some(vec![Measure::Katz]), vec![]).is_err());
        assert!(Strategy::from_id("7", None, vec![]).is_err());
    }

    #[test]
    fn test_path_degree_picks_b() {
        let config = RunConfig::new(
            meta(1),
            Strategy::Single {
                measure: Measure::Degree,
            },
        );
        assert_eq!(select_seeds(&path4(), &config).unwrap(), vec![id("B")]);
    }

    #[test]
    fn test_fallback_replaces_disconnected_eigenvector() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("X", "Y")]);
        let scoring = ScoringConfig::default();

        let err = score_with_fallback(&g, Measure::Eigenvector, &scoring, None).unwrap_err();
        assert!(matches!(err, Error::Disconnected { .. }));

        let scores =
            score_with_fallback(&g, Measure::Eigenvector, &scoring, Some(Measure::Degree)).unwrap();
        assert_eq!(scores, degree_centrality(&g));
    }

    #[test]
    fn test_score_all_keeps_order() {
        let g = path4();
        let measures = [Measure::Triangles, Measure::Degree, Measure::Closeness];
        let maps = score_all(&g, &measures, &ScoringConfig::default(), None).unwrap();
        assert_eq!(maps.len(), 3);
        assert_eq!(maps[0][&id("A")], 0.0);
        assert_eq!(maps[1], degree_centrality(&g));
    }

    #[test]
    fn test_weighted_pipeline() {
        let config = RunConfig::new(
            meta(2),
            Strategy::from_id("weighted", None, vec![1.0, 1.0, 1.0]).unwrap(),
        );
        let seeds = select_seeds(&path4(), &config).unwrap();
        assert_eq!(seeds, vec![id("B"), id("C")]);
    }

    #[test]
    fn test_reduction_widens_to_full_graph() {
        // Star: the cover keeps only A and Hub
        let g = Graph::from_edges([("A", "Hub"), ("B", "Hub"), ("C", "Hub"), ("D", "Hub")]);
        let config = RunConfig::new(
            meta(3),
            Strategy::Single {
                measure: Measure::Degree,
            },
        )
        .with_reducer(Reducer::VertexCover);

        let seeds = select_seeds(&g, &config).unwrap();
        assert_eq!(seeds, vec![id("A"), id("Hub"), id("B")]);
    }

    #[test]
    fn test_insufficient_without_reducer() {
        let config = RunConfig::new(
            meta(5),
            Strategy::Single {
                measure: Measure::Degree,
            },
        );
        let err = select_seeds(&path4(), &config).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientCandidates {
                requested: 5,
                available: 4
            }
        ));
    }
}
