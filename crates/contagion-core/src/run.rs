//! Run identity and configuration.
//!
//! Game graphs arrive as `num_players.num_seeds.unique_id.json`. The file
//! name is the only place the run parameters live, so [`RunMeta`] decodes
//! them and [`RunConfig`] carries them, together with the chosen strategy,
//! through every call. Nothing is read from process-wide state.

use crate::emit::DEFAULT_ROUNDS;
use crate::reduce::Reducer;
use crate::strategy::{Measure, ScoringConfig, Strategy};
use crate::{Error, Graph, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Run parameters encoded in a graph file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMeta {
    pub num_players: usize,
    pub num_seeds: usize,
    pub unique_id: u64,
}

impl RunMeta {
    /// Decode `players.seeds.id.<ext>` from a bare file name.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRunName`] when the name has fewer than three dotted
    /// integer fields followed by an extension.
    ///
    /// # Example
    ///
    /// ```
    /// use contagion_core::RunMeta;
    ///
    /// let meta = RunMeta::from_file_name("2.10.31.json").unwrap();
    /// assert_eq!((meta.num_players, meta.num_seeds, meta.unique_id), (2, 10, 31));
    ///
    /// assert!(RunMeta::from_file_name("graph.json").is_err());
    /// ```
    pub fn from_file_name(name: &str) -> Result<Self> {
        let invalid = || Error::InvalidRunName(name.to_string());

        let mut parts = name.splitn(4, '.');
        let mut field = || parts.next().ok_or_else(invalid);
        let num_players = field()?.parse::<usize>().map_err(|_| invalid())?;
        let num_seeds = field()?.parse::<usize>().map_err(|_| invalid())?;
        let unique_id = field()?.parse::<u64>().map_err(|_| invalid())?;
        // Extension must be present
        field()?;

        Ok(Self {
            num_players,
            num_seeds,
            unique_id,
        })
    }

    /// Decode the file-name component of `path`; directories are ignored.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidRunName(path.display().to_string()))?;
        Self::from_file_name(name)
    }
}

/// Everything one seed-selection run needs.
///
/// Built once, validated, then passed by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub num_players: usize,
    pub num_seeds: usize,
    pub unique_id: u64,
    pub strategy: Strategy,
    /// Optional graph reduction before scoring.
    pub reducer: Option<Reducer>,
    /// Measure substituted for one that fails structurally.
    pub fallback: Option<Measure>,
    pub scoring: ScoringConfig,
    /// Identical seed blocks per submission file.
    pub rounds: usize,
}

impl RunConfig {
    /// Config for `meta` with no reduction, no fallback, and default scoring.
    pub fn new(meta: RunMeta, strategy: Strategy) -> Self {
        Self {
            num_players: meta.num_players,
            num_seeds: meta.num_seeds,
            unique_id: meta.unique_id,
            strategy,
            reducer: None,
            fallback: None,
            scoring: ScoringConfig::default(),
            rounds: DEFAULT_ROUNDS,
        }
    }

    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = Some(reducer);
        self
    }

    pub fn with_fallback(mut self, fallback: Measure) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Run identity.
    pub fn meta(&self) -> RunMeta {
        RunMeta {
            num_players: self.num_players,
            num_seeds: self.num_seeds,
            unique_id: self.unique_id,
        }
    }

    /// Check the configuration before any scoring work starts.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for zero seeds, zero rounds, a non-positive
    /// Katz alpha, or an invalid strategy.
    pub fn validate(&self) -> Result<()> {
        if self.num_seeds == 0 {
            return Err(Error::Configuration("num_seeds must be positive".into()));
        }
        if self.rounds == 0 {
            return Err(Error::Configuration("rounds must be positive".into()));
        }
        let alpha = self.scoring.katz.alpha;
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(Error::Configuration(format!(
                "katz alpha must be positive, got {alpha}"
            )));
        }
        if let Some(Reducer::Community { resolution, .. }) = self.reducer {
            if !(resolution.is_finite() && resolution > 0.0) {
                return Err(Error::Configuration(format!(
                    "community resolution must be positive, got {resolution}"
                )));
            }
        }
        self.strategy.validate()
    }
}

/// Load a JSON adjacency graph and strip isolated nodes.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, [`Error::Json`] if it is not a
/// JSON object of neighbour lists.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let start = Instant::now();
    let raw = Graph::from_json_adjacency_file(path)?;
    let graph = raw.without_isolated();
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        isolated = raw.node_count() - graph.node_count(),
        elapsed = ?start.elapsed(),
        "graph loaded"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single() -> Strategy {
        Strategy::Single {
            measure: Measure::Degree,
        }
    }

    #[test]
    fn test_meta_from_path_uses_file_name() {
        let meta = RunMeta::from_path("/tmp/graphs.v2/8.35.4.json").unwrap();
        assert_eq!(
            meta,
            RunMeta {
                num_players: 8,
                num_seeds: 35,
                unique_id: 4
            }
        );
    }

    #[test]
    fn test_meta_rejects_bad_names() {
        for name in ["2.10.json", "a.10.1.json", "2.10.1", "2.-1.1.json", ""] {
            assert!(
                matches!(RunMeta::from_file_name(name), Err(Error::InvalidRunName(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_meta_multi_dot_extension() {
        let meta = RunMeta::from_file_name("2.5.9.graph.json").unwrap();
        assert_eq!(meta.unique_id, 9);
    }

    #[test]
    fn test_config_builder_and_meta() {
        let meta = RunMeta::from_file_name("2.10.1.json").unwrap();
        let config = RunConfig::new(meta, single())
            .with_reducer(Reducer::VertexCover)
            .with_fallback(Measure::Degree)
            .with_rounds(3);
        assert_eq!(config.meta(), meta);
        assert_eq!(config.rounds, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let meta = RunMeta {
            num_players: 2,
            num_seeds: 0,
            unique_id: 1,
        };
        assert!(RunConfig::new(meta, single()).validate().is_err());

        let meta = RunMeta { num_seeds: 3, ..meta };
        assert!(RunConfig::new(meta, single())
            .with_rounds(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let meta = RunMeta::from_file_name("2.10.1.json").unwrap();
        let config = RunConfig::new(meta, single()).with_reducer(Reducer::community());
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.strategy, config.strategy);
        assert_eq!(back.reducer, config.reducer);
    }

    #[test]
    fn test_load_graph_strips_isolated() {
        let dir = std::env::temp_dir().join("contagion-run-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("2.1.7.json");
        std::fs::write(&file, r#"{"1": ["2", "3"], "2": ["1"], "3": [], "4": []}"#).unwrap();

        let g = load_graph(&file).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(!g.contains(&"4".into()));

        std::fs::remove_file(file).unwrap();
    }
}
