//! Error types for contagion-core.

use thiserror::Error;

/// Error type for seed selection.
#[derive(Error, Debug)]
pub enum Error {
    /// An iterative centrality measure did not converge within its cap.
    #[error("{measure} centrality did not converge within {iterations} iterations")]
    Convergence {
        /// Measure that failed.
        measure: &'static str,
        /// Iterations performed before giving up.
        iterations: usize,
    },

    /// The measure is undefined on a graph with more than one component.
    #[error("{measure} centrality requires a connected graph, found {components} components")]
    Disconnected {
        /// Measure that failed.
        measure: &'static str,
        /// Number of connected components in the input.
        components: usize,
    },

    /// Fewer scored nodes than requested seeds.
    #[error("requested {requested} seeds but only {available} candidates are scored")]
    InsufficientCandidates {
        /// Seeds asked for.
        requested: usize,
        /// Candidates actually available.
        available: usize,
    },

    /// Invalid run configuration (weight arity, unknown strategy, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The graph file name does not carry `players.seeds.id` metadata.
    #[error("invalid run name: {0}")]
    InvalidRunName(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether a caller can recover by choosing another measure or widening
    /// the candidate pool.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Convergence { .. } | Self::Disconnected { .. } | Self::InsufficientCandidates { .. }
        )
    }

    /// Whether switching to a different measure can recover from this error.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Convergence { .. } | Self::Disconnected { .. })
    }
}

/// Result type for seed selection.
pub type Result<T> = std::result::Result<T, Error>;
