// Allow minor clippy style warnings at crate level
// These are mostly style preferences, not bugs
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]

//! Seed selection for competitive graph diffusion.
//!
//! Several players each pick `num_seeds` nodes of a shared undirected
//! graph; a diffusion process then decides which player's influence takes
//! each node. This crate picks the seeds:
//!
//! ```text
//! Graph ─▶ Reducer (optional) ─▶ Scorers ─▶ Combiner ─▶ top_k ─▶ emit
//! ```
//!
//! - [`Graph`] - read-only undirected graph with totally ordered [`NodeId`]s
//! - [`algo::centrality`] - degree, closeness, betweenness, eigenvector,
//!   Katz, clustering, triangles
//! - [`Reducer`] - shrink to the largest community or a vertex cover
//! - [`combine`] - weighted additive sum, ensemble voting
//! - [`select`] - deterministic top-k with identifier tie-break
//! - [`Strategy`] / [`select_seeds`] - the whole pipeline for a [`RunConfig`]
//! - [`emit`] - submission file output
//!
//! # Which measure?
//!
//! | Situation | Reasonable choice |
//! |-----------|-------------------|
//! | Small `num_seeds`, huge graph | `degree` (cheap, grabs hubs) |
//! | Few opponents, fast spread wins | `closeness` |
//! | Clustered graph with bridges | `betweenness`, or reduce to a community first |
//! | No single measure trusted | `ensemble` |
//!
//! Closeness and betweenness are O(V·E). On large graphs reduce first.
//!
//! # Example
//!
//! ```
//! use contagion_core::{select_seeds, Graph, Measure, RunConfig, RunMeta, Strategy};
//!
//! let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "D")]);
//! let meta = RunMeta { num_players: 2, num_seeds: 1, unique_id: 0 };
//! let config = RunConfig::new(meta, Strategy::Single { measure: Measure::Degree });
//!
//! let seeds = select_seeds(&g, &config).unwrap();
//! assert_eq!(seeds[0].as_str(), "B");
//! ```

pub mod algo;
pub mod combine;
pub mod emit;
mod error;
mod graph;
mod node;
pub mod reduce;
pub mod run;
pub mod select;
pub mod strategy;

pub use combine::{ensemble, ensemble_votes, weighted_sum};
pub use error::{Error, Result};
pub use graph::{Graph, GraphStats};
pub use node::NodeId;
pub use reduce::{Reducer, Reduction};
pub use run::{load_graph, RunConfig, RunMeta};
pub use select::{rank_all, top_k, top_up};
pub use strategy::{select_seeds, Measure, ScoringConfig, Strategy};

/// Per-node scores produced by scorers and combiners.
pub type ScoreMap = std::collections::HashMap<NodeId, f64>;

pub use petgraph;
