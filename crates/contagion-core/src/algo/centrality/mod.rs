//! Centrality algorithms for measuring node importance.
//!
//! # Overview
//!
//! Every scorer maps a [`Graph`] to a [`ScoreMap`] covering all of its
//! nodes. Scorers are pure: they read the graph, allocate their own
//! buffers, and return identical maps for identical graphs, so any number
//! of them can run concurrently against one shared graph.
//!
//! | Algorithm | Question Answered | Failure mode |
//! |-----------|-------------------|--------------|
//! | Degree | How many connections? | none |
//! | Closeness | How close to all others? | none |
//! | Betweenness | How often on shortest paths? | none |
//! | Eigenvector | Connected to important nodes? | disconnected / no convergence |
//! | Katz | Reachable via damped paths? | no convergence |
//! | Clustering | How tightly knit is my neighbourhood? | none |
//! | Triangles | How many triangles am I in? | none |
//!
//! # Choosing the Right Measure
//!
//! ```text
//! Want seeds that...                 Use...
//! ─────────────────────────────────────────────
//! Touch many nodes at once           Degree
//! Spread fast to the whole graph     Closeness
//! Sit between groups                 Betweenness
//! Sit among other strong nodes       Eigenvector / Katz
//! Hold a dense local cluster         Clustering / Triangles
//! ```
//!
//! # References
//!
//! - Freeman (1977). "A set of measures of centrality based on betweenness"
//! - Bonacich (1987). "Power and centrality"
//! - Brandes (2001). "A faster algorithm for betweenness centrality"
//! - Watts & Strogatz (1998). "Collective dynamics of small-world networks"

mod betweenness;
mod closeness;
mod clustering;
mod degree;
mod eigenvector;
mod katz;
mod triangles;

pub use betweenness::{betweenness_centrality, BetweennessConfig};
pub use closeness::{closeness_centrality, ClosenessConfig};
pub use clustering::clustering_coefficient;
pub use degree::degree_centrality;
pub use eigenvector::{eigenvector_centrality, EigenvectorConfig};
pub use katz::{katz_centrality, KatzConfig};
pub use triangles::triangle_count;

use crate::{Graph, ScoreMap};

/// Zip per-index values back onto node IDs.
fn to_score_map(graph: &Graph, values: Vec<f64>) -> ScoreMap {
    let g = graph.as_petgraph();
    g.node_indices()
        .zip(values)
        .map(|(idx, v)| (g[idx].clone(), v))
        .collect()
}
