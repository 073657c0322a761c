//! Graph algorithms behind seed selection.
//!
//! - **Centrality**: per-node importance scores ([`centrality`])
//! - **Components**: connectivity checks ([`components`])
//! - **Community**: Louvain modularity partitions ([`community`])
//! - **Cover**: approximate minimum weighted vertex cover ([`cover`])
//!
//! | Algorithm | Question | Complexity |
//! |-----------|----------|------------|
//! | Degree | How many connections? | O(V) |
//! | Closeness | How close to everyone? | O(V(V+E)) |
//! | Betweenness | Bridge between communities? | O(VE) |
//! | Eigenvector | Connected to important nodes? | O(E × iter) |
//! | Katz | Reachable via damped paths? | O(E × iter) |
//! | Clustering | Are my neighbours connected? | O(Σ d²) |
//! | Triangles | How many closed triads? | O(Σ d²) |

/// Centrality algorithms for measuring node importance.
pub mod centrality;

/// Connected components algorithm.
pub mod components;

/// Louvain community detection.
pub mod community;

/// Vertex cover approximation.
pub mod cover;
