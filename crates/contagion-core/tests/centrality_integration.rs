//! Integration tests for the seed-selection pipeline.
//!
//! Scorers, reducers, and the selector run together on small graphs whose
//! answers can be worked out by hand.

use contagion_core::algo::centrality::{
    betweenness_centrality, closeness_centrality, clustering_coefficient, degree_centrality,
    eigenvector_centrality, katz_centrality, triangle_count, BetweennessConfig, ClosenessConfig,
    EigenvectorConfig, KatzConfig,
};
use contagion_core::{
    emit, load_graph, select_seeds, top_k, top_up, Error, Graph, Measure, NodeId, Reducer,
    RunConfig, RunMeta, ScoreMap, ScoringConfig, Strategy,
};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

fn ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|s| NodeId::from(*s)).collect()
}

/// Two K4s (1-4 and 6-9) joined through 4 - 5 - 6.
fn barbell() -> Graph {
    let mut edges = Vec::new();
    for side in [[1_u64, 2, 3, 4], [6, 7, 8, 9]] {
        for (i, &a) in side.iter().enumerate() {
            for &b in &side[i + 1..] {
                edges.push((a, b));
            }
        }
    }
    edges.push((4, 5));
    edges.push((5, 6));
    Graph::from_edges(edges)
}

fn two_triangles() -> Graph {
    Graph::from_edges([
        ("A", "B"),
        ("B", "C"),
        ("C", "A"),
        ("D", "E"),
        ("E", "F"),
        ("F", "D"),
        ("C", "D"),
    ])
}

fn all_scores(g: &Graph) -> Vec<(&'static str, ScoreMap)> {
    vec![
        ("degree", degree_centrality(g)),
        ("closeness", closeness_centrality(g, ClosenessConfig::default())),
        ("betweenness", betweenness_centrality(g, BetweennessConfig::default())),
        (
            "eigenvector",
            eigenvector_centrality(g, EigenvectorConfig::default()).unwrap(),
        ),
        ("katz", katz_centrality(g, KatzConfig::default()).unwrap()),
        ("clustering", clustering_coefficient(g)),
        ("triangles", triangle_count(g)),
    ]
}

fn test_dir() -> PathBuf {
    let dir = PathBuf::from("target/tmp/tests");
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn every_scorer_covers_every_node() {
    let g = barbell();
    for (name, scores) in all_scores(&g) {
        assert_eq!(scores.len(), g.node_count(), "{name}");
        for node in g.nodes() {
            let s = scores[node];
            assert!(s.is_finite() && s >= 0.0, "{name}[{node}] = {s}");
        }
    }
}

#[test]
fn barbell_bridge_ranks_first_on_path_measures() {
    let g = barbell();
    let between = betweenness_centrality(&g, BetweennessConfig::default());
    let close = closeness_centrality(&g, ClosenessConfig::default());

    assert_eq!(top_k(&between, 1).unwrap(), ids(&["5"]));
    assert_eq!(top_k(&close, 1).unwrap(), ids(&["5"]));

    // 16 cross pairs through 5 out of C(8, 2) = 28 pairs
    assert!((between[&id("5")] - 16.0 / 28.0).abs() < 1e-12);
    // 8 reachable, distance sum 2×1 + 6×2
    assert!((close[&id("5")] - 8.0 / 14.0).abs() < 1e-12);
}

#[test]
fn barbell_degree_tie_goes_to_smaller_id() {
    let g = barbell();
    let degree = degree_centrality(&g);
    assert_eq!(degree[&id("4")], degree[&id("6")]);
    assert_eq!(top_k(&degree, 1).unwrap(), ids(&["4"]));
}

#[test]
fn barbell_local_structure() {
    let g = barbell();
    let triangles = triangle_count(&g);
    let clustering = clustering_coefficient(&g);

    assert_eq!(triangles[&id("1")], 3.0);
    assert_eq!(triangles[&id("4")], 3.0);
    assert_eq!(triangles[&id("5")], 0.0);
    assert_eq!(clustering[&id("1")], 1.0);
    assert!((clustering[&id("4")] - 0.5).abs() < 1e-12);
    assert_eq!(clustering[&id("5")], 0.0);
}

#[test]
fn spectral_scores_respect_symmetry() {
    let g = barbell();
    let eig = eigenvector_centrality(&g, EigenvectorConfig::default()).unwrap();
    let katz = katz_centrality(&g, KatzConfig::default()).unwrap();

    for scores in [&eig, &katz] {
        assert!((scores[&id("1")] - scores[&id("9")]).abs() < 1e-4);
        assert!((scores[&id("4")] - scores[&id("6")]).abs() < 1e-4);
        assert!(scores[&id("4")] > scores[&id("1")]);
    }
}

#[test]
fn eigenvector_disconnected_is_explicit_but_katz_is_not() {
    let g = Graph::from_edges([("A", "B"), ("B", "C"), ("X", "Y")]);
    let err = eigenvector_centrality(&g, EigenvectorConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Disconnected { components: 2, .. }), "{err}");
    assert!(err.is_recoverable());

    let katz = katz_centrality(&g, KatzConfig::default()).unwrap();
    assert_eq!(katz.len(), 5);
}

#[test]
fn path_degree_top_one_is_b() {
    let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "D")]);
    assert_eq!(top_k(&degree_centrality(&g), 1).unwrap(), ids(&["B"]));
}

#[test]
fn complete_triangle_counts_one_each() {
    let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A")]);
    let triangles = triangle_count(&g);
    for node in ["A", "B", "C"] {
        assert_eq!(triangles[&id(node)], 1.0);
    }
    let picked: HashSet<NodeId> = top_k(&triangles, 3).unwrap().into_iter().collect();
    assert_eq!(picked, ids(&["A", "B", "C"]).into_iter().collect());
}

#[test]
fn reduced_pool_needs_explicit_widening() {
    let g = two_triangles();
    let reduction = Reducer::community().reduce(&g);
    assert_eq!(reduction.graph().node_count(), 3);

    let reduced = degree_centrality(reduction.graph());
    let err = top_k(&reduced, 5).unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientCandidates {
            requested: 5,
            available: 3
        }
    ));

    let picked = top_k(&reduced, 3).unwrap();
    let full = degree_centrality(reduction.original());
    let widened = top_up(&picked, &full, 5).unwrap();
    assert_eq!(widened.len(), 5);
    assert_eq!(&widened[..3], picked.as_slice());
    // D has degree 3, the best node outside the reduced pool
    assert_eq!(widened[3], id("D"));
}

#[test]
fn pipeline_widens_automatically_with_reducer() {
    let meta = RunMeta {
        num_players: 2,
        num_seeds: 5,
        unique_id: 1,
    };
    let config = RunConfig::new(
        meta,
        Strategy::Single {
            measure: Measure::Degree,
        },
    )
    .with_reducer(Reducer::community());

    let seeds = select_seeds(&two_triangles(), &config).unwrap();
    assert_eq!(seeds.len(), 5);
    let distinct: HashSet<&NodeId> = seeds.iter().collect();
    assert_eq!(distinct.len(), 5);
}

#[test]
fn ensemble_pipeline_on_barbell() {
    let meta = RunMeta {
        num_players: 2,
        num_seeds: 1,
        unique_id: 1,
    };
    let config = RunConfig::new(meta, Strategy::from_id("ensemble", None, vec![]).unwrap());
    let seeds = select_seeds(&barbell(), &config).unwrap();

    // Top-2 lists: degree {4, 6}, closeness {5, 4}, betweenness {5, 4}
    assert_eq!(seeds, ids(&["4"]));

    let lists = contagion_core::combine::candidate_lists(
        &[
            degree_centrality(&barbell()),
            closeness_centrality(&barbell(), ClosenessConfig::default()),
            betweenness_centrality(&barbell(), BetweennessConfig::default()),
        ],
        1,
    )
    .unwrap();
    let votes = contagion_core::ensemble_votes(&lists);
    assert_eq!(votes[&id("4")], 3.0);
    assert_eq!(votes[&id("5")], 2.0);
    assert_eq!(votes[&id("6")], 1.0);
    assert_eq!(votes.len(), 3);
}

#[test]
fn fallback_rescues_eigenvector_on_disconnected_input() {
    let g = Graph::from_edges([("A", "B"), ("B", "C"), ("X", "Y")]);
    let meta = RunMeta {
        num_players: 2,
        num_seeds: 1,
        unique_id: 1,
    };
    let strategy = Strategy::Single {
        measure: Measure::Eigenvector,
    };

    let err = select_seeds(&g, &RunConfig::new(meta, strategy.clone())).unwrap_err();
    assert!(matches!(err, Error::Disconnected { .. }));

    let config = RunConfig::new(meta, strategy).with_fallback(Measure::Degree);
    assert_eq!(select_seeds(&g, &config).unwrap(), ids(&["B"]));
}

#[test]
fn weighted_doubling_keeps_ranking() {
    let g = barbell();
    let scoring = ScoringConfig::default();
    let single = Strategy::from_id("weighted", None, vec![1.0, 2.0, 0.5]).unwrap();
    let doubled = Strategy::from_id("weighted", None, vec![2.0, 4.0, 1.0]).unwrap();

    let a = single.score(&g, &scoring, None, 3).unwrap();
    let b = doubled.score(&g, &scoring, None, 3).unwrap();
    for (node, &s) in &a {
        assert_eq!(b[node], 2.0 * s);
    }
    assert_eq!(top_k(&a, 4).unwrap(), top_k(&b, 4).unwrap());
}

#[test]
fn load_select_and_emit_round_trip() {
    let dir = test_dir();
    let input = dir.join("2.2.77.json");
    fs::write(
        &input,
        r#"{"1": ["2", "3", "4"], "2": ["1", "3"], "3": ["1", "2"], "4": ["1", "5"], "5": ["4"], "6": []}"#,
    )
    .unwrap();

    let meta = RunMeta::from_path(&input).unwrap();
    assert_eq!((meta.num_players, meta.num_seeds, meta.unique_id), (2, 2, 77));

    let g = load_graph(&input).unwrap();
    assert_eq!(g.node_count(), 5);
    assert!(!g.contains(&id("6")));

    let config = RunConfig::new(
        meta,
        Strategy::Single {
            measure: Measure::Betweenness,
        },
    );
    let seeds = select_seeds(&g, &config).unwrap();
    assert_eq!(seeds, ids(&["1", "4"]));

    let output = emit::submission_path(&input);
    emit::write_submission(&output, &seeds, config.rounds).unwrap();
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 2 * emit::DEFAULT_ROUNDS);
    assert!(text.starts_with("1\n4\n1\n4\n"));

    fs::remove_file(input).unwrap();
    fs::remove_file(output).unwrap();
}
