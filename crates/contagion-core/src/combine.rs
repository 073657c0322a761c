//! Combining several score maps into one ranking.
//!
//! | Strategy | Combined score | Keeps |
//! |----------|----------------|-------|
//! | [`weighted_sum`] | Σ wᵢ × scoreᵢ(v) | nodes present in every map |
//! | [`ensemble_votes`] | lists containing v | nodes in at least one list |
//!
//! Weighted sums apply no normalization. Mixing a [0, 1] measure with raw
//! triangle counts lets the counts dominate unless the weights compensate.

use crate::select::top_k;
use crate::{Error, NodeId, Result, ScoreMap};
use std::collections::HashSet;

/// Weighted additive combination.
///
/// `combined[v] = Σ weights[i] × maps[i][v]` for every `v` present in all
/// maps. Terms are summed in map order, so the result is deterministic.
///
/// # Errors
///
/// [`Error::Configuration`] if there are no maps, if the weight count
/// differs from the map count, or if a weight is negative or not finite.
///
/// # Example
///
/// ```
/// use contagion_core::{weighted_sum, NodeId, ScoreMap};
///
/// let degree: ScoreMap = [(NodeId::from("a"), 1.0), (NodeId::from("b"), 0.5)].into();
/// let triangles: ScoreMap = [(NodeId::from("a"), 0.0)].into();
///
/// let combined = weighted_sum(&[degree, triangles], &[2.0, 1.0]).unwrap();
/// assert_eq!(combined.len(), 1); // "b" is missing from the second map
/// assert_eq!(combined[&NodeId::from("a")], 2.0);
/// ```
pub fn weighted_sum(maps: &[ScoreMap], weights: &[f64]) -> Result<ScoreMap> {
    if maps.is_empty() {
        return Err(Error::Configuration(
            "weighted combination needs at least one score map".into(),
        ));
    }
    if maps.len() != weights.len() {
        return Err(Error::Configuration(format!(
            "{} weights supplied for {} measures",
            weights.len(),
            maps.len()
        )));
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::Configuration(format!(
            "weights must be finite and non-negative, got {bad}"
        )));
    }

    let (first, rest) = maps.split_first().ok_or_else(|| {
        Error::Configuration("weighted combination needs at least one score map".into())
    })?;

    let combined = first
        .iter()
        .filter(|(id, _)| rest.iter().all(|m| m.contains_key(*id)))
        .map(|(id, &s0)| {
            let total = rest
                .iter()
                .zip(&weights[1..])
                .fold(weights[0] * s0, |acc, (m, w)| acc + w * m[id]);
            (id.clone(), total)
        })
        .collect();

    Ok(combined)
}

/// Frequency voting across candidate lists.
///
/// Each list gives one vote to every distinct node it contains. Nodes in no
/// list get no entry.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ensemble_votes(lists: &[Vec<NodeId>]) -> ScoreMap {
    let mut votes = ScoreMap::new();
    for list in lists {
        let distinct: HashSet<&NodeId> = list.iter().collect();
        for id in distinct {
            *votes.entry(id.clone()).or_insert(0.0) += 1.0;
        }
    }
    votes
}

/// Candidate list for each map: its top `2 × num_seeds` nodes, or all of
/// them when the map is smaller.
pub fn candidate_lists(maps: &[ScoreMap], num_seeds: usize) -> Result<Vec<Vec<NodeId>>> {
    let width = num_seeds.saturating_mul(2);
    maps.iter()
        .map(|m| top_k(m, width.min(m.len())))
        .collect()
}

/// Ensemble voting over score maps: build each map's candidate list, then
/// count votes.
///
/// # Errors
///
/// [`Error::Configuration`] if there are no maps.
pub fn ensemble(maps: &[ScoreMap], num_seeds: usize) -> Result<ScoreMap> {
    if maps.is_empty() {
        return Err(Error::Configuration(
            "ensemble voting needs at least one score map".into(),
        ));
    }
    let lists = candidate_lists(maps, num_seeds)?;
    Ok(ensemble_votes(&lists))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, f64)]) -> ScoreMap {
        entries
            .iter()
            .map(|&(id, s)| (NodeId::from(id), s))
            .collect()
    }

    fn ids(names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn test_weighted_sum_values() {
        let a = scores(&[("x", 1.0), ("y", 2.0)]);
        let b = scores(&[("x", 10.0), ("y", 20.0)]);
        let combined = weighted_sum(&[a, b], &[0.5, 0.1]).unwrap();
        assert!((combined[&NodeId::from("x")] - 1.5).abs() < 1e-12);
        assert!((combined[&NodeId::from("y")] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_sum_requires_all_maps() {
        let a = scores(&[("x", 1.0), ("y", 2.0)]);
        let b = scores(&[("y", 1.0), ("z", 5.0)]);
        let combined = weighted_sum(&[a, b], &[1.0, 1.0]).unwrap();
        assert_eq!(combined.len(), 1);
        assert!(combined.contains_key(&NodeId::from("y")));
    }

    #[test]
    fn test_weighted_sum_arity_mismatch() {
        let a = scores(&[("x", 1.0)]);
        let err = weighted_sum(&[a.clone(), a], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "{err}");
    }

    #[test]
    fn test_weighted_sum_rejects_negative_weight() {
        let a = scores(&[("x", 1.0)]);
        assert!(weighted_sum(&[a], &[-1.0]).is_err());
    }

    #[test]
    fn test_weighted_sum_empty() {
        assert!(weighted_sum(&[], &[]).is_err());
    }

    #[test]
    fn test_votes_count_lists() {
        let lists = vec![ids(&["a", "b"]), ids(&["b", "c"]), ids(&["b", "a"])];
        let votes = ensemble_votes(&lists);
        assert_eq!(votes[&NodeId::from("a")], 2.0);
        assert_eq!(votes[&NodeId::from("b")], 3.0);
        assert_eq!(votes[&NodeId::from("c")], 1.0);
        assert!(!votes.contains_key(&NodeId::from("d")));
    }

    #[test]
    fn test_votes_ignore_duplicates_within_list() {
        let votes = ensemble_votes(&[ids(&["a", "a", "a"])]);
        assert_eq!(votes[&NodeId::from("a")], 1.0);
    }

    #[test]
    fn test_ensemble_vote_total() {
        // Two maps, num_seeds = 1 -> each list holds 2 nodes
        let m1 = scores(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);
        let m2 = scores(&[("c", 3.0), ("b", 2.0), ("a", 1.0)]);
        let votes = ensemble(&[m1, m2], 1).unwrap();

        let total: f64 = votes.values().sum();
        assert_eq!(total, 4.0);
        assert_eq!(votes[&NodeId::from("b")], 2.0);
        assert_eq!(votes[&NodeId::from("a")], 1.0);
        assert_eq!(votes[&NodeId::from("c")], 1.0);
    }

    #[test]
    fn test_candidate_lists_short_map() {
        let m = scores(&[("a", 1.0)]);
        let lists = candidate_lists(&[m], 5).unwrap();
        assert_eq!(lists, vec![ids(&["a"])]);
    }
}
