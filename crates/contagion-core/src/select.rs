//! Top-k selection over score maps.
//!
//! Every strategy ends here. Ranking is a total order: higher score first,
//! equal scores broken by the smaller [`NodeId`]. Scores compare with
//! `f64::total_cmp`, so even a NaN cannot make the order inconsistent.
//!
//! Selection keeps a bounded min-heap of the best k seen so far, which is
//! O(n log k) instead of sorting the whole map.

use crate::{Error, NodeId, Result, ScoreMap};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// A scored node. Greater means ranked higher.
#[derive(Debug)]
struct Candidate<'a> {
    score: f64,
    id: &'a NodeId,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.id.cmp(self.id))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

/// The best `k` entries of `scored`, best first. Returns fewer when the
/// iterator runs out.
fn best_of<'a>(scored: impl Iterator<Item = (&'a NodeId, f64)>, k: usize) -> Vec<NodeId> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Candidate<'a>>> = BinaryHeap::with_capacity(k + 1);
    for (id, score) in scored {
        let candidate = Candidate { score, id };
        if heap.len() < k {
            heap.push(Reverse(candidate));
        } else if heap.peek().is_some_and(|Reverse(worst)| candidate > *worst) {
            heap.pop();
            heap.push(Reverse(candidate));
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(c)| c.id.clone())
        .collect()
}

/// Select the `k` highest-scoring nodes, best first.
///
/// # Errors
///
/// [`Error::InsufficientCandidates`] if `scores` has fewer than `k`
/// entries. The caller decides whether to widen the pool.
///
/// # Example
///
/// ```
/// use contagion_core::{top_k, NodeId, ScoreMap};
///
/// let scores: ScoreMap = [("A", 0.5), ("B", 0.9), ("C", 0.9)]
///     .into_iter()
///     .map(|(id, s)| (NodeId::from(id), s))
///     .collect();
///
/// let seeds = top_k(&scores, 2).unwrap();
/// assert_eq!(seeds, vec![NodeId::from("B"), NodeId::from("C")]);
/// ```
pub fn top_k(scores: &ScoreMap, k: usize) -> Result<Vec<NodeId>> {
    if scores.len() < k {
        return Err(Error::InsufficientCandidates {
            requested: k,
            available: scores.len(),
        });
    }
    Ok(best_of(scores.iter().map(|(id, &s)| (id, s)), k))
}

/// Every entry of `scores`, best first.
pub fn rank_all(scores: &ScoreMap) -> Vec<NodeId> {
    best_of(scores.iter().map(|(id, &s)| (id, s)), scores.len())
}

/// Extend `picked` to `k` nodes using a wider ranking.
///
/// `picked` keeps its order and comes first (duplicates dropped, truncated
/// to `k`); the remainder is the best of `wider` not already picked.
///
/// # Errors
///
/// [`Error::InsufficientCandidates`] if both pools together hold fewer than
/// `k` distinct nodes.
pub fn top_up(picked: &[NodeId], wider: &ScoreMap, k: usize) -> Result<Vec<NodeId>> {
    let mut seen: HashSet<&NodeId> = HashSet::with_capacity(k);
    let mut seeds: Vec<NodeId> = Vec::with_capacity(k);
    for id in picked {
        if seeds.len() == k {
            break;
        }
        if seen.insert(id) {
            seeds.push(id.clone());
        }
    }

    let missing = k - seeds.len();
    let rest = best_of(
        wider
            .iter()
            .filter(|(id, _)| !seen.contains(id))
            .map(|(id, &s)| (id, s)),
        missing,
    );

    if rest.len() < missing {
        return Err(Error::InsufficientCandidates {
            requested: k,
            available: seeds.len() + rest.len(),
        });
    }

    seeds.extend(rest);
    Ok(seeds)
}
