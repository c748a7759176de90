//! Greedy-first matching with a dynamic fallback

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{dynamic_match, greedy_match};
use crate::matching::Matching;
use crate::sequence::Timestamp;

/// Which algorithm produced a hybrid result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HybridOutcome {
    /// Greedy matched every value injectively and was kept
    Greedy,
    /// Greedy left values unmatched or shared a partner; recomputed optimally
    Dynamic,
}

/// Match with the greedy algorithm, falling back to [`dynamic_match`] when
/// greedy leaves a `seq1` value unmatched or reuses a `seq2` value.
///
/// A complete, injective greedy result is accepted as is. That acceptance is
/// a heuristic, not a proof of optimality.
pub fn hybrid_match(seq1: &[Timestamp], seq2: &[Timestamp], delta: Timestamp) -> Matching {
    hybrid_match_with_outcome(seq1, seq2, delta).0
}

/// Like [`hybrid_match`], also reporting which algorithm produced the result.
pub fn hybrid_match_with_outcome(
    seq1: &[Timestamp],
    seq2: &[Timestamp],
    delta: Timestamp,
) -> (Matching, HybridOutcome) {
    let greedy = greedy_match(seq1, seq2, delta);

    let distinct_partners: AHashSet<Timestamp> = greedy.values().collect();
    let reused = distinct_partners.len() < greedy.len();
    let incomplete = greedy.len() < seq1.len();

    if reused || incomplete {
        debug!(
            seq1_len = seq1.len(),
            seq2_len = seq2.len(),
            greedy_matched = greedy.len(),
            reused,
            "greedy matching deficient, falling back to dynamic"
        );
        (dynamic_match(seq1, seq2, delta), HybridOutcome::Dynamic)
    } else {
        (greedy, HybridOutcome::Greedy)
    }
}
