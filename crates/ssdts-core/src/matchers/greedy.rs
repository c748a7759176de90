//! Greedy nearest-neighbour matching
//!
//! Each first-series timestamp is paired, left to right, with its closest
//! second-series neighbour inside the tolerance. Decisions are local, so
//! neither variant is guaranteed to find a minimal-error matching.

use std::collections::BTreeSet;

use crate::matching::Matching;
use crate::sequence::Timestamp;

/// Greedily match `seq1` against `seq2`. Partners are never consumed, so two
/// first-series values may end up sharing a partner.
///
/// Runs in O(M log N).
pub fn greedy_match(seq1: &[Timestamp], seq2: &[Timestamp], delta: Timestamp) -> Matching {
    let mut matching = Matching::new();
    if seq1.is_empty() || seq2.is_empty() {
        return matching;
    }

    for &t in seq1 {
        let insert_ix = match seq2.binary_search(&t) {
            Ok(_) => {
                matching.insert(t, t);
                continue;
            }
            Err(ix) => ix,
        };
        let smaller = insert_ix.checked_sub(1).map(|ix| seq2[ix]);
        let larger = seq2.get(insert_ix).copied();
        if let Some(partner) = closest_neighbour(t, smaller, larger, delta) {
            matching.insert(t, partner);
        }
    }
    matching
}

/// Greedily match `seq1` against `seq2`, removing every partner from a
/// private working copy of `seq2` once it is taken. The result is injective.
///
/// A timestamp lying past the last available partner consumes that partner
/// even when it is out of tolerance.
///
/// Runs in O(M log N).
pub fn popping_greedy_match(
    seq1: &[Timestamp],
    seq2: &[Timestamp],
    delta: Timestamp,
) -> Matching {
    let mut matching = Matching::new();
    if seq1.is_empty() || seq2.is_empty() {
        return matching;
    }

    let mut available: BTreeSet<Timestamp> = seq2.iter().copied().collect();
    for &t in seq1 {
        if available.remove(&t) {
            matching.insert(t, t);
            continue;
        }
        let smaller = available.range(..t).next_back().copied();
        let larger = available.range(t..).next().copied();
        match (closest_neighbour(t, smaller, larger, delta), larger) {
            (Some(partner), _) => {
                available.remove(&partner);
                matching.insert(t, partner);
            }
            (None, None) => {
                if let Some(last) = smaller {
                    available.remove(&last);
                }
            }
            (None, Some(_)) => {}
        }
    }
    matching
}

/// Pick the admissible neighbour of `t` closest to it. Ties go to the
/// smaller neighbour.
fn closest_neighbour(
    t: Timestamp,
    smaller: Option<Timestamp>,
    larger: Option<Timestamp>,
    delta: Timestamp,
) -> Option<Timestamp> {
    let tolerance = delta.max(0).unsigned_abs();
    match (smaller, larger) {
        (Some(smaller), Some(larger)) => {
            let larger_diff = larger.abs_diff(t);
            let smaller_diff = smaller.abs_diff(t);
            if larger_diff < smaller_diff && larger_diff < tolerance {
                Some(larger)
            } else if smaller_diff < tolerance {
                Some(smaller)
            } else {
                None
            }
        }
        (Some(candidate), None) | (None, Some(candidate)) => {
            (candidate.abs_diff(t) < tolerance).then_some(candidate)
        }
        (None, None) => None,
    }
}
