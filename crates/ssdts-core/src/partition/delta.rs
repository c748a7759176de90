//! Partitioning into delta-separated clusters
//!
//! When two consecutive first-series values are more than `2 * delta + 1`
//! apart, no second-series value is admissible for both sides of the gap, so
//! the first series can be cut there. Each cluster is matched against only the
//! second-series values that could reach it.
//!
//! Partitioning looks at gaps in the first series only, so swapping the two
//! series may produce a different matching.

use tracing::debug;

use super::{solve_segments, Segment, DEFAULT_PARALLEL_THRESHOLD};
use crate::matchers::{hybrid_match, Matcher};
use crate::matching::Matching;
use crate::sequence::Timestamp;

/// Split `seq1` into clusters and pair each with its candidate slice of `seq2`.
///
/// A new cluster starts wherever the gap to the previous value exceeds
/// `2 * delta + 1`. A cluster spanning `first..=last` is paired with the
/// `seq2` values strictly within `delta` of that span; with `delta == 0` the
/// span itself is kept so exact matches survive.
pub fn delta_clusters<'a>(
    seq1: &'a [Timestamp],
    seq2: &'a [Timestamp],
    delta: Timestamp,
) -> Vec<Segment<'a>> {
    if seq1.is_empty() || seq2.is_empty() {
        return Vec::new();
    }

    let tolerance = delta.max(0).unsigned_abs();
    let max_gap = tolerance.saturating_mul(2).saturating_add(1);

    let mut segments = Vec::new();
    let mut start = 0;
    for end in 1..=seq1.len() {
        let closes = end == seq1.len() || seq1[end].abs_diff(seq1[end - 1]) > max_gap;
        if closes {
            let cluster = &seq1[start..end];
            segments.push(Segment::new(cluster, candidate_slice(cluster, seq2, tolerance)));
            start = end;
        }
    }
    segments
}

/// The contiguous run of `seq2` values that can reach `cluster`
fn candidate_slice<'a>(
    cluster: &[Timestamp],
    seq2: &'a [Timestamp],
    tolerance: u64,
) -> &'a [Timestamp] {
    let (Some(&first), Some(&last)) = (cluster.first(), cluster.last()) else {
        return &[];
    };
    // Widen to i128 so the envelope cannot overflow near the i64 limits.
    let reach = i128::from(tolerance.max(1)) - 1;
    let low = i128::from(first) - reach;
    let high = i128::from(last) + reach;

    let lo = seq2.partition_point(|&v| i128::from(v) < low);
    let hi = seq2.partition_point(|&v| i128::from(v) <= high);
    seq2.get(lo..hi).unwrap_or(&[])
}

/// Match cluster by cluster with the hybrid matcher.
///
/// Optimal whenever the hybrid results are optimal per cluster.
pub fn delta_partitioned_match(
    seq1: &[Timestamp],
    seq2: &[Timestamp],
    delta: Timestamp,
) -> Matching {
    delta_partitioned_match_with(seq1, seq2, delta, &hybrid_match)
}

/// Match cluster by cluster with `matcher`.
///
/// If `matcher` yields optimal matchings, so does this function.
pub fn delta_partitioned_match_with<M: Matcher + ?Sized>(
    seq1: &[Timestamp],
    seq2: &[Timestamp],
    delta: Timestamp,
    matcher: &M,
) -> Matching {
    let segments = delta_clusters(seq1, seq2, delta);
    debug!(
        clusters = segments.len(),
        largest_grid = segments.iter().map(Segment::grid_cells).max().unwrap_or(0),
        "delta partition"
    );
    solve_segments(&segments, delta, matcher, DEFAULT_PARALLEL_THRESHOLD)
}
