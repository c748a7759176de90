//! Partitioned Matching
//!
//! The dynamic aligner needs O(M N) memory, so long series are first cut
//! into independent segments and each segment is matched on its own:
//!
//! - **Vertical**: cut both series at anchors, values present in both
//! - **Delta**: cut the first series wherever consecutive values are more
//!   than `2 * delta + 1` apart
//!
//! Segments never share a first-series value, so their matchings merge by
//! plain union and may be solved in any order. With the `parallel` feature,
//! segments are solved on the rayon thread pool once there are enough of them.

mod delta;
mod vertical;

pub use delta::{delta_clusters, delta_partitioned_match, delta_partitioned_match_with};
pub use vertical::{vertical_aligned_match, vertical_segments, VerticalPartition};

use crate::matchers::Matcher;
use crate::matching::Matching;
use crate::sequence::Timestamp;

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
use rayon::prelude::*;

/// Segment count from which segments are solved in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// One independent sub-problem: a slice of each series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub seq1: &'a [Timestamp],
    pub seq2: &'a [Timestamp],
}

impl<'a> Segment<'a> {
    pub fn new(seq1: &'a [Timestamp], seq2: &'a [Timestamp]) -> Self {
        Self { seq1, seq2 }
    }

    /// Size of the dynamic aligner's grid for this segment
    pub fn grid_cells(&self) -> usize {
        (self.seq1.len() + 1).saturating_mul(self.seq2.len() + 1)
    }
}

/// Solve every segment with `matcher` and merge the results in segment order.
///
/// Parallel on native with the `parallel` feature once `segments.len()`
/// reaches `parallel_threshold`, sequential otherwise.
#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
pub fn solve_segments<M: Matcher + ?Sized>(
    segments: &[Segment<'_>],
    delta: Timestamp,
    matcher: &M,
    parallel_threshold: usize,
) -> Matching {
    if segments.len() >= parallel_threshold {
        segments
            .par_iter()
            .map(|segment| matcher.match_sequences(segment.seq1, segment.seq2, delta))
            .reduce(Matching::new, |mut acc, part| {
                acc.merge(part);
                acc
            })
    } else {
        solve_sequential(segments, delta, matcher)
    }
}

/// Solve every segment with `matcher` and merge the results in segment order.
#[cfg(any(target_arch = "wasm32", not(feature = "parallel")))]
pub fn solve_segments<M: Matcher + ?Sized>(
    segments: &[Segment<'_>],
    delta: Timestamp,
    matcher: &M,
    _parallel_threshold: usize,
) -> Matching {
    solve_sequential(segments, delta, matcher)
}

fn solve_sequential<M: Matcher + ?Sized>(
    segments: &[Segment<'_>],
    delta: Timestamp,
    matcher: &M,
) -> Matching {
    segments
        .iter()
        .fold(Matching::new(), |mut acc, segment| {
            acc.merge(matcher.match_sequences(segment.seq1, segment.seq2, delta));
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{dynamic_match, Strategy};

    #[test]
    fn test_solve_segments_merges_disjoint_results() {
        let seq1 = [1, 2, 30, 31];
        let seq2 = [1, 3, 29, 31];
        let segments = [
            Segment::new(&seq1[..2], &seq2[..2]),
            Segment::new(&seq1[2..], &seq2[2..]),
        ];
        let m = solve_segments(&segments, 2, &dynamic_match, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(
            m.iter().collect::<Vec<_>>(),
            vec![(1, 1), (2, 3), (30, 29), (31, 31)]
        );
    }

    #[test]
    fn test_solve_segments_threshold_does_not_change_result() {
        let seq1: Vec<Timestamp> = (0..200).map(|i| i * 100).collect();
        let seq2: Vec<Timestamp> = (0..200).map(|i| i * 100 + 1).collect();
        let segments: Vec<Segment<'_>> = seq1
            .chunks(2)
            .zip(seq2.chunks(2))
            .map(|(a, b)| Segment::new(a, b))
            .collect();

        let eager = solve_segments(&segments, 3, &Strategy::Hybrid, 1);
        let lazy = solve_segments(&segments, 3, &Strategy::Hybrid, usize::MAX);
        assert_eq!(eager, lazy);
        assert_eq!(eager.len(), 200);
    }

    #[test]
    fn test_grid_cells() {
        let seq1 = [1, 2, 3];
        let seq2 = [1];
        assert_eq!(Segment::new(&seq1, &seq2).grid_cells(), 8);
    }
}
