//! Partitioning at vertical anchors
//!
//! A vertical is a value present in both series. Verticals are matched to
//! themselves and the stretches between consecutive verticals are matched
//! independently. Segment boundaries come from exact equality rather than
//! from the cost function, so the merged result is not guaranteed optimal.

use tracing::debug;

use super::{solve_segments, Segment, DEFAULT_PARALLEL_THRESHOLD};
use crate::matchers::hybrid_match;
use crate::matching::Matching;
use crate::sequence::Timestamp;

/// Anchors and the segments between them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerticalPartition<'a> {
    /// Values present in both series, ascending
    pub anchors: Vec<Timestamp>,
    pub segments: Vec<Segment<'a>>,
}

impl VerticalPartition<'_> {
    /// Anchors matched to themselves, merged with `segment_matching`.
    /// Segment results win on collision.
    pub fn assemble(&self, segment_matching: Matching) -> Matching {
        let mut matching: Matching = self.anchors.iter().map(|&a| (a, a)).collect();
        matching.merge(segment_matching);
        matching
    }
}

/// Cut both series at their common values.
///
/// Scanning `seq1`, each anchor closes the segment that started just after
/// the previous anchor; empty segments between adjacent anchors are dropped.
/// The last `seq1` value always closes a final segment that runs to the end
/// of both series and so includes the last value itself, anchor or not.
pub fn vertical_segments<'a>(
    seq1: &'a [Timestamp],
    seq2: &'a [Timestamp],
) -> VerticalPartition<'a> {
    let mut partition = VerticalPartition::default();
    if seq1.is_empty() || seq2.is_empty() {
        return partition;
    }

    let last = seq1.len() - 1;
    let (mut seq1_start, mut seq2_start) = (0usize, 0usize);
    for (i, &t) in seq1.iter().enumerate() {
        let anchor_pos = seq2.binary_search(&t).ok();
        let at_end = i == last;
        if anchor_pos.is_none() && !at_end {
            continue;
        }
        if anchor_pos.is_some() {
            partition.anchors.push(t);
        }

        if i > seq1_start || at_end {
            let (seq1_end, seq2_end) = match anchor_pos {
                Some(pos) if !at_end => (i, pos),
                _ => (seq1.len(), seq2.len()),
            };
            partition.segments.push(Segment::new(
                seq1.get(seq1_start..seq1_end).unwrap_or(&[]),
                seq2.get(seq2_start..seq2_end).unwrap_or(&[]),
            ));
        }

        seq1_start = i + 1;
        seq2_start = anchor_pos.map_or(seq2.len(), |pos| pos + 1);
    }
    partition
}

/// Match by solving each inter-anchor segment with the hybrid matcher.
///
/// Runs in O(M N) in the worst case (no anchors).
pub fn vertical_aligned_match(
    seq1: &[Timestamp],
    seq2: &[Timestamp],
    delta: Timestamp,
) -> Matching {
    let partition = vertical_segments(seq1, seq2);
    debug!(
        anchors = partition.anchors.len(),
        segments = partition.segments.len(),
        "vertical partition"
    );
    let solved = solve_segments(
        &partition.segments,
        delta,
        &hybrid_match,
        DEFAULT_PARALLEL_THRESHOLD,
    );
    partition.assemble(solved)
}
