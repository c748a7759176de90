//! Fixed-input scenarios across every strategy

use pretty_assertions::assert_eq;
use ssdts_core::{
    delta_partitioned_match, delta_partitioned_match_with, dynamic_match, greedy_match,
    hybrid_match, popping_greedy_match, vertical_aligned_match, Matcher, Matching, Strategy,
    Timestamp,
};

const SHORT_SERIES_1: [Timestamp; 5] = [1, 3, 4, 8, 10];
const SHORT_SERIES_2: [Timestamp; 5] = [2, 3, 5, 7, 10];

/// Helper to build an expected matching
fn matching(pairs: &[(Timestamp, Timestamp)]) -> Matching {
    pairs.iter().copied().collect()
}

#[test]
fn test_short_series_delta_one() {
    let expected = matching(&[(3, 3), (10, 10)]);
    for strategy in Strategy::ALL {
        assert_eq!(
            strategy.match_sequences(&SHORT_SERIES_1, &SHORT_SERIES_2, 1),
            expected,
            "strategy {}",
            strategy
        );
    }
}

#[test]
fn test_short_series_delta_two() {
    let expected = matching(&[(1, 2), (3, 3), (4, 5), (8, 7), (10, 10)]);

    assert_eq!(popping_greedy_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2), expected);
    assert_eq!(dynamic_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2), expected);
    assert_eq!(hybrid_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2), expected);
    assert_eq!(vertical_aligned_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2), expected);
    assert_eq!(delta_partitioned_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2), expected);
}

#[test]
fn test_short_series_plain_greedy_collides() {
    let greedy = greedy_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2);
    assert_eq!(greedy.len(), 5);
    assert_eq!(greedy.get(3), Some(3));
    assert_eq!(greedy.get(4), Some(3));
    assert!(!greedy.is_injective());
}

#[test]
fn test_optimal_error_not_above_greedy() {
    let optimal = dynamic_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2);
    let popping = popping_greedy_match(&SHORT_SERIES_1, &SHORT_SERIES_2, 2);
    assert!(optimal.total_error() <= popping.total_error());
    assert_eq!(optimal.total_error(), 3);
}

#[test]
fn test_empty_inputs_for_every_strategy() {
    for strategy in Strategy::ALL {
        assert!(strategy.match_sequences(&[], &SHORT_SERIES_2, 2).is_empty());
        assert!(strategy.match_sequences(&SHORT_SERIES_1, &[], 2).is_empty());
        assert!(strategy.match_sequences(&[], &[], 2).is_empty());
    }
}

#[test]
fn test_identical_series_for_every_strategy() {
    let seq = [0, 4, 5, 6, 19, 40, 41, 100];
    let identity = matching(&seq.map(|t| (t, t)));
    for strategy in Strategy::ALL {
        assert_eq!(
            strategy.match_sequences(&seq, &seq, 3),
            identity,
            "strategy {}",
            strategy
        );
    }
}

#[test]
fn test_drifting_clock() {
    // Second recorder runs one tick late, with a spurious event at 55.
    let seq1 = [10, 20, 30, 40, 50, 60];
    let seq2 = [11, 21, 31, 41, 51, 55, 61];
    let expected = matching(&[(10, 11), (20, 21), (30, 31), (40, 41), (50, 51), (60, 61)]);

    assert_eq!(dynamic_match(&seq1, &seq2, 3), expected);
    assert_eq!(hybrid_match(&seq1, &seq2, 3), expected);
    assert_eq!(delta_partitioned_match(&seq1, &seq2, 3), expected);
}

#[test]
fn test_partitioned_matches_whole_optimum_on_far_clusters() {
    let seq1 = [0, 2, 5, 1000, 1003, 2000, 2001];
    let seq2 = [1, 3, 4, 999, 1004, 1500, 2000, 2002];
    let delta = 3;

    let whole = dynamic_match(&seq1, &seq2, delta);
    assert_eq!(
        delta_partitioned_match_with(&seq1, &seq2, delta, &dynamic_match),
        whole
    );
    assert_eq!(delta_partitioned_match(&seq1, &seq2, delta), whole);
}
