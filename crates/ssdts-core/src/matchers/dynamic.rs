//! Optimal matching by dynamic programming
//!
//! Treats the two series as sequences to align. Matching `seq1[j]` with
//! `seq2[i]` costs their distance, skipping a first-series value costs a
//! fixed penalty and skipping a second-series value is free.
//!
//! ```text
//!          seq1 (M) ->
//!        +---+---+---+
//!  seq2  | S | L | L |   S = start, L = left (skip seq1 value)
//!  (N)   | U | D | . |   U = up (skip seq2 value)
//!   |    | U | . | D |   D = diagonal (match)
//!   v    +---+---+---+
//! ```

use crate::matching::Matching;
use crate::sequence::Timestamp;

/// The cost of leaving a first-series value unmatched is this many deltas,
/// which exceeds the cost of any admissible pair.
pub const UNMATCH_PENALTY_FACTOR: u64 = 10;

/// Which neighbouring cell a grid cell's best score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Start,
    Diagonal,
    Up,
    Left,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    score: u64,
    direction: Direction,
}

/// Row-major `(N+1) x (M+1)` score grid
struct AlignmentMatrix {
    cells: Vec<Cell>,
    width: usize,
}

impl AlignmentMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![
                Cell {
                    score: 0,
                    direction: Direction::Start,
                };
                rows * cols
            ],
            width: cols,
        }
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Cell {
        self.cells[i * self.width + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, cell: Cell) {
        self.cells[i * self.width + j] = cell;
    }
}

/// Optimally match `seq1` against `seq2`.
///
/// The result minimizes total absolute error plus
/// `UNMATCH_PENALTY_FACTOR * delta` per unmatched `seq1` value, over all
/// order-preserving matchings whose pairs differ by strictly less than
/// `delta`. With `delta == 0` nothing is admissible, so the result is empty.
///
/// Runs in O(M N) time and space.
pub fn dynamic_match(seq1: &[Timestamp], seq2: &[Timestamp], delta: Timestamp) -> Matching {
    let mut matching = Matching::new();
    if seq1.is_empty() || seq2.is_empty() {
        return matching;
    }

    let tolerance = delta.max(0).unsigned_abs();
    let unmatch_penalty = tolerance.saturating_mul(UNMATCH_PENALTY_FACTOR);
    let (m, n) = (seq1.len(), seq2.len());
    let mut grid = AlignmentMatrix::new(n + 1, m + 1);

    for i in 0..=n {
        for j in 0..=m {
            if i == 0 && j == 0 {
                continue;
            }
            // Precedence: up, then left, then diagonal; later candidates
            // must be strictly better to win.
            let mut best: Option<Cell> = None;
            if i > 0 {
                best = Some(Cell {
                    score: grid.at(i - 1, j).score,
                    direction: Direction::Up,
                });
            }
            if j > 0 {
                let left = grid.at(i, j - 1).score.saturating_add(unmatch_penalty);
                if best.map_or(true, |b| left < b.score) {
                    best = Some(Cell {
                        score: left,
                        direction: Direction::Left,
                    });
                }
                if i > 0 {
                    let diff = seq1[j - 1].abs_diff(seq2[i - 1]);
                    let diagonal = grid.at(i - 1, j - 1).score.saturating_add(diff);
                    if diff < tolerance && best.map_or(true, |b| diagonal < b.score) {
                        best = Some(Cell {
                            score: diagonal,
                            direction: Direction::Diagonal,
                        });
                    }
                }
            }
            if let Some(cell) = best {
                grid.set(i, j, cell);
            }
        }
    }

    let (mut i, mut j) = (n, m);
    loop {
        match grid.at(i, j).direction {
            Direction::Start => break,
            Direction::Diagonal => {
                matching.insert(seq1[j - 1], seq2[i - 1]);
                i -= 1;
                j -= 1;
            }
            Direction::Up => i -= 1,
            Direction::Left => j -= 1,
        }
    }
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(m: &Matching) -> Vec<(Timestamp, Timestamp)> {
        m.iter().collect()
    }

    #[test]
    fn test_short_series() {
        let seq1 = [1, 3, 4, 8, 10];
        let seq2 = [2, 3, 5, 7, 10];

        let res1 = dynamic_match(&seq1, &seq2, 1);
        assert_eq!(pairs(&res1), vec![(3, 3), (10, 10)]);

        let res2 = dynamic_match(&seq1, &seq2, 2);
        assert_eq!(
            pairs(&res2),
            vec![(1, 2), (3, 3), (4, 5), (8, 7), (10, 10)]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(dynamic_match(&[], &[1], 3).is_empty());
        assert!(dynamic_match(&[1], &[], 3).is_empty());
        assert!(dynamic_match(&[], &[], 3).is_empty());
    }

    #[test]
    fn test_identity() {
        let seq = [-7, 0, 2, 3, 50, 51];
        let m = dynamic_match(&seq, &seq, 1);
        assert_eq!(pairs(&m), seq.iter().map(|&t| (t, t)).collect::<Vec<_>>());
    }

    #[test]
    fn test_avoids_collision_greedy_would_make() {
        let m = dynamic_match(&[1, 2], &[2, 3], 2);
        assert_eq!(pairs(&m), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_prefers_cheaper_pair_when_only_one_fits() {
        // Either 5->6 or 6->6 can be matched; the exact pair is cheaper.
        let m = dynamic_match(&[5, 6], &[6], 2);
        assert_eq!(pairs(&m), vec![(6, 6)]);
    }

    #[test]
    fn test_skips_extra_second_series_values() {
        let m = dynamic_match(&[10, 20], &[1, 9, 15, 21, 40], 2);
        assert_eq!(pairs(&m), vec![(10, 9), (20, 21)]);
    }

    #[test]
    fn test_matching_beats_skipping() {
        // Matching both with error 1 each beats matching one exactly.
        let m = dynamic_match(&[4, 6], &[5, 7], 2);
        assert_eq!(pairs(&m), vec![(4, 5), (6, 7)]);
    }

    #[test]
    fn test_zero_delta_matches_nothing() {
        assert!(dynamic_match(&[1, 2, 3], &[1, 2, 3], 0).is_empty());
    }

    #[test]
    fn test_result_is_injective_and_ordered() {
        let seq1 = [0, 1, 2, 3, 10, 11, 12];
        let seq2 = [1, 2, 11];
        let m = dynamic_match(&seq1, &seq2, 3);
        assert!(m.is_injective());
        assert!(m.is_order_preserving());
        assert!(m.is_admissible(3));
        assert_eq!(m.len(), 3);
    }
}
