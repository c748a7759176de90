//! Timestamp Matching Strategies
//!
//! Every strategy takes two strictly ascending series and a tolerance
//! `delta`, and returns a [`Matching`] whose pairs differ by less than
//! `delta` (or are equal).
//!
//! # Strategies (cheapest first)
//!
//! 1. Greedy nearest neighbour, O(M log N), may reuse a partner
//! 2. Popping greedy, O(M log N), consumes partners as they are matched
//! 3. Dynamic programming, O(M N), optimal order-preserving matching
//! 4. Hybrid: greedy, falling back to dynamic when greedy looks deficient
//! 5. Vertical: hybrid per segment between exact-value anchors
//! 6. Delta-partitioned: any strategy per cluster of the first series
//!
//! # Example
//!
//! ```rust
//! use ssdts_core::matchers::{hybrid_match, Matcher, Strategy};
//!
//! let seq1 = [1, 3, 4, 8, 10];
//! let seq2 = [2, 3, 5, 7, 10];
//!
//! let matching = hybrid_match(&seq1, &seq2, 2);
//! assert_eq!(matching.get(4), Some(5));
//!
//! let same = Strategy::Dynamic.match_sequences(&seq1, &seq2, 2);
//! assert_eq!(matching, same);
//! ```

mod dynamic;
mod greedy;
mod hybrid;

pub use dynamic::{dynamic_match, UNMATCH_PENALTY_FACTOR};
pub use greedy::{greedy_match, popping_greedy_match};
pub use hybrid::{hybrid_match, hybrid_match_with_outcome, HybridOutcome};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::matching::Matching;
use crate::partition::{delta_partitioned_match, vertical_aligned_match};
use crate::sequence::Timestamp;

/// A function from two series and a tolerance to a matching.
///
/// Implemented for every `Fn(&[Timestamp], &[Timestamp], Timestamp) -> Matching`
/// so plain functions such as [`dynamic_match`] plug straight into
/// [`delta_partitioned_match_with`](crate::partition::delta_partitioned_match_with).
/// `Sync` lets partitioners hand segments to worker threads.
pub trait Matcher: Sync {
    fn match_sequences(
        &self,
        seq1: &[Timestamp],
        seq2: &[Timestamp],
        delta: Timestamp,
    ) -> Matching;
}

impl<F> Matcher for F
where
    F: Fn(&[Timestamp], &[Timestamp], Timestamp) -> Matching + Sync,
{
    fn match_sequences(
        &self,
        seq1: &[Timestamp],
        seq2: &[Timestamp],
        delta: Timestamp,
    ) -> Matching {
        self(seq1, seq2, delta)
    }
}

/// Named matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Greedy,
    PoppingGreedy,
    Dynamic,
    #[default]
    Hybrid,
    Vertical,
    DeltaPartitioned,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Self::Greedy,
        Self::PoppingGreedy,
        Self::Dynamic,
        Self::Hybrid,
        Self::Vertical,
        Self::DeltaPartitioned,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::PoppingGreedy => "popping-greedy",
            Self::Dynamic => "dynamic",
            Self::Hybrid => "hybrid",
            Self::Vertical => "vertical",
            Self::DeltaPartitioned => "delta-partitioned",
        }
    }

    /// Whether results are guaranteed injective
    pub fn is_injective(&self) -> bool {
        matches!(self, Self::PoppingGreedy | Self::Dynamic)
    }
}

impl Matcher for Strategy {
    fn match_sequences(
        &self,
        seq1: &[Timestamp],
        seq2: &[Timestamp],
        delta: Timestamp,
    ) -> Matching {
        match self {
            Self::Greedy => greedy_match(seq1, seq2, delta),
            Self::PoppingGreedy => popping_greedy_match(seq1, seq2, delta),
            Self::Dynamic => dynamic_match(seq1, seq2, delta),
            Self::Hybrid => hybrid_match(seq1, seq2, delta),
            Self::Vertical => vertical_aligned_match(seq1, seq2, delta),
            Self::DeltaPartitioned => delta_partitioned_match(seq1, seq2, delta),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown matching strategy '{0}' (expected one of: greedy, popping-greedy, dynamic, hybrid, vertical, delta-partitioned)")]
pub struct StrategyError(pub String);

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| StrategyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_round_trips_through_name() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_strategy_parse_is_lenient() {
        assert_eq!(
            "Popping_Greedy".parse::<Strategy>().unwrap(),
            Strategy::PoppingGreedy
        );
        assert_eq!(
            " delta_partitioned ".parse::<Strategy>().unwrap(),
            Strategy::DeltaPartitioned
        );
    }

    #[test]
    fn test_strategy_parse_unknown() {
        let err = "fastest".parse::<Strategy>().unwrap_err();
        assert_eq!(err, StrategyError("fastest".to_string()));
        assert!(err.to_string().contains("unknown matching strategy"));
    }

    #[test]
    fn test_strategy_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Strategy::DeltaPartitioned).unwrap();
        assert_eq!(json, r#""delta-partitioned""#);
    }

    #[test]
    fn test_closures_are_matchers() {
        let exact_only = |seq1: &[Timestamp], seq2: &[Timestamp], _delta: Timestamp| {
            seq1.iter()
                .filter(|t| seq2.binary_search(t).is_ok())
                .map(|&t| (t, t))
                .collect::<Matching>()
        };
        let m = exact_only.match_sequences(&[1, 2, 3], &[2, 3, 4], 5);
        assert_eq!(m.len(), 2);
    }
}
