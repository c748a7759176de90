//! SSDTS Core Engine
//!
//! Fast matching of source-sharing derivative time series: two series of
//! event timestamps recorded by independent clocks from the same underlying
//! events. Matched pairs differ by strictly less than a tolerance `delta`
//! (or are equal), and the total timing error is minimized or approximated.
//!
//! All inputs must be strictly ascending. The matchers do not check this;
//! use [`TimestampSequence`] to validate untrusted input.
//!
//! # Features
//!
//! - `native` - Enable all native optimizations
//! - `parallel` - Solve partition segments in parallel via rayon
//!
//! # Example
//!
//! ```rust
//! use ssdts_core::{dynamic_match, delta_partitioned_match, MatchEngine, EngineConfig, Strategy};
//!
//! let seq1 = [1, 3, 4, 8, 10];
//! let seq2 = [2, 3, 5, 7, 10];
//!
//! let optimal = dynamic_match(&seq1, &seq2, 2);
//! assert_eq!(optimal.len(), 5);
//! assert_eq!(delta_partitioned_match(&seq1, &seq2, 2), optimal);
//!
//! let engine = MatchEngine::with_config(EngineConfig {
//!     delta: 1,
//!     strategy: Strategy::Vertical,
//!     ..Default::default()
//! });
//! let report = engine.run(&seq1, &seq2);
//! assert_eq!(report.matched, 2);
//! ```

pub mod engine;
pub mod matchers;
pub mod matching;
pub mod partition;
pub mod sequence;

// Re-export main types at crate root
pub use engine::{match_json, EngineConfig, MatchEngine, MatchReport, MatchRequest};
pub use matchers::{
    dynamic_match, greedy_match, hybrid_match, hybrid_match_with_outcome, popping_greedy_match,
    HybridOutcome, Matcher, Strategy, StrategyError, UNMATCH_PENALTY_FACTOR,
};
pub use matching::{is_admissible, Matching};
pub use partition::{
    delta_clusters, delta_partitioned_match, delta_partitioned_match_with, solve_segments,
    vertical_aligned_match, vertical_segments, Segment, VerticalPartition,
    DEFAULT_PARALLEL_THRESHOLD,
};
pub use sequence::{SequenceError, Timestamp, TimestampSequence};
