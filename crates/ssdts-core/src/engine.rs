//! MatchEngine - configured front door over the matching strategies
//!
//! Wraps strategy selection, partition parallelism and result statistics
//! behind one call, and exposes a JSON string interface for callers outside
//! Rust.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matchers::{hybrid_match, hybrid_match_with_outcome, HybridOutcome, Matcher, Strategy};
use crate::matching::Matching;
use crate::partition::{
    delta_clusters, solve_segments, vertical_segments, DEFAULT_PARALLEL_THRESHOLD,
};
use crate::sequence::{Timestamp, TimestampSequence};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pairs must differ by strictly less than this (or be equal)
    pub delta: Timestamp,
    pub strategy: Strategy,
    /// Per-cluster strategy for [`Strategy::DeltaPartitioned`]
    pub inner_strategy: Strategy,
    /// Segment count from which partitioned strategies solve in parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delta: 1,
            strategy: Strategy::Hybrid,
            inner_strategy: Strategy::Hybrid,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Matching plus summary statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_strategy: Option<Strategy>,
    pub delta: Timestamp,
    pub seq1_len: usize,
    pub seq2_len: usize,
    pub matched: usize,
    pub unmatched_seq1: usize,
    /// Second-series values nobody was matched to
    pub unmatched_seq2: usize,
    pub total_error: u64,
    pub penalized_cost: u64,
    pub injective: bool,
    pub order_preserving: bool,
    /// Set for the hybrid strategy only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_outcome: Option<HybridOutcome>,
    pub matching: Matching,
}

impl MatchReport {
    fn new(
        config: &EngineConfig,
        seq1: &[Timestamp],
        seq2: &[Timestamp],
        matching: Matching,
        hybrid_outcome: Option<HybridOutcome>,
    ) -> Self {
        let partners: AHashSet<Timestamp> = matching.values().collect();
        Self {
            strategy: config.strategy,
            inner_strategy: (config.strategy == Strategy::DeltaPartitioned)
                .then_some(config.inner_strategy),
            delta: config.delta,
            seq1_len: seq1.len(),
            seq2_len: seq2.len(),
            matched: matching.len(),
            unmatched_seq1: seq1.len().saturating_sub(matching.len()),
            unmatched_seq2: seq2.len().saturating_sub(partners.len()),
            total_error: matching.total_error(),
            penalized_cost: matching.penalized_cost(seq1.len(), config.delta),
            injective: matching.is_injective(),
            order_preserving: matching.is_order_preserving(),
            hybrid_outcome,
            matching,
        }
    }
}

/// Matching engine
pub struct MatchEngine {
    config: EngineConfig,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine {
    /// Create a new MatchEngine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Match two strictly ascending series with the configured strategy.
    pub fn run(&self, seq1: &[Timestamp], seq2: &[Timestamp]) -> MatchReport {
        let (matching, outcome) = self.match_with_outcome(seq1, seq2);
        let report = MatchReport::new(&self.config, seq1, seq2, matching, outcome);
        debug!(
            strategy = %report.strategy,
            delta = report.delta,
            matched = report.matched,
            total_error = report.total_error,
            "matched series"
        );
        report
    }

    /// Like [`run`](Self::run) but for validated sequences.
    pub fn run_sequences(&self, seq1: &TimestampSequence, seq2: &TimestampSequence) -> MatchReport {
        self.run(seq1, seq2)
    }

    fn match_with_outcome(
        &self,
        seq1: &[Timestamp],
        seq2: &[Timestamp],
    ) -> (Matching, Option<HybridOutcome>) {
        let EngineConfig {
            delta,
            strategy,
            inner_strategy,
            parallel_threshold,
        } = self.config;

        match strategy {
            Strategy::Hybrid => {
                let (matching, outcome) = hybrid_match_with_outcome(seq1, seq2, delta);
                (matching, Some(outcome))
            }
            Strategy::Vertical => {
                let partition = vertical_segments(seq1, seq2);
                let solved =
                    solve_segments(&partition.segments, delta, &hybrid_match, parallel_threshold);
                (partition.assemble(solved), None)
            }
            Strategy::DeltaPartitioned => {
                let segments = delta_clusters(seq1, seq2, delta);
                debug!(clusters = segments.len(), inner = %inner_strategy, "delta partition");
                let solved = solve_segments(&segments, delta, &inner_strategy, parallel_threshold);
                (solved, None)
            }
            other => (other.match_sequences(seq1, seq2, delta), None),
        }
    }
}

impl Matcher for MatchEngine {
    /// Match with the configured strategy; the `delta` argument overrides the
    /// configured one.
    fn match_sequences(
        &self,
        seq1: &[Timestamp],
        seq2: &[Timestamp],
        delta: Timestamp,
    ) -> Matching {
        let engine = MatchEngine::with_config(EngineConfig {
            delta,
            ..self.config.clone()
        });
        engine.match_with_outcome(seq1, seq2).0
    }
}

/// JSON input for [`match_json`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub seq1: TimestampSequence,
    pub seq2: TimestampSequence,
    pub delta: Timestamp,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub inner_strategy: Strategy,
    #[serde(default)]
    pub parallel_threshold: Option<usize>,
}

impl MatchRequest {
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            delta: self.delta,
            strategy: self.strategy,
            inner_strategy: self.inner_strategy,
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        }
    }
}

/// JSON entry point: `MatchRequest` in, `MatchReport` (or `{"error": ...}`) out.
///
/// Sequences are validated here; unsorted or duplicate input is an error.
pub fn match_json(input: &str) -> String {
    let request: MatchRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return error_json(format!("invalid match input: {}", e)),
    };

    let engine = MatchEngine::with_config(request.config());
    let report = engine.run_sequences(&request.seq1, &request.seq2);

    match serde_json::to_string(&report) {
        Ok(json) => json,
        Err(e) => error_json(format!("serialization failed: {}", e)),
    }
}

fn error_json(message: String) -> String {
    serde_json::json!({ "error": message }).to_string()
}
