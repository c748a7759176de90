//! The result of matching two timestamp series
//!
//! A [`Matching`] maps matched values of the first series to the value of the
//! second series each was paired with. It is kept ordered by key so results
//! print, compare and serialize deterministically.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::matchers::UNMATCH_PENALTY_FACTOR;
use crate::sequence::Timestamp;

/// Check whether `a` and `b` may be paired under tolerance `delta`.
///
/// Exact equality always qualifies; otherwise the distance must be strictly
/// below `delta`.
#[inline]
pub fn is_admissible(a: Timestamp, b: Timestamp, delta: Timestamp) -> bool {
    a == b || a.abs_diff(b) < delta.max(0).unsigned_abs()
}

/// Mapping from first-series timestamps to their second-series partners
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matching(BTreeMap<Timestamp, Timestamp>);

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `key` with `value`, returning the previous partner of `key` if any.
    pub fn insert(&mut self, key: Timestamp, value: Timestamp) -> Option<Timestamp> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: Timestamp) -> Option<Timestamp> {
        self.0.get(&key).copied()
    }

    pub fn contains_key(&self, key: Timestamp) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Matched pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, Timestamp)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.0.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.0.values().copied()
    }

    /// Union with `other`. Entries of `other` win on key collision.
    pub fn merge(&mut self, other: Matching) {
        self.0.extend(other.0);
    }

    /// Sum of absolute differences over all matched pairs
    pub fn total_error(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, (k, v)| acc.saturating_add(k.abs_diff(v)))
    }

    /// The objective minimized by the dynamic aligner: total error plus
    /// `UNMATCH_PENALTY_FACTOR * delta` for every unmatched first-series value.
    pub fn penalized_cost(&self, seq1_len: usize, delta: Timestamp) -> u64 {
        let unmatched = seq1_len.saturating_sub(self.len()) as u64;
        let penalty = delta
            .max(0)
            .unsigned_abs()
            .saturating_mul(UNMATCH_PENALTY_FACTOR);
        self.total_error()
            .saturating_add(penalty.saturating_mul(unmatched))
    }

    /// No two keys share a partner
    pub fn is_injective(&self) -> bool {
        let mut seen = AHashSet::with_capacity(self.len());
        self.values().all(|v| seen.insert(v))
    }

    /// Partners ascend strictly with their keys
    pub fn is_order_preserving(&self) -> bool {
        self.0
            .values()
            .zip(self.0.values().skip(1))
            .all(|(a, b)| a < b)
    }

    /// Every pair satisfies [`is_admissible`]
    pub fn is_admissible(&self, delta: Timestamp) -> bool {
        self.iter().all(|(k, v)| is_admissible(k, v, delta))
    }

    pub fn as_map(&self) -> &BTreeMap<Timestamp, Timestamp> {
        &self.0
    }

    pub fn into_map(self) -> BTreeMap<Timestamp, Timestamp> {
        self.0
    }
}

impl From<BTreeMap<Timestamp, Timestamp>> for Matching {
    fn from(map: BTreeMap<Timestamp, Timestamp>) -> Self {
        Self(map)
    }
}

impl FromIterator<(Timestamp, Timestamp)> for Matching {
    fn from_iter<I: IntoIterator<Item = (Timestamp, Timestamp)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(Timestamp, Timestamp)> for Matching {
    fn extend<I: IntoIterator<Item = (Timestamp, Timestamp)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Matching {
    type Item = (Timestamp, Timestamp);
    type IntoIter = btree_map::IntoIter<Timestamp, Timestamp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for Matching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admissibility_is_strict() {
        assert!(is_admissible(5, 5, 0));
        assert!(is_admissible(5, 6, 2));
        assert!(!is_admissible(5, 7, 2));
        assert!(!is_admissible(5, 6, 1));
        assert!(is_admissible(-3, -4, 2));
    }

    #[test]
    fn total_error_sums_distances() {
        let m: Matching = [(1, 2), (3, 3), (8, 7)].into_iter().collect();
        assert_eq!(m.total_error(), 2);
    }

    #[test]
    fn penalized_cost_charges_unmatched() {
        let m: Matching = [(1, 2), (3, 3)].into_iter().collect();
        // one unmatched out of three, delta 2 -> penalty 20
        assert_eq!(m.penalized_cost(3, 2), 21);
    }

    #[test]
    fn injectivity() {
        let ok: Matching = [(1, 2), (3, 3)].into_iter().collect();
        let collision: Matching = [(1, 2), (3, 2)].into_iter().collect();
        assert!(ok.is_injective());
        assert!(!collision.is_injective());
    }

    #[test]
    fn order_preservation() {
        let ordered: Matching = [(1, 2), (3, 4), (5, 5)].into_iter().collect();
        let crossed: Matching = [(2, 3), (4, 0)].into_iter().collect();
        assert!(ordered.is_order_preserving());
        assert!(!crossed.is_order_preserving());
        assert!(Matching::new().is_order_preserving());
    }

    #[test]
    fn merge_prefers_incoming() {
        let mut m: Matching = [(1, 1), (5, 5)].into_iter().collect();
        m.merge([(5, 6), (9, 9)].into_iter().collect());
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(5), Some(6));
    }

    #[test]
    fn display_and_json() {
        let m: Matching = [(1, 2), (3, 3)].into_iter().collect();
        assert_eq!(m.to_string(), "{1: 2, 3: 3}");

        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"1":2,"3":3}"#);
        let back: Matching = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
