//! Timestamp sequences
//!
//! The matchers operate on plain `&[Timestamp]` slices and trust their
//! callers: both series must be strictly ascending. [`TimestampSequence`]
//! is the owned, validated form used at input boundaries (JSON, CLI) so that
//! malformed series are rejected before they reach a matcher.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

/// A single event time. Units are up to the caller (seconds, milliseconds, ...).
pub type Timestamp = i64;

/// Errors raised when validating a raw series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A value is smaller than the one before it
    #[error("timestamp {value} at index {index} is smaller than its predecessor {previous}")]
    NotAscending {
        index: usize,
        previous: Timestamp,
        value: Timestamp,
    },

    /// A value repeats the one before it
    #[error("duplicate timestamp {value} at index {index}")]
    Duplicate { index: usize, value: Timestamp },
}

/// A strictly ascending series of distinct timestamps
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TimestampSequence(Vec<Timestamp>);

impl TimestampSequence {
    /// Validate `values` as strictly ascending.
    pub fn new(values: Vec<Timestamp>) -> Result<Self, SequenceError> {
        for (index, pair) in values.windows(2).enumerate() {
            let (previous, value) = (pair[0], pair[1]);
            if value == previous {
                return Err(SequenceError::Duplicate {
                    index: index + 1,
                    value,
                });
            }
            if value < previous {
                return Err(SequenceError::NotAscending {
                    index: index + 1,
                    previous,
                    value,
                });
            }
        }
        Ok(Self(values))
    }

    /// Sort and deduplicate arbitrary values into a valid sequence.
    pub fn from_unsorted(mut values: Vec<Timestamp>) -> Self {
        values.sort_unstable();
        values.dedup();
        Self(values)
    }

    pub fn as_slice(&self) -> &[Timestamp] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Timestamp> {
        self.0
    }
}

impl Deref for TimestampSequence {
    type Target = [Timestamp];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[Timestamp]> for TimestampSequence {
    fn as_ref(&self) -> &[Timestamp] {
        &self.0
    }
}

impl TryFrom<Vec<Timestamp>> for TimestampSequence {
    type Error = SequenceError;

    fn try_from(values: Vec<Timestamp>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<'de> Deserialize<'de> for TimestampSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<Timestamp>::deserialize(deserializer)?;
        Self::new(values).map_err(serde::de::Error::custom)
    }
}
