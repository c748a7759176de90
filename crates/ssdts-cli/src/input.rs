//! Reading timestamp series from files or stdin.
//!
//! A series file holds either a JSON array of integers or integers separated
//! by whitespace and/or commas.

use std::io::Read;
use std::path::Path;

use ssdts_core::{Timestamp, TimestampSequence};
use tracing::debug;

use crate::error::{CliError, Result};

/// Path that selects stdin
pub const STDIN: &str = "-";

/// Read and validate a series. With `sort`, unordered or repeated values are
/// sorted and deduplicated instead of rejected.
pub fn load_series(path: &Path, sort: bool) -> Result<TimestampSequence> {
    let source_name = path.display().to_string();
    let text = if path.as_os_str() == STDIN {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    let values = parse_series(&text, &source_name)?;
    debug!(source = %source_name, values = values.len(), "read series");
    to_sequence(values, sort, &source_name)
}

/// Parse the integers in `text`.
pub fn parse_series(text: &str, source_name: &str) -> Result<Vec<Timestamp>> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<Timestamp>().map_err(|_| CliError::Parse {
                source_name: source_name.to_string(),
                token: token.to_string(),
            })
        })
        .collect()
}

pub fn to_sequence(
    values: Vec<Timestamp>,
    sort: bool,
    source_name: &str,
) -> Result<TimestampSequence> {
    if sort {
        return Ok(TimestampSequence::from_unsorted(values));
    }
    TimestampSequence::new(values).map_err(|source| CliError::InvalidSeries {
        source_name: source_name.to_string(),
        source,
    })
}
