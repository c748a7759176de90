//! Error types for the command-line matcher.

use ssdts_core::SequenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input or output error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A token in a series file is not an integer
    #[error("{source_name}: '{token}' is not an integer timestamp")]
    Parse { source_name: String, token: String },

    /// A series is not strictly ascending (and --sort was not given)
    #[error("{source_name}: {source} (pass --sort to sort and deduplicate)")]
    InvalidSeries {
        source_name: String,
        #[source]
        source: SequenceError,
    },

    /// Both series were requested from stdin
    #[error("only one series can be read from stdin")]
    MultipleStdin,
}

pub type Result<T> = std::result::Result<T, CliError>;
