//! Error taxonomy for the partitioning pipeline

use std::path::PathBuf;

use thiserror::Error;

/// All failures surfaced by the chopper core.
///
/// Configuration problems are detected before any parallel work is
/// dispatched; I/O and parse failures carry the offending path so the
/// user can retry. Nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ChopperError {
    /// Invalid or absent configuration (split selection, column names,
    /// separator, group size).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed delimited-text input or a serialization failure.
    #[error("csv error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    /// Filesystem failure reading input, creating the destination, or
    /// writing an output file.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A worker thread panicked while computing its share of a parallel
    /// stage.
    #[error("worker thread {0} panicked")]
    Worker(usize),
}

impl ChopperError {
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        ChopperError::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChopperError::Io {
            path: path.into(),
            source,
        }
    }
}
