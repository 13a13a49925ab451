// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for result parsing and export.
//!
//! Only file-level failures surface here. Row- and field-level problems in
//! CSV files are absorbed by the parsers (skipped rows, null cells).

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing result files.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// A file could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A CSV header could not be decoded.
    #[error("Malformed CSV header in {path}: {source}")]
    Csv {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: csv::Error,
    },

    /// A JSON document could not be parsed or serialized.
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A JSON result document parsed but is not an object.
    #[error("JSON result in {path} is not an object")]
    NotAnObject {
        /// File involved.
        path: PathBuf,
    },
}

impl ResultsError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for result-file operations.
pub type Result<T> = std::result::Result<T, ResultsError>;
