// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the core crate.

use thiserror::Error;

/// Errors raised while resolving tasks or loading configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The task name does not correspond to a known task kind.
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// A configuration source could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The configuration loaded but failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
