// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layered configuration for the leaderboard.
//!
//! Configuration is loaded in order, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/leaderboard.{toml,yaml,json}` if present, or a file named
//!    explicitly, which must then exist
//! 3. Environment variables with the `LEADERBOARD__` prefix, for example
//!    `LEADERBOARD__RESULT_ROOT=/data/result`
//!
//! The result root is handed to the scanner explicitly; nothing in the
//! workspace reads it from a global.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "config/leaderboard";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LEADERBOARD";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}', expected 'pretty' or 'json'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Leaderboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Root of the `<task>/<dataset>/<model>.{csv,json}` tree.
    #[serde(default = "default_result_root")]
    pub result_root: PathBuf,
    /// Directory that `export` writes snapshots into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_result_root() -> PathBuf {
    PathBuf::from("result")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("leaderboard/output")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            result_root: default_result_root(),
            output_dir: default_output_dir(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl LeaderboardConfig {
    /// Load configuration from [`DEFAULT_CONFIG_FILE`], when it exists, and
    /// the environment.
    pub fn load() -> Result<Self> {
        Self::build(DEFAULT_CONFIG_FILE, false)
    }

    /// Load configuration from the named file (extension optional) and the
    /// environment. A missing file is an error.
    pub fn load_from(file: &str) -> Result<Self> {
        Self::build(file, true)
    }

    fn build(file: &str, required: bool) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(required))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: LeaderboardConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the result root.
    pub fn with_result_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.result_root = root.into();
        self
    }

    /// Replace the export output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Replace the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Result root as a path.
    pub fn result_root(&self) -> &Path {
        &self.result_root
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.result_root.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "result_root must not be empty".into(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "output_dir must not be empty".into(),
            ));
        }

        if self.log_level.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "log_level must not be empty".into(),
            ));
        }

        Ok(())
    }
}
