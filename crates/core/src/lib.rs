// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core types for the benchmark leaderboard.
//!
//! This crate holds the pieces shared by the result scanner and the CLI:
//!
//! - [`task`] - The closed set of benchmark task kinds
//! - [`config`] - Layered configuration (file, environment, overrides)
//! - [`error`] - Error and result types

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod task;

pub use crate::config::{LeaderboardConfig, LogFormat};
pub use error::{CoreError, Result};
pub use task::TaskKind;
