// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result-file parsing and leaderboard scanning.
//!
//! This crate reads a tree of per-model benchmark result files laid out as
//! `<root>/<task>/<dataset>/<model>.{csv,json}` and normalizes each file
//! into a [`MetricRecord`].
//!
//! # Quick Start
//!
//! ```no_run
//! use leaderboard_results::ResultScanner;
//!
//! let scanner = ResultScanner::new("result");
//! for task in scanner.list_tasks() {
//!     for dataset in scanner.list_datasets(&task) {
//!         let rankings = scanner.list_rankings(&task, &dataset)?;
//!         println!("{}/{}: {} models", task, dataset, rankings.len());
//!     }
//! }
//! # Ok::<(), leaderboard_results::ResultsError>(())
//! ```
//!
//! # Modules
//!
//! - [`parse`] - Per-task result-file parsers
//! - [`scan`] - Directory scanner and query surface
//! - [`result`] - Metric records, ranking entries and leaderboards
//! - [`metric`] - Metric values with `inf` support
//! - [`io`] - Snapshot export
//! - [`markdown`] - Markdown report generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod io;
pub mod markdown;
pub mod metric;
pub mod parse;
pub mod result;
pub mod scan;

pub use error::{Result, ResultsError};
pub use metric::Metric;
pub use parse::{parse_eta_csv, parse_result_file, parse_traffic_state_csv, parse_traj_loc_json};
pub use result::{
    EtaMetrics, ErrorMetrics, Leaderboard, MetricRecord, RankingEntry, TrafficStateMetrics,
    TrajLocMetrics,
};
pub use scan::ResultScanner;

use std::path::Path;

/// Scan every known task under `root` and write all exports to `output`.
///
/// Returns the leaderboards that were written.
///
/// # Errors
///
/// Fails if a result file cannot be read or is malformed JSON, or if an
/// output file cannot be written.
pub fn scan_and_export(
    root: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<Vec<Leaderboard>> {
    let boards = ResultScanner::new(root.as_ref()).scan_all()?;
    io::write_all_outputs(&boards, output.as_ref())?;
    Ok(boards)
}
