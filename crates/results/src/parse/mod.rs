// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-task result-file parsers.
//!
//! Every parser takes one file path, reads it to the end and returns a
//! normalized record. The file handle is dropped before returning on every
//! path, including errors.

mod eta;
mod traffic;
mod traj;

pub use eta::parse_eta_csv;
pub use traffic::parse_traffic_state_csv;
pub use traj::parse_traj_loc_json;

use crate::error::{Result, ResultsError};
use crate::result::MetricRecord;
use leaderboard_core::TaskKind;
use std::fs::File;
use std::path::Path;

/// Parse a result file with the parser bound to `kind`.
pub fn parse_result_file(kind: TaskKind, path: impl AsRef<Path>) -> Result<MetricRecord> {
    let path = path.as_ref();
    match kind {
        TaskKind::TrafficStatePred => parse_traffic_state_csv(path).map(MetricRecord::TrafficState),
        TaskKind::Eta => parse_eta_csv(path).map(MetricRecord::Eta),
        TaskKind::TrajLocPred => parse_traj_loc_json(path).map(MetricRecord::TrajLoc),
    }
}

/// Open a CSV file whose first row is a header. Rows may vary in length.
fn csv_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| ResultsError::io(path, e))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}
