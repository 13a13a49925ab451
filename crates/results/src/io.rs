// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Snapshot export for leaderboards.
//!
//! This module writes scanned leaderboards to an output directory:
//!
//! - `snapshots/<task>__<dataset>.json` - One JSON file per leaderboard
//! - `all_rankings.json` - Every leaderboard in one array
//! - `summary.md` - Markdown summary

use crate::error::{Result, ResultsError};
use crate::markdown;
use crate::result::Leaderboard;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-leaderboard snapshot directory, relative to the output directory.
pub const SNAPSHOT_DIR: &str = "snapshots";

/// Combined JSON file name.
pub const ALL_RANKINGS_FILE: &str = "all_rankings.json";

/// Summary file name.
pub const SUMMARY_FILE: &str = "summary.md";

/// Ensure the output directories exist.
pub fn ensure_output_dirs(output: &Path) -> Result<()> {
    let snapshots = output.join(SNAPSHOT_DIR);
    fs::create_dir_all(&snapshots).map_err(|e| ResultsError::io(&snapshots, e))
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ResultsError::json(path, e))?;
    fs::write(path, json).map_err(|e| ResultsError::io(path, e))
}

/// Path of the snapshot file for one leaderboard.
pub fn snapshot_path(board: &Leaderboard, output: &Path) -> PathBuf {
    output
        .join(SNAPSHOT_DIR)
        .join(format!("{}__{}.json", board.task, board.dataset))
}

/// Write leaderboards as a JSON array.
pub fn write_leaderboards_json(boards: &[Leaderboard], path: impl AsRef<Path>) -> Result<()> {
    write_json(boards, path.as_ref())
}

/// Write one leaderboard to the snapshot directory.
pub fn write_snapshot(board: &Leaderboard, output: &Path) -> Result<PathBuf> {
    ensure_output_dirs(output)?;
    let path = snapshot_path(board, output);
    write_json(board, &path)?;
    Ok(path)
}

/// Write the markdown summary.
pub fn write_summary(boards: &[Leaderboard], output: &Path) -> Result<()> {
    ensure_output_dirs(output)?;
    let path = output.join(SUMMARY_FILE);
    fs::write(&path, markdown::generate_summary(boards)).map_err(|e| ResultsError::io(&path, e))
}

/// Write every export (snapshots, combined JSON and summary).
pub fn write_all_outputs(boards: &[Leaderboard], output: &Path) -> Result<()> {
    ensure_output_dirs(output)?;

    for board in boards {
        write_snapshot(board, output)?;
    }

    write_leaderboards_json(boards, output.join(ALL_RANKINGS_FILE))?;

    write_summary(boards, output)?;

    info!(output = %output.display(), leaderboards = boards.len(), "Exported leaderboards");
    Ok(())
}
