// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for leaderboards.
//!
//! This module renders a single leaderboard as a ranked table and a set of
//! leaderboards as a summary table.

use crate::metric::Metric;
use crate::result::{Leaderboard, MetricRecord};
use std::fmt::Write;

fn cell(value: Option<Metric>) -> String {
    value.map_or_else(|| "-".to_string(), |m| m.to_string())
}

/// Escape a file or directory name for use inside a table cell.
fn escape(name: &str) -> String {
    name.replace('|', "\\|")
}

/// Generate a ranked markdown table for one leaderboard.
pub fn generate_leaderboard(board: &Leaderboard) -> String {
    let mut output = String::new();
    let columns = MetricRecord::columns(board.task);

    writeln!(output, "## {} / {}", board.task, board.dataset).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", board.generated_at.to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    if board.rankings.is_empty() {
        writeln!(output, "_No result files._").unwrap();
        return output;
    }

    writeln!(output, "| Rank | Model | {} |", columns.join(" | ")).unwrap();
    writeln!(output, "|------|-------|{}", "---|".repeat(columns.len())).unwrap();

    for (rank, entry) in board.ranked().into_iter().enumerate() {
        let cells: Vec<String> = entry.data.cells().into_iter().map(cell).collect();
        writeln!(
            output,
            "| {} | {} | {} |",
            rank + 1,
            escape(&entry.model),
            cells.join(" | ")
        )
        .unwrap();
    }

    output
}

/// Generate a markdown summary of many leaderboards.
pub fn generate_summary(boards: &[Leaderboard]) -> String {
    let mut output = String::new();

    writeln!(output, "# Leaderboard Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Task | Dataset | Models | Leader | Headline |").unwrap();
    writeln!(output, "|------|---------|--------|--------|----------|").unwrap();

    for board in boards {
        let leader = board.leader();
        writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            board.task,
            escape(&board.dataset),
            board.rankings.len(),
            leader.map_or_else(|| "-".to_string(), |e| escape(&e.model)),
            cell(leader.and_then(|e| e.data.headline())),
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total leaderboards: {}", boards.len()).unwrap();

    output
}
