// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark leaderboard CLI entry point.

fn main() {
    if let Err(e) = leaderboard_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
