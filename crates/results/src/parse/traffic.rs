// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Traffic state prediction CSV.
//!
//! One row per forecast step after a header. The columns of interest are
//! positional: MAE at index 4, MAPE at 5, RMSE at 7.

use super::csv_reader;
use crate::error::Result;
use crate::metric::Metric;
use crate::result::{ErrorMetrics, TrafficStateMetrics};
use csv::StringRecord;
use std::path::Path;
use tracing::debug;

const MAE_COLUMN: usize = 4;
const MAPE_COLUMN: usize = 5;
const RMSE_COLUMN: usize = 7;

/// Parse a traffic state prediction CSV.
///
/// Rows that are too short, undecodable, or hold a non-numeric value in a
/// metric column are skipped.
pub fn parse_traffic_state_csv(path: impl AsRef<Path>) -> Result<TrafficStateMetrics> {
    let path = path.as_ref();
    let mut reader = csv_reader(path)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) => match parse_row(&record) {
                Some(metrics) => rows.push(metrics),
                None => debug!(path = %path.display(), row = index + 1, "Skipping unparsable row"),
            },
            Err(e) => debug!(
                path = %path.display(),
                row = index + 1,
                error = %e,
                "Skipping undecodable row"
            ),
        }
    }

    debug!(path = %path.display(), rows = rows.len(), "Parsed traffic state result");
    Ok(TrafficStateMetrics::from_rows(&rows))
}

fn parse_row(record: &StringRecord) -> Option<ErrorMetrics> {
    let cell = |index: usize| record.get(index).and_then(Metric::parse);
    Some(ErrorMetrics {
        mae: cell(MAE_COLUMN)?,
        rmse: cell(RMSE_COLUMN)?,
        mape: cell(MAPE_COLUMN)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "step,a,b,c,MAE,MAPE,MSE,RMSE,masked_MAE\n";

    fn write_csv(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("STGCN.csv");
        fs::write(&path, format!("{}{}", HEADER, body)).unwrap();
        (dir, path)
    }

    #[test]
    fn test_four_rows_yield_step_3_and_average() {
        let (_dir, path) = write_csv(
            "1,0,0,0,1.0,0.1,0,1,0\n\
             2,0,0,0,2.0,inf,0,2,0\n\
             3,0,0,0,3.0,0.3,0,3,0\n\
             4,0,0,0,4.0,0.4,0,4,0\n",
        );
        let record = parse_traffic_state_csv(&path).unwrap();

        let step_3 = record.step_3.unwrap();
        assert_eq!(step_3.mae, Metric(3.0));
        assert_eq!(step_3.rmse, Metric(3.0));
        assert_eq!(step_3.mape, Metric(0.3));
        assert!(record.step_6.is_none());
        assert!(record.step_9.is_none());
        assert!(record.step_12.is_none());

        let avg = record.average.unwrap();
        assert_eq!(avg.mae, Metric(2.5));
        assert_eq!(avg.rmse, Metric(2.5));
        assert!((avg.mape.value() - 0.266_666_666_666).abs() < 1e-9);
    }

    #[test]
    fn test_all_infinite_mape() {
        let (_dir, path) = write_csv("1,0,0,0,1.0,inf,0,1,0\n2,0,0,0,2.0,inf,0,2,0\n");
        let avg = parse_traffic_state_csv(&path).unwrap().average.unwrap();
        assert!(avg.mape.is_pos_infinite());
        assert_eq!(avg.mae, Metric(1.5));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let (_dir, path) = write_csv(
            "1,0,0,0,1.0,0.1,0,1,0\n\
             short,row\n\
             2,0,0,0,n/a,0.2,0,2,0\n\
             3,0,0,0,3.0,0.3,0\n\
             4,0,0,0,3.0,0.3,0,3,0\n",
        );
        let record = parse_traffic_state_csv(&path).unwrap();
        // Only rows 1 and 4 are usable.
        assert!(record.step_3.is_none());
        assert_eq!(record.average.unwrap().mae, Metric(2.0));
    }

    #[test]
    fn test_header_only_gives_empty_record() {
        let (_dir, path) = write_csv("");
        let record = parse_traffic_state_csv(&path).unwrap();
        assert!(record.is_empty());
        assert!(record.step_3.is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(parse_traffic_state_csv(dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let (_dir, path) = write_csv(concat!(
            "1,0,0,0,1.0,0.1,0,1,0\n",
            "2,0,0,0,2.0,0.2,0,2,0\n",
            "3,0,0,0,3.0,0.3,0,3,0\n",
        ));
        assert_eq!(
            parse_traffic_state_csv(&path).unwrap(),
            parse_traffic_state_csv(&path).unwrap()
        );
    }
}
