// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! ETA CSV.
//!
//! A header naming the columns, then a single row of masked metrics. Column
//! names are matched case-insensitively; only the first data row is read.

use super::csv_reader;
use crate::error::{Result, ResultsError};
use crate::metric::Metric;
use crate::result::EtaMetrics;
use std::path::Path;
use tracing::debug;

/// Parse an ETA CSV.
///
/// A target column whose cell is missing or not a number maps to null
/// without affecting the other columns. A file with no data row yields an
/// empty record.
pub fn parse_eta_csv(path: impl AsRef<Path>) -> Result<EtaMetrics> {
    let path = path.as_ref();
    let mut reader = csv_reader(path)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ResultsError::csv(path, e))?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let Some(row) = reader.records().find_map(|record| match record {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping undecodable row");
            None
        }
    }) else {
        debug!(path = %path.display(), "ETA result has no data row");
        return Ok(EtaMetrics::default());
    };

    let mut metrics = EtaMetrics::default();
    for (index, header) in headers.iter().enumerate() {
        if let Some(slot) = metrics.slot_mut(header) {
            *slot = Some(row.get(index).and_then(Metric::parse));
        }
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("DeepTTE.csv");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_case_insensitive_headers() {
        let (_dir, path) = write_csv("id,masked_MAE,masked_mape,masked_RMSE,x\n0,1.5,inf,2.5,z\n");
        let metrics = parse_eta_csv(&path).unwrap();
        assert_eq!(metrics.masked_mae, Some(Some(Metric(1.5))));
        assert_eq!(metrics.masked_mape, Some(Some(Metric::INFINITY)));
        assert_eq!(metrics.masked_rmse, Some(Some(Metric(2.5))));
    }

    #[test]
    fn test_only_first_row_is_read() {
        let (_dir, path) = write_csv("masked_MAE\n1.0\n2.0\n");
        let metrics = parse_eta_csv(&path).unwrap();
        assert_eq!(metrics.masked_mae, Some(Some(Metric(1.0))));
    }

    #[test]
    fn test_unparsable_cell_is_null_per_column() {
        let (_dir, path) = write_csv("masked_MAE,masked_MAPE,masked_RMSE\nabc,0.2\n");
        let metrics = parse_eta_csv(&path).unwrap();
        assert_eq!(
            serde_json::to_value(&metrics).unwrap(),
            json!({"masked_mae": null, "masked_mape": 0.2, "masked_rmse": null})
        );
    }

    #[test]
    fn test_absent_columns_are_omitted() {
        let (_dir, path) = write_csv("MAE,masked_RMSE\n1,3.5\n");
        let metrics = parse_eta_csv(&path).unwrap();
        assert_eq!(
            serde_json::to_value(&metrics).unwrap(),
            json!({"masked_rmse": 3.5})
        );
    }

    #[test]
    fn test_no_data_row_gives_empty_record() {
        let (_dir, path) = write_csv("masked_MAE,masked_MAPE,masked_RMSE\n");
        assert!(parse_eta_csv(&path).unwrap().is_empty());

        let (_dir, path) = write_csv("");
        assert!(parse_eta_csv(&path).unwrap().is_empty());
    }
}
