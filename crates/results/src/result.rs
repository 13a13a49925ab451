// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Normalized metric records and leaderboard types.
//!
//! Each task kind has its own record shape. [`MetricRecord`] serializes
//! untagged so the JSON for a ranking entry is just `{"model", "data"}` with
//! the task-specific fields inside `data`.

use crate::metric::Metric;
use chrono::{DateTime, Utc};
use leaderboard_core::TaskKind;
use serde::Serialize;

/// Forecast horizons reported for traffic state prediction.
pub const HORIZONS: [usize; 4] = [3, 6, 9, 12];

/// Error metrics for one horizon, or their average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorMetrics {
    /// Mean absolute error.
    pub mae: Metric,
    /// Root-mean-square error.
    pub rmse: Metric,
    /// Mean absolute percentage error.
    pub mape: Metric,
}

/// Traffic state prediction record.
///
/// Horizon `k` is the k-th parsed data row and is present only when the file
/// has at least `k` usable rows. An empty record means no usable rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrafficStateMetrics {
    /// Third row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_3: Option<ErrorMetrics>,
    /// Sixth row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_6: Option<ErrorMetrics>,
    /// Ninth row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_9: Option<ErrorMetrics>,
    /// Twelfth row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_12: Option<ErrorMetrics>,
    /// Average over every usable row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<ErrorMetrics>,
}

impl TrafficStateMetrics {
    /// Metrics for one of [`HORIZONS`].
    pub fn horizon(&self, step: usize) -> Option<&ErrorMetrics> {
        match step {
            3 => self.step_3.as_ref(),
            6 => self.step_6.as_ref(),
            9 => self.step_9.as_ref(),
            12 => self.step_12.as_ref(),
            _ => None,
        }
    }

    fn horizon_mut(&mut self, step: usize) -> Option<&mut Option<ErrorMetrics>> {
        match step {
            3 => Some(&mut self.step_3),
            6 => Some(&mut self.step_6),
            9 => Some(&mut self.step_9),
            12 => Some(&mut self.step_12),
            _ => None,
        }
    }

    /// Build a record from the parsed rows, in file order.
    pub fn from_rows(rows: &[ErrorMetrics]) -> Self {
        let mut record = Self::default();
        for step in HORIZONS {
            if let Some(slot) = record.horizon_mut(step) {
                *slot = rows.get(step - 1).copied();
            }
        }
        record.average = average(rows);
        record
    }

    /// True when the source file had no usable rows.
    pub fn is_empty(&self) -> bool {
        self.average.is_none()
    }
}

/// Average of per-row metrics.
///
/// MAE and RMSE divide by every row, so one infinite row makes the mean
/// infinite. MAPE averages only the rows that are not `inf`, and is `inf`
/// when every row is.
fn average(rows: &[ErrorMetrics]) -> Option<ErrorMetrics> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;
    let mae = rows.iter().map(|r| r.mae.value()).sum::<f64>() / n;
    let rmse = rows.iter().map(|r| r.rmse.value()).sum::<f64>() / n;

    let finite_mape: Vec<f64> = rows
        .iter()
        .filter(|r| !r.mape.is_pos_infinite())
        .map(|r| r.mape.value())
        .collect();
    let mape = if finite_mape.is_empty() {
        f64::INFINITY
    } else {
        finite_mape.iter().sum::<f64>() / finite_mape.len() as f64
    };

    Some(ErrorMetrics {
        mae: Metric(mae),
        rmse: Metric(rmse),
        mape: Metric(mape),
    })
}

/// ETA record.
///
/// The outer `Option` is `None` when the header has no such column (the key
/// is omitted); the inner one is `None` when the cell was missing or not a
/// number (the key serializes as `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EtaMetrics {
    /// Masked mean absolute error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_mae: Option<Option<Metric>>,
    /// Masked mean absolute percentage error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_mape: Option<Option<Metric>>,
    /// Masked root-mean-square error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_rmse: Option<Option<Metric>>,
}

impl EtaMetrics {
    /// Slot for a lowercased column name.
    pub(crate) fn slot_mut(&mut self, column: &str) -> Option<&mut Option<Option<Metric>>> {
        match column {
            "masked_mae" => Some(&mut self.masked_mae),
            "masked_mape" => Some(&mut self.masked_mape),
            "masked_rmse" => Some(&mut self.masked_rmse),
            _ => None,
        }
    }

    /// True when no target column was found (or the file had no data row).
    pub fn is_empty(&self) -> bool {
        self.masked_mae.is_none() && self.masked_mape.is_none() && self.masked_rmse.is_none()
    }
}

/// Trajectory location prediction record. Every key is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrajLocMetrics {
    /// `ACC@1`.
    pub acc_1: Option<Metric>,
    /// `ACC@5`.
    pub acc_5: Option<Metric>,
    /// `ACC@10`.
    pub acc_10: Option<Metric>,
    /// `ACC@20`.
    pub acc_20: Option<Metric>,
    /// `MRR@20`.
    pub mrr_20: Option<Metric>,
    /// `NDCG@20`.
    pub ndcg_20: Option<Metric>,
}

/// A normalized metric record for one model result file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricRecord {
    /// From a traffic state prediction CSV.
    TrafficState(TrafficStateMetrics),
    /// From an ETA CSV.
    Eta(EtaMetrics),
    /// From a trajectory prediction JSON.
    TrajLoc(TrajLocMetrics),
}

impl MetricRecord {
    /// Task kind this record was parsed for.
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::TrafficState(_) => TaskKind::TrafficStatePred,
            Self::Eta(_) => TaskKind::Eta,
            Self::TrajLoc(_) => TaskKind::TrajLocPred,
        }
    }

    /// The metric leaderboards are ordered by.
    ///
    /// Average MAE for traffic, masked MAE for ETA, ACC@1 for trajectories.
    pub fn headline(&self) -> Option<Metric> {
        match self {
            Self::TrafficState(m) => m.average.map(|a| a.mae),
            Self::Eta(m) => m.masked_mae.flatten(),
            Self::TrajLoc(m) => m.acc_1,
        }
    }

    /// Column headers for [`MetricRecord::cells`] of the given kind.
    pub fn columns(kind: TaskKind) -> &'static [&'static str] {
        match kind {
            TaskKind::TrafficStatePred => &[
                "Avg MAE", "Avg RMSE", "Avg MAPE", "MAE@3", "MAE@6", "MAE@9", "MAE@12",
            ],
            TaskKind::Eta => &["Masked MAE", "Masked MAPE", "Masked RMSE"],
            TaskKind::TrajLocPred => &["ACC@1", "ACC@5", "ACC@10", "ACC@20", "MRR@20", "NDCG@20"],
        }
    }

    /// Values for a leaderboard row, aligned with [`MetricRecord::columns`].
    pub fn cells(&self) -> Vec<Option<Metric>> {
        match self {
            Self::TrafficState(m) => {
                let mut cells = vec![
                    m.average.map(|a| a.mae),
                    m.average.map(|a| a.rmse),
                    m.average.map(|a| a.mape),
                ];
                cells.extend(HORIZONS.iter().map(|&step| m.horizon(step).map(|h| h.mae)));
                cells
            }
            Self::Eta(m) => vec![
                m.masked_mae.flatten(),
                m.masked_mape.flatten(),
                m.masked_rmse.flatten(),
            ],
            Self::TrajLoc(m) => vec![m.acc_1, m.acc_5, m.acc_10, m.acc_20, m.mrr_20, m.ndcg_20],
        }
    }
}

/// One model's entry in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    /// Result file stem.
    pub model: String,
    /// Parsed metrics.
    pub data: MetricRecord,
}

impl RankingEntry {
    /// Create a new entry.
    pub fn new(model: impl Into<String>, data: MetricRecord) -> Self {
        Self {
            model: model.into(),
            data,
        }
    }
}

/// The rankings of one (task, dataset) pair, stamped with the time they
/// were read.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    /// Task kind.
    pub task: TaskKind,
    /// Dataset directory name.
    pub dataset: String,
    /// When the result files were scanned.
    pub generated_at: DateTime<Utc>,
    /// One entry per result file, in scan order.
    pub rankings: Vec<RankingEntry>,
}

impl Leaderboard {
    /// Create a new Leaderboard stamped with the current time.
    pub fn new(task: TaskKind, dataset: impl Into<String>, rankings: Vec<RankingEntry>) -> Self {
        Self {
            task,
            dataset: dataset.into(),
            generated_at: Utc::now(),
            rankings,
        }
    }

    /// Entries ordered best first by the headline metric. Entries without a
    /// headline value (or with NaN) go last, in scan order.
    pub fn ranked(&self) -> Vec<&RankingEntry> {
        let higher_is_better = self.task.higher_is_better();
        let mut entries: Vec<&RankingEntry> = self.rankings.iter().collect();
        entries.sort_by(|a, b| {
            let key = |e: &RankingEntry| {
                e.data
                    .headline()
                    .map(Metric::value)
                    .filter(|v| !v.is_nan())
            };
            match (key(a), key(b)) {
                (Some(x), Some(y)) if higher_is_better => y.total_cmp(&x),
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        entries
    }

    /// Best entry by the headline metric, if any entry has one.
    pub fn leader(&self) -> Option<&RankingEntry> {
        self.ranked()
            .into_iter()
            .next()
            .filter(|entry| entry.data.headline().is_some())
    }
}
