// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark task kinds.
//!
//! A task is identified on disk by its directory name. Only the names listed
//! here have a result-file parser; every other directory name is reported by
//! the scanner but yields no rankings.

use crate::error::CoreError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Known benchmark task kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Multi-step traffic state forecasting (per-horizon CSV).
    TrafficStatePred,
    /// Estimated time of arrival (single-row masked-metric CSV).
    Eta,
    /// Next-location trajectory prediction (flat JSON of ranking metrics).
    TrajLocPred,
}

impl TaskKind {
    /// All known task kinds.
    pub const ALL: [TaskKind; 3] = [
        TaskKind::TrafficStatePred,
        TaskKind::Eta,
        TaskKind::TrajLocPred,
    ];

    /// Resolve a task directory name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Directory name of this task.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TrafficStatePred => "traffic_state_pred",
            Self::Eta => "eta",
            Self::TrajLocPred => "traj_loc_pred",
        }
    }

    /// File extension (without the dot) of this task's per-model result files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::TrafficStatePred | Self::Eta => "csv",
            Self::TrajLocPred => "json",
        }
    }

    /// Whether a larger headline metric ranks a model higher.
    ///
    /// Error metrics (MAE) rank ascending, accuracy metrics descending.
    pub fn higher_is_better(&self) -> bool {
        match self {
            Self::TrafficStatePred | Self::Eta => false,
            Self::TrajLocPred => true,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CoreError::UnknownTask(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_every_kind() {
        for kind in TaskKind::ALL {
            assert_eq!(TaskKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(TaskKind::from_name("ETA"), None);
        assert_eq!(TaskKind::from_name("Traffic_State_Pred"), None);
    }

    #[test]
    fn test_unknown_task_is_an_error() {
        let err = "road_representation".parse::<TaskKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownTask(ref name) if name == "road_representation"));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(TaskKind::TrafficStatePred.extension(), "csv");
        assert_eq!(TaskKind::Eta.extension(), "csv");
        assert_eq!(TaskKind::TrajLocPred.extension(), "json");
    }
}
