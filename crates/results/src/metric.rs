// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Numeric metric values.
//!
//! Result files use the literal token `inf` for diverged runs. JSON has no
//! infinity, so a [`Metric`] serializes infinite values back as that same
//! token (`"inf"` / `"-inf"`) and finite values as plain numbers.

use serde::{Serialize, Serializer};
use std::fmt;

/// The token result files use for positive infinity.
pub const INF_TOKEN: &str = "inf";

/// A single metric value. May be infinite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Metric(pub f64);

impl Metric {
    /// Positive infinity.
    pub const INFINITY: Metric = Metric(f64::INFINITY);

    /// Parse a cell from a result file.
    ///
    /// Surrounding whitespace is ignored and `inf` is positive infinity.
    /// Returns `None` for anything that is not a number.
    pub fn parse(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell == INF_TOKEN {
            return Some(Self::INFINITY);
        }
        cell.parse::<f64>().ok().map(Metric)
    }

    /// The raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// True for positive infinity only.
    pub fn is_pos_infinite(self) -> bool {
        self.0 == f64::INFINITY
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            let sign = if self.0 < 0.0 { "-" } else { "" };
            write!(f, "{}{}", sign, INF_TOKEN)
        } else {
            write!(f, "{:.4}", self.0)
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_infinite() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inf_token() {
        assert_eq!(Metric::parse("inf"), Some(Metric::INFINITY));
        assert_eq!(Metric::parse(" inf "), Some(Metric::INFINITY));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(Metric::parse("1.5"), Some(Metric(1.5)));
        assert_eq!(Metric::parse("3e-2"), Some(Metric(0.03)));
        assert_eq!(Metric::parse("-2"), Some(Metric(-2.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Metric::parse(""), None);
        assert_eq!(Metric::parse("n/a"), None);
        assert_eq!(Metric::parse("1.2.3"), None);
    }

    #[test]
    fn test_serialize_infinity_as_token() {
        assert_eq!(serde_json::to_string(&Metric::INFINITY).unwrap(), "\"inf\"");
        assert_eq!(
            serde_json::to_string(&Metric(f64::NEG_INFINITY)).unwrap(),
            "\"-inf\""
        );
        assert_eq!(serde_json::to_string(&Metric(0.25)).unwrap(), "0.25");
    }

    #[test]
    fn test_display() {
        assert_eq!(Metric(2.5).to_string(), "2.5000");
        assert_eq!(Metric::INFINITY.to_string(), "inf");
    }
}
