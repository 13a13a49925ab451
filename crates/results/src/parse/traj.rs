// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Trajectory location prediction JSON.

use crate::error::{Result, ResultsError};
use crate::metric::Metric;
use crate::result::TrajLocMetrics;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a trajectory location prediction JSON object.
///
/// `ACC@1`, `ACC@5`, `ACC@10`, `ACC@20`, `MRR@20` and `NDCG@20` are
/// extracted; a missing or non-numeric key is null. The bare `NaN`,
/// `Infinity` and `-Infinity` literals Python's `json` module writes are
/// accepted. Otherwise malformed JSON, or a document that is not an object,
/// is an error.
pub fn parse_traj_loc_json(path: impl AsRef<Path>) -> Result<TrajLocMetrics> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ResultsError::io(path, e))?;
    let content = quote_non_finite_literals(&content);
    let document: Value = serde_json::from_str(&content).map_err(|e| ResultsError::json(path, e))?;
    let object = document.as_object().ok_or_else(|| ResultsError::NotAnObject {
        path: path.to_path_buf(),
    })?;

    debug!(path = %path.display(), keys = object.len(), "Parsed trajectory result");
    Ok(TrajLocMetrics {
        acc_1: metric(object, "ACC@1"),
        acc_5: metric(object, "ACC@5"),
        acc_10: metric(object, "ACC@10"),
        acc_20: metric(object, "ACC@20"),
        mrr_20: metric(object, "MRR@20"),
        ndcg_20: metric(object, "NDCG@20"),
    })
}

/// Literals outside JSON proper that Python emits for non-finite floats.
/// `-Infinity` comes first so the sign is kept.
const NON_FINITE_LITERALS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Quote non-finite literals that appear outside strings, turning them into
/// string values that [`Metric::parse`] understands. Anything else is left
/// as is, so broken documents still fail to parse.
fn quote_non_finite_literals(content: &str) -> Cow<'_, str> {
    if !NON_FINITE_LITERALS.iter().any(|literal| content.contains(literal)) {
        return Cow::Borrowed(content);
    }

    let mut quoted = String::with_capacity(content.len() + 8);
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = content;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(literal) = NON_FINITE_LITERALS.iter().find(|l| rest.starts_with(**l)) {
            quoted.push('"');
            quoted.push_str(literal);
            quoted.push('"');
            rest = &rest[literal.len()..];
            continue;
        }
        quoted.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(quoted)
}

fn metric(object: &Map<String, Value>, key: &str) -> Option<Metric> {
    match object.get(key)? {
        Value::Number(n) => n.as_f64().map(Metric),
        Value::String(s) => Metric::parse(s),
        _ => None,
    }
}
