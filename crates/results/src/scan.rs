// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Directory scanner for the result tree.
//!
//! The tree is laid out as `<root>/<task>/<dataset>/<model>.{csv,json}`.
//! Every call re-reads the filesystem; nothing is cached. Listings are
//! sorted by name so repeated calls on an unchanged tree agree.

use crate::error::Result;
use crate::parse::parse_result_file;
use crate::result::{Leaderboard, RankingEntry};
use leaderboard_core::TaskKind;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Read-only view of a result tree.
#[derive(Debug, Clone)]
pub struct ResultScanner {
    root: PathBuf,
}

impl ResultScanner {
    /// Create a scanner over `root`. The root need not exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The result root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Task directory names. Empty when the root does not exist.
    pub fn list_tasks(&self) -> Vec<String> {
        list_subdirectories(&self.root)
    }

    /// Dataset directory names under `task`. Empty when the task does not
    /// exist.
    pub fn list_datasets(&self, task: &str) -> Vec<String> {
        match self.task_dir(task) {
            Some(dir) => list_subdirectories(&dir),
            None => Vec::new(),
        }
    }

    /// Rankings for one dataset, one entry per result file, sorted by model.
    ///
    /// Unknown tasks and missing directories yield an empty list. A file
    /// that cannot be read, or a malformed JSON document, fails the call.
    pub fn list_rankings(&self, task: &str, dataset: &str) -> Result<Vec<RankingEntry>> {
        let Some(dir) = self.dataset_dir(task, dataset) else {
            return Ok(Vec::new());
        };
        let Some(kind) = TaskKind::from_name(task) else {
            warn!(task, dataset, "No parser for task, returning no rankings");
            return Ok(Vec::new());
        };

        let mut rankings = Vec::new();
        for (model, path) in result_files(&dir, kind.extension()) {
            let data = parse_result_file(kind, &path)?;
            rankings.push(RankingEntry::new(model, data));
        }

        info!(task, dataset, models = rankings.len(), "Loaded rankings");
        Ok(rankings)
    }

    /// Rankings for one dataset of a known task, stamped with the scan time.
    pub fn leaderboard(&self, kind: TaskKind, dataset: &str) -> Result<Leaderboard> {
        let rankings = self.list_rankings(kind.name(), dataset)?;
        Ok(Leaderboard::new(kind, dataset, rankings))
    }

    /// A leaderboard for every dataset of every known task in the tree.
    ///
    /// Task directories without a parser are skipped.
    pub fn scan_all(&self) -> Result<Vec<Leaderboard>> {
        let mut boards = Vec::new();
        for task in self.list_tasks() {
            let Some(kind) = TaskKind::from_name(&task) else {
                warn!(task = %task, "Skipping task without a parser");
                continue;
            };
            for dataset in self.list_datasets(&task) {
                boards.push(self.leaderboard(kind, &dataset)?);
            }
        }
        Ok(boards)
    }

    fn task_dir(&self, task: &str) -> Option<PathBuf> {
        is_plain_name(task).then(|| self.root.join(task))
    }

    fn dataset_dir(&self, task: &str, dataset: &str) -> Option<PathBuf> {
        if !is_plain_name(dataset) {
            return None;
        }
        self.task_dir(task).map(|dir| dir.join(dataset))
    }
}

/// True when `name` is exactly one normal path component. Rejects `..`,
/// `.`, separators and the empty string so queries stay inside the root.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    );
    if !plain {
        warn!(name, "Rejecting name that is not a single path component");
    }
    plain
}

/// Names of immediate subdirectories, sorted. Symlinks are followed.
fn list_subdirectories(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = read_dir_entries(dir)
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .map(|(name, _)| name)
        .collect();
    names.sort();
    debug!(dir = %dir.display(), count = names.len(), "Listed subdirectories");
    names
}

/// `(model, path)` for each non-hidden regular file with `extension`
/// directly in `dir`, sorted by model.
fn result_files(dir: &Path, extension: &str) -> Vec<(String, PathBuf)> {
    let mut files: Vec<(String, PathBuf)> = read_dir_entries(dir)
        .into_iter()
        .filter(|(name, path)| {
            !name.starts_with('.')
                && path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(extension)
        })
        .filter_map(|(_, path)| {
            let model = path.file_stem()?.to_str()?.to_string();
            Some((model, path))
        })
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}

/// `(file name, path)` for each entry of `dir`. A missing directory is
/// empty; other read failures are logged and treated the same way.
fn read_dir_entries(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Cannot read directory");
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(entry) => match entry.file_name().into_string() {
                Ok(name) => Some((name, entry.path())),
                Err(name) => {
                    warn!(name = ?name, "Skipping entry with non UTF-8 name");
                    None
                }
            },
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Cannot read directory entry");
                None
            }
        })
        .collect()
}
