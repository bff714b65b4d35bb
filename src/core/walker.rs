//! Depth-first tree walk.
//!
//! Each directory is enumerated one level at a time. Every entry of a level
//! is transformed before anything below it, and a renamed directory is
//! descended into through its new path.

use crate::error::{Error, Result};
use crate::mapping::Mapping;
use crate::transform::{
    self, EntryOutcome, FileEdit, FileRename, TransformOptions, TransformWarning,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Renames and warnings interleaved in the order they happened.
#[derive(Debug, Clone)]
pub enum TransformEvent {
    Renamed(FileRename),
    Warning(TransformWarning),
}

/// Everything a walk did, in visit order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformReport {
    pub edits: Vec<FileEdit>,
    pub renames: Vec<FileRename>,
    pub warnings: Vec<TransformWarning>,
    pub files_visited: usize,
    pub directories_visited: usize,
    #[serde(skip)]
    pub events: Vec<TransformEvent>,
}

impl TransformReport {
    fn record(&mut self, outcome: &EntryOutcome, on_event: &mut dyn FnMut(&TransformEvent)) {
        if outcome.is_dir {
            self.directories_visited += 1;
        } else {
            self.files_visited += 1;
        }
        if let Some(edit) = &outcome.edit {
            self.edits.push(edit.clone());
        }
        for warning in &outcome.warnings {
            self.warnings.push(warning.clone());
            self.push_event(TransformEvent::Warning(warning.clone()), on_event);
        }
        if let Some(rename) = &outcome.rename {
            self.renames.push(rename.clone());
            self.push_event(TransformEvent::Renamed(rename.clone()), on_event);
        }
    }

    fn push_event(&mut self, event: TransformEvent, on_event: &mut dyn FnMut(&TransformEvent)) {
        on_event(&event);
        self.events.push(event);
    }

    fn merge(&mut self, other: TransformReport) {
        self.edits.extend(other.edits);
        self.renames.extend(other.renames);
        self.warnings.extend(other.warnings);
        self.files_visited += other.files_visited;
        self.directories_visited += other.directories_visited;
        self.events.extend(other.events);
    }
}

/// A directory still to be descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdirectory {
    /// Current location on disk.
    pub path: PathBuf,
    /// Location as reported (post-rename, even in dry-run mode).
    pub logical_path: PathBuf,
}

/// Result of processing exactly one directory level.
#[derive(Debug, Clone, Default)]
pub struct LevelReport {
    pub report: TransformReport,
    pub subdirectories: Vec<Subdirectory>,
}

/// Walk `root` recursively, transforming every entry below it.
pub fn walk(root: &Path, mapping: &Mapping, options: TransformOptions) -> Result<TransformReport> {
    walk_with(root, mapping, options, &mut |_| {})
}

/// Like [`walk`], handing each rename and warning to `on_event` the moment it
/// happens. Events already delivered stay delivered if a later entry fails.
pub fn walk_with(
    root: &Path,
    mapping: &Mapping,
    options: TransformOptions,
    on_event: &mut dyn FnMut(&TransformEvent),
) -> Result<TransformReport> {
    let mut report = TransformReport::default();
    descend(root, root, mapping, options, on_event, &mut report)?;
    Ok(report)
}

fn descend(
    dir: &Path,
    logical_dir: &Path,
    mapping: &Mapping,
    options: TransformOptions,
    on_event: &mut dyn FnMut(&TransformEvent),
    report: &mut TransformReport,
) -> Result<()> {
    let level = walk_level(dir, logical_dir, mapping, options, on_event)?;
    report.merge(level.report);

    for sub in level.subdirectories {
        log_status!("transform", "Entering {}", sub.logical_path.display());
        descend(&sub.path, &sub.logical_path, mapping, options, on_event, report)?;
    }

    Ok(())
}

/// Transform the immediate entries of `dir` without descending.
///
/// The returned subdirectories are the post-rename paths a full walk would
/// recurse into next.
pub fn walk_level(
    dir: &Path,
    logical_dir: &Path,
    mapping: &Mapping,
    options: TransformOptions,
    on_event: &mut dyn FnMut(&TransformEvent),
) -> Result<LevelReport> {
    let mut level = LevelReport::default();

    for entry in list_entries(dir)? {
        let outcome = transform::apply(&entry, logical_dir, mapping, options)?;
        level.report.record(&outcome, on_event);

        if outcome.is_dir {
            level.subdirectories.push(Subdirectory {
                path: outcome.path,
                logical_path: outcome.logical_path,
            });
        }
    }

    Ok(level)
}

/// Snapshot one directory level. Collected up front so renames made while
/// processing cannot disturb the listing.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read_dir {}", dir.display())))
    })?;

    read.map(|entry| {
        entry.map(|e| e.path()).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read_dir {}", dir.display())))
        })
    })
    .collect()
}
