//! Per-entry transform: rewrite file contents, then rename the entry if its
//! substituted name differs.

use crate::error::{Error, Result};
use crate::mapping::Mapping;
use crate::substitute;
use crate::utils::io;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// Compute edits and renames without touching the disk.
    pub dry_run: bool,
}

/// A content rewrite of one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    pub file: String,
    pub replacements: usize,
}

/// A file or directory rename.
#[derive(Debug, Clone, Serialize)]
pub struct FileRename {
    pub from: String,
    pub to: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ContentUpdateFailed,
    RenameCollision,
    InvalidName,
    NonUtf8Name,
}

/// A per-entry problem that did not stop the run.
#[derive(Debug, Clone, Serialize)]
pub struct TransformWarning {
    pub kind: WarningKind,
    pub file: String,
    pub message: String,
}

/// Result of transforming a single entry.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    /// Where the entry lives on disk now.
    pub path: PathBuf,
    /// Where the entry lives once every rename is applied. Differs from
    /// `path` only in dry-run mode.
    pub logical_path: PathBuf,
    pub is_dir: bool,
    pub edit: Option<FileEdit>,
    pub rename: Option<FileRename>,
    pub warnings: Vec<TransformWarning>,
}

/// Transform one entry in place. `logical_parent` is the directory the entry
/// is reported under; outside dry-run mode it is the entry's parent.
pub fn apply(
    entry: &Path,
    logical_parent: &Path,
    mapping: &Mapping,
    options: TransformOptions,
) -> Result<EntryOutcome> {
    let metadata = fs::symlink_metadata(entry).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("stat {}", entry.display())))
    })?;
    let is_dir = metadata.is_dir();

    let raw_name = entry.file_name().unwrap_or_default();
    let logical_path = logical_parent.join(raw_name);

    let mut outcome = EntryOutcome {
        path: entry.to_path_buf(),
        logical_path: logical_path.clone(),
        is_dir,
        edit: None,
        rename: None,
        warnings: Vec::new(),
    };

    if !is_dir {
        match update_contents(entry, mapping, options) {
            Ok(replacements) => {
                outcome.edit = replacements.map(|replacements| FileEdit {
                    file: logical_path.display().to_string(),
                    replacements,
                })
            }
            Err(err) => outcome.warnings.push(TransformWarning {
                kind: WarningKind::ContentUpdateFailed,
                file: logical_path.display().to_string(),
                message: format!(
                    "Error updating file '{}': {}",
                    logical_path.display(),
                    error_detail(&err)
                ),
            }),
        }
    }

    let Some(name) = raw_name.to_str() else {
        // Substituting on a lossy copy would replace the undecodable bytes.
        let lossy = raw_name.to_string_lossy();
        if substitute::apply(&lossy, mapping) != lossy {
            outcome.warnings.push(TransformWarning {
                kind: WarningKind::NonUtf8Name,
                file: logical_path.display().to_string(),
                message: format!(
                    "Skipped rename of '{}': name is not valid UTF-8",
                    logical_path.display()
                ),
            });
        }
        return Ok(outcome);
    };

    let new_name = substitute::apply(name, mapping);
    if new_name == name {
        return Ok(outcome);
    }

    if !is_valid_name(&new_name) {
        outcome.warnings.push(TransformWarning {
            kind: WarningKind::InvalidName,
            file: logical_path.display().to_string(),
            message: format!(
                "Skipped rename of '{}': substituted name '{}' is not a valid file name",
                logical_path.display(),
                new_name
            ),
        });
        return Ok(outcome);
    }

    let Some(parent) = entry.parent() else {
        return Ok(outcome);
    };
    let target = parent.join(&new_name);
    let logical_target = logical_parent.join(&new_name);

    if fs::symlink_metadata(&target).is_ok() {
        outcome.warnings.push(TransformWarning {
            kind: WarningKind::RenameCollision,
            file: logical_target.display().to_string(),
            message: format!(
                "Skipped rename of '{}': target '{}' already exists",
                logical_path.display(),
                logical_target.display()
            ),
        });
        return Ok(outcome);
    }

    if !options.dry_run {
        fs::rename(entry, &target).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("rename {} → {}", entry.display(), target.display())),
            )
        })?;
        outcome.path = target;
    }

    outcome.rename = Some(FileRename {
        from: logical_path.display().to_string(),
        to: logical_target.display().to_string(),
        is_dir,
    });
    outcome.logical_path = logical_target;

    Ok(outcome)
}

/// Rewrite a file's contents, returning the replacement count, or `None`
/// when nothing changed.
fn update_contents(
    path: &Path,
    mapping: &Mapping,
    options: TransformOptions,
) -> Result<Option<usize>> {
    let content = io::read_text(path)?;
    let (updated, replacements) = substitute::apply_counted(&content, mapping);

    if updated == content {
        return Ok(None);
    }

    if !options.dry_run {
        io::write_text(path, &updated)?;
    }

    Ok(Some(replacements))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.chars().any(std::path::is_separator)
}

fn error_detail(err: &Error) -> String {
    err.details
        .get("error")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| err.message.clone())
}
