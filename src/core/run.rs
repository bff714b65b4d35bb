//! Run orchestration: validate, compose the mapping, then walk.
//!
//! The mapping is built from three sources in order: the mapping file, the
//! command-line override, and the generated identifiers. Everything that can
//! fail before the walk fails here, before any file is touched.

use crate::error::{Error, Result};
use crate::mapping::{Mapping, MAPPING_FILE_NAME};
use crate::remap::{self, IdentifierRemap};
use crate::transform::TransformOptions;
use crate::walker::{self, TransformEvent, TransformReport};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub root: PathBuf,
    pub old_name: String,
    pub new_name: String,
    /// Mapping file; `<root>/Transform.json` when unset.
    pub mapping_file: Option<PathBuf>,
    pub options: TransformOptions,
}

/// A validated run, ready to walk.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub root: PathBuf,
    pub mapping_file: PathBuf,
    pub mapping: Mapping,
    pub identifier_remaps: Vec<IdentifierRemap>,
    pub options: TransformOptions,
}

pub fn prepare(request: &TransformRequest) -> Result<PreparedRun> {
    let root = resolve_root(&request.root)?;
    let mapping_file = request
        .mapping_file
        .clone()
        .unwrap_or_else(|| root.join(MAPPING_FILE_NAME));

    let mut mapping = Mapping::load(&mapping_file)?;
    mapping.set(request.old_name.as_str(), request.new_name.as_str())?;

    let identifier_remaps = remap::scan(&root, &mut mapping)?;

    Ok(PreparedRun {
        root,
        mapping_file,
        mapping,
        identifier_remaps,
        options: request.options,
    })
}

/// Walk the prepared tree. `on_event` sees every rename and warning as it
/// happens, including those made before a fatal error.
pub fn execute(
    prepared: &PreparedRun,
    on_event: &mut dyn FnMut(&TransformEvent),
) -> Result<TransformReport> {
    if prepared.options.dry_run {
        log_status!("transform", "Dry run: no files will be modified");
    }
    walker::walk_with(&prepared.root, &prepared.mapping, prepared.options, on_event)
}

/// Prepare and execute in one step.
pub fn run(request: &TransformRequest) -> Result<(PreparedRun, TransformReport)> {
    let prepared = prepare(request)?;
    let report = execute(&prepared, &mut |_| {})?;
    Ok((prepared, report))
}

fn resolve_root(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(Error::root_not_found(path.display().to_string()));
    }
    path.canonicalize().map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("resolve {}", path.display())))
    })
}
