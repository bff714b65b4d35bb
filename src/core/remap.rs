//! Identifier remapping for `<uuid>.lsf.lsx` resource files.
//!
//! Every such file anywhere under the root gets a fresh v4 UUID. The
//! `old → new` pair joins the mapping so the main pass rewrites both the
//! filename and every reference to the old identifier.

use crate::error::{Error, Result};
use crate::mapping::Mapping;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Double extension marking structured resource files.
pub const RESOURCE_SUFFIX: &str = ".lsf.lsx";

/// One generated identifier assignment.
#[derive(Debug, Clone, Serialize)]
pub struct IdentifierRemap {
    pub from: String,
    pub to: String,
    /// File path relative to root.
    pub file: String,
}

/// Return the identifier candidate of a resource file name, if the name
/// follows the `<base>.lsf.lsx` convention and `<base>` parses as a UUID.
///
/// Accepted spellings: hyphenated, 32 bare hex digits, `{hyphenated}` and
/// `(hyphenated)`, in any letter case. `urn:uuid:` names are not identifiers.
pub fn parse_identifier(file_name: &str) -> Option<&str> {
    let base = file_name.strip_suffix(RESOURCE_SUFFIX)?;
    is_identifier(base).then_some(base)
}

fn is_identifier(base: &str) -> bool {
    if base
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"))
    {
        return false;
    }

    match base.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        Some(inner) => inner.len() == 36 && Uuid::parse_str(inner).is_ok(),
        None => Uuid::parse_str(base).is_ok(),
    }
}

/// Scan the whole tree and insert a fresh identifier for every resource file.
///
/// Keys are the identifier text exactly as spelled in the file name.
pub fn scan(root: &Path, mapping: &mut Mapping) -> Result<Vec<IdentifierRemap>> {
    let mut files = Vec::new();
    collect_resource_files(root, &mut files)?;

    let mut remaps = Vec::new();
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(identifier) = parse_identifier(name) else {
            continue;
        };

        let fresh = Uuid::new_v4().to_string();
        mapping.set(identifier, fresh.as_str())?;

        remaps.push(IdentifierRemap {
            from: identifier.to_string(),
            to: fresh,
            file: path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .to_string(),
        });
    }

    if !remaps.is_empty() {
        log_status!("remap", "Generated {} new identifier(s)", remaps.len());
    }

    Ok(remaps)
}

fn collect_resource_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("scan {}", dir.display())))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("scan {}", dir.display())))
        })?;
        let path = entry.path();

        if is_directory(entry.file_type(), &path)? {
            collect_resource_files(&path, files)?;
        } else if entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(RESOURCE_SUFFIX))
        {
            files.push(path);
        }
    }

    Ok(())
}

fn is_directory(file_type: std::io::Result<fs::FileType>, path: &Path) -> Result<bool> {
    file_type
        .map(|t| t.is_dir())
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("scan {}", path.display()))))
}
