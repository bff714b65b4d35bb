use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use transform_files::remap::IdentifierRemap;
use transform_files::run::{execute, prepare, TransformRequest};
use transform_files::{
    FileEdit, FileRename, MappingEntry, TransformEvent, TransformOptions, TransformWarning,
};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Root directory to transform
    pub path: PathBuf,
    /// Text to replace (applied after the mapping file entries)
    pub old_name: String,
    /// Replacement text
    pub new_name: String,
    /// Mapping file (default: <path>/Transform.json)
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,
    /// Compute changes without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum TransformOutput {
    #[serde(rename = "transform")]
    Transform {
        root: String,
        mapping_file: String,
        dry_run: bool,
        mapping: Vec<MappingEntry>,
        identifier_remaps: Vec<IdentifierRemap>,
        edits: Vec<FileEdit>,
        renames: Vec<FileRename>,
        warnings: Vec<TransformWarning>,
        files_visited: usize,
        directories_visited: usize,
    },
}

pub fn run(args: TransformArgs, global: &GlobalArgs) -> CmdResult<TransformOutput> {
    let request = TransformRequest {
        root: args.path,
        old_name: args.old_name,
        new_name: args.new_name,
        mapping_file: args.mapping,
        options: TransformOptions {
            dry_run: args.dry_run,
        },
    };

    let prepared = prepare(&request)?;

    if !global.json {
        for (from, to) in prepared.mapping.iter() {
            println!("Transforming '{}' to '{}'", from, to);
        }
    }

    let mut completed: Vec<FileRename> = Vec::new();
    let result = execute(&prepared, &mut |event| {
        if let TransformEvent::Renamed(rename) = event {
            completed.push(rename.clone());
        }
        if !global.json {
            print_event(event);
        }
    });
    // Renames already on disk must survive a mid-walk failure.
    let report = result.map_err(|err| {
        let renames = serde_json::to_value(&completed).unwrap_or_default();
        err.with_detail("completedRenames", renames)
    })?;

    Ok((
        TransformOutput::Transform {
            root: prepared.root.display().to_string(),
            mapping_file: prepared.mapping_file.display().to_string(),
            dry_run: prepared.options.dry_run,
            mapping: prepared.mapping.entries(),
            identifier_remaps: prepared.identifier_remaps,
            edits: report.edits,
            renames: report.renames,
            warnings: report.warnings,
            files_visited: report.files_visited,
            directories_visited: report.directories_visited,
        },
        0,
    ))
}

fn print_event(event: &TransformEvent) {
    match event {
        TransformEvent::Renamed(rename) => println!("Renamed '{}' to '{}'", rename.from, rename.to),
        TransformEvent::Warning(warning) => println!("{}", warning.message),
    }
}
