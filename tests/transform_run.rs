use std::fs;
use std::path::Path;

use tempfile::TempDir;
use transform_files::run::{self, TransformRequest};
use transform_files::{TransformOptions, MAPPING_FILE_NAME};
use uuid::Uuid;

const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn request(root: &Path, old: &str, new: &str, dry_run: bool) -> TransformRequest {
    TransformRequest {
        root: root.to_path_buf(),
        old_name: old.to_string(),
        new_name: new.to_string(),
        mapping_file: None,
        options: TransformOptions { dry_run },
    }
}

fn write_tree(root: &Path) {
    fs::write(root.join(MAPPING_FILE_NAME), r#"{"OldMod": "NewMod"}"#).unwrap();

    let mods = root.join("Mods").join("OldMod");
    fs::create_dir_all(&mods).unwrap();
    fs::write(mods.join("meta.lsx"), "<attribute id=\"Folder\" value=\"OldMod\"/>").unwrap();
    fs::write(
        mods.join(format!("{}.lsf.lsx", ID)),
        format!("<node UUID=\"{}\" Author=\"jane\"/>", ID),
    )
    .unwrap();
    fs::write(root.join("readme.txt"), format!("OldMod by jane, root {}", ID)).unwrap();
}

#[test]
fn full_run_rewrites_names_contents_and_identifiers() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_tree(root);

    let (prepared, report) = run::run(&request(root, "jane", "joan", false)).unwrap();

    let new_id = prepared.mapping.get(ID).unwrap().to_string();
    assert!(Uuid::parse_str(&new_id).is_ok());
    assert_ne!(new_id, ID);

    let mods = root.join("Mods").join("NewMod");
    assert!(!root.join("Mods").join("OldMod").exists());
    assert_eq!(
        fs::read_to_string(mods.join("meta.lsx")).unwrap(),
        "<attribute id=\"Folder\" value=\"NewMod\"/>"
    );

    let resource = mods.join(format!("{}.lsf.lsx", new_id));
    assert_eq!(
        fs::read_to_string(&resource).unwrap(),
        format!("<node UUID=\"{}\" Author=\"joan\"/>", new_id)
    );
    assert_eq!(
        fs::read_to_string(root.join("readme.txt")).unwrap(),
        format!("NewMod by joan, root {}", new_id)
    );

    assert_eq!(report.renames.len(), 2);
    assert!(report.warnings.is_empty());
}

#[test]
fn mapping_file_is_transformed_like_any_other_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join(MAPPING_FILE_NAME), r#"{"alpha": "beta"}"#).unwrap();

    run::run(&request(root, "x", "y", false)).unwrap();

    assert_eq!(
        fs::read_to_string(root.join(MAPPING_FILE_NAME)).unwrap(),
        r#"{"beta": "beta"}"#
    );
}

#[test]
fn chained_mapping_entries_are_observable() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join(MAPPING_FILE_NAME), r#"{"a": "b"}"#).unwrap();
    fs::write(root.join("note.md"), "a").unwrap();

    run::run(&request(root, "b", "c", false)).unwrap();

    assert_eq!(fs::read_to_string(root.join("note.md")).unwrap(), "c");
}

#[test]
fn missing_mapping_file_fails_before_any_mutation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("old")).unwrap();
    fs::write(root.join("old").join("old.txt"), "old").unwrap();

    let err = run::run(&request(root, "old", "new", false)).unwrap_err();

    assert_eq!(err.code.as_str(), "config.missing_file");
    assert_eq!(fs::read_to_string(root.join("old").join("old.txt")).unwrap(), "old");
    assert!(!root.join("new").exists());
}

#[test]
fn invalid_mapping_file_fails_before_any_mutation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join(MAPPING_FILE_NAME), "{ \"old\": ").unwrap();
    fs::write(root.join("old.txt"), "old").unwrap();

    let err = run::run(&request(root, "old", "new", false)).unwrap_err();

    assert_eq!(err.code.as_str(), "config.invalid_json");
    assert!(root.join("old.txt").exists());
}

#[test]
fn dry_run_reports_without_touching_disk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_tree(root);

    let (_, report) = run::run(&request(root, "jane", "joan", true)).unwrap();

    assert_eq!(report.renames.len(), 2);
    assert!(!report.edits.is_empty());
    assert!(root.join("Mods").join("OldMod").join("meta.lsx").exists());
    assert_eq!(
        fs::read_to_string(root.join(MAPPING_FILE_NAME)).unwrap(),
        r#"{"OldMod": "NewMod"}"#
    );
}
