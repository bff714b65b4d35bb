//! Text file I/O for the transform pass.
//!
//! Files are read and written as UTF-8 text only. Bytes that do not decode
//! are reported, never replaced.

use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        let context = Some(format!("read {}", path.display()));
        match e.kind() {
            ErrorKind::InvalidData => Error::internal_io("file is not valid UTF-8 text", context),
            _ => Error::internal_io(e.to_string(), context),
        }
    })
}

/// Overwrite a file in place, keeping its inode and permissions.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("write {}", path.display()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_text_returns_contents() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "name=Widget").unwrap();

        assert_eq!(read_text(temp.path()).unwrap(), "name=Widget");
    }

    #[test]
    fn read_text_reports_binary_content() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0xff, 0xfe, 0xfd]).unwrap();

        let err = read_text(temp.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(err.details["error"], "file is not valid UTF-8 text");
        assert!(err.details["context"].as_str().unwrap().starts_with("read "));
    }

    #[test]
    fn read_text_reports_missing_file() {
        let err = read_text(Path::new("/nonexistent/path.txt")).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_ne!(err.details["error"], "file is not valid UTF-8 text");
    }

    #[test]
    fn write_text_replaces_contents() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "old and longer").unwrap();

        write_text(temp.path(), "new").unwrap();
        assert_eq!(fs::read_to_string(temp.path()).unwrap(), "new");
    }

    #[test]
    fn write_text_reports_missing_directory() {
        let err = write_text(Path::new("/nonexistent/dir/file.txt"), "content").unwrap_err();
        assert!(err.details["context"]
            .as_str()
            .unwrap()
            .starts_with("write /nonexistent/dir"));
    }
}
