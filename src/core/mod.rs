// Public modules
pub mod error;
pub mod mapping;
pub mod remap;
pub mod run;
pub mod substitute;
pub mod transform;
pub mod walker;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use mapping::{Mapping, MappingEntry, MAPPING_FILE_NAME};
pub use run::{PreparedRun, TransformRequest};
pub use transform::{FileEdit, FileRename, TransformOptions, TransformWarning, WarningKind};
pub use walker::{TransformEvent, TransformReport};
