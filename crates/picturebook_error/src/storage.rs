//! Asset storage errors.

/// Ways writing or reading a story asset can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Story output directory could not be created
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Asset bytes could not be written
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Asset bytes could not be read back
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// No asset at the given location
    #[display("Asset not found: {}", _0)]
    NotFound(String),
    /// Story identifier cannot be used as a directory name
    #[display("Invalid storage path: {}", _0)]
    InvalidPath(String),
    /// Audio payload is not whole 16-bit samples
    #[display("Invalid PCM payload: {}", _0)]
    InvalidPcm(String),
}

/// Asset storage failure with the location that raised it.
///
/// ```
/// use picturebook_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("outputs/x/page_1.png".into()));
/// assert!(err.to_string().contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// Failure category
    pub kind: StorageErrorKind,
    /// Line that raised the error
    pub line: u32,
    /// File that raised the error
    pub file: &'static str,
}

impl StorageError {
    /// Wrap `kind` with the caller's location.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
