//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{BackendError, ConfigError, GeminiError, HttpError, JsonError, StorageError, StoryError};

/// Every failure a Picturebook crate can report.
///
/// ```
/// use picturebook_error::{PicturebookError, HttpError};
///
/// let err: PicturebookError = HttpError::new("timed out").into();
/// assert!(err.to_string().contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PicturebookErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Asset storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Story workflow error
    #[from(StoryError)]
    Story(StoryError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Picturebook error with kind discrimination.
///
/// ```
/// use picturebook_error::{PicturebookResult, StoryError, StoryErrorKind};
///
/// fn segment() -> PicturebookResult<usize> {
///     Err(StoryError::new(StoryErrorKind::NoPages))?
/// }
///
/// assert!(segment().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Picturebook Error: {}", _0)]
pub struct PicturebookError(Box<PicturebookErrorKind>);

impl PicturebookError {
    /// Create a new error from a kind.
    pub fn new(kind: PicturebookErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PicturebookErrorKind {
        &self.0
    }
}

impl<T> From<T> for PicturebookError
where
    T: Into<PicturebookErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Picturebook operations.
pub type PicturebookResult<T> = std::result::Result<T, PicturebookError>;
