//! Story workflow errors.

/// Conditions that abort a story generation run or reject a model change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// The writer produced no usable first draft
    #[display("Initial draft for '{}' was empty", _0)]
    EmptyDraft(String),
    /// Segmentation produced no pages from the final text
    #[display("Story text produced no pages")]
    NoPages,
    /// Lifecycle status cannot move between these states
    #[display("Invalid status transition from {} to {}", from, to)]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
    /// Status string not recognized
    #[display("Unknown story status: {}", _0)]
    UnknownStatus(String),
    /// Asset kind string not recognized
    #[display("Unknown asset kind: {}", _0)]
    UnknownAssetKind(String),
    /// Target age outside the accepted range
    #[display("Invalid target age: {}", _0)]
    InvalidAge(String),
    /// Topic was blank
    #[display("Topic must not be empty")]
    EmptyTopic,
    /// Segmentation payload failed strict validation
    #[display("Malformed page payload: {}", _0)]
    MalformedPages(String),
}

/// Story error with location tracking.
///
/// ```
/// use picturebook_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::EmptyDraft("a brave turtle".into()));
/// assert!(err.to_string().contains("a brave turtle"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    kind: StoryErrorKind,
    line: u32,
    file: &'static str,
}

impl StoryError {
    /// Create a new story error with caller location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryErrorKind {
        &self.kind
    }
}
