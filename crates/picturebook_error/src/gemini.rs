//! Gemini provider errors.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// No API key was supplied to the client
    #[display("Gemini API key is empty")]
    MissingApiKey,
    /// Failed to create the SDK client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// Request failed before a status code was known
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// Non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Response body or SDK message
        message: String,
    },
    /// Inline media could not be decoded
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Response body did not have the documented shape
    #[display("Unexpected Gemini response: {}", _0)]
    UnexpectedResponse(String),
}

/// Gemini failure with the location that raised it.
///
/// ```
/// use picturebook_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::HttpError {
///     status_code: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(err.to_string().contains("HTTP 503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// Failure category
    pub kind: GeminiErrorKind,
    /// Line that raised the error
    pub line: u32,
    /// File that raised the error
    pub file: &'static str,
}

impl GeminiError {
    /// Wrap `kind` with the caller's location.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
