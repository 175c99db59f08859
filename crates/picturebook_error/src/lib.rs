//! Error types for the Picturebook story generator.
//!
//! Every concern gets a `*ErrorKind` enum naming the condition and a `*Error`
//! struct that pairs the kind with the source location captured through
//! `#[track_caller]`. [`PicturebookError`] boxes any of them so crates can
//! propagate with `?`.
//!
//! ```
//! use picturebook_error::{PicturebookResult, GeminiError, GeminiErrorKind};
//!
//! fn call_model() -> PicturebookResult<String> {
//!     Err(GeminiError::new(GeminiErrorKind::MissingApiKey))?
//! }
//!
//! assert!(call_model().unwrap_err().to_string().contains("API key"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod gemini;
mod http;
mod json;
mod storage;
mod story;

pub use backend::BackendError;
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{PicturebookError, PicturebookErrorKind, PicturebookResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
