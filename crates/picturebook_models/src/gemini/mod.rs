//! Google Gemini clients.

mod client;
mod illustrator;
mod narrator;
mod rest;

pub use client::GeminiClient;
pub use illustrator::GeminiImageClient;
pub use narrator::GeminiSpeechClient;

/// Default model for drafting, critique, rewriting, and page layout.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-lite";
/// Default model for page illustrations.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// Default model for narration.
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
/// Default prebuilt narration voice.
pub const DEFAULT_VOICE: &str = "Kore";
/// REST endpoint root used by the media clients.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, picturebook_error::GeminiError>;
