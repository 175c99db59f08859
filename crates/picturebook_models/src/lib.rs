//! Provider integrations for Picturebook.
//!
//! With the `gemini` feature this crate provides:
//! - [`GeminiClient`]: text generation through the `gemini-rust` SDK
//! - [`GeminiImageClient`]: page illustrations via `generateContent` with the
//!   `IMAGE` response modality
//! - [`GeminiSpeechClient`]: page narration via the `AUDIO` modality and a
//!   prebuilt voice
//!
//! Credentials are always passed in by the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    DEFAULT_API_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_SPEECH_MODEL, DEFAULT_TEXT_MODEL,
    DEFAULT_VOICE, GeminiClient, GeminiImageClient, GeminiResult, GeminiSpeechClient,
};
