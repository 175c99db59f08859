//! Oracle output parts.

use serde::{Deserialize, Serialize};

/// One part of a model response.
///
/// Media oracles may answer with text instead of media; callers treat a
/// response without the expected variant as "no usable media".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Generated image bytes.
    Image {
        /// MIME type of the image
        mime: String,
        /// Binary image data
        data: Vec<u8>,
    },

    /// Generated audio bytes.
    Audio {
        /// MIME type of the audio
        mime: String,
        /// Binary audio data
        data: Vec<u8>,
    },
}

impl Output {
    /// Text of a `Text` part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            _ => None,
        }
    }
}
