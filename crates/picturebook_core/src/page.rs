//! A single page of a story.

use crate::AssetReference;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix used when a page needs an illustration prompt derived from its text.
pub const ILLUSTRATION_PROMPT_PREFIX: &str = "Children's book illustration: ";

/// Characters of page text carried into a derived illustration prompt.
pub const ILLUSTRATION_PROMPT_CHARS: usize = 200;

/// Build an illustration prompt from the start of a page's text.
///
/// Truncates on character boundaries, never mid code point.
///
/// ```
/// use picturebook_core::illustration_prompt_from_text;
///
/// let prompt = illustration_prompt_from_text("A turtle sets off.");
/// assert_eq!(prompt, "Children's book illustration: A turtle sets off.");
/// ```
pub fn illustration_prompt_from_text(text: &str) -> String {
    let excerpt: String = text.chars().take(ILLUSTRATION_PROMPT_CHARS).collect();
    format!("{}{}", ILLUSTRATION_PROMPT_PREFIX, excerpt)
}

/// One unit of story text with at most one image and one narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Page {
    page_number: u32,
    text: String,
    illustration_prompt: Option<String>,
    image: Option<AssetReference>,
    audio: Option<AssetReference>,
    created_at: DateTime<Utc>,
}

impl Page {
    /// Create a page with no media attached.
    pub fn new(page_number: u32, text: impl Into<String>, illustration_prompt: Option<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            illustration_prompt,
            image: None,
            audio: None,
            created_at: Utc::now(),
        }
    }

    /// Illustration prompt, derived from the text when none was supplied.
    pub fn effective_illustration_prompt(&self) -> String {
        match self.illustration_prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
            _ => illustration_prompt_from_text(&self.text),
        }
    }

    /// Attach the page illustration.
    pub fn with_image(mut self, image: Option<AssetReference>) -> Self {
        self.image = image;
        self
    }

    /// Attach the page narration.
    pub fn with_audio(mut self, audio: Option<AssetReference>) -> Self {
        self.audio = audio;
        self
    }

    /// Override the creation time, used when rehydrating stored rows.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub(crate) fn set_page_number(&mut self, page_number: u32) {
        self.page_number = page_number;
    }
}
