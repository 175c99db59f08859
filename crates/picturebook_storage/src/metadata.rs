//! Describes an asset about to be written.

use picturebook_core::AssetKind;

/// Where an asset belongs and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Story the asset belongs to
    pub story_id: String,
    /// Page number; `None` for story-level assets such as the cover
    pub page_number: Option<u32>,
    /// Asset kind
    pub kind: AssetKind,
    /// MIME type of the bytes being written
    pub mime_type: String,
}

impl MediaMetadata {
    /// Illustration for a page.
    pub fn page_image(story_id: impl Into<String>, page_number: u32, mime_type: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            page_number: Some(page_number),
            kind: AssetKind::Image,
            mime_type: mime_type.into(),
        }
    }

    /// WAVE narration for a page.
    pub fn page_audio(story_id: impl Into<String>, page_number: u32) -> Self {
        Self {
            story_id: story_id.into(),
            page_number: Some(page_number),
            kind: AssetKind::Audio,
            mime_type: "audio/wav".to_string(),
        }
    }

    /// Story cover.
    pub fn cover(story_id: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            page_number: None,
            kind: AssetKind::Cover,
            mime_type: mime_type.into(),
        }
    }

    /// File extension implied by the MIME type, defaulting by kind.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            _ => match self.kind {
                AssetKind::Audio => "wav",
                AssetKind::Image | AssetKind::Cover => "png",
            },
        }
    }

    /// File name inside the story directory.
    ///
    /// ```
    /// use picturebook_storage::MediaMetadata;
    ///
    /// assert_eq!(MediaMetadata::page_audio("owl_1", 3).file_name(), "page_3.wav");
    /// assert_eq!(MediaMetadata::cover("owl_1", "image/jpeg").file_name(), "cover.jpg");
    /// ```
    pub fn file_name(&self) -> String {
        match self.page_number {
            Some(page_number) => format!("page_{}.{}", page_number, self.extension()),
            None => format!("cover.{}", self.extension()),
        }
    }
}
