//! References to generated media.

use chrono::{DateTime, Utc};
use picturebook_error::{StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a generated asset depicts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Page illustration
    #[display("image")]
    Image,
    /// Page narration
    #[display("audio")]
    Audio,
    /// Story cover illustration
    #[display("cover")]
    Cover,
}

impl AssetKind {
    /// Lowercase name used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Audio => "audio",
            AssetKind::Cover => "cover",
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(AssetKind::Image),
            "audio" => Ok(AssetKind::Audio),
            "cover" => Ok(AssetKind::Cover),
            other => Err(StoryError::new(StoryErrorKind::UnknownAssetKind(
                other.to_string(),
            ))),
        }
    }
}

/// Pointer to a media file produced for a story.
///
/// Created once per successful generation and never mutated afterward.
///
/// ```
/// use picturebook_core::{AssetKind, AssetReference};
///
/// let image = AssetReference::new(AssetKind::Image, "outputs/owl_1/page_1.png")
///     .with_size_bytes(2048);
/// assert_eq!(*image.kind(), AssetKind::Image);
/// assert_eq!(*image.size_bytes(), Some(2048));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AssetReference {
    kind: AssetKind,
    path: PathBuf,
    cloud_url: Option<String>,
    size_bytes: Option<u64>,
    content_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl AssetReference {
    /// Reference a local file of the given kind.
    pub fn new(kind: AssetKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            cloud_url: None,
            size_bytes: None,
            content_hash: None,
            created_at: Utc::now(),
        }
    }

    /// Record the file size.
    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Record the SHA-256 of the written bytes.
    pub fn with_content_hash(mut self, content_hash: impl Into<String>) -> Self {
        self.content_hash = Some(content_hash.into());
        self
    }

    /// Record where the asset was mirrored remotely.
    pub fn with_cloud_url(mut self, cloud_url: impl Into<String>) -> Self {
        self.cloud_url = Some(cloud_url.into());
        self
    }

    /// Override the creation time, used when rehydrating stored rows.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Local path as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes, falling back to the file on disk when unknown.
    ///
    /// Returns `None` when neither is available.
    pub fn resolved_size_bytes(&self) -> Option<u64> {
        self.size_bytes
            .or_else(|| std::fs::metadata(&self.path).ok().map(|m| m.len()))
    }
}

/// Raw media returned by an image or speech oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMedia {
    /// MIME type reported by the provider
    pub mime: String,
    /// Decoded payload bytes
    pub data: Vec<u8>,
}

impl GeneratedMedia {
    /// Wrap decoded bytes.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }
}
