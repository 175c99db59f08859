//! Per-story asset storage for Picturebook.
//!
//! Assets are laid out one directory per story:
//!
//! ```text
//! outputs/
//! └── a_brave_turtle_1700000000/
//!     ├── page_1.png
//!     ├── page_1.wav
//!     ├── page_2.png
//!     └── page_2.wav
//! ```
//!
//! Narration arrives as raw PCM and is wrapped with [`encode_wav`] before it
//! is written.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use picturebook_core::AssetReference;
use picturebook_error::PicturebookResult;

mod filesystem;
mod metadata;
mod wav;

pub use filesystem::FileSystemStorage;
pub use metadata::MediaMetadata;
pub use picturebook_error::{StorageError, StorageErrorKind};
pub use wav::{PcmFormat, WAV_HEADER_LEN, encode_wav};

/// Pluggable backend for story assets.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Write `data` to the slot described by `metadata` and return a reference.
    ///
    /// Writing the same slot twice replaces the earlier bytes.
    async fn store(&self, data: &[u8], metadata: &MediaMetadata)
    -> PicturebookResult<AssetReference>;

    /// Read an asset back.
    async fn retrieve(&self, reference: &AssetReference) -> PicturebookResult<Vec<u8>>;

    /// Remove one asset. Missing files are not an error.
    async fn delete(&self, reference: &AssetReference) -> PicturebookResult<()>;

    /// Whether the referenced asset is present.
    async fn exists(&self, reference: &AssetReference) -> PicturebookResult<bool>;

    /// Remove every asset of a story. Returns whether anything was removed.
    async fn delete_story(&self, story_id: &str) -> PicturebookResult<bool>;
}
