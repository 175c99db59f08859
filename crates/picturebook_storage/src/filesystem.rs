//! Filesystem-backed asset storage.

use crate::{MediaMetadata, MediaStorage};
use picturebook_core::AssetReference;
use picturebook_error::{PicturebookResult, StorageError, StorageErrorKind};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// Stores assets under `{base_path}/{story_id}/`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written page.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a filesystem store rooted at `base_path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> PicturebookResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened asset storage");
        Ok(Self { base_path })
    }

    /// Root directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding one story's assets.
    ///
    /// # Errors
    ///
    /// Rejects identifiers that are empty or would escape the root.
    pub fn story_dir(&self, story_id: &str) -> PicturebookResult<PathBuf> {
        let mut components = Path::new(story_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_path.join(story_id)),
            _ => Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "story id '{}' is not a single path segment",
                story_id
            )))
            .into()),
        }
    }

    /// Full path an asset will be written to.
    pub fn asset_path(&self, metadata: &MediaMetadata) -> PicturebookResult<PathBuf> {
        Ok(self.story_dir(&metadata.story_id)?.join(metadata.file_name()))
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait::async_trait]
impl MediaStorage for FileSystemStorage {
    #[tracing::instrument(
        skip(self, data, metadata),
        fields(story_id = %metadata.story_id, page = ?metadata.page_number, kind = %metadata.kind, size = data.len())
    )]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> PicturebookResult<AssetReference> {
        let path = self.asset_path(metadata)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_file_name(format!("{}.tmp", metadata.file_name()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        let hash = Self::compute_hash(data);
        tracing::debug!(path = %path.display(), hash = %hash, "Wrote asset");

        Ok(AssetReference::new(metadata.kind, path)
            .with_size_bytes(data.len() as u64)
            .with_content_hash(hash))
    }

    #[tracing::instrument(skip(self, reference), fields(path = %reference.as_path().display()))]
    async fn retrieve(&self, reference: &AssetReference) -> PicturebookResult<Vec<u8>> {
        let path = reference.as_path();
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string())).into()
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into()
            }
        })
    }

    async fn delete(&self, reference: &AssetReference) -> PicturebookResult<()> {
        match tokio::fs::remove_file(reference.as_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "delete {}: {}",
                reference.as_path().display(),
                e
            )))
            .into()),
        }
    }

    async fn exists(&self, reference: &AssetReference) -> PicturebookResult<bool> {
        tokio::fs::try_exists(reference.as_path()).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                reference.as_path().display(),
                e
            )))
            .into()
        })
    }

    #[tracing::instrument(skip(self))]
    async fn delete_story(&self, story_id: &str) -> PicturebookResult<bool> {
        let dir = self.story_dir(story_id)?;
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                tracing::info!(path = %dir.display(), "Removed story assets");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "remove {}: {}",
                dir.display(),
                e
            )))
            .into()),
        }
    }
}
