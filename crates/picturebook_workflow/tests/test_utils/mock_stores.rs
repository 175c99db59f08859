//! Store doubles that fail on purpose.

use async_trait::async_trait;
use picturebook_core::{AssetReference, Page, Story, StoryStatus};
use picturebook_error::{BackendError, PicturebookResult, StorageError, StorageErrorKind};
use picturebook_interface::{StoryFilter, StoryRepository, StorySession, StorySummary};
use picturebook_storage::{MediaMetadata, MediaStorage};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Media storage whose writes always fail.
pub struct FailingMediaStorage;

#[async_trait]
impl MediaStorage for FailingMediaStorage {
    async fn store(&self, _data: &[u8], metadata: &MediaMetadata) -> PicturebookResult<AssetReference> {
        Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "disk full writing {}",
            metadata.file_name()
        )))
        .into())
    }

    async fn retrieve(&self, _reference: &AssetReference) -> PicturebookResult<Vec<u8>> {
        Err(StorageError::new(StorageErrorKind::FileRead("unavailable".to_string())).into())
    }

    async fn delete(&self, _reference: &AssetReference) -> PicturebookResult<()> {
        Ok(())
    }

    async fn exists(&self, _reference: &AssetReference) -> PicturebookResult<bool> {
        Ok(false)
    }

    async fn delete_story(&self, _story_id: &str) -> PicturebookResult<bool> {
        Ok(false)
    }
}

fn store_down<T>() -> PicturebookResult<T> {
    Err(BackendError::new("connection reset by peer").into())
}

/// Repository whose sessions open but reject every write and read.
#[derive(Default)]
pub struct FailingStoryRepository {
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    attempts: Arc<AtomicUsize>,
}

impl FailingStoryRepository {
    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Store operations attempted across all sessions.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoryRepository for FailingStoryRepository {
    async fn open_session(&self) -> PicturebookResult<Box<dyn StorySession>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FailingSession {
            closed: Arc::clone(&self.closed),
            attempts: Arc::clone(&self.attempts),
        }))
    }
}

struct FailingSession {
    closed: Arc<AtomicUsize>,
    attempts: Arc<AtomicUsize>,
}

impl FailingSession {
    fn attempt<T>(&self) -> PicturebookResult<T> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        store_down()
    }
}

#[async_trait]
impl StorySession for FailingSession {
    async fn create_story(&mut self, _story: &Story) -> PicturebookResult<()> {
        self.attempt()
    }

    async fn save_page(&mut self, _story_id: &str, _page: &Page) -> PicturebookResult<()> {
        self.attempt()
    }

    async fn save_complete_story(&mut self, _story: &Story) -> PicturebookResult<()> {
        self.attempt()
    }

    async fn update_status(&mut self, _story_id: &str, _status: StoryStatus) -> PicturebookResult<bool> {
        self.attempt()
    }

    async fn load_story(&mut self, _story_id: &str) -> PicturebookResult<Option<Story>> {
        self.attempt()
    }

    async fn get_pages(&mut self, _story_id: &str) -> PicturebookResult<Vec<Page>> {
        self.attempt()
    }

    async fn list_stories(&mut self, _filter: &StoryFilter) -> PicturebookResult<Vec<StorySummary>> {
        self.attempt()
    }

    async fn delete_story(&mut self, _story_id: &str) -> PicturebookResult<bool> {
        self.attempt()
    }

    async fn close(self: Box<Self>) -> PicturebookResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        store_down()
    }
}

/// Repository that cannot open sessions at all.
pub struct UnavailableStoryRepository;

#[async_trait]
impl StoryRepository for UnavailableStoryRepository {
    async fn open_session(&self) -> PicturebookResult<Box<dyn StorySession>> {
        store_down()
    }
}
