//! In-memory implementation of [`StoryRepository`] for tests and runs
//! without a database.

use async_trait::async_trait;
use chrono::Utc;
use picturebook_core::{Page, Story, StoryStatus};
use picturebook_error::{BackendError, PicturebookResult};
use picturebook_interface::{StoryFilter, StoryRepository, StorySession, StorySummary};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// A story record and its pages keyed by page number.
#[derive(Debug, Clone)]
struct StoredStory {
    record: Story,
    pages: BTreeMap<u32, Page>,
}

impl StoredStory {
    fn to_story(&self) -> Story {
        let record = &self.record;
        Story::restore(
            record.id().clone(),
            record.title().clone(),
            record.topic().clone(),
            *record.age(),
            *record.status(),
            self.pages.values().cloned().collect(),
            record.cover_image().clone(),
            *record.created_at(),
            *record.updated_at(),
        )
    }

    fn summary(&self) -> StorySummary {
        let mut summary = StorySummary::from(&self.record);
        summary.total_pages = self.pages.len();
        summary
    }
}

type Stories = Arc<RwLock<HashMap<String, StoredStory>>>;

/// HashMap-backed story store.
///
/// Counts opened and closed sessions so callers can check session hygiene.
/// All data is lost when the last clone is dropped.
///
/// # Example
/// ```no_run
/// use picturebook_workflow::InMemoryStoryRepository;
/// use picturebook_interface::StoryRepository;
///
/// #[tokio::main]
/// async fn main() {
///     let repo = InMemoryStoryRepository::new();
///     let session = repo.open_session().await.unwrap();
///     session.close().await.unwrap();
///     assert_eq!(repo.sessions_closed(), 1);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    stories: Stories,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl InMemoryStoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored stories.
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }

    /// Drop every story.
    pub async fn clear(&self) {
        self.stories.write().await.clear();
    }

    /// Sessions handed out so far.
    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Sessions closed so far.
    pub fn sessions_closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn open_session(&self) -> PicturebookResult<Box<dyn StorySession>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryStorySession {
            stories: Arc::clone(&self.stories),
            closed: Arc::clone(&self.closed),
        }))
    }
}

/// Session over an [`InMemoryStoryRepository`].
#[derive(Debug)]
pub struct InMemoryStorySession {
    stories: Stories,
    closed: Arc<AtomicUsize>,
}

fn not_found(story_id: &str) -> BackendError {
    BackendError::new(format!("Story {} not found", story_id))
}

/// Copy of `story`'s record fields with no pages.
fn record_of(story: &Story) -> Story {
    Story::restore(
        story.id().clone(),
        story.title().clone(),
        story.topic().clone(),
        *story.age(),
        *story.status(),
        Vec::new(),
        story.cover_image().clone(),
        *story.created_at(),
        *story.updated_at(),
    )
}

#[async_trait]
impl StorySession for InMemoryStorySession {
    async fn create_story(&mut self, story: &Story) -> PicturebookResult<()> {
        let record = record_of(story);
        let mut stories = self.stories.write().await;
        match stories.get_mut(story.id()) {
            Some(stored) => stored.record = record,
            None => {
                stories.insert(
                    story.id().clone(),
                    StoredStory {
                        record,
                        pages: BTreeMap::new(),
                    },
                );
            }
        }
        Ok(())
    }

    async fn save_page(&mut self, story_id: &str, page: &Page) -> PicturebookResult<()> {
        let mut stories = self.stories.write().await;
        let stored = stories.get_mut(story_id).ok_or_else(|| not_found(story_id))?;
        stored.pages.insert(*page.page_number(), page.clone());
        Ok(())
    }

    async fn save_complete_story(&mut self, story: &Story) -> PicturebookResult<()> {
        let pages = story
            .pages()
            .iter()
            .map(|page| (*page.page_number(), page.clone()))
            .collect();
        self.stories.write().await.insert(
            story.id().clone(),
            StoredStory {
                record: record_of(story),
                pages,
            },
        );
        Ok(())
    }

    async fn update_status(
        &mut self,
        story_id: &str,
        status: StoryStatus,
    ) -> PicturebookResult<bool> {
        let mut stories = self.stories.write().await;
        let Some(stored) = stories.get_mut(story_id) else {
            return Ok(false);
        };
        let record = &stored.record;
        let updated = Story::restore(
            record.id().clone(),
            record.title().clone(),
            record.topic().clone(),
            *record.age(),
            status,
            Vec::new(),
            record.cover_image().clone(),
            *record.created_at(),
            Utc::now(),
        );
        stored.record = updated;
        Ok(true)
    }

    async fn load_story(&mut self, story_id: &str) -> PicturebookResult<Option<Story>> {
        Ok(self
            .stories
            .read()
            .await
            .get(story_id)
            .map(StoredStory::to_story))
    }

    async fn get_pages(&mut self, story_id: &str) -> PicturebookResult<Vec<Page>> {
        Ok(self
            .stories
            .read()
            .await
            .get(story_id)
            .map(|stored| stored.pages.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_stories(&mut self, filter: &StoryFilter) -> PicturebookResult<Vec<StorySummary>> {
        let stories = self.stories.read().await;
        let mut summaries: Vec<StorySummary> = stories
            .values()
            .filter(|stored| match filter.status() {
                Some(status) => stored.record.status() == status,
                None => true,
            })
            .map(StoredStory::summary)
            .collect();

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        let offset = filter.offset().unwrap_or(0);
        let limit = filter.limit().unwrap_or(usize::MAX);
        Ok(summaries.into_iter().skip(offset).take(limit).collect())
    }

    async fn delete_story(&mut self, story_id: &str) -> PicturebookResult<bool> {
        Ok(self.stories.write().await.remove(story_id).is_some())
    }

    async fn close(self: Box<Self>) -> PicturebookResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
