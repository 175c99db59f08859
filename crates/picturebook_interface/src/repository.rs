//! Story persistence traits.
//!
//! A [`StoryRepository`] hands out [`StorySession`]s. The orchestrator opens one
//! session per run and closes it exactly once; read paths open and close a
//! session per call through the provided methods.

use crate::{StoryFilter, StorySummary};
use async_trait::async_trait;
use picturebook_core::{Page, Story, StoryStatus};
use picturebook_error::PicturebookResult;

/// A single-owner unit of work against the story store.
#[async_trait]
pub trait StorySession: Send {
    /// Insert the story record (without pages).
    async fn create_story(&mut self, story: &Story) -> PicturebookResult<()>;

    /// Insert or replace one page and its assets.
    async fn save_page(&mut self, story_id: &str, page: &Page) -> PicturebookResult<()>;

    /// Write the story record and every page in one go.
    async fn save_complete_story(&mut self, story: &Story) -> PicturebookResult<()>;

    /// Set the status column. Returns `false` when no such story exists.
    async fn update_status(&mut self, story_id: &str, status: StoryStatus)
    -> PicturebookResult<bool>;

    /// Load a story with its pages in page order.
    async fn load_story(&mut self, story_id: &str) -> PicturebookResult<Option<Story>>;

    /// Pages of a story in page order.
    async fn get_pages(&mut self, story_id: &str) -> PicturebookResult<Vec<Page>>;

    /// Newest stories first.
    async fn list_stories(&mut self, filter: &StoryFilter) -> PicturebookResult<Vec<StorySummary>>;

    /// Remove a story and its pages. Returns `false` when nothing was deleted.
    async fn delete_story(&mut self, story_id: &str) -> PicturebookResult<bool>;

    /// Release the session.
    async fn close(self: Box<Self>) -> PicturebookResult<()>;
}

/// Factory for story sessions plus one-shot read helpers.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Open a session for one run or one request.
    async fn open_session(&self) -> PicturebookResult<Box<dyn StorySession>>;

    /// Load one story, opening and closing a session around the call.
    async fn get_story(&self, story_id: &str) -> PicturebookResult<Option<Story>> {
        let mut session = self.open_session().await?;
        let result = session.load_story(story_id).await;
        session.close().await?;
        result
    }

    /// List stories, opening and closing a session around the call.
    async fn list_stories(&self, filter: &StoryFilter) -> PicturebookResult<Vec<StorySummary>> {
        let mut session = self.open_session().await?;
        let result = session.list_stories(filter).await;
        session.close().await?;
        result
    }

    /// Delete a story, opening and closing a session around the call.
    async fn delete_story(&self, story_id: &str) -> PicturebookResult<bool> {
        let mut session = self.open_session().await?;
        let result = session.delete_story(story_id).await;
        session.close().await?;
        result
    }
}
