//! Best-effort mirroring of a run into the story store.

use picturebook_core::{Page, Story, StoryStatus};
use picturebook_interface::{StoryRepository, StorySession};

/// Wraps one persistence session so that store failures are logged and
/// counted but never returned.
///
/// The session is opened once by [`PersistenceMirror::open`] and released by
/// [`PersistenceMirror::close`], which consumes the mirror.
pub struct PersistenceMirror {
    session: Option<Box<dyn StorySession>>,
    failures: usize,
}

impl PersistenceMirror {
    /// Open a session on `repository`. Without a repository, or when opening
    /// fails, the mirror does nothing.
    pub async fn open(repository: Option<&dyn StoryRepository>) -> Self {
        let session = match repository {
            Some(repository) => match repository.open_session().await {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::error!(error = %e, "Could not open story session, continuing without persistence");
                    None
                }
            },
            None => None,
        };
        Self {
            session,
            failures: 0,
        }
    }

    /// Mirror that never writes.
    pub fn disabled() -> Self {
        Self {
            session: None,
            failures: 0,
        }
    }

    /// Whether a session is held.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Store operations that failed so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Record the story row.
    pub async fn create_story(&mut self, story: &Story) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.create_story(story).await {
            Ok(()) => tracing::debug!(story_id = %story.id(), "Story record created"),
            Err(e) => {
                self.failures += 1;
                tracing::error!(story_id = %story.id(), error = %e, "Failed to create story record");
            }
        }
    }

    /// Record one finished page.
    pub async fn save_page(&mut self, story_id: &str, page: &Page) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Err(e) = session.save_page(story_id, page).await {
            self.failures += 1;
            tracing::error!(
                story_id,
                page_number = *page.page_number(),
                error = %e,
                "Failed to save page"
            );
        }
    }

    /// Record a status change.
    pub async fn update_status(&mut self, story_id: &str, status: StoryStatus) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.update_status(story_id, status).await {
            Ok(true) => tracing::debug!(story_id, %status, "Story status stored"),
            Ok(false) => {
                tracing::warn!(story_id, %status, "No stored story to update")
            }
            Err(e) => {
                self.failures += 1;
                tracing::error!(story_id, %status, error = %e, "Failed to update story status");
            }
        }
    }

    /// Release the session.
    pub async fn close(self) {
        if let Some(session) = self.session {
            if let Err(e) = session.close().await {
                tracing::error!(error = %e, "Failed to close story session");
            }
        }
        if self.failures > 0 {
            tracing::warn!(failures = self.failures, "Some story writes were not stored");
        }
    }
}
