//! The story aggregate.

use crate::{AssetReference, Page, StoryStatus};
use chrono::{DateTime, Utc};
use picturebook_error::{PicturebookResult, StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};

/// Derive a story identifier from its topic and creation time.
///
/// Every character other than a letter, digit, `-` or `_` becomes an
/// underscore and the unix timestamp in seconds is appended, so the id is
/// always a single file name.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use picturebook_core::story_id_for;
///
/// let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
/// assert_eq!(story_id_for("a brave turtle", at), "a_brave_turtle_1700000000");
/// assert_eq!(story_id_for("cats and/or dogs", at), "cats_and_or_dogs_1700000000");
/// ```
pub fn story_id_for(topic: &str, created_at: DateTime<Utc>) -> String {
    let slug: String = topic
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}", slug, created_at.timestamp())
}

/// A generated children's story and its pages.
///
/// `total_pages` always equals `pages.len()` and page numbers run `1..=N`;
/// every mutator below keeps both true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Story {
    id: String,
    title: String,
    topic: String,
    age: f64,
    status: StoryStatus,
    pages: Vec<Page>,
    cover_image: Option<AssetReference>,
    total_pages: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Story {
    /// Start a new draft story about `topic` for a reader of `age` years.
    pub fn new(topic: impl Into<String>, age: f64) -> Self {
        let topic = topic.into();
        let now = Utc::now();
        Self {
            id: story_id_for(&topic, now),
            title: format!("A Story about {}", topic),
            topic,
            age,
            status: StoryStatus::Draft,
            pages: Vec::new(),
            cover_image: None,
            total_pages: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Use a caller-supplied identifier instead of the derived one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Override the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Rebuild a story from stored fields.
    ///
    /// Pages are renumbered by position, so the page invariant holds even if
    /// the store returned gaps.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: impl Into<String>,
        title: impl Into<String>,
        topic: impl Into<String>,
        age: f64,
        status: StoryStatus,
        pages: Vec<Page>,
        cover_image: Option<AssetReference>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut story = Self {
            id: id.into(),
            title: title.into(),
            topic: topic.into(),
            age,
            status,
            pages: Vec::new(),
            cover_image,
            total_pages: 0,
            created_at,
            updated_at,
        };
        story.install_pages(pages);
        story.updated_at = updated_at;
        story
    }

    /// Move to `next`, rejecting transitions that would regress.
    pub fn transition_to(&mut self, next: StoryStatus) -> PicturebookResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(StoryError::new(StoryErrorKind::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            })
            .into());
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    /// `draft → generating`.
    pub fn mark_generating(&mut self) -> PicturebookResult<()> {
        self.transition_to(StoryStatus::Generating)
    }

    /// `generating → completed`.
    pub fn mark_completed(&mut self) -> PicturebookResult<()> {
        self.transition_to(StoryStatus::Completed)
    }

    /// `generating → failed`.
    pub fn mark_failed(&mut self) -> PicturebookResult<()> {
        self.transition_to(StoryStatus::Failed)
    }

    /// `completed | failed → archived`.
    pub fn archive(&mut self) -> PicturebookResult<()> {
        self.transition_to(StoryStatus::Archived)
    }

    /// Replace all pages, numbering them `1..=N` in the given order.
    pub fn assign_pages(&mut self, pages: Vec<Page>) {
        self.install_pages(pages);
    }

    /// Append a page as the next page number and return that number.
    pub fn add_page(&mut self, text: impl Into<String>, illustration_prompt: Option<String>) -> u32 {
        let page_number = self.next_page_number();
        self.pages
            .push(Page::new(page_number, text, illustration_prompt));
        self.total_pages = self.pages.len();
        self.touch();
        page_number
    }

    /// Swap in a processed page with the same page number.
    ///
    /// # Errors
    ///
    /// Fails if the story has no page with that number.
    pub fn update_page(&mut self, page: Page) -> PicturebookResult<()> {
        let slot = self
            .pages
            .iter_mut()
            .find(|existing| existing.page_number() == page.page_number())
            .ok_or_else(|| {
                StoryError::new(StoryErrorKind::MalformedPages(format!(
                    "story {} has no page {}",
                    self.id,
                    page.page_number()
                )))
            })?;
        *slot = page;
        self.touch();
        Ok(())
    }

    /// Attach a cover illustration.
    pub fn set_cover_image(&mut self, cover: AssetReference) {
        self.cover_image = Some(cover);
        self.touch();
    }

    /// Look up a page by its 1-based number.
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages
            .iter()
            .find(|page| *page.page_number() == page_number)
    }

    fn install_pages(&mut self, pages: Vec<Page>) {
        self.pages = pages
            .into_iter()
            .enumerate()
            .map(|(index, mut page)| {
                page.set_page_number(index as u32 + 1);
                page
            })
            .collect();
        self.total_pages = self.pages.len();
        self.touch();
    }

    fn next_page_number(&self) -> u32 {
        self.pages.len() as u32 + 1
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
