//! Listing types shared by repositories and the CLI.

use chrono::{DateTime, Utc};
use picturebook_core::{Story, StoryStatus};
use serde::{Deserialize, Serialize};

/// Criteria for listing stories.
///
/// ```
/// use picturebook_interface::StoryFilter;
/// use picturebook_core::StoryStatus;
///
/// let filter = StoryFilter::builder()
///     .status(Some(StoryStatus::Completed))
///     .limit(Some(20))
///     .build()
///     .unwrap();
/// assert_eq!(*filter.limit(), Some(20));
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(default)]
pub struct StoryFilter {
    /// Only stories in this status
    status: Option<StoryStatus>,
    /// Maximum number of stories
    limit: Option<usize>,
    /// Stories to skip after sorting
    offset: Option<usize>,
}

impl StoryFilter {
    /// Start building a filter.
    pub fn builder() -> StoryFilterBuilder {
        StoryFilterBuilder::default()
    }

    /// The newest `limit` stories in any status.
    pub fn newest(limit: usize) -> Self {
        Self {
            status: None,
            limit: Some(limit),
            offset: None,
        }
    }
}

/// One row of a story listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySummary {
    /// Story identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Topic the story was generated from
    pub topic: String,
    /// Target reader age
    pub age: f64,
    /// Lifecycle status
    pub status: StoryStatus,
    /// Number of pages
    pub total_pages: usize,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Story> for StorySummary {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id().clone(),
            title: story.title().clone(),
            topic: story.topic().clone(),
            age: *story.age(),
            status: *story.status(),
            total_pages: *story.total_pages(),
            created_at: *story.created_at(),
        }
    }
}
