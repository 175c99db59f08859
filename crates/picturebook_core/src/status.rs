//! Story lifecycle status.

use picturebook_error::{StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};

/// Where a story is in its lifecycle.
///
/// Status only moves forward: `Draft → Generating → Completed` or
/// `Generating → Failed`. `Archived` is an administrative end state reachable
/// from `Completed` or `Failed`.
///
/// ```
/// use picturebook_core::StoryStatus;
///
/// assert!(StoryStatus::Draft.can_transition_to(StoryStatus::Generating));
/// assert!(!StoryStatus::Completed.can_transition_to(StoryStatus::Generating));
/// assert_eq!(StoryStatus::Failed.to_string(), "failed");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    /// Created but not yet started
    #[default]
    #[display("draft")]
    Draft,
    /// Pipeline is running
    #[display("generating")]
    Generating,
    /// All phases finished
    #[display("completed")]
    Completed,
    /// A fatal error aborted the run
    #[display("failed")]
    Failed,
    /// Removed from active listings by an operator
    #[display("archived")]
    Archived,
}

impl StoryStatus {
    /// Lowercase name used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Draft => "draft",
            StoryStatus::Generating => "generating",
            StoryStatus::Completed => "completed",
            StoryStatus::Failed => "failed",
            StoryStatus::Archived => "archived",
        }
    }

    /// Whether moving from `self` to `next` respects the lifecycle.
    pub fn can_transition_to(&self, next: StoryStatus) -> bool {
        matches!(
            (self, next),
            (StoryStatus::Draft, StoryStatus::Generating)
                | (StoryStatus::Generating, StoryStatus::Completed)
                | (StoryStatus::Generating, StoryStatus::Failed)
                | (StoryStatus::Completed, StoryStatus::Archived)
                | (StoryStatus::Failed, StoryStatus::Archived)
        )
    }

    /// Whether no further pipeline transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StoryStatus::Completed | StoryStatus::Failed | StoryStatus::Archived
        )
    }
}

impl std::str::FromStr for StoryStatus {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(StoryStatus::Draft),
            "generating" => Ok(StoryStatus::Generating),
            "completed" => Ok(StoryStatus::Completed),
            "failed" => Ok(StoryStatus::Failed),
            "archived" => Ok(StoryStatus::Archived),
            other => Err(StoryError::new(StoryErrorKind::UnknownStatus(
                other.to_string(),
            ))),
        }
    }
}
