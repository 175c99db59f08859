//! Trait definitions for Picturebook.
//!
//! Oracles ([`TextDriver`], [`ImageGenerator`], [`SpeechGenerator`]) and the
//! persistence gateway ([`StoryRepository`], [`StorySession`]) live here so
//! the workflow never depends on a concrete provider or database.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod repository;
mod traits;
mod types;

pub use repository::{StoryRepository, StorySession};
pub use traits::{ImageGenerator, SpeechGenerator, TextDriver};
pub use types::{StoryFilter, StoryFilterBuilder, StorySummary};
