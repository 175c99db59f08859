//! Story generation workflow for Picturebook.
//!
//! A [`StoryOrchestrator`] turns a topic and reader age into a [`Story`]:
//!
//! 1. [`RefinementLoop`] writes a draft, then alternates critique and rewrite
//!    until the critic approves or the iteration budget is spent.
//! 2. [`PageSegmenter`] asks an editor oracle for JSON pages and falls back to
//!    blank-line splitting.
//! 3. [`PageAssetPipeline`] generates each page's illustration and narration
//!    concurrently, one page at a time.
//! 4. [`PersistenceMirror`] copies progress into a [`StoryRepository`] without
//!    letting store failures affect the run.
//!
//! [`Story`]: picturebook_core::Story
//! [`StoryRepository`]: picturebook_interface::StoryRepository

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod config;
mod extraction;
mod in_memory_repository;
mod orchestrator;
mod persistence;
pub mod prompts;
mod refinement;
mod request;
mod segmenter;
mod verdict;

pub use assets::PageAssetPipeline;
pub use config::{DEFAULT_REFINEMENT_ITERATIONS, WorkflowConfig, WorkflowConfigBuilder};
pub use extraction::strip_code_fences;
pub use in_memory_repository::{InMemoryStoryRepository, InMemoryStorySession};
pub use orchestrator::StoryOrchestrator;
pub use persistence::PersistenceMirror;
pub use refinement::{RefinementLoop, RefinementOutcome};
pub use segmenter::{PageSegmenter, Segmentation, SegmentationSource, fallback_segments, parse_pages};
pub use verdict::{
    APPROVAL_SENTINEL, CritiqueClassifier, CritiqueVerdict, SentinelClassifier, VerdictPolicy,
};
