//! Picturebook: illustrated, narrated children's stories.
//!
//! Given a topic and a target reader age, Picturebook drafts a story,
//! refines it through critique rounds, splits it into pages, and gives each
//! page an illustration and a narration track.
//!
//! This facade re-exports the workspace crates:
//! - `picturebook_error`: error types
//! - `picturebook_core`: stories, pages, assets
//! - `picturebook_interface`: oracle and repository traits
//! - `picturebook_storage`: per-story asset files and WAV encoding
//! - `picturebook_workflow`: refinement, segmentation, assets, orchestration
//! - `picturebook_models` (feature `gemini`): Gemini text, image and speech
//! - `picturebook_database` (feature `database`): PostgreSQL persistence
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # async fn demo() -> picturebook::PicturebookResult<()> {
//! use picturebook::{
//!     FileSystemStorage, GeminiClient, GeminiImageClient, GeminiSpeechClient,
//!     PicturebookConfig, StoryOrchestrator,
//! };
//! use std::sync::Arc;
//!
//! let config = PicturebookConfig::load(None)?;
//! let key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
//!
//! let orchestrator = StoryOrchestrator::new(
//!     Arc::new(GeminiClient::new(key.clone(), &config.workflow.writer_model)?),
//!     Arc::new(GeminiImageClient::new(key.clone(), &config.media.image_model)?),
//!     Arc::new(GeminiSpeechClient::new(key, &config.media.speech_model)?),
//!     Arc::new(FileSystemStorage::new(&config.storage.output_dir)?),
//! )
//! .with_config(config.workflow_config());
//!
//! let story = orchestrator.run("a brave turtle", 5.0).await?;
//! println!("{} pages", story.total_pages());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{
    DEFAULT_CONFIG, DatabaseSettings, ENV_PREFIX, MediaSettings, PicturebookConfig,
    StorageSettings, WorkflowSettings,
};

pub use picturebook_core::*;
pub use picturebook_error::*;
pub use picturebook_interface::*;
pub use picturebook_storage::{
    FileSystemStorage, MediaMetadata, MediaStorage, PcmFormat, WAV_HEADER_LEN, encode_wav,
};
pub use picturebook_workflow::*;

#[cfg(feature = "gemini")]
pub use picturebook_models::*;

#[cfg(feature = "database")]
pub use picturebook_database::{
    DatabaseResult, MIGRATIONS, PostgresStoryRepository, PostgresStorySession,
    establish_connection, run_migrations,
};
