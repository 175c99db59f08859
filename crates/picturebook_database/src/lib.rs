//! PostgreSQL persistence for Picturebook.
//!
//! Diesel models, schema and a [`PostgresStoryRepository`] implementing the
//! session-based [`picturebook_interface::StoryRepository`] contract.
//! Migrations are embedded and applied by [`run_migrations`].
//!
//! ```rust,ignore
//! use picturebook_database::PostgresStoryRepository;
//! use picturebook_interface::StoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = PostgresStoryRepository::connect(Some("postgres://localhost/picturebook"))?;
//! let mut session = repo.open_session().await?;
//! // ... create_story / save_page / update_status ...
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod conversions;
mod models;
mod story_repository;

/// Diesel table definitions.
pub mod schema;

pub use connection::{MIGRATIONS, establish_connection, run_migrations};
pub use models::{AssetRow, NewAssetRow, NewPageRow, NewStoryRow, PageRow, StoryRow};
pub use story_repository::{PostgresStoryRepository, PostgresStorySession};

use picturebook_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
