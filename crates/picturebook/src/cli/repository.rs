//! Story repository selection.

use picturebook::{ConfigError, PicturebookConfig, PicturebookResult, StoryRepository};
use std::sync::Arc;

/// Repository configured for this run, or `None` when persistence is off.
///
/// # Errors
///
/// Returns an error if persistence is enabled but the database cannot be
/// reached or migrated.
#[cfg(feature = "database")]
pub fn open_repository(
    config: &PicturebookConfig,
) -> PicturebookResult<Option<Arc<dyn StoryRepository>>> {
    use picturebook::PostgresStoryRepository;

    if !config.database.enabled {
        tracing::debug!("Database persistence disabled in configuration");
        return Ok(None);
    }

    let url = config.database_url();
    let repository: Arc<dyn StoryRepository> =
        Arc::new(PostgresStoryRepository::connect(url.as_deref())?);
    tracing::info!("Connected to story database");
    Ok(Some(repository))
}

/// Repository configured for this run; always `None` without the `database` feature.
#[cfg(not(feature = "database"))]
pub fn open_repository(
    config: &PicturebookConfig,
) -> PicturebookResult<Option<Arc<dyn StoryRepository>>> {
    if config.database.enabled {
        tracing::warn!(
            "Database persistence is enabled in configuration but this build lacks the database feature"
        );
    }
    Ok(None)
}

/// Repository for commands that only read or delete stored stories.
///
/// # Errors
///
/// Returns a configuration error when persistence is disabled.
pub fn require_repository(config: &PicturebookConfig) -> PicturebookResult<Arc<dyn StoryRepository>> {
    open_repository(config)?.ok_or_else(|| {
        ConfigError::new(
            "Persistence is disabled. Set [database] enabled = true and rebuild with --features database",
        )
        .into()
    })
}
