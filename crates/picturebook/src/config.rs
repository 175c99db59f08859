//! Layered application configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`picturebook.toml` shipped with the crate)
//! 2. `~/.config/picturebook/picturebook.toml`
//! 3. `./picturebook.toml`
//! 4. An explicit file passed with `--config`
//! 5. `PICTUREBOOK_<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use picturebook_error::{ConfigError, PicturebookError, PicturebookResult};
use picturebook_workflow::{VerdictPolicy, WorkflowConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../picturebook.toml");

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PICTUREBOOK";

/// `[workflow]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    /// Critique/rewrite rounds after the first draft
    pub refinement_iterations: usize,
    /// How critiques are read as approval
    pub verdict_policy: VerdictPolicy,
    /// Model that drafts and rewrites
    pub writer_model: String,
    /// Model that critiques; the writer model when unset
    #[serde(default)]
    pub critic_model: Option<String>,
    /// Model that splits the story into pages; the writer model when unset
    #[serde(default)]
    pub editor_model: Option<String>,
    /// Sampling temperature for text requests
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Output token cap for text requests
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// `[media]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSettings {
    /// Illustration model
    pub image_model: String,
    /// Narration model
    pub speech_model: String,
    /// Prebuilt narration voice
    pub voice: String,
    /// REST endpoint for image and speech requests
    pub api_base_url: String,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Root directory for per-story assets
    pub output_dir: PathBuf,
}

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Mirror stories into PostgreSQL
    pub enabled: bool,
    /// Connection URL; `DATABASE_URL` when unset
    #[serde(default)]
    pub url: Option<String>,
}

/// Top-level Picturebook configuration.
///
/// ```
/// use picturebook::PicturebookConfig;
///
/// let config = PicturebookConfig::from_toml_str("[workflow]\nrefinement_iterations = 4\n").unwrap();
/// assert_eq!(config.workflow.refinement_iterations, 4);
/// assert_eq!(config.media.voice, "Kore");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PicturebookConfig {
    /// Refinement and segmentation settings
    pub workflow: WorkflowSettings,
    /// Illustration and narration settings
    pub media: MediaSettings,
    /// Asset storage settings
    pub storage: StorageSettings,
    /// Persistence settings
    pub database: DatabaseSettings,
}

impl PicturebookConfig {
    /// Load configuration from every source, with `path` as an extra
    /// required file layered above the optional user files.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is missing or any source fails to parse.
    #[instrument]
    pub fn load(path: Option<&Path>) -> PicturebookResult<Self> {
        debug!("Loading configuration: env > explicit file > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/picturebook/picturebook.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("picturebook").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder.build())
    }

    /// Bundled defaults overridden by the TOML in `overrides`.
    ///
    /// # Errors
    ///
    /// Returns an error if `overrides` is not valid TOML or has wrong types.
    pub fn from_toml_str(overrides: &str) -> PicturebookResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(overrides, FileFormat::Toml))
                .build(),
        )
    }

    fn finish(built: Result<Config, config::ConfigError>) -> PicturebookResult<Self> {
        built
            .map_err(|e| {
                PicturebookError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PicturebookError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Workflow settings in the form the orchestrator takes.
    pub fn workflow_config(&self) -> WorkflowConfig {
        let mut builder = WorkflowConfig::builder();
        builder
            .refinement_iterations(self.workflow.refinement_iterations)
            .verdict_policy(self.workflow.verdict_policy)
            .temperature(self.workflow.temperature)
            .max_tokens(self.workflow.max_tokens);
        // Every field has a default, so the builder cannot fail.
        builder.build().unwrap_or_default()
    }

    /// Model for critiques.
    pub fn critic_model(&self) -> &str {
        self.workflow
            .critic_model
            .as_deref()
            .unwrap_or(&self.workflow.writer_model)
    }

    /// Model for page segmentation.
    pub fn editor_model(&self) -> &str {
        self.workflow
            .editor_model
            .as_deref()
            .unwrap_or(&self.workflow.writer_model)
    }

    /// Database URL from the config, then `DATABASE_URL`.
    pub fn database_url(&self) -> Option<String> {
        self.database
            .url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}
