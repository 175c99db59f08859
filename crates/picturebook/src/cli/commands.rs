//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use picturebook::StoryStatus;
use std::path::PathBuf;

/// Picturebook - illustrated, narrated children's stories from a topic
#[derive(Parser, Debug)]
#[command(name = "picturebook")]
#[command(about = "Generate illustrated, narrated children's stories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new story
    Generate {
        /// What the story is about
        #[arg(long)]
        topic: String,

        /// Age of the reader in years
        #[arg(long)]
        age: f64,
    },

    /// List stored stories, newest first
    List {
        /// Status filter
        #[arg(long)]
        status: Option<StoryStatus>,

        /// Maximum number of stories to display
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show one story with its pages and assets
    Show {
        /// Story identifier
        id: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Delete a stored story
    Delete {
        /// Story identifier
        id: String,

        /// Also remove the story's asset directory
        #[arg(long)]
        purge_assets: bool,
    },

    /// Interactive menu
    Menu,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
