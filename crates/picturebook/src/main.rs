//! Picturebook CLI binary.
//!
//! This binary provides command-line access to Picturebook:
//! - Generate a story from a topic and a reader age
//! - List, inspect and delete stored stories
//! - Drive everything from an interactive menu

use clap::Parser;
use picturebook::PicturebookConfig;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, delete_story, generate_story, list_stories, run_menu, show_story};

    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = PicturebookConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate { topic, age } => {
            generate_story(&config, &topic, age).await?;
        }

        Commands::List {
            status,
            limit,
            format,
        } => {
            list_stories(&config, status, limit, format).await?;
        }

        Commands::Show { id, format } => {
            if !show_story(&config, &id, format).await? {
                std::process::exit(1);
            }
        }

        Commands::Delete { id, purge_assets } => {
            if !delete_story(&config, &id, purge_assets).await? {
                std::process::exit(1);
            }
        }

        Commands::Menu => {
            run_menu(&config).await?;
        }
    }

    Ok(())
}
