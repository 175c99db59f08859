//! Stored story command handlers.

use super::commands::OutputFormat;
use super::repository::require_repository;
use picturebook::{
    ConfigError, FileSystemStorage, JsonError, MediaStorage, PicturebookConfig, PicturebookResult,
    Story, StoryFilter, StoryStatus,
};

/// List stored stories, newest first.
pub async fn list_stories(
    config: &PicturebookConfig,
    status: Option<StoryStatus>,
    limit: usize,
    format: OutputFormat,
) -> PicturebookResult<()> {
    let repository = require_repository(config)?;
    let filter = StoryFilter::builder()
        .status(status)
        .limit(Some(limit))
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid story filter: {}", e)))?;

    let stories = repository.list_stories(&filter).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&stories)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            println!("Stories (newest first):");
            println!("{:-<80}", "");
            for story in &stories {
                println!(
                    "{}  [{}]  {} pages  age {}  {}",
                    story.id,
                    story.status,
                    story.total_pages,
                    story.age,
                    story.created_at.format("%Y-%m-%d %H:%M")
                );
                println!("  {}", story.title);
            }
            println!("{:-<80}", "");
            println!("Total: {} stories", stories.len());
        }
    }

    Ok(())
}

/// Print one story. Returns `false` when no story has this id.
pub async fn show_story(
    config: &PicturebookConfig,
    id: &str,
    format: OutputFormat,
) -> PicturebookResult<bool> {
    let repository = require_repository(config)?;

    let Some(story) = repository.get_story(id).await? else {
        eprintln!("No story with id '{}'", id);
        return Ok(false);
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&story)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => print_story(&story),
    }

    Ok(true)
}

fn print_story(story: &Story) {
    println!("{}", story.title());
    println!("{:-<80}", "");
    println!("ID:      {}", story.id());
    println!("Topic:   {}", story.topic());
    println!("Age:     {}", story.age());
    println!("Status:  {}", story.status());
    println!("Created: {}", story.created_at());
    println!("Updated: {}", story.updated_at());
    if let Some(cover) = story.cover_image() {
        println!("Cover:   {}", cover.as_path().display());
    }

    for page in story.pages() {
        println!();
        println!("Page {}", page.page_number());
        println!("{}", page.text());
        if let Some(prompt) = page.illustration_prompt() {
            println!("  Illustration prompt: {}", prompt);
        }
        match page.image() {
            Some(image) => println!("  Image: {}", image.as_path().display()),
            None => println!("  Image: (none)"),
        }
        match page.audio() {
            Some(audio) => println!("  Audio: {}", audio.as_path().display()),
            None => println!("  Audio: (none)"),
        }
    }
}

/// Delete a stored story, optionally with its asset directory.
///
/// Returns `false` when no story had this id.
pub async fn delete_story(
    config: &PicturebookConfig,
    id: &str,
    purge_assets: bool,
) -> PicturebookResult<bool> {
    let repository = require_repository(config)?;
    let deleted = repository.delete_story(id).await?;

    if deleted {
        println!("Deleted story '{}'", id);
    } else {
        eprintln!("No story with id '{}'", id);
    }

    if purge_assets {
        let storage = FileSystemStorage::new(&config.storage.output_dir)?;
        if storage.delete_story(id).await? {
            println!("Removed assets for '{}'", id);
        }
    }

    Ok(deleted)
}
