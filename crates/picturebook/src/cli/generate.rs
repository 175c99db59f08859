//! Story generation command handler.

use picturebook::{PicturebookConfig, PicturebookResult, Story};

/// Generate a story and print a summary of it.
#[cfg(feature = "gemini")]
#[tracing::instrument(skip(config))]
pub async fn generate_story(
    config: &PicturebookConfig,
    topic: &str,
    age: f64,
) -> PicturebookResult<Story> {
    let orchestrator = build_orchestrator(config)?;
    let story = orchestrator.run(topic, age).await?;
    print_summary(&story);
    Ok(story)
}

#[cfg(not(feature = "gemini"))]
pub async fn generate_story(
    _config: &PicturebookConfig,
    _topic: &str,
    _age: f64,
) -> PicturebookResult<Story> {
    Err(picturebook::ConfigError::new(
        "Gemini feature not enabled. Rebuild with --features gemini",
    ))?
}

#[cfg(feature = "gemini")]
fn build_orchestrator(config: &PicturebookConfig) -> PicturebookResult<picturebook::StoryOrchestrator> {
    use super::repository::open_repository;
    use picturebook::{
        FileSystemStorage, GeminiClient, GeminiError, GeminiErrorKind, GeminiImageClient,
        GeminiSpeechClient, StoryOrchestrator,
    };
    use std::sync::Arc;

    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
    let writer_model = config.workflow.writer_model.as_str();

    let writer = Arc::new(GeminiClient::new(api_key.clone(), writer_model)?);
    let illustrator = GeminiImageClient::new(api_key.clone(), &config.media.image_model)?
        .with_base_url(&config.media.api_base_url);
    let narrator = GeminiSpeechClient::new(api_key.clone(), &config.media.speech_model)?
        .with_voice(&config.media.voice)
        .with_base_url(&config.media.api_base_url);
    let storage = FileSystemStorage::new(&config.storage.output_dir)?;

    let mut orchestrator = StoryOrchestrator::new(
        writer,
        Arc::new(illustrator),
        Arc::new(narrator),
        Arc::new(storage),
    )
    .with_config(config.workflow_config());

    if config.critic_model() != writer_model {
        orchestrator = orchestrator.with_critic(Arc::new(GeminiClient::new(
            api_key.clone(),
            config.critic_model(),
        )?));
    }
    if config.editor_model() != writer_model {
        orchestrator = orchestrator.with_editor(Arc::new(GeminiClient::new(
            api_key,
            config.editor_model(),
        )?));
    }

    match open_repository(config) {
        Ok(Some(repository)) => orchestrator = orchestrator.with_repository(repository),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Story database unavailable, generating without persistence"),
    }

    Ok(orchestrator)
}

#[cfg(feature = "gemini")]
fn print_summary(story: &Story) {
    println!("{}", story.title());
    println!("{:-<80}", "");
    println!("  ID:     {}", story.id());
    println!("  Topic:  {}", story.topic());
    println!("  Age:    {}", story.age());
    println!("  Status: {}", story.status());
    println!("  Pages:  {}", story.total_pages());
    for page in story.pages() {
        let image = if page.image().is_some() { "image" } else { "no image" };
        let audio = if page.audio().is_some() { "audio" } else { "no audio" };
        println!("    page {}: {}, {}", page.page_number(), image, audio);
    }
}
