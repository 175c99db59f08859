//! Tests for per-page image and narration generation.

mod test_utils;

use picturebook_core::{AssetKind, GeneratedMedia, Page};
use picturebook_storage::{FileSystemStorage, WAV_HEADER_LEN};
use picturebook_workflow::PageAssetPipeline;
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::{
    FailingMediaStorage, MockBehavior, MockImageGenerator, MockSpeechGenerator,
    RendezvousGenerator, mock_drivers::MOCK_PCM_LEN,
};
use std::time::Duration;

fn storage(dir: &TempDir) -> Arc<FileSystemStorage> {
    Arc::new(FileSystemStorage::new(dir.path()).unwrap())
}

#[tokio::test]
async fn test_page_gets_image_and_wav_narration() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = PageAssetPipeline::new(
        Arc::new(MockImageGenerator::png()),
        Arc::new(MockSpeechGenerator::pcm()),
        storage(&dir),
    );
    let page = Page::new(1, "Tess the turtle was shy.", Some("A shy turtle".to_string()));

    let page = pipeline.process("brave_turtle_1", page).await?;

    let image = page.image().as_ref().expect("image");
    assert_eq!(*image.kind(), AssetKind::Image);
    assert_eq!(image.as_path(), dir.path().join("brave_turtle_1").join("page_1.png"));
    assert!(image.as_path().exists());

    let audio = page.audio().as_ref().expect("audio");
    assert_eq!(audio.as_path(), dir.path().join("brave_turtle_1").join("page_1.wav"));
    let wav = tokio::fs::read(audio.as_path()).await?;
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(wav.len(), WAV_HEADER_LEN + MOCK_PCM_LEN);
    assert_eq!(*audio.size_bytes(), Some(wav.len() as u64));
    Ok(())
}

#[tokio::test]
async fn test_missing_prompt_is_derived_from_text() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let illustrator = Arc::new(MockImageGenerator::png());
    let pipeline = PageAssetPipeline::new(
        illustrator.clone(),
        Arc::new(MockSpeechGenerator::pcm()),
        storage(&dir),
    );

    pipeline.process("story", Page::new(2, "The moon rose.", None)).await?;

    assert_eq!(
        illustrator.prompts(),
        vec!["Children's book illustration: The moon rose.".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_image_refusal_keeps_audio() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = PageAssetPipeline::new(
        Arc::new(MockImageGenerator::refusing()),
        Arc::new(MockSpeechGenerator::pcm()),
        storage(&dir),
    );

    let page = pipeline.process("story", Page::new(1, "Hello.", None)).await?;

    assert!(page.image().is_none());
    assert!(page.audio().is_some());
    Ok(())
}

#[tokio::test]
async fn test_page_without_any_media_is_kept() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = PageAssetPipeline::new(
        Arc::new(MockImageGenerator::refusing()),
        Arc::new(MockSpeechGenerator::silent()),
        storage(&dir),
    );

    let page = pipeline.process("story", Page::new(3, "Goodnight.", None)).await?;

    assert_eq!(*page.page_number(), 3);
    assert_eq!(page.text(), "Goodnight.");
    assert!(page.image().is_none());
    assert!(page.audio().is_none());
    Ok(())
}

#[tokio::test]
async fn test_image_and_narration_are_requested_concurrently() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let generator = Arc::new(RendezvousGenerator::new());
    let pipeline = PageAssetPipeline::new(generator.clone(), generator, storage(&dir));

    let page = tokio::time::timeout(
        Duration::from_secs(5),
        pipeline.process("story", Page::new(1, "Both at once.", None)),
    )
    .await
    .expect("image and narration calls did not overlap")?;

    assert!(page.image().is_some());
    assert!(page.audio().is_some());
    Ok(())
}

#[tokio::test]
async fn test_generator_error_fails_the_page_after_both_run() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let narrator = Arc::new(MockSpeechGenerator::pcm());
    let pipeline = PageAssetPipeline::new(
        Arc::new(MockImageGenerator::failing("quota exceeded")),
        narrator.clone(),
        storage(&dir),
    );

    let result = pipeline.process("story", Page::new(1, "Hi.", None)).await;

    assert!(result.is_err());
    assert_eq!(narrator.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_write_failure_is_degraded() -> anyhow::Result<()> {
    let pipeline = PageAssetPipeline::new(
        Arc::new(MockImageGenerator::png()),
        Arc::new(MockSpeechGenerator::pcm()),
        Arc::new(FailingMediaStorage),
    );

    let page = pipeline.process("story", Page::new(1, "Hi.", None)).await?;

    assert!(page.image().is_none());
    assert!(page.audio().is_none());
    Ok(())
}

#[tokio::test]
async fn test_partial_pcm_frame_drops_audio_only() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = PageAssetPipeline::new(
        Arc::new(MockImageGenerator::png()),
        Arc::new(MockSpeechGenerator::new(MockBehavior::Media(GeneratedMedia::new(
            "audio/L16;rate=24000",
            vec![0u8; 3],
        )))),
        storage(&dir),
    );

    let page = pipeline.process("story", Page::new(1, "Hi.", None)).await?;

    assert!(page.image().is_some());
    assert!(page.audio().is_none());
    Ok(())
}

#[tokio::test]
async fn test_jpeg_image_uses_jpg_extension() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = PageAssetPipeline::new(
        Arc::new(MockImageGenerator::new(MockBehavior::Media(GeneratedMedia::new(
            "image/jpeg",
            vec![0xFF, 0xD8, 0xFF],
        )))),
        Arc::new(MockSpeechGenerator::silent()),
        storage(&dir),
    );

    let page = pipeline.process("story", Page::new(4, "Hi.", None)).await?;

    let image = page.image().as_ref().expect("image");
    assert_eq!(image.as_path(), dir.path().join("story").join("page_4.jpg"));
    Ok(())
}
