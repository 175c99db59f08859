//! End-to-end tests for the story orchestrator.

mod test_utils;

use picturebook_core::{Story, StoryStatus};
use picturebook_error::{PicturebookErrorKind, StoryErrorKind};
use picturebook_interface::{StoryFilter, StoryRepository};
use picturebook_storage::FileSystemStorage;
use picturebook_workflow::{InMemoryStoryRepository, StoryOrchestrator, WorkflowConfig};
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::{
    FailingStoryRepository, MockImageGenerator, MockReply, MockSpeechGenerator, MockTextDriver,
    Stage, UnavailableStoryRepository,
};

struct Harness {
    dir: TempDir,
    text: Arc<MockTextDriver>,
    illustrator: Arc<MockImageGenerator>,
    orchestrator: StoryOrchestrator,
}

fn harness(text: MockTextDriver, illustrator: MockImageGenerator) -> Harness {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(text);
    let illustrator = Arc::new(illustrator);
    let orchestrator = StoryOrchestrator::new(
        text.clone(),
        illustrator.clone(),
        Arc::new(MockSpeechGenerator::pcm()),
        Arc::new(FileSystemStorage::new(dir.path()).unwrap()),
    );
    Harness {
        dir,
        text,
        illustrator,
        orchestrator,
    }
}

fn assert_story_error(err: &picturebook_error::PicturebookError, expected: fn(&StoryErrorKind) -> bool) {
    match err.kind() {
        PicturebookErrorKind::Story(story) => assert!(expected(story.kind()), "{story}"),
        other => panic!("expected story error, got {other}"),
    }
}

#[tokio::test]
async fn test_brave_turtle_end_to_end() -> anyhow::Result<()> {
    let repo = Arc::new(InMemoryStoryRepository::new());
    let h = harness(MockTextDriver::new(), MockImageGenerator::png());
    let orchestrator = h.orchestrator.with_repository(repo.clone());

    let story = orchestrator.run("a brave turtle", 5.0).await?;

    assert_eq!(*story.status(), StoryStatus::Completed);
    assert_eq!(story.title(), "A Story about a brave turtle");
    assert!(story.id().starts_with("a_brave_turtle_"));
    assert!(*story.total_pages() >= 1);
    assert_eq!(*story.total_pages(), story.pages().len());
    for (index, page) in story.pages().iter().enumerate() {
        assert_eq!(*page.page_number() as usize, index + 1);
        assert!(!page.text().trim().is_empty());
        assert!(page.image().is_some());
        assert!(page.audio().is_some());
    }

    let writer_request = &h.text.requests(Stage::Writer)[0];
    assert_eq!(
        writer_request.user_text(),
        "Write a short story for a 5 year old child about a brave turtle."
    );

    let stored = repo.get_story(story.id()).await?.expect("stored story");
    assert_eq!(*stored.status(), StoryStatus::Completed);
    assert_eq!(stored.pages().len(), story.pages().len());
    assert_eq!(repo.sessions_opened(), 2);
    assert_eq!(repo.sessions_closed(), 2);
    Ok(())
}

#[tokio::test]
async fn test_segmentation_unavailable_still_yields_pages() -> anyhow::Result<()> {
    let text = MockTextDriver::new().default_reply(Stage::Editor, MockReply::error("editor offline"));
    let h = harness(text, MockImageGenerator::png());

    let story = h.orchestrator.run("a brave turtle", 5.0).await?;

    assert_eq!(*story.status(), StoryStatus::Completed);
    // The default draft has three paragraphs.
    assert_eq!(*story.total_pages(), 3);
    assert_eq!(
        story.pages()[0].illustration_prompt().as_deref(),
        Some("Children's book illustration: Tess the turtle was shy.")
    );
    Ok(())
}

#[tokio::test]
async fn test_topic_with_path_separators_keeps_its_media() -> anyhow::Result<()> {
    let h = harness(MockTextDriver::new(), MockImageGenerator::png());

    let story = h.orchestrator.run("cats and/or dogs", 5.0).await?;

    assert_eq!(*story.status(), StoryStatus::Completed);
    assert!(story.id().starts_with("cats_and_or_dogs_"));
    let story_dir = h.dir.path().join(story.id());
    for page in story.pages() {
        let image = page.image().as_ref().expect("page lost its image");
        let audio = page.audio().as_ref().expect("page lost its narration");
        assert_eq!(image.as_path().parent(), Some(story_dir.as_path()));
        assert!(image.as_path().exists());
        assert!(audio.as_path().exists());
    }
    Ok(())
}

#[tokio::test]
async fn test_refusing_illustrator_still_completes_with_audio() -> anyhow::Result<()> {
    let h = harness(MockTextDriver::new(), MockImageGenerator::refusing());

    let story = h.orchestrator.run("a sleepy owl", 4.5).await?;

    assert_eq!(*story.status(), StoryStatus::Completed);
    assert!(story.pages().iter().all(|page| page.image().is_none()));
    assert!(story.pages().iter().all(|page| page.audio().is_some()));
    assert_eq!(h.illustrator.calls(), story.pages().len());
    Ok(())
}

#[tokio::test]
async fn test_stored_story_round_trips_pages_and_assets() -> anyhow::Result<()> {
    let repo = Arc::new(InMemoryStoryRepository::new());
    let h = harness(MockTextDriver::new(), MockImageGenerator::png());
    let orchestrator = h.orchestrator.with_repository(repo.clone());

    let story = orchestrator.run("a brave turtle", 6.0).await?;
    let stored = repo.get_story(story.id()).await?.expect("stored story");

    assert_eq!(stored.pages().len(), 3);
    for (original, restored) in story.pages().iter().zip(stored.pages()) {
        assert_eq!(original.page_number(), restored.page_number());
        assert_eq!(original.text(), restored.text());
        assert_eq!(original.image(), restored.image());
        assert_eq!(original.audio(), restored.audio());
    }
    Ok(())
}

#[tokio::test]
async fn test_failed_run_marks_story_failed_and_closes_session() -> anyhow::Result<()> {
    let repo = Arc::new(InMemoryStoryRepository::new());
    let text = MockTextDriver::new().script(Stage::Writer, vec![MockReply::text("")]);
    let h = harness(text, MockImageGenerator::png());
    let orchestrator = h.orchestrator.with_repository(repo.clone());

    let err = orchestrator.run("an empty idea", 5.0).await.unwrap_err();

    assert_story_error(&err, |kind| matches!(kind, StoryErrorKind::EmptyDraft(_)));
    assert_eq!(repo.sessions_opened(), 1);
    assert_eq!(repo.sessions_closed(), 1);

    let listed = repo.list_stories(&StoryFilter::newest(10)).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, StoryStatus::Failed);
    assert_eq!(listed[0].total_pages, 0);
    Ok(())
}

#[tokio::test]
async fn test_generator_error_fails_the_run() -> anyhow::Result<()> {
    let repo = Arc::new(InMemoryStoryRepository::new());
    let h = harness(MockTextDriver::new(), MockImageGenerator::failing("permission denied"));
    let orchestrator = h.orchestrator.with_repository(repo.clone());

    assert!(orchestrator.run("a brave turtle", 5.0).await.is_err());

    let listed = repo.list_stories(&StoryFilter::newest(10)).await?;
    assert_eq!(listed[0].status, StoryStatus::Failed);
    assert_eq!(repo.sessions_closed(), 2);
    Ok(())
}

#[tokio::test]
async fn test_session_closed_once_on_success() -> anyhow::Result<()> {
    let repo = Arc::new(FailingStoryRepository::default());
    let h = harness(MockTextDriver::new(), MockImageGenerator::png());
    let orchestrator = h.orchestrator.with_repository(repo.clone());

    orchestrator.run("a brave turtle", 5.0).await?;

    assert_eq!(repo.sessions_opened(), 1);
    assert_eq!(repo.sessions_closed(), 1);
    Ok(())
}

#[tokio::test]
async fn test_persistence_failures_never_fail_a_run() -> anyhow::Result<()> {
    let repo = Arc::new(FailingStoryRepository::default());
    let h = harness(MockTextDriver::new(), MockImageGenerator::png());
    let orchestrator = h.orchestrator.with_repository(repo.clone());

    let story = orchestrator.run("a brave turtle", 5.0).await?;

    assert_eq!(*story.status(), StoryStatus::Completed);
    // create + one save per page + final status
    assert_eq!(repo.attempts(), 1 + story.pages().len() + 1);
    Ok(())
}

#[tokio::test]
async fn test_unavailable_store_is_skipped() -> anyhow::Result<()> {
    let h = harness(MockTextDriver::new(), MockImageGenerator::png());
    let orchestrator = h.orchestrator.with_repository(Arc::new(UnavailableStoryRepository));

    let story = orchestrator.run("a brave turtle", 5.0).await?;

    assert_eq!(*story.status(), StoryStatus::Completed);
    Ok(())
}

#[tokio::test]
async fn test_invalid_inputs_are_rejected_before_any_work() {
    let repo = Arc::new(InMemoryStoryRepository::new());
    let h = harness(MockTextDriver::new(), MockImageGenerator::png());
    let text = h.text.clone();
    let orchestrator = h.orchestrator.with_repository(repo.clone());

    let err = orchestrator.run("   ", 5.0).await.unwrap_err();
    assert_story_error(&err, |kind| matches!(kind, StoryErrorKind::EmptyTopic));

    let err = orchestrator.run("a brave turtle", 0.0).await.unwrap_err();
    assert_story_error(&err, |kind| matches!(kind, StoryErrorKind::InvalidAge(_)));

    let err = orchestrator.run("a brave turtle", f64::NAN).await.unwrap_err();
    assert_story_error(&err, |kind| matches!(kind, StoryErrorKind::InvalidAge(_)));

    assert_eq!(repo.sessions_opened(), 0);
    assert_eq!(text.calls(Stage::Writer), 0);
}

#[tokio::test]
async fn test_refinement_budget_comes_from_config() -> anyhow::Result<()> {
    let text = MockTextDriver::new()
        .default_reply(Stage::Critic, MockReply::text("More detail."));
    let h = harness(text, MockImageGenerator::png());
    let orchestrator = h.orchestrator.with_config(
        WorkflowConfig::builder()
            .refinement_iterations(4_usize)
            .build()?,
    );

    let story: Story = orchestrator.run("a brave turtle", 5.0).await?;

    assert_eq!(*story.status(), StoryStatus::Completed);
    assert_eq!(h.text.draft_generations(), 5);
    Ok(())
}

#[tokio::test]
async fn test_role_specific_drivers_are_used() -> anyhow::Result<()> {
    let editor = Arc::new(MockTextDriver::new());
    let critic = Arc::new(MockTextDriver::new());
    let h = harness(
        MockTextDriver::new().default_reply(Stage::Editor, MockReply::error("writer cannot edit")),
        MockImageGenerator::png(),
    );
    let orchestrator = h
        .orchestrator
        .with_critic(critic.clone())
        .with_editor(editor.clone());

    let story = orchestrator.run("a brave turtle", 5.0).await?;

    assert_eq!(*story.total_pages(), 3);
    assert_eq!(h.text.calls(Stage::Editor), 0);
    assert_eq!(h.text.calls(Stage::Critic), 0);
    assert_eq!(editor.calls(Stage::Editor), 1);
    assert_eq!(critic.calls(Stage::Critic), 1);
    Ok(())
}
