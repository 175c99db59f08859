//! End-to-end story generation.

use crate::prompts::draft_prompt;
use crate::{
    CritiqueClassifier, PageAssetPipeline, PageSegmenter, PersistenceMirror, RefinementLoop,
    WorkflowConfig,
};
use picturebook_core::{Story, StoryStatus};
use picturebook_error::{PicturebookResult, StoryError, StoryErrorKind};
use picturebook_interface::{ImageGenerator, SpeechGenerator, StoryRepository, TextDriver};
use picturebook_storage::MediaStorage;
use std::sync::Arc;

/// Sequences drafting, segmentation, page assets and persistence for one
/// story.
///
/// Status moves `draft → generating → completed`, or to `failed` when a
/// stage returns an error. Store writes are best-effort and never change the
/// outcome. The store session is closed exactly once per run.
///
/// # Example
/// ```rust,ignore
/// use picturebook_workflow::{InMemoryStoryRepository, StoryOrchestrator};
/// use std::sync::Arc;
///
/// let orchestrator = StoryOrchestrator::new(text, illustrator, narrator, storage)
///     .with_repository(Arc::new(InMemoryStoryRepository::new()));
/// let story = orchestrator.run("a brave turtle", 5.0).await?;
/// assert!(story.total_pages() > &0);
/// ```
pub struct StoryOrchestrator {
    writer: Arc<dyn TextDriver>,
    critic: Arc<dyn TextDriver>,
    editor: Arc<dyn TextDriver>,
    classifier: Option<Arc<dyn CritiqueClassifier>>,
    assets: PageAssetPipeline,
    repository: Option<Arc<dyn StoryRepository>>,
    config: WorkflowConfig,
}

impl StoryOrchestrator {
    /// Orchestrator where `text` writes, critiques and edits.
    pub fn new(
        text: Arc<dyn TextDriver>,
        illustrator: Arc<dyn ImageGenerator>,
        narrator: Arc<dyn SpeechGenerator>,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            critic: Arc::clone(&text),
            editor: Arc::clone(&text),
            writer: text,
            classifier: None,
            assets: PageAssetPipeline::new(illustrator, narrator, storage),
            repository: None,
            config: WorkflowConfig::default(),
        }
    }

    /// Use a separate driver for critiques.
    pub fn with_critic(mut self, critic: Arc<dyn TextDriver>) -> Self {
        self.critic = critic;
        self
    }

    /// Use a separate driver for page segmentation.
    pub fn with_editor(mut self, editor: Arc<dyn TextDriver>) -> Self {
        self.editor = editor;
        self
    }

    /// Replace the classifier chosen by the config's verdict policy.
    pub fn with_classifier(mut self, classifier: Arc<dyn CritiqueClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Mirror runs into `repository`.
    pub fn with_repository(mut self, repository: Arc<dyn StoryRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Override the workflow settings.
    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Active workflow settings.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Generate a story about `topic` for a reader of `age` years.
    ///
    /// # Errors
    ///
    /// Returns the first fatal stage error (empty draft, oracle failure,
    /// no pages). The stored copy, if any, is marked failed first.
    #[tracing::instrument(skip(self), fields(story_id = tracing::field::Empty))]
    pub async fn run(&self, topic: &str, age: f64) -> PicturebookResult<Story> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyTopic).into());
        }
        if !age.is_finite() || age <= 0.0 {
            return Err(StoryError::new(StoryErrorKind::InvalidAge(age.to_string())).into());
        }

        let mut story = Story::new(topic, age);
        tracing::Span::current().record("story_id", story.id().as_str());
        story.mark_generating()?;

        let mut mirror = PersistenceMirror::open(self.repository.as_deref()).await;
        mirror.create_story(&story).await;

        let result = match self.generate(&mut story, &mut mirror).await {
            Ok(()) => story.mark_completed(),
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => {
                mirror.update_status(story.id(), StoryStatus::Completed).await;
                tracing::info!(pages = *story.total_pages(), "Story completed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Story generation failed");
                match story.mark_failed() {
                    Ok(()) => mirror.update_status(story.id(), StoryStatus::Failed).await,
                    Err(transition) => {
                        tracing::warn!(error = %transition, "Could not mark story failed")
                    }
                }
            }
        }

        mirror.close().await;
        result.map(|()| story)
    }

    async fn generate(&self, story: &mut Story, mirror: &mut PersistenceMirror) -> PicturebookResult<()> {
        let age = *story.age();

        tracing::info!("Phase 1/3: writing story text");
        let mut refinement = RefinementLoop::new(Arc::clone(&self.writer), self.config.clone())
            .with_critic(Arc::clone(&self.critic));
        if let Some(classifier) = &self.classifier {
            refinement = refinement.with_classifier(Arc::clone(classifier));
        }
        let outcome = refinement.run(&draft_prompt(story.topic(), age)).await?;
        tracing::info!(
            iterations = *outcome.iterations(),
            drafts = *outcome.draft_generations(),
            approved = *outcome.approved(),
            "Story text ready"
        );

        tracing::info!("Phase 2/3: structuring pages");
        let segmentation = PageSegmenter::new(Arc::clone(&self.editor), self.config.clone())
            .segment(outcome.text(), age)
            .await?;
        tracing::info!(
            pages = segmentation.pages().len(),
            source = %segmentation.source(),
            "Story structured"
        );
        story.assign_pages(segmentation.into_pages());

        tracing::info!(pages = *story.total_pages(), "Phase 3/3: generating page assets");
        let story_id = story.id().clone();
        for page in story.pages().clone() {
            let page = self.assets.process(&story_id, page).await?;
            mirror.save_page(&story_id, &page).await;
            story.update_page(page)?;
        }

        Ok(())
    }
}
