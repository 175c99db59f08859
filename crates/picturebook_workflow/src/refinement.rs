//! Bounded critique-and-rewrite loop.

use crate::prompts::{
    CRITIC_INSTRUCTIONS, REFINER_INSTRUCTIONS, WRITER_INSTRUCTIONS, critique_prompt, refine_prompt,
};
use crate::request::{ask, text_request};
use crate::{CritiqueClassifier, CritiqueVerdict, SentinelClassifier, WorkflowConfig};
use picturebook_error::{PicturebookResult, StoryError, StoryErrorKind};
use picturebook_interface::TextDriver;
use std::sync::Arc;

/// Result of a refinement run.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct RefinementOutcome {
    /// Final story text
    text: String,
    /// Critique rounds that ran
    iterations: usize,
    /// Calls that produced a draft (the first draft plus every rewrite)
    draft_generations: usize,
    /// Whether the critic approved before the budget ran out
    approved: bool,
}

impl RefinementOutcome {
    /// Take the final text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Draft, then alternate critique and rewrite until approval or the
/// iteration budget is spent.
///
/// At most `refinement_iterations + 1` drafts are generated. When the critic
/// approves, the draft it reviewed is returned unchanged.
pub struct RefinementLoop {
    writer: Arc<dyn TextDriver>,
    critic: Arc<dyn TextDriver>,
    classifier: Arc<dyn CritiqueClassifier>,
    config: WorkflowConfig,
}

impl RefinementLoop {
    /// Loop where one driver writes, critiques and rewrites.
    pub fn new(writer: Arc<dyn TextDriver>, config: WorkflowConfig) -> Self {
        let classifier = Arc::new(SentinelClassifier::new(*config.verdict_policy()));
        Self {
            critic: Arc::clone(&writer),
            writer,
            classifier,
            config,
        }
    }

    /// Use a separate driver for critiques.
    pub fn with_critic(mut self, critic: Arc<dyn TextDriver>) -> Self {
        self.critic = critic;
        self
    }

    /// Replace the verdict classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn CritiqueClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Run the loop for a generation prompt.
    ///
    /// # Errors
    ///
    /// Fails if any oracle call fails or the first draft is empty.
    #[tracing::instrument(skip(self, prompt), fields(max_iterations = *self.config.refinement_iterations()))]
    pub async fn run(&self, prompt: &str) -> PicturebookResult<RefinementOutcome> {
        let request = text_request(WRITER_INSTRUCTIONS, prompt.to_string(), &self.config)?;
        let mut draft = ask(self.writer.as_ref(), &request).await?;
        let mut draft_generations = 1;

        if draft.is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyDraft(prompt.to_string())).into());
        }
        tracing::info!(draft_length = draft.len(), "Initial draft written");

        let max_iterations = *self.config.refinement_iterations();
        for iteration in 1..=max_iterations {
            let request = text_request(CRITIC_INSTRUCTIONS, critique_prompt(&draft), &self.config)?;
            let critique = self.critic.generate(&request).await?.joined_text();

            match self.classifier.classify(&critique) {
                CritiqueVerdict::Approved => {
                    tracing::info!(iteration, "Draft approved");
                    return Ok(RefinementOutcome {
                        text: draft,
                        iterations: iteration,
                        draft_generations,
                        approved: true,
                    });
                }
                CritiqueVerdict::Revise(feedback) => {
                    tracing::debug!(iteration, feedback_length = feedback.len(), "Revising draft");
                    let request = text_request(
                        REFINER_INSTRUCTIONS,
                        refine_prompt(&draft, feedback.trim()),
                        &self.config,
                    )?;
                    let rewrite = ask(self.writer.as_ref(), &request).await?;
                    draft_generations += 1;

                    if rewrite.is_empty() {
                        tracing::warn!(iteration, "Rewrite came back empty, keeping previous draft");
                    } else {
                        draft = rewrite;
                    }
                }
            }
        }

        tracing::warn!(
            iterations = max_iterations,
            "Refinement budget spent without approval, accepting last draft"
        );
        Ok(RefinementOutcome {
            text: draft,
            iterations: max_iterations,
            draft_generations,
            approved: false,
        })
    }
}
