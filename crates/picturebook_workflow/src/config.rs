//! Workflow tuning knobs.

use crate::VerdictPolicy;
use serde::{Deserialize, Serialize};

/// Default number of critique/rewrite rounds.
pub const DEFAULT_REFINEMENT_ITERATIONS: usize = 2;

/// Settings shared by the refinement loop and the segmenter.
///
/// ```
/// use picturebook_workflow::{VerdictPolicy, WorkflowConfig};
///
/// let config = WorkflowConfig::builder()
///     .refinement_iterations(3_usize)
///     .verdict_policy(VerdictPolicy::Lenient)
///     .build()
///     .unwrap();
/// assert_eq!(*config.refinement_iterations(), 3);
/// assert_eq!(*config.temperature(), None);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(default)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Maximum critique/rewrite rounds after the first draft
    refinement_iterations: usize,
    /// How critiques are read as approval
    verdict_policy: VerdictPolicy,
    /// Sampling temperature for text requests
    temperature: Option<f32>,
    /// Output token cap for text requests
    max_tokens: Option<u32>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            refinement_iterations: DEFAULT_REFINEMENT_ITERATIONS,
            verdict_policy: VerdictPolicy::default(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl WorkflowConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> WorkflowConfigBuilder {
        WorkflowConfigBuilder::default()
    }
}
