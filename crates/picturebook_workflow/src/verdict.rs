//! Reading critiques as approve / revise decisions.

use serde::{Deserialize, Serialize};

/// The phrase a critic returns to approve a draft.
pub const APPROVAL_SENTINEL: &str = "APPROVED";

/// Outcome of one critique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CritiqueVerdict {
    /// The draft is finished
    Approved,
    /// The draft needs another pass; carries the critic's feedback
    Revise(String),
}

impl CritiqueVerdict {
    /// Whether this verdict ends refinement.
    pub fn is_approved(&self) -> bool {
        matches!(self, CritiqueVerdict::Approved)
    }
}

/// How strictly the approval sentinel is matched.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VerdictPolicy {
    /// The critique must be exactly `APPROVED`
    #[default]
    Exact,
    /// Surrounding whitespace, letter case and a trailing `.` or `!` are ignored
    Lenient,
}

/// Turns critic output into a [`CritiqueVerdict`].
pub trait CritiqueClassifier: Send + Sync {
    /// Classify one critique.
    fn classify(&self, critique: &str) -> CritiqueVerdict;
}

/// Classifier that looks for [`APPROVAL_SENTINEL`].
///
/// ```
/// use picturebook_workflow::{CritiqueClassifier, CritiqueVerdict, SentinelClassifier, VerdictPolicy};
///
/// let exact = SentinelClassifier::default();
/// assert_eq!(exact.classify("APPROVED"), CritiqueVerdict::Approved);
/// assert!(!exact.classify("Approved.").is_approved());
///
/// let lenient = SentinelClassifier::new(VerdictPolicy::Lenient);
/// assert!(lenient.classify("  Approved.\n").is_approved());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelClassifier {
    policy: VerdictPolicy,
}

impl SentinelClassifier {
    /// Classifier with the given policy.
    pub fn new(policy: VerdictPolicy) -> Self {
        Self { policy }
    }

    /// Active policy.
    pub fn policy(&self) -> VerdictPolicy {
        self.policy
    }

    fn matches(&self, critique: &str) -> bool {
        match self.policy {
            VerdictPolicy::Exact => critique == APPROVAL_SENTINEL,
            VerdictPolicy::Lenient => {
                let core = critique
                    .trim()
                    .trim_matches('"')
                    .trim_end_matches(['.', '!'])
                    .trim();
                core.eq_ignore_ascii_case(APPROVAL_SENTINEL)
            }
        }
    }
}

impl CritiqueClassifier for SentinelClassifier {
    fn classify(&self, critique: &str) -> CritiqueVerdict {
        if self.matches(critique) {
            CritiqueVerdict::Approved
        } else {
            CritiqueVerdict::Revise(critique.to_string())
        }
    }
}
