//! Terminal outcome of each source.

use serde::{Deserialize, Serialize};

/// What happened with the follow-up questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireOutcome {
    /// The source produced no groups, so no questionnaire was shown.
    NotOffered,
    Answered,
    Skipped,
}

/// Exactly one per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// The user skipped the prompt or gave up after an unrecognized file.
    SkippedBeforeExtraction,
    /// The user reviewed the tables and declined to donate.
    SkippedAfterReview,
    Donated { questionnaire: QuestionnaireOutcome },
}

impl SourceOutcome {
    pub fn is_donated(&self) -> bool {
        matches!(self, Self::Donated { .. })
    }
}

/// Outcome of one source plus how many files were submitted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: String,
    pub outcome: SourceOutcome,
    pub attempts: u32,
}
