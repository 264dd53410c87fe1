//! Error types for bunpo-core.

use thiserror::Error;

/// Errors from quiz generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The group has fewer than two members, so no discriminating
    /// question can be built. Callers fall back to a mixed quiz.
    #[error("group {group_id} has {size} point(s), need at least 2 for a quiz")]
    InsufficientGroupSize { group_id: String, size: usize },

    /// Two points in one group share a bare pattern. This breaks the
    /// single-correct-answer invariant and must be surfaced, not papered
    /// over.
    #[error("duplicate bare pattern {pattern:?} in group {group_id}")]
    DuplicatePattern { group_id: String, pattern: String },
}

/// Errors from a flashcard session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The chosen scope produced zero cards; there is no session to run.
    #[error("deck scope produced no cards")]
    EmptyDeck,

    /// The operation needs at least one hint revealed first (marking a
    /// fully hidden card, or show-all before the first reveal).
    #[error("card is still fully hidden")]
    CardHidden,
}
