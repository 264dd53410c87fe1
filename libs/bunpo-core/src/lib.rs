//! Core study-session engine shared by the backend.
//!
//! Provides:
//! - Quiz question generation (group-scoped distractors, mixed shuffle)
//! - Progressive-reveal flashcard sessions with 6-level marking
//! - Streak, week-view and mastery aggregation
//! - Shared catalog types (GrammarPoint, GrammarGroup, Conjunction, ...)

pub mod error;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod types;

pub use error::{QuizError, SessionError};
pub use progress::{
    build_week_view, compute_streak, percent_complete, quiz_accuracy, weekly_progress, DaySlot,
    MarkMap, WeekProgress,
};
pub use quiz::{generate_group_quiz, generate_mixed_quiz};
pub use session::{build_deck, CardItem, DeckScope, FlashcardSession, Hint, MarkOutcome};
pub use types::{
    ActivityKind, Conjunction, Example, Formation, GrammarGroup, GrammarPoint, ItemKind,
    MarkLevel, Question, QuizMode,
};
