//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from bunpo-core
pub use bunpo_core::types::{
    ActivityKind, Conjunction, Example, Formation, GrammarGroup, GrammarPoint, ItemKind,
    MarkLevel, Question, QuizMode,
};
pub use bunpo_core::progress::{DaySlot, WeekProgress};

// === Database Entity Types ===

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Grammar point row with JSONB columns
#[derive(Debug, Clone, FromRow)]
pub struct DbGrammarPoint {
    pub id: i64,
    pub week: i32,
    pub day: i32,
    pub group_id: Option<String>,
    pub title: String,
    pub meaning: String,
    pub formation: Json<Formation>,
    pub formation_list: Json<Vec<String>>,
    pub examples: Json<Vec<Example>>,
    pub notes: Option<String>,
    pub nuance: Option<String>,
    pub sort_order: i32,
}

impl DbGrammarPoint {
    /// Convert to the core catalog type
    pub fn to_core(&self) -> GrammarPoint {
        GrammarPoint {
            id: self.id,
            week: self.week,
            day: self.day,
            group_id: self.group_id.clone(),
            title: self.title.clone(),
            meaning: self.meaning.clone(),
            formation: self.formation.0.clone(),
            formation_list: self.formation_list.0.clone(),
            examples: self.examples.0.clone(),
            notes: self.notes.clone(),
            nuance: self.nuance.clone(),
        }
    }
}

/// Grammar group row
#[derive(Debug, Clone, FromRow)]
pub struct DbGrammarGroup {
    pub id: String,
    pub label: String,
    pub week: i32,
    pub day: i32,
    pub sort_order: i32,
}

impl DbGrammarGroup {
    pub fn to_core(&self) -> GrammarGroup {
        GrammarGroup {
            id: self.id.clone(),
            label: self.label.clone(),
            week: self.week,
            day: self.day,
        }
    }
}

/// Conjunction row
#[derive(Debug, Clone, FromRow)]
pub struct DbConjunction {
    pub id: i64,
    pub kana: String,
    pub kanji: Option<String>,
    pub meaning: String,
    pub sort_order: i32,
}

impl DbConjunction {
    pub fn to_core(&self) -> Conjunction {
        Conjunction {
            id: self.id,
            kana: self.kana.clone(),
            kanji: self.kanji.clone(),
            meaning: self.meaning.clone(),
        }
    }
}

/// Stored baseline quiz question row
#[derive(Debug, Clone, FromRow)]
pub struct DbQuizQuestion {
    pub id: i64,
    pub group_id: Option<String>,
    pub question: String,
    pub options: Json<Vec<String>>,
    pub correct_index: i32,
}

impl DbQuizQuestion {
    /// Convert to a core Question. Stored questions carry no source
    /// title; display falls back to the prompt alone. An out-of-range
    /// stored index is clamped into the option list so the question
    /// invariant holds even for a bad bank row.
    pub fn to_question(&self) -> Question {
        let options = self.options.0.clone();
        let correct_index =
            (self.correct_index.max(0) as usize).min(options.len().saturating_sub(1));
        Question {
            id: format!("stored-{}", self.id),
            prompt: self.question.clone(),
            options,
            correct_index,
            grammar_title: String::new(),
            group_id: self.group_id.clone(),
        }
    }
}

/// Current mark row (one per user+item, upsert overwrites)
#[derive(Debug, Clone, FromRow)]
pub struct DbCardMark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_kind: String,
    pub item_id: i64,
    pub mark_level: i32,
    pub marked_at: DateTime<Utc>,
}

/// Daily activity row (one per user+date, tags grow monotonically)
#[derive(Debug, Clone, FromRow)]
pub struct DbActivity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub study_date: NaiveDate,
    pub activities: Vec<String>,
}

/// Quiz result row (append-only)
#[derive(Debug, Clone, FromRow)]
pub struct DbQuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_mode: String,
    pub group_id: Option<String>,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub answers: Json<Vec<AnswerOutcome>>,
    pub completed_at: DateTime<Utc>,
}

impl DbQuizResult {
    pub fn to_view(&self) -> QuizResultView {
        QuizResultView {
            id: self.id,
            quiz_mode: self.quiz_mode.clone(),
            group_id: self.group_id.clone(),
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            answers: self.answers.0.clone(),
            completed_at: self.completed_at,
        }
    }
}

/// Per-question outcome recorded with a quiz result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub correct: bool,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub user_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
}

// Catalog types
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogPointsQuery {
    pub week: Option<i32>,
    pub day: Option<i32>,
    pub group_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogPointsResponse {
    pub points: Vec<GrammarPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogGroupsResponse {
    pub groups: Vec<GrammarGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConjunctionsResponse {
    pub conjunctions: Vec<Conjunction>,
}

// Quiz types

/// Where the served questions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Generated,
    Stored,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub mode: QuizMode,
    pub group_id: Option<String>,
    pub source: QuestionSource,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizResultRequest {
    pub quiz_mode: String,
    pub group_id: Option<String>,
    pub total_questions: i32,
    pub correct_answers: i32,
    #[serde(default)]
    pub answers: Vec<AnswerOutcome>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizResultResponse {
    pub result_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResultsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResultView {
    pub id: Uuid,
    pub quiz_mode: String,
    pub group_id: Option<String>,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub answers: Vec<AnswerOutcome>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResultsResponse {
    pub results: Vec<QuizResultView>,
}

// Mark types
#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertMarkRequest {
    pub item_kind: String,
    pub item_id: i64,
    pub level: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkEntry {
    pub item_kind: String,
    pub item_id: i64,
    pub level: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarksResponse {
    pub marks: Vec<MarkEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkCountsResponse {
    /// Current marks per level, indexed 0-5.
    pub counts: [usize; 6],
    pub marked_total: usize,
    pub needs_review: usize,
}

// Activity types
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordActivityRequest {
    pub activity: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordActivityResponse {
    pub study_date: NaiveDate,
    pub activities: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityDatesQuery {
    pub window_days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityDatesResponse {
    pub dates: Vec<NaiveDate>,
}

// Progress types
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupMastery {
    pub group_id: String,
    pub label: String,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct ProgressSummaryResponse {
    pub streak: u32,
    pub week_view: Vec<DaySlot>,
    pub mark_counts: [usize; 6],
    pub marked_total: usize,
    pub needs_review: usize,
    pub quiz_accuracy: u32,
    pub weekly_progress: Vec<WeekProgress>,
    pub group_mastery: Vec<GroupMastery>,
    pub recent_results: Vec<QuizResultView>,
}
