//! Core types for the grammar study engine.

use serde::{Deserialize, Serialize};

/// Characters that mark the attachment point in a pattern title (〜みたい).
/// Stripped before matching a pattern against example sentences.
pub const MARKER_GLYPHS: [char; 2] = ['〜', '～'];

/// Placeholder substituted for the pattern in fill-in-the-blank prompts.
pub const BLANK: &str = "＿＿";

/// One example sentence with its English gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub jp: String,
    pub en: String,
}

/// Formation by part-of-speech slot. `None` means the slot does not apply
/// to this pattern (e.g. っぽい after na-adjectives).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i_adjective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub na_adjective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noun: Option<String>,
}

/// A grammar point from the catalog. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarPoint {
    pub id: i64,
    pub week: i32,
    pub day: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub title: String,
    pub meaning: String,
    #[serde(default)]
    pub formation: Formation,
    #[serde(default)]
    pub formation_list: Vec<String>,
    pub examples: Vec<Example>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nuance: Option<String>,
}

impl GrammarPoint {
    /// Title with the marker glyphs stripped, as it appears in example
    /// sentences and quiz option lists.
    pub fn bare_pattern(&self) -> String {
        self.title
            .chars()
            .filter(|c| !MARKER_GLYPHS.contains(c))
            .collect()
    }
}

/// A set of mutually confusable grammar points. Group-scoped quizzes draw
/// their distractors exclusively from the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarGroup {
    pub id: String,
    pub label: String,
    pub week: i32,
    pub day: i32,
}

/// A conjunction card: structurally a grammar point with no formation and
/// no examples. Used only by flashcard sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conjunction {
    pub id: i64,
    pub kana: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanji: Option<String>,
    pub meaning: String,
}

/// What kind of item a mark attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Grammar,
    Conjunction,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Conjunction => "conjunction",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "grammar" => Some(Self::Grammar),
            "conjunction" => Some(Self::Conjunction),
            _ => None,
        }
    }
}

/// 6-point confidence scale. Ordinal labels only; there is no review
/// interval behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkLevel {
    Unmarked,
    MonthlyReview,
    CantConverse,
    CantWrite,
    CantUse,
    DontKnow,
}

impl Default for MarkLevel {
    fn default() -> Self {
        Self::Unmarked
    }
}

impl MarkLevel {
    /// Convert to the 0-5 numeric value used in storage.
    pub fn to_value(self) -> u8 {
        match self {
            Self::Unmarked => 0,
            Self::MonthlyReview => 1,
            Self::CantConverse => 2,
            Self::CantWrite => 3,
            Self::CantUse => 4,
            Self::DontKnow => 5,
        }
    }

    /// Create from the 0-5 numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unmarked),
            1 => Some(Self::MonthlyReview),
            2 => Some(Self::CantConverse),
            3 => Some(Self::CantWrite),
            4 => Some(Self::CantUse),
            5 => Some(Self::DontKnow),
            _ => None,
        }
    }

    /// Display label matching the marking panel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unmarked => "Not Marked",
            Self::MonthlyReview => "Monthly Review",
            Self::CantConverse => "Can't Converse",
            Self::CantWrite => "Can't Write",
            Self::CantUse => "Can't Use",
            Self::DontKnow => "Don't Know",
        }
    }

    /// Levels 2-5 flag an item for the needs-review dashboard count.
    pub fn needs_review(&self) -> bool {
        self.to_value() >= 2
    }

    /// All levels in ascending order.
    pub fn all() -> [MarkLevel; 6] {
        [
            Self::Unmarked,
            Self::MonthlyReview,
            Self::CantConverse,
            Self::CantWrite,
            Self::CantUse,
            Self::DontKnow,
        ]
    }
}

/// A generated multiple-choice question.
///
/// Invariant: `options` contains the correct bare pattern exactly once,
/// at `correct_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Blanked example sentence followed by its gloss on the next line.
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    /// Full title (with marker glyph) of the source point, for display.
    pub grammar_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Quiz mode recorded with each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    Group,
    Random,
}

impl QuizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Random => "random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "group" => Some(Self::Group),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Activity tag recorded against the daily study log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Flashcard,
    Quiz,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flashcard => "flashcard",
            Self::Quiz => "quiz",
        }
    }
}
