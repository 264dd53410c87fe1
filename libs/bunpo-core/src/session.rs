//! Progressive-reveal flashcard sessions.
//!
//! A session owns an immutable deck snapshot and a cursor. Each card
//! starts fully hidden; hints are disclosed strictly one at a time until
//! the card is fully revealed, then the learner marks it on the 6-level
//! scale and the cursor advances. The deck wraps; sessions are endless
//! until the caller leaves.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::{ActivityKind, Conjunction, GrammarPoint, ItemKind, MarkLevel};

/// One disclosed unit of information about a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub label: String,
    pub content: String,
}

impl Hint {
    fn new(label: &str, content: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            content: content.into(),
        }
    }
}

/// A card in a deck: either a full grammar point or a conjunction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardItem {
    Grammar(GrammarPoint),
    Conjunction(Conjunction),
}

impl CardItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Grammar(_) => ItemKind::Grammar,
            Self::Conjunction(_) => ItemKind::Conjunction,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Grammar(p) => p.id,
            Self::Conjunction(c) => c.id,
        }
    }

    /// Front-of-card text.
    pub fn title(&self) -> &str {
        match self {
            Self::Grammar(p) => &p.title,
            Self::Conjunction(c) => &c.kana,
        }
    }

    /// The fixed hint sequence for this card. Order is part of the
    /// session contract: meaning first, examples before notes.
    pub fn hints(&self) -> Vec<Hint> {
        match self {
            Self::Conjunction(c) => vec![Hint::new("Meaning", c.meaning.clone())],
            Self::Grammar(p) => {
                let mut hints = vec![Hint::new("Meaning", p.meaning.clone())];
                if let Some(nuance) = &p.nuance {
                    hints.push(Hint::new("Nuance", nuance.clone()));
                }
                if !p.formation_list.is_empty() {
                    hints.push(Hint::new("Formation", p.formation_list.join("\n")));
                }
                if let Some(example) = p.examples.first() {
                    hints.push(Hint::new("Example (JP)", example.jp.clone()));
                    hints.push(Hint::new("Example (EN)", example.en.clone()));
                }
                if let Some(example) = p.examples.get(1) {
                    hints.push(Hint::new("Example 2 (JP)", example.jp.clone()));
                    hints.push(Hint::new("Example 2 (EN)", example.en.clone()));
                }
                if let Some(notes) = &p.notes {
                    hints.push(Hint::new("Notes", notes.clone()));
                }
                hints
            }
        }
    }
}

/// Which items a deck is built from. Resolved once at session start;
/// later catalog changes are invisible until a new deck is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum DeckScope {
    All,
    Group { group_id: String },
    Conjunctions,
}

/// Build an ordered deck snapshot for a scope. Catalog order is
/// preserved as given.
pub fn build_deck(
    scope: &DeckScope,
    points: &[GrammarPoint],
    conjunctions: &[Conjunction],
) -> Vec<CardItem> {
    match scope {
        DeckScope::All => points.iter().cloned().map(CardItem::Grammar).collect(),
        DeckScope::Group { group_id } => points
            .iter()
            .filter(|p| p.group_id.as_deref() == Some(group_id.as_str()))
            .cloned()
            .map(CardItem::Grammar)
            .collect(),
        DeckScope::Conjunctions => conjunctions
            .iter()
            .cloned()
            .map(CardItem::Conjunction)
            .collect(),
    }
}

/// What a completed mark asks the caller to persist. The session has
/// already advanced locally when this is returned; a failed remote write
/// is retried at the store boundary, never rolled back here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkOutcome {
    pub kind: ItemKind,
    pub item_id: i64,
    pub level: MarkLevel,
    pub activity: ActivityKind,
}

/// Flashcard session state machine.
#[derive(Debug, Clone)]
pub struct FlashcardSession {
    deck: Vec<CardItem>,
    current: usize,
    reveal_step: usize,
    hints: Vec<Hint>,
    /// Ephemeral per-session tally by mark level. Distinct from the
    /// durable mastery aggregate and never persisted.
    tally: [u32; 6],
}

impl FlashcardSession {
    pub fn new(deck: Vec<CardItem>) -> Result<Self, SessionError> {
        if deck.is_empty() {
            return Err(SessionError::EmptyDeck);
        }
        let hints = deck[0].hints();
        Ok(Self {
            deck,
            current: 0,
            reveal_step: 0,
            hints,
            tally: [0; 6],
        })
    }

    pub fn current_card(&self) -> &CardItem {
        &self.deck[self.current]
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn reveal_step(&self) -> usize {
        self.reveal_step
    }

    pub fn total_hints(&self) -> usize {
        self.hints.len()
    }

    pub fn all_revealed(&self) -> bool {
        self.reveal_step >= self.hints.len()
    }

    /// Hints disclosed so far, in order.
    pub fn revealed_hints(&self) -> &[Hint] {
        &self.hints[..self.reveal_step]
    }

    pub fn session_tally(&self) -> &[u32; 6] {
        &self.tally
    }

    /// Disclose exactly one more hint. No-op once everything is visible.
    pub fn reveal_next(&mut self) {
        if self.reveal_step < self.hints.len() {
            self.reveal_step += 1;
        }
    }

    /// Jump straight to fully revealed. Only offered after the learner
    /// has started revealing manually.
    pub fn reveal_all(&mut self) -> Result<(), SessionError> {
        if self.reveal_step == 0 {
            return Err(SessionError::CardHidden);
        }
        self.reveal_step = self.hints.len();
        Ok(())
    }

    /// Record a confidence level for the current card and advance.
    ///
    /// Rejected while the card is fully hidden; the confidence question
    /// is only asked once something has been revealed. On success the
    /// cursor wraps past the end of the deck and the returned outcome
    /// tells the caller what to write to the mastery and activity logs.
    pub fn mark(&mut self, level: MarkLevel) -> Result<MarkOutcome, SessionError> {
        if self.reveal_step == 0 {
            return Err(SessionError::CardHidden);
        }

        let card = &self.deck[self.current];
        let outcome = MarkOutcome {
            kind: card.kind(),
            item_id: card.id(),
            level,
            activity: ActivityKind::Flashcard,
        };

        self.tally[level.to_value() as usize] += 1;
        self.current = (self.current + 1) % self.deck.len();
        self.reveal_step = 0;
        self.hints = self.deck[self.current].hints();

        Ok(outcome)
    }
}
