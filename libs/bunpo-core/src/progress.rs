//! Streak and mastery aggregation.
//!
//! Everything here is total: missing or empty logs degrade to zeros and
//! empty views, never to an error.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::types::{GrammarPoint, ItemKind, MarkLevel};

/// Count consecutive study days walking backward from `as_of`.
///
/// `as_of` itself gets a grace pass: a missing entry today does not
/// break yesterday's run, because today may not be over yet. The walk
/// stops at the first missing day strictly before `as_of`, or at the
/// edge of the trailing window.
pub fn compute_streak(dates: &HashSet<NaiveDate>, as_of: NaiveDate, window_days: u32) -> u32 {
    let mut count = 0;
    for offset in 0..window_days as i64 {
        let day = as_of - Duration::days(offset);
        if dates.contains(&day) {
            count += 1;
        } else if offset > 0 {
            break;
        }
    }
    count
}

/// One slot of the Monday-to-Sunday week strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySlot {
    pub label: char,
    pub date: NaiveDate,
    pub studied: bool,
}

const DAY_LABELS: [char; 7] = ['M', 'T', 'W', 'T', 'F', 'S', 'S'];

/// Build the 7-slot strip for the calendar week containing `as_of`.
pub fn build_week_view(dates: &HashSet<NaiveDate>, as_of: NaiveDate) -> Vec<DaySlot> {
    let monday = as_of - Duration::days(as_of.weekday().num_days_from_monday() as i64);
    (0..7)
        .map(|i| {
            let date = monday + Duration::days(i);
            DaySlot {
                label: DAY_LABELS[i as usize],
                date,
                studied: dates.contains(&date),
            }
        })
        .collect()
}

/// Current mark per item, last write wins.
///
/// The store may keep marks as upserted rows; the read side is exactly
/// this map keyed by (kind, item id). Inserting for an existing key
/// replaces the prior level.
#[derive(Debug, Clone, Default)]
pub struct MarkMap {
    marks: HashMap<(ItemKind, i64), MarkLevel>,
}

impl MarkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ItemKind, item_id: i64, level: MarkLevel) {
        self.marks.insert((kind, item_id), level);
    }

    /// Latest mark for an item, or `None` if it was never marked.
    pub fn current(&self, kind: ItemKind, item_id: i64) -> Option<MarkLevel> {
        self.marks.get(&(kind, item_id)).copied()
    }

    /// Items carrying any mark at all, including level 0.
    pub fn marked_total(&self) -> usize {
        self.marks.len()
    }

    /// Count of current marks per level, indexed 0-5.
    pub fn counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for level in self.marks.values() {
            counts[level.to_value() as usize] += 1;
        }
        counts
    }

    /// Items at levels 2-5, the dashboard's "needs review" figure.
    pub fn needs_review(&self) -> usize {
        self.marks.values().filter(|l| l.needs_review()).count()
    }
}

/// Percent of items carrying any current mark, rounded to the nearest
/// integer. Zero items is 0%, not a division.
pub fn percent_complete(items: &[GrammarPoint], marks: &MarkMap) -> u32 {
    if items.is_empty() {
        return 0;
    }
    let marked = items
        .iter()
        .filter(|p| marks.current(ItemKind::Grammar, p.id).is_some())
        .count();
    ((marked as f64 / items.len() as f64) * 100.0).round() as u32
}

/// Completion percentage for one study week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekProgress {
    pub week: i32,
    pub percent: u32,
}

/// Per-week completion over the distinct week numbers in the catalog,
/// ascending.
pub fn weekly_progress(points: &[GrammarPoint], marks: &MarkMap) -> Vec<WeekProgress> {
    let mut weeks: Vec<i32> = points.iter().map(|p| p.week).collect();
    weeks.sort_unstable();
    weeks.dedup();

    weeks
        .into_iter()
        .map(|week| {
            let items: Vec<GrammarPoint> = points
                .iter()
                .filter(|p| p.week == week)
                .cloned()
                .collect();
            WeekProgress {
                week,
                percent: percent_complete(&items, marks),
            }
        })
        .collect()
}

/// Pooled quiz accuracy: total correct over total asked, in percent.
///
/// Pooling (rather than averaging per-quiz percentages) keeps short
/// quizzes from dominating the figure. Zero questions is 0.
pub fn quiz_accuracy(results: impl IntoIterator<Item = (u32, u32)>) -> u32 {
    let (mut correct, mut total) = (0u64, 0u64);
    for (c, t) in results {
        correct += c as u64;
        total += t as u64;
    }
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}
