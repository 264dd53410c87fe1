//! Progress dashboard endpoint.
//!
//! One composite read: the streak, the week strip, mark tallies, quiz
//! accuracy, and per-week and per-group mastery, assembled from the
//! aggregation functions in bunpo-core.

use std::collections::HashSet;

use axum::{extract::State, Extension, Json};
use chrono::{NaiveDate, Utc};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::routes::marks::mark_map_from_rows;
use crate::AppState;
use bunpo_core::progress::{
    build_week_view, compute_streak, percent_complete, quiz_accuracy, weekly_progress,
};

/// Wider than the 30-day default of GET /api/activity/dates on purpose:
/// the dashboard should not cap a long-running streak at a month.
const STREAK_WINDOW_DAYS: u32 = 365;
const ACCURACY_SAMPLE: i64 = 100;
const RECENT_RESULTS: usize = 10;

/// GET /api/progress/summary
pub async fn summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ProgressSummaryResponse>> {
    let today = Utc::now().date_naive();

    let dates: HashSet<NaiveDate> = state
        .db
        .get_activity_dates(auth.user_id, STREAK_WINDOW_DAYS)
        .await?
        .into_iter()
        .collect();

    let mark_rows = state.db.get_marks(auth.user_id).await?;
    let marks = mark_map_from_rows(&mark_rows);

    let points: Vec<GrammarPoint> = state
        .db
        .get_grammar_points(None, None, None)
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();

    let group_mastery = state
        .db
        .get_grammar_groups()
        .await?
        .into_iter()
        .map(|group| {
            let members: Vec<GrammarPoint> = points
                .iter()
                .filter(|p| p.group_id.as_deref() == Some(group.id.as_str()))
                .cloned()
                .collect();
            GroupMastery {
                percent: percent_complete(&members, &marks),
                group_id: group.id,
                label: group.label,
            }
        })
        .collect();

    let result_rows = state
        .db
        .get_recent_results(auth.user_id, ACCURACY_SAMPLE)
        .await?;
    let accuracy = quiz_accuracy(
        result_rows
            .iter()
            .map(|r| (r.correct_answers.max(0) as u32, r.total_questions.max(0) as u32)),
    );
    let recent_results = result_rows
        .iter()
        .take(RECENT_RESULTS)
        .map(|r| r.to_view())
        .collect();

    Ok(Json(ProgressSummaryResponse {
        streak: compute_streak(&dates, today, STREAK_WINDOW_DAYS),
        week_view: build_week_view(&dates, today),
        mark_counts: marks.counts(),
        marked_total: marks.marked_total(),
        needs_review: marks.needs_review(),
        quiz_accuracy: accuracy,
        weekly_progress: weekly_progress(&points, &marks),
        group_mastery,
        recent_results,
    }))
}
