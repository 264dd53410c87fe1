//! Daily study activity endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/activity
pub async fn record(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<RecordActivityRequest>,
) -> Result<Json<RecordActivityResponse>> {
    let kind = match payload.activity.as_str() {
        "flashcard" => ActivityKind::Flashcard,
        "quiz" => ActivityKind::Quiz,
        other => {
            return Err(ApiError::BadRequest(format!("Unknown activity: {}", other)));
        }
    };

    let today = Utc::now().date_naive();
    let entry = state
        .db
        .record_activity(auth.user_id, today, kind.as_str())
        .await?;

    Ok(Json(RecordActivityResponse {
        study_date: entry.study_date,
        activities: entry.activities,
    }))
}

/// GET /api/activity/dates
pub async fn dates(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<ActivityDatesQuery>,
) -> Result<Json<ActivityDatesResponse>> {
    let window_days = query.window_days.unwrap_or(30).min(730);
    let dates = state.db.get_activity_dates(auth.user_id, window_days).await?;

    Ok(Json(ActivityDatesResponse { dates }))
}
