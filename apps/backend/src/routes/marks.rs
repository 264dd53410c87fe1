//! Card mark endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;
use bunpo_core::progress::MarkMap;

/// Fold current mark rows into the aggregate map. Rows that fail the
/// kind or level parse are skipped; the table's CHECK constraints make
/// that unreachable in practice.
pub fn mark_map_from_rows(rows: &[DbCardMark]) -> MarkMap {
    let mut marks = MarkMap::new();
    for row in rows {
        let Some(kind) = ItemKind::from_str(&row.item_kind) else {
            continue;
        };
        let Some(level) = MarkLevel::from_value(row.mark_level.clamp(0, 255) as u8) else {
            continue;
        };
        marks.insert(kind, row.item_id, level);
    }
    marks
}

/// PUT /api/marks
pub async fn upsert(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<UpsertMarkRequest>,
) -> Result<Json<MarkEntry>> {
    let kind = ItemKind::from_str(&payload.item_kind)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown item kind: {}", payload.item_kind)))?;
    let level = MarkLevel::from_value(payload.level)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid mark level: {}", payload.level)))?;

    let mark = state
        .db
        .upsert_mark(auth.user_id, kind, payload.item_id, level)
        .await?;

    Ok(Json(MarkEntry {
        item_kind: mark.item_kind,
        item_id: mark.item_id,
        level: mark.mark_level as u8,
    }))
}

/// GET /api/marks
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<MarksResponse>> {
    let rows = state.db.get_marks(auth.user_id).await?;

    Ok(Json(MarksResponse {
        marks: rows
            .into_iter()
            .map(|row| MarkEntry {
                item_kind: row.item_kind,
                item_id: row.item_id,
                level: row.mark_level as u8,
            })
            .collect(),
    }))
}

/// GET /api/marks/counts
pub async fn counts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<MarkCountsResponse>> {
    let rows = state.db.get_marks(auth.user_id).await?;
    let marks = mark_map_from_rows(&rows);

    Ok(Json(MarkCountsResponse {
        counts: marks.counts(),
        marked_total: marks.marked_total(),
        needs_review: marks.needs_review(),
    }))
}
