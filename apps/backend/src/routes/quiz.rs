//! Quiz endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use rand::seq::SliceRandom;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;
use bunpo_core::error::QuizError;
use bunpo_core::quiz::{generate_group_quiz, generate_mixed_quiz};

/// GET /api/quiz/group/:group_id
///
/// Serves generated questions when the group's example data supports
/// them, otherwise falls back to the stored bank for the group, then to
/// the stored bank at large.
pub async fn group(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Path(group_id): Path<String>,
) -> Result<Json<QuizResponse>> {
    state
        .db
        .get_grammar_group(&group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Unknown group: {}", group_id)))?;

    let points: Vec<GrammarPoint> = state
        .db
        .get_grammar_points(None, None, Some(&group_id))
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();

    match generate_group_quiz(&points, &group_id) {
        Ok(questions) if !questions.is_empty() => {
            return Ok(Json(QuizResponse {
                mode: QuizMode::Group,
                group_id: Some(group_id),
                source: QuestionSource::Generated,
                questions,
            }));
        }
        Ok(_) => {
            tracing::debug!(%group_id, "No generatable questions, using stored bank");
        }
        Err(QuizError::InsufficientGroupSize { size, .. }) => {
            tracing::debug!(%group_id, size, "Group too small to quiz, using stored bank");
        }
        Err(err @ QuizError::DuplicatePattern { .. }) => {
            return Err(ApiError::CatalogIntegrity(err.to_string()));
        }
    }

    let mut stored = state.db.get_quiz_questions(Some(&group_id)).await?;
    if stored.is_empty() {
        stored = state.db.get_quiz_questions(None).await?;
    }

    Ok(Json(QuizResponse {
        mode: QuizMode::Group,
        group_id: Some(group_id),
        source: QuestionSource::Stored,
        questions: stored.iter().map(|q| q.to_question()).collect(),
    }))
}

/// GET /api/quiz/mixed
pub async fn mixed(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
) -> Result<Json<QuizResponse>> {
    let points: Vec<GrammarPoint> = state
        .db
        .get_grammar_points(None, None, None)
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();
    let groups: Vec<GrammarGroup> = state
        .db
        .get_grammar_groups()
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();

    // ThreadRng is !Send, so it must not be held across an await.
    let questions = generate_mixed_quiz(&points, &groups, &mut rand::thread_rng())
        .map_err(|err| ApiError::CatalogIntegrity(err.to_string()))?;

    if !questions.is_empty() {
        return Ok(Json(QuizResponse {
            mode: QuizMode::Random,
            group_id: None,
            source: QuestionSource::Generated,
            questions,
        }));
    }

    tracing::debug!("No generatable questions in any group, using stored bank");

    let stored = state.db.get_quiz_questions(None).await?;
    if stored.is_empty() {
        tracing::warn!("Stored question bank is empty, serving an empty quiz");
    }
    let mut questions: Vec<Question> = stored.iter().map(|q| q.to_question()).collect();
    questions.shuffle(&mut rand::thread_rng());

    Ok(Json(QuizResponse {
        mode: QuizMode::Random,
        group_id: None,
        source: QuestionSource::Stored,
        questions,
    }))
}

/// POST /api/quiz/results
pub async fn submit_result(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SubmitQuizResultRequest>,
) -> Result<Json<SubmitQuizResultResponse>> {
    let mode = QuizMode::from_str(&payload.quiz_mode)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown quiz mode: {}", payload.quiz_mode)))?;

    if payload.total_questions < 0 || payload.correct_answers < 0 {
        return Err(ApiError::BadRequest("Counts must be non-negative".to_string()));
    }
    if payload.correct_answers > payload.total_questions {
        return Err(ApiError::BadRequest(
            "Correct answers exceed total questions".to_string(),
        ));
    }

    let result_id = state
        .db
        .insert_quiz_result(
            auth.user_id,
            mode.as_str(),
            payload.group_id.as_deref(),
            payload.total_questions,
            payload.correct_answers,
            &payload.answers,
        )
        .await?;

    Ok(Json(SubmitQuizResultResponse { result_id }))
}

/// GET /api/quiz/results
pub async fn results(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<QuizResultsQuery>,
) -> Result<Json<QuizResultsResponse>> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let rows = state.db.get_recent_results(auth.user_id, limit).await?;

    Ok(Json(QuizResultsResponse {
        results: rows.iter().map(|r| r.to_view()).collect(),
    }))
}
