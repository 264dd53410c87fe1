//! User registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserRegisterRequest>,
) -> Result<Json<UserRegisterResponse>> {
    let user = state.db.create_user(payload.name.as_deref()).await?;

    tracing::info!(user_id = %user.id, "Registered new user");

    Ok(Json(UserRegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/user/status
pub async fn status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UserStatusResponse>> {
    let user = state
        .db
        .get_user_by_token(&auth.token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid user token".to_string()))?;

    Ok(Json(UserStatusResponse {
        user_id: user.id,
        last_seen_at: user.last_seen_at,
    }))
}
