//! Catalog endpoints. All read-only: the grammar catalog is reference
//! data provisioned out-of-band.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/catalog/points
pub async fn points(
    State(state): State<AppState>,
    Query(query): Query<CatalogPointsQuery>,
) -> Result<Json<CatalogPointsResponse>> {
    let rows = state
        .db
        .get_grammar_points(query.week, query.day, query.group_id.as_deref())
        .await?;

    Ok(Json(CatalogPointsResponse {
        points: rows.iter().map(|r| r.to_core()).collect(),
    }))
}

/// GET /api/catalog/groups
pub async fn groups(State(state): State<AppState>) -> Result<Json<CatalogGroupsResponse>> {
    let rows = state.db.get_grammar_groups().await?;

    Ok(Json(CatalogGroupsResponse {
        groups: rows.iter().map(|r| r.to_core()).collect(),
    }))
}

/// GET /api/catalog/conjunctions
pub async fn conjunctions(
    State(state): State<AppState>,
) -> Result<Json<CatalogConjunctionsResponse>> {
    let rows = state.db.get_conjunctions().await?;

    Ok(Json(CatalogConjunctionsResponse {
        conjunctions: rows.iter().map(|r| r.to_core()).collect(),
    }))
}
