//! Axum route handler for the similar-jobs endpoint.

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ResourceId;
use crate::similarity::{SimilarJobs, DEFAULT_LIMIT};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub limit: Option<i64>,
}

/// GET /listings/:id/similar?limit=N
///
/// 404 for an unknown listing, 400 for a non-positive limit, 502 when the
/// remote jobs service fails or sends records this service cannot shape.
pub async fn handle_similar(
    State(state): State<AppState>,
    path: Result<Path<ResourceId>, PathRejection>,
    query: Result<Query<SimilarQuery>, QueryRejection>,
) -> Result<Json<SimilarJobs>, AppError> {
    let Path(listing_id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let limit = match params.limit {
        None => DEFAULT_LIMIT,
        Some(raw) => u32::try_from(raw).map_err(|_| {
            AppError::Validation(format!("limit must be a positive integer, got {raw}"))
        })?,
    };

    let similar = state.similarity.find_similar(listing_id, limit).await?;
    Ok(Json(similar))
}
