//! Generic CRUD handlers shared by users, employers and listings.
//!
//! Each handler is instantiated per kind (`handle_list::<User>`, ...) and pulls
//! that kind's store out of `AppState` through `FromRef`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::{Resource, ResourceId};
use crate::store::ResourceStore;

type Store<R> = State<Arc<dyn ResourceStore<R>>>;

/// GET /{collection}
/// Responds with `{ "<collection>": [...] }` in store order.
pub async fn handle_list<R: Resource>(
    State(store): Store<R>,
) -> Result<Json<HashMap<&'static str, Vec<R>>>, AppError> {
    let items = store.list().await?;
    Ok(Json(HashMap::from([(R::COLLECTION, items)])))
}

/// POST /{collection}
pub async fn handle_create<R: Resource>(
    State(store): Store<R>,
    payload: Result<Json<R::Draft>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), AppError> {
    let Json(draft) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let created = store.insert(draft).await?;
    info!("Created {} {}", R::KIND, created.id());

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /{collection}/:id
pub async fn handle_get<R: Resource>(
    State(store): Store<R>,
    path: Result<Path<ResourceId>, PathRejection>,
) -> Result<Json<R>, AppError> {
    let Path(id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(store.get(id).await?))
}

/// DELETE /{collection}/:id
pub async fn handle_delete<R: Resource>(
    State(store): Store<R>,
    path: Result<Path<ResourceId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path.map_err(|e| AppError::Validation(e.body_text()))?;

    store.delete(id).await?;
    info!("Deleted {} {id}", R::KIND);

    Ok(StatusCode::NO_CONTENT)
}
