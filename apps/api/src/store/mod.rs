//! Resource Store — the persistence seam for Users, Employers and JobListings.
//!
//! Handlers and the similarity orchestrator only ever see `Arc<dyn ResourceStore<R>>`,
//! so the in-memory and PostgreSQL backends are swapped at startup via `STORE_BACKEND`.
//! Each operation is atomic on its own; there are no cross-entity transactions.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{Resource, ResourceId};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// Assigns a fresh id and stores the entity.
    async fn insert(&self, draft: R::Draft) -> Result<R, AppError>;

    /// All entities in insertion order. A snapshot, not a live view.
    async fn list(&self) -> Result<Vec<R>, AppError>;

    async fn get(&self, id: ResourceId) -> Result<R, AppError>;

    /// Fails with `NotFound` when the id is absent, including on a second delete.
    async fn delete(&self, id: ResourceId) -> Result<(), AppError>;
}

pub(crate) fn not_found<R: Resource>(id: ResourceId) -> AppError {
    AppError::NotFound(format!("{} {id} not found", R::KIND))
}
