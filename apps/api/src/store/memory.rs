use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{not_found, ResourceStore};
use crate::errors::AppError;
use crate::models::{Resource, ResourceId};

/// In-memory backend. Contents live as long as the process.
///
/// Ids come from a per-store counter that only moves forward, so a deleted id
/// is never handed out again.
pub struct MemoryStore<R> {
    table: RwLock<Table<R>>,
}

struct Table<R> {
    last_id: ResourceId,
    rows: BTreeMap<ResourceId, R>,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for MemoryStore<R> {
    async fn insert(&self, draft: R::Draft) -> Result<R, AppError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;

        let entity = R::from_draft(id, Utc::now(), draft);
        table.rows.insert(id, entity.clone());
        debug!("Stored {} {id} in memory", R::KIND);

        Ok(entity)
    }

    async fn list(&self) -> Result<Vec<R>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: ResourceId) -> Result<R, AppError> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or_else(|| not_found::<R>(id))
    }

    async fn delete(&self, id: ResourceId) -> Result<(), AppError> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found::<R>(id))
    }
}
