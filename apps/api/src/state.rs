use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::config::Config;
use crate::models::{Employer, JobListing, User};
use crate::remote_jobs::MatchSource;
use crate::similarity::SimilarityService;
use crate::store::{MemoryStore, PgStore, ResourceStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn ResourceStore<User>>,
    pub employers: Arc<dyn ResourceStore<Employer>>,
    pub listings: Arc<dyn ResourceStore<JobListing>>,
    /// Holds its own handle to `listings` plus the remote jobs source.
    pub similarity: SimilarityService,
    pub config: Config,
}

impl AppState {
    pub fn new(
        users: Arc<dyn ResourceStore<User>>,
        employers: Arc<dyn ResourceStore<Employer>>,
        listings: Arc<dyn ResourceStore<JobListing>>,
        source: Arc<dyn MatchSource>,
        config: Config,
    ) -> Self {
        let similarity =
            SimilarityService::new(Arc::clone(&listings), source, config.malformed_policy);

        Self {
            users,
            employers,
            listings,
            similarity,
            config,
        }
    }

    /// Every collection lives in process memory and is lost on restart.
    pub fn in_memory(source: Arc<dyn MatchSource>, config: Config) -> Self {
        Self::new(
            Arc::new(MemoryStore::<User>::new()),
            Arc::new(MemoryStore::<Employer>::new()),
            Arc::new(MemoryStore::<JobListing>::new()),
            source,
            config,
        )
    }

    pub fn postgres(pool: PgPool, source: Arc<dyn MatchSource>, config: Config) -> Self {
        Self::new(
            Arc::new(PgStore::<User>::new(pool.clone())),
            Arc::new(PgStore::<Employer>::new(pool.clone())),
            Arc::new(PgStore::<JobListing>::new(pool)),
            source,
            config,
        )
    }
}

// Per-kind sub-states so the generic resource handlers can extract their store.

impl FromRef<AppState> for Arc<dyn ResourceStore<User>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.users)
    }
}

impl FromRef<AppState> for Arc<dyn ResourceStore<Employer>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.employers)
    }
}

impl FromRef<AppState> for Arc<dyn ResourceStore<JobListing>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.listings)
    }
}
