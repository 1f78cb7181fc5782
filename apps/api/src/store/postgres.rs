use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::info;

use super::{not_found, ResourceStore};
use crate::errors::AppError;
use crate::models::{
    Employer, JobListing, NewEmployer, NewJobListing, NewUser, Resource, ResourceId, User,
};

/// A resource kind with its own PostgreSQL table.
///
/// Only the INSERT differs per kind; list/get/delete are shared by `PgStore`.
#[async_trait]
pub trait PgResource: Resource + for<'r> FromRow<'r, PgRow> {
    const TABLE: &'static str;

    async fn insert_row(pool: &PgPool, draft: Self::Draft) -> Result<Self, sqlx::Error>;
}

/// PostgreSQL backend. Ids come from each table's `BIGSERIAL` sequence.
pub struct PgStore<R> {
    pool: PgPool,
    _kind: PhantomData<fn() -> R>,
}

impl<R> PgStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<R: PgResource> ResourceStore<R> for PgStore<R> {
    async fn insert(&self, draft: R::Draft) -> Result<R, AppError> {
        let entity = R::insert_row(&self.pool, draft).await?;
        info!("Inserted {} {} into {}", R::KIND, entity.id(), R::TABLE);
        Ok(entity)
    }

    async fn list(&self) -> Result<Vec<R>, AppError> {
        let sql = format!("SELECT * FROM {} ORDER BY id", R::TABLE);
        let rows = sqlx::query_as::<_, R>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, id: ResourceId) -> Result<R, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", R::TABLE);
        sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found::<R>(id))
    }

    async fn delete(&self, id: ResourceId) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<R>(id));
        }

        info!("Deleted {} {id} from {}", R::KIND, R::TABLE);
        Ok(())
    }
}

#[async_trait]
impl PgResource for User {
    const TABLE: &'static str = "users";

    async fn insert_row(pool: &PgPool, draft: NewUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, username)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(draft.first_name)
        .bind(draft.last_name)
        .bind(draft.username)
        .fetch_one(pool)
        .await
    }
}

#[async_trait]
impl PgResource for Employer {
    const TABLE: &'static str = "employers";

    async fn insert_row(pool: &PgPool, draft: NewEmployer) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Employer>(
            "INSERT INTO employers (employer_name, username) VALUES ($1, $2) RETURNING *",
        )
        .bind(draft.employer_name)
        .bind(draft.username)
        .fetch_one(pool)
        .await
    }
}

#[async_trait]
impl PgResource for JobListing {
    const TABLE: &'static str = "job_listings";

    async fn insert_row(pool: &PgPool, draft: NewJobListing) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, JobListing>(
            r#"
            INSERT INTO job_listings
                (title, location, employment_type, experience, salary)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(draft.title)
        .bind(draft.location)
        .bind(draft.employment_type)
        .bind(draft.experience)
        .bind(draft.salary)
        .fetch_one(pool)
        .await
    }
}
