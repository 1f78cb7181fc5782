use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Resource, ResourceId};

/// A job seeker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: ResourceId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl Resource for User {
    type Draft = NewUser;

    const KIND: &'static str = "User";
    const COLLECTION: &'static str = "users";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn from_draft(id: ResourceId, created_at: DateTime<Utc>, draft: NewUser) -> Self {
        User {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            username: draft.username,
            created_at,
        }
    }
}
