use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Resource, ResourceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employer {
    pub id: ResourceId,
    pub employer_name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployer {
    pub employer_name: String,
    pub username: String,
}

impl Resource for Employer {
    type Draft = NewEmployer;

    const KIND: &'static str = "Employer";
    const COLLECTION: &'static str = "employers";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn from_draft(id: ResourceId, created_at: DateTime<Utc>, draft: NewEmployer) -> Self {
        Employer {
            id,
            employer_name: draft.employer_name,
            username: draft.username,
            created_at,
        }
    }
}
