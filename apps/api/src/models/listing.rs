use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Resource, ResourceId};

/// A locally posted job listing. The only entity the similarity search reads.
///
/// `employment_type` travels as `type` on the wire; the column is `employment_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    pub id: ResourceId,
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub experience: String,
    pub salary: String, // free text, e.g. "120k" or "DOE"
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJobListing {
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub experience: String,
    pub salary: String,
}

impl Resource for JobListing {
    type Draft = NewJobListing;

    const KIND: &'static str = "Listing";
    const COLLECTION: &'static str = "listings";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn from_draft(id: ResourceId, created_at: DateTime<Utc>, draft: NewJobListing) -> Self {
        JobListing {
            id,
            title: draft.title,
            location: draft.location,
            employment_type: draft.employment_type,
            experience: draft.experience,
            salary: draft.salary,
            created_at,
        }
    }
}
