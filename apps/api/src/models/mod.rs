//! Stored entity types and the `Resource` contract shared by every store backend.

pub mod employer;
pub mod listing;
pub mod user;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

pub use employer::{Employer, NewEmployer};
pub use listing::{JobListing, NewJobListing};
pub use user::{NewUser, User};

/// Store-assigned identifier. Never reused within a running store.
pub type ResourceId = i64;

/// An entity kind held by a Resource Store.
///
/// `Draft` is the create payload: every field except the ones the store assigns.
pub trait Resource: Clone + Serialize + Send + Sync + Unpin + 'static {
    type Draft: DeserializeOwned + Send + Sync + 'static;

    /// Human-readable kind, used in error messages and logs.
    const KIND: &'static str;
    /// Key under which list responses are returned.
    const COLLECTION: &'static str;

    fn id(&self) -> ResourceId;

    fn from_draft(id: ResourceId, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;
}
