//! Similar jobs for a listing: joins one stored listing to remote postings.
//!
//! Policy:
//! - The listing must exist; an unknown id never reaches the upstream.
//! - The search term is the listing title, verbatim. Location, type, experience
//!   and salary are not sent; the match is a loose title search.
//! - Any upstream failure fails the request. There is no partial or cached result.
//! - Raw records are truncated to `limit` once, here, whatever the upstream honored.

pub mod handlers;

use std::num::NonZeroU32;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{JobListing, ResourceId};
use crate::remote_jobs::{MatchSource, RawCandidate};
use crate::store::ResourceStore;

pub const DEFAULT_LIMIT: u32 = 5;

/// What to do with an upstream record that lacks a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole request with `MalformedUpstreamResponse`.
    #[default]
    Strict,
    /// Drop the record, log it, and keep the rest.
    Lenient,
}

/// An upstream posting shaped into the fields this service exposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteMatch {
    pub title: String,
    pub company: String,
    pub url: String,
    pub publication_date: String,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarJobs {
    pub local_listing: JobListing,
    pub remote_matches: Vec<RemoteMatch>,
}

#[derive(Clone)]
pub struct SimilarityService {
    listings: Arc<dyn ResourceStore<JobListing>>,
    source: Arc<dyn MatchSource>,
    policy: MalformedPolicy,
}

impl SimilarityService {
    pub fn new(
        listings: Arc<dyn ResourceStore<JobListing>>,
        source: Arc<dyn MatchSource>,
        policy: MalformedPolicy,
    ) -> Self {
        Self {
            listings,
            source,
            policy,
        }
    }

    /// Returns the listing unchanged plus at most `limit` remote matches in upstream order.
    pub async fn find_similar(
        &self,
        listing_id: ResourceId,
        limit: u32,
    ) -> Result<SimilarJobs, AppError> {
        let limit = NonZeroU32::new(limit)
            .ok_or_else(|| AppError::Validation("limit must be a positive integer".to_string()))?;

        let listing = self.listings.get(listing_id).await?;

        let raw = self.source.search(&listing.title, limit).await?;
        let reported = raw.len();
        let remote_matches = self.shape(raw, limit)?;

        info!(
            "Listing {listing_id}: {} of {reported} {} results kept (limit {limit})",
            remote_matches.len(),
            self.source.name()
        );

        Ok(SimilarJobs {
            local_listing: listing,
            remote_matches,
        })
    }

    fn shape(
        &self,
        raw: Vec<RawCandidate>,
        limit: NonZeroU32,
    ) -> Result<Vec<RemoteMatch>, AppError> {
        let mut matches = Vec::with_capacity(raw.len().min(limit.get() as usize));

        for (index, record) in raw.iter().take(limit.get() as usize).enumerate() {
            match project(record) {
                Ok(remote) => matches.push(remote),
                Err(field) => {
                    let reason = format!("record {index} is missing required field '{field}'");
                    match self.policy {
                        MalformedPolicy::Strict => {
                            return Err(AppError::MalformedUpstreamResponse(reason))
                        }
                        MalformedPolicy::Lenient => warn!("Skipping upstream {reason}"),
                    }
                }
            }
        }

        Ok(matches)
    }
}

/// Projects one raw record. On failure returns the name of the first missing field.
fn project(record: &RawCandidate) -> Result<RemoteMatch, &'static str> {
    let required = |field: &'static str| {
        record
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(field)
    };

    Ok(RemoteMatch {
        title: required("title")?,
        company: required("company_name")?,
        url: required("url")?,
        publication_date: required("publication_date")?,
        salary: record
            .get("salary")
            .and_then(Value::as_str)
            .map(str::to_owned),
    })
}
