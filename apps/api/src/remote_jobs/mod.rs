/// Remote jobs client — the single outbound call this service makes.
///
/// The client performs the search and returns the upstream `jobs` list untouched.
/// Field-level shaping belongs to `similarity`, so a different provider only
/// needs another `MatchSource` implementation.
///
/// No retries: the upstream's idempotency and rate limits are unknown, so a
/// failed call is reported once and the caller decides what to do.
use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Non-success bodies are cut to this many characters before being kept in an error.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// One upstream job record, exactly as the provider sent it.
pub type RawCandidate = serde_json::Value;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("could not connect to upstream: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode upstream response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
}

/// A searchable source of remote job postings.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    async fn search(&self, term: &str, limit: NonZeroU32)
        -> Result<Vec<RawCandidate>, MatchError>;
}

#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    search: &'a str,
    limit: NonZeroU32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    jobs: Vec<RawCandidate>,
}

/// Client for the Remotive "remote jobs" search endpoint.
#[derive(Clone)]
pub struct RemotiveClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl RemotiveClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, MatchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MatchError::Http)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    fn classify(&self, error: reqwest::Error) -> MatchError {
        if error.is_timeout() {
            MatchError::Timeout(self.timeout)
        } else if error.is_connect() {
            MatchError::Connect(error)
        } else if error.is_decode() {
            MatchError::Decode(error)
        } else {
            MatchError::Http(error)
        }
    }
}

#[async_trait]
impl MatchSource for RemotiveClient {
    fn name(&self) -> &str {
        "remotive"
    }

    async fn search(
        &self,
        term: &str,
        limit: NonZeroU32,
    ) -> Result<Vec<RawCandidate>, MatchError> {
        let params = SearchParams {
            search: term,
            limit,
        };

        debug!("Searching {} for {:?} (limit {})", self.endpoint, term, limit);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MatchError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| self.classify(e))?;

        debug!("Upstream returned {} jobs for {:?}", body.jobs.len(), term);
        Ok(body.jobs)
    }
}


#[cfg(test)]
pub mod testing;
