//! In-process `MatchSource` used by orchestrator and router tests.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{MatchError, MatchSource, RawCandidate};

enum Outcome {
    Jobs(Vec<RawCandidate>),
    Timeout,
    Status(u16),
}

/// Records every call and answers with a fixed outcome.
/// Returns all configured jobs regardless of the requested limit.
pub struct StubSource {
    outcome: Outcome,
    calls: AtomicUsize,
    terms: Mutex<Vec<String>>,
}

impl StubSource {
    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            terms: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(jobs: Vec<RawCandidate>) -> Self {
        Self::with(Outcome::Jobs(jobs))
    }

    pub fn timing_out() -> Self {
        Self::with(Outcome::Timeout)
    }

    pub fn failing_with(status: u16) -> Self {
        Self::with(Outcome::Status(status))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatchSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(
        &self,
        term: &str,
        _limit: NonZeroU32,
    ) -> Result<Vec<RawCandidate>, MatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.terms.lock().unwrap().push(term.to_string());

        match &self.outcome {
            Outcome::Jobs(jobs) => Ok(jobs.clone()),
            Outcome::Timeout => Err(MatchError::Timeout(Duration::from_secs(10))),
            Outcome::Status(status) => Err(MatchError::Status {
                status: *status,
                body: "upstream failure".to_string(),
            }),
        }
    }
}

/// `n` well-formed upstream records, numbered from 0 in order.
pub fn candidates(n: usize) -> Vec<RawCandidate> {
    (0..n)
        .map(|i| {
            json!({
                "id": 1000 + i,
                "title": format!("Remote Job {i}"),
                "company_name": format!("Company {i}"),
                "url": format!("https://remotive.com/remote-jobs/software-dev/job-{i}"),
                "publication_date": "2026-10-01T09:00:00",
                "candidate_required_location": "Worldwide",
                "salary": "$100k - $130k"
            })
        })
        .collect()
}
