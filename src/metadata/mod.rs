//! Problem metadata client
//!
//! Fetches the public problem listing (a flat JSON array of
//! `{id, contest_id, title}` records) from a configurable endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the metadata endpoint
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Metadata endpoint returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// One problem's metadata
///
/// Serialized camelCase for the consumer-facing JSON; the endpoint's own
/// records are snake_case and decoded separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub contest_id: String,
    pub title: String,
}

#[derive(Deserialize)]
struct ProblemRecord {
    id: String,
    contest_id: String,
    title: String,
}

/// Client for the problem-metadata endpoint
pub struct ProblemsClient {
    http: reqwest::Client,
    problems_url: String,
}

impl ProblemsClient {
    pub fn new(problems_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            problems_url: problems_url.into(),
        }
    }

    /// Fetches the full problem listing.
    ///
    /// A non-success status is surfaced with the response body attached; no
    /// retries are attempted.
    pub async fn fetch_problems(&self) -> Result<Vec<Problem>, MetadataError> {
        let response = self.http.get(&self.problems_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let records: Vec<ProblemRecord> = response.json().await?;
        tracing::info!("Fetched metadata for {} problems", records.len());

        Ok(records
            .into_iter()
            .map(|r| Problem {
                id: r.id,
                contest_id: r.contest_id,
                title: r.title,
            })
            .collect())
    }
}
