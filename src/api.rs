//! Thin blocking client for the ITJobs REST API.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{Job, ListResponse};
use crate::settings::Settings;

/// Contract-type id the search endpoint uses for part-time positions.
pub const TYPE_PART_TIME: u32 = 2;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no API key configured (set ITJOBS_API_KEY)")]
    MissingKey,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("API rejected the request: {0}")]
    Upstream(String),
    #[error("unexpected response shape from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct JobsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl JobsClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        if settings.api_key.trim().is_empty() {
            return Err(ApiError::MissingKey);
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(JobsClient {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// One page of the newest-first listing feed.
    pub fn list_page(&self, page: u32, limit: u32) -> Result<Vec<Job>, ApiError> {
        let response: ListResponse = self.get(
            "job/list.json",
            &[("limit", limit.to_string()), ("page", page.to_string())],
        )?;
        Ok(response.results)
    }

    /// The `limit` most recent listings.
    pub fn list_top(&self, limit: u32) -> Result<Vec<Job>, ApiError> {
        self.list_page(1, limit)
    }

    /// Part-time listings matching a company query within one district.
    pub fn search_part_time(
        &self,
        company: &str,
        district_id: u32,
        limit: u32,
    ) -> Result<Vec<Job>, ApiError> {
        let response: ListResponse = self.get(
            "job/search.json",
            &[
                ("q", company.to_string()),
                ("type", TYPE_PART_TIME.to_string()),
                ("location", district_id.to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        Ok(response.results)
    }

    /// One listing by id.
    pub fn get_job(&self, id: u64) -> Result<Job, ApiError> {
        self.get("job/get.json", &[("id", id.to_string())])
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, "requesting");
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()?
            .error_for_status()?;
        let payload: Value = response.json()?;
        decode_payload(endpoint, payload)
    }
}

/// The API reports its own failures inside a 200 response, as
/// `{"error": {"message": ...}}`. Surface those before the typed decode.
fn decode_payload<T: DeserializeOwned>(endpoint: &str, payload: Value) -> Result<T, ApiError> {
    if let Some(error) = payload.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown API error")
            .to_string();
        return Err(ApiError::Upstream(message));
    }
    serde_json::from_value(payload).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

// ── Tests ──
