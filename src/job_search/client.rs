// src/job_search/client.rs
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use super::transport::{Endpoint, QueryParams, SearchTransport, SerpApiTransport};
use super::types::{lenient_list, JobDetail, JobSummary, Quota, SearchResults};
use crate::core::config_manager::SearchConfig;

const JOBS_ENGINE: &str = "google_jobs";
const LISTING_ENGINE: &str = "google_jobs_listing";

pub struct SearchClient {
    transport: Box<dyn SearchTransport>,
    api_key: String,
    language: String,
}

impl SearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let transport = SerpApiTransport::new(config)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: &SearchConfig, transport: impl SearchTransport + 'static) -> Self {
        if config.api_key.is_empty() {
            warn!("No SerpApi key configured; provider calls will be rejected");
        }

        Self {
            transport: Box::new(transport),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        }
    }

    pub fn build_query(role: &str, location: &str) -> String {
        format!("{} {}", role, location)
    }

    /// Remaining searches on the plan. Never fails.
    pub async fn check_quota(&self) -> Quota {
        let params: QueryParams = vec![("api_key", self.api_key.clone())];

        let account = match self.transport.get_json(Endpoint::Account, &params).await {
            Ok(account) => account,
            Err(e) => {
                warn!("Quota check failed: {:#}", e);
                return Quota::Unavailable;
            }
        };

        if let Some(error) = error_text(&account) {
            warn!("Quota check rejected by provider: {}", error);
            return Quota::Unavailable;
        }

        match account.get("plan_searches_left") {
            None => Quota::Remaining(0),
            Some(left) => match left.as_i64() {
                Some(left) => Quota::Remaining(left),
                None => {
                    warn!("Unexpected plan_searches_left value: {}", left);
                    Quota::Unavailable
                }
            },
        }
    }

    /// First page of Google Jobs results for `"{role} {location}"`
    pub async fn search_jobs(&self, role: &str, location: &str) -> Result<SearchResults> {
        let query = Self::build_query(role, location);
        info!("Searching jobs: {}", query);

        let params: QueryParams = vec![
            ("engine", JOBS_ENGINE.to_string()),
            ("q", query),
            ("api_key", self.api_key.clone()),
            ("hl", self.language.clone()),
        ];

        let response = self.transport.get_json(Endpoint::Search, &params).await?;

        if let Some(error) = error_text(&response) {
            warn!("Job search returned provider error: {}", error);
            return Ok(SearchResults {
                jobs: Vec::new(),
                error: Some(error),
            });
        }

        let jobs = match response.get("jobs_results") {
            Some(results) => lenient_list::<_, JobSummary>(results.clone())
                .context("Failed to parse jobs_results")?,
            None => Vec::new(),
        };

        info!("Job search returned {} results", jobs.len());
        Ok(SearchResults { jobs, error: None })
    }

    /// Description and apply options for one listing
    pub async fn fetch_details(&self, job_id: Option<&str>) -> Result<JobDetail> {
        let job_id = match job_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => anyhow::bail!("Job has no identifier; cannot fetch details"),
        };

        info!("Fetching listing details for {}", job_id);

        let params: QueryParams = vec![
            ("engine", LISTING_ENGINE.to_string()),
            ("q", job_id.to_string()),
            ("api_key", self.api_key.clone()),
        ];

        let response = self.transport.get_json(Endpoint::Search, &params).await?;

        if let Some(error) = error_text(&response) {
            anyhow::bail!("Listing lookup failed: {}", error);
        }

        serde_json::from_value(response).context("Failed to parse listing details")
    }
}

fn error_text(response: &Value) -> Option<String> {
    match response.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
