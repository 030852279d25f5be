// src/job_search/transport.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config_manager::SearchConfig;

/// Query parameters in the order they are sent
pub type QueryParams = Vec<(&'static str, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Account,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "/search.json",
            Endpoint::Account => "/account.json",
        }
    }
}

/// Issues one GET against the provider and hands back the decoded JSON body
#[rocket::async_trait]
pub trait SearchTransport: Send + Sync {
    async fn get_json(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value>;
}

pub struct SerpApiTransport {
    client: Client,
    base_url: String,
}

impl SerpApiTransport {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[rocket::async_trait]
impl SearchTransport for SerpApiTransport {
    async fn get_json(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .context("Failed to send request to SerpApi")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read SerpApi response body")?;

        // SerpApi reports most failures as {"error": "..."} with a 4xx status;
        // hand those back so callers can read the message.
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                if !status.is_success() {
                    warn!("SerpApi returned {} for {}", status, endpoint.path());
                }
                Ok(value)
            }
            Err(e) if status.is_success() => {
                Err(e).context("Failed to parse SerpApi response")
            }
            Err(_) => anyhow::bail!("SerpApi returned error {}: {}", status, body),
        }
    }
}
